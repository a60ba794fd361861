//! Schema migration runner.

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::PgPool;

/// Migrations embedded from `migrations/` at build time. sqlx tracks applied
/// versions in its `_sqlx_migrations` table.
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Apply all pending migrations.
pub async fn run_pending(pool: &PgPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_schema_is_embedded() {
        assert!(!MIGRATOR.migrations.is_empty());
        assert_eq!(MIGRATOR.migrations[0].version, 1);
        assert!(MIGRATOR.migrations[0]
            .description
            .contains("initial schema"));
    }
}
