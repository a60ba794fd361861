//! Primary store (PostgreSQL) handle.

use std::fmt;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DatabaseConfig;

/// Category of a failed primary-store bring-up, used to pick remediation
/// hints for the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectFailureKind {
    /// Nothing is listening, or the host is not reachable yet.
    Refused,
    /// The server answered but rejected the credentials.
    AuthFailed,
    /// The server answered but the target database does not exist.
    MissingDatabase,
    /// Anything the three categories above do not cover.
    Other,
}

impl fmt::Display for ConnectFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ConnectFailureKind::Refused => "connection refused",
            ConnectFailureKind::AuthFailed => "authentication failed",
            ConnectFailureKind::MissingDatabase => "target database missing",
            ConnectFailureKind::Other => "unclassified failure",
        };
        f.write_str(label)
    }
}

/// Classify a liveness failure into an operator-facing category.
///
/// SQLSTATE 28P01/28000 cover bad credentials, 3D000 covers a missing
/// database. IO errors and pool acquire timeouts both mean nobody usable is
/// answering on the configured address.
pub fn classify_connect_error(err: &sqlx::Error) -> ConnectFailureKind {
    match err {
        sqlx::Error::Database(db) => classify_sqlstate(db.code().as_deref()),
        sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut => ConnectFailureKind::Refused,
        sqlx::Error::Tls(_) => ConnectFailureKind::Refused,
        _ => ConnectFailureKind::Other,
    }
}

fn classify_sqlstate(code: Option<&str>) -> ConnectFailureKind {
    match code {
        Some("28P01") | Some("28000") => ConnectFailureKind::AuthFailed,
        Some("3D000") => ConnectFailureKind::MissingDatabase,
        _ => ConnectFailureKind::Other,
    }
}

/// Long-lived handle around the connection pool.
///
/// The pool is created lazily: construction never touches the network, so the
/// startup sequencer owns the first real connection attempt (through the
/// retry executor) and the migration step before it.
pub struct PrimaryStore {
    pool: PgPool,
}

impl PrimaryStore {
    pub fn new(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_millis(config.acquire_timeout_ms))
            .connect_lazy(&config.url)?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Trivial liveness statement. One attempt, no retry here; retry belongs
    /// to the startup sequencer, and health probes are point-in-time reads.
    pub async fn liveness(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlstates_map_to_documented_categories() {
        assert_eq!(
            classify_sqlstate(Some("28P01")),
            ConnectFailureKind::AuthFailed
        );
        assert_eq!(
            classify_sqlstate(Some("28000")),
            ConnectFailureKind::AuthFailed
        );
        assert_eq!(
            classify_sqlstate(Some("3D000")),
            ConnectFailureKind::MissingDatabase
        );
        assert_eq!(classify_sqlstate(Some("42P01")), ConnectFailureKind::Other);
        assert_eq!(classify_sqlstate(None), ConnectFailureKind::Other);
    }

    #[test]
    fn pool_timeout_reads_as_refused() {
        assert_eq!(
            classify_connect_error(&sqlx::Error::PoolTimedOut),
            ConnectFailureKind::Refused
        );
    }

    #[test]
    fn row_not_found_is_unclassified() {
        assert_eq!(
            classify_connect_error(&sqlx::Error::RowNotFound),
            ConnectFailureKind::Other
        );
    }

    #[tokio::test]
    async fn lazy_pool_construction_never_touches_the_network() {
        // Port 1 on loopback has no listener; construction must still succeed.
        let config = DatabaseConfig {
            url: "postgres://postgres@127.0.0.1:1/wander".to_string(),
            ..DatabaseConfig::default()
        };
        assert!(PrimaryStore::new(&config).is_ok());
    }
}
