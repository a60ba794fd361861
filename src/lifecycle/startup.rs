//! Startup orchestration.
//!
//! # Responsibilities
//! - Run the startup sequence in strict order: migrations, primary store,
//!   cache store
//! - Route every step through the retry executor with its configured policy
//! - On fatal exhaustion, log cause plus operator remediation steps and
//!   surface an error for the binary to turn into a non-zero exit
//!
//! # Design Decisions
//! - Migrations and the primary store are fatal; the cache is best-effort
//!   and its exhaustion is swallowed with a warning
//! - Primary exhaustion is classified (refused / auth / missing database)
//!   so the remediation hints match what the operator actually has to fix

use std::sync::Arc;

use thiserror::Error;

use crate::config::{ApiConfig, DatabaseConfig, MigrationsConfig, RedisConfig};
use crate::resilience::retry_with_backoff;
use crate::store::primary::{classify_connect_error, ConnectFailureKind};
use crate::store::{migrate, CacheStore, PrimaryStore};

/// Fatal startup failure. The binary maps any of these to a non-zero exit
/// before a listener ever binds.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid database configuration: {0}")]
    DatabaseConfig(#[source] sqlx::Error),

    #[error("schema migrations failed after {attempts} attempts: {source}")]
    Migrations {
        attempts: u32,
        #[source]
        source: sqlx::migrate::MigrateError,
    },

    #[error("primary store unreachable after {attempts} attempts ({kind}): {source}")]
    Primary {
        attempts: u32,
        kind: ConnectFailureKind,
        #[source]
        source: sqlx::Error,
    },
}

/// Run the full startup sequence and hand back the two long-lived store
/// handles. The caller binds the listener only after this returns `Ok`.
pub async fn bring_up(config: &ApiConfig) -> Result<(Arc<PrimaryStore>, Arc<CacheStore>), StartupError> {
    let primary = PrimaryStore::new(&config.database).map_err(StartupError::DatabaseConfig)?;

    run_migrations_step(&primary, &config.migrations).await?;
    connect_primary_step(&primary, &config.database).await?;
    let cache = connect_cache_step(&config.redis).await;

    Ok((Arc::new(primary), Arc::new(cache)))
}

/// `Migrating`: apply pending schema changes, fatal on exhaustion.
pub async fn run_migrations_step(
    primary: &PrimaryStore,
    config: &MigrationsConfig,
) -> Result<(), StartupError> {
    let policy = config.retry_policy();
    tracing::info!(
        attempts = policy.max_attempts,
        delay_ms = policy.delay.as_millis() as u64,
        "applying schema migrations"
    );

    match retry_with_backoff(&policy, || migrate::run_pending(primary.pool())).await {
        Ok(()) => {
            tracing::info!("schema migrations applied");
            Ok(())
        }
        Err(source) => {
            tracing::error!(
                error = %source,
                attempts = policy.max_attempts,
                "schema migrations exhausted their retry budget"
            );
            tracing::error!("remediation: verify the database behind DATABASE_URL is reachable and accepting connections");
            tracing::error!("remediation: confirm the configured role may create tables in this database");
            tracing::error!("remediation: inspect the _sqlx_migrations table for a partially applied migration");
            Err(StartupError::Migrations {
                attempts: policy.max_attempts,
                source,
            })
        }
    }
}

/// `ConnectingPrimary`: probe liveness, fatal on exhaustion with
/// category-specific remediation.
pub async fn connect_primary_step(
    primary: &PrimaryStore,
    config: &DatabaseConfig,
) -> Result<(), StartupError> {
    let policy = config.retry_policy();
    tracing::info!(
        attempts = policy.max_attempts,
        delay_ms = policy.delay.as_millis() as u64,
        "probing primary store liveness"
    );

    match retry_with_backoff(&policy, || primary.liveness()).await {
        Ok(()) => {
            tracing::info!("connected to postgres");
            Ok(())
        }
        Err(source) => {
            let kind = classify_connect_error(&source);
            tracing::error!(
                error = %source,
                category = %kind,
                attempts = policy.max_attempts,
                "primary store unreachable, aborting startup"
            );
            log_primary_remediation(kind);
            Err(StartupError::Primary {
                attempts: policy.max_attempts,
                kind,
                source,
            })
        }
    }
}

fn log_primary_remediation(kind: ConnectFailureKind) {
    match kind {
        ConnectFailureKind::Refused => {
            tracing::error!("remediation: confirm postgres is running and the host/port in DATABASE_URL are correct");
            tracing::error!("remediation: under container orchestration, make sure the database service is up before the API");
        }
        ConnectFailureKind::AuthFailed => {
            tracing::error!("remediation: verify the username and password embedded in DATABASE_URL");
            tracing::error!("remediation: check the server's pg_hba.conf rules for this client address");
        }
        ConnectFailureKind::MissingDatabase => {
            tracing::error!("remediation: create the target database (createdb) or point DATABASE_URL at an existing one");
            tracing::error!("remediation: run the provisioning step that creates the database before starting the API");
        }
        ConnectFailureKind::Other => {
            tracing::error!("remediation: inspect the error above; it did not match a known connection failure category");
        }
    }
}

/// `ConnectingCache`: best-effort. Exhaustion is caught and swallowed; the
/// service serves degraded with a closed handle rather than aborting.
pub async fn connect_cache_step(config: &RedisConfig) -> CacheStore {
    let cache = match CacheStore::new(config) {
        Ok(cache) => cache,
        Err(err) => {
            tracing::warn!(error = %err, "cache client could not be created, serving without cache");
            return CacheStore::disconnected();
        }
    };

    let policy = config.retry_policy();
    tracing::info!(
        attempts = policy.max_attempts,
        delay_ms = policy.delay.as_millis() as u64,
        "connecting to cache store"
    );

    match retry_with_backoff(&policy, || cache.connect()).await {
        Ok(()) => tracing::info!("connected to redis"),
        Err(err) => {
            tracing::warn!(
                error = %err,
                attempts = policy.max_attempts,
                "cache store unreachable, serving without cache"
            );
        }
    }

    cache
}
