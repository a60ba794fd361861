//! Store subsystem.
//!
//! # Data Flow
//! ```text
//! Primary store (primary.rs):
//!     sqlx PgPool, created once at startup, closed once at shutdown
//!     → liveness probe (SELECT 1) for startup gating and health checks
//!     → row queries (models.rs) for the read endpoints
//!
//! Cache store (cache.rs):
//!     redis multiplexed connection behind an open/closed handle
//!     → connect at startup (best-effort), PING at probe time
//!
//! Migrations (migrate.rs) and seeds (seed.rs) run against the same pool.
//! ```
//!
//! # Design Decisions
//! - Both long-lived handles are process-wide; nothing else may close or
//!   replace them mid-lifetime
//! - The cache handle has no reconnection loop: once closed it stays closed
//!   until the process restarts

pub mod cache;
pub mod migrate;
pub mod models;
pub mod primary;
pub mod seed;

use thiserror::Error;

pub use cache::CacheStore;
pub use primary::PrimaryStore;

/// Errors surfaced by the two stores.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("cache error: {0}")]
    Cache(#[from] redis::RedisError),

    #[error("cache connection is not open")]
    CacheClosed,
}
