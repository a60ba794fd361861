//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! process environment (DATABASE_URL, REDIS_URL, API_PORT, APP_ENV)
//!     → loader.rs (read & parse, defaults for anything unset)
//!     → validation.rs (semantic checks)
//!     → ApiConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload path
//! - All fields have defaults so a bare environment still boots against
//!   local development services
//! - Validation separates syntactic (parsing) from semantic checks and
//!   reports every violation, not just the first

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_from_env, ConfigError};
pub use schema::{ApiConfig, DatabaseConfig, ListenerConfig, MigrationsConfig, RedisConfig};
