//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Migrating → ConnectingPrimary → ConnectingCache → Serving
//!     Fatal steps return an error the binary turns into a non-zero exit;
//!     the cache step can only warn.
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → graceful shutdown of the HTTP server
//! ```
//!
//! # Design Decisions
//! - Transitions are strictly sequential and one-directional; each step owns
//!   its own bounded retry, and there is no retry-the-whole-sequence loop
//! - The listener binds only after both fatal steps succeed, so a failed
//!   startup never leaves a half-serving process behind

pub mod signals;
pub mod startup;

pub use startup::{bring_up, StartupError};
