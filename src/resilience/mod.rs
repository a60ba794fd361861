//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Startup step (migrations, postgres liveness, redis connect):
//!     → backoff.rs (bounded attempts, fixed inter-attempt delay)
//!     → On exhaustion: last error propagated verbatim to the caller
//! ```
//!
//! # Design Decisions
//! - Fixed delay, no jitter, no exponential growth: the retry budget is small
//!   and the worst-case startup latency stays predictable
//! - The executor never decides fatality; each call site does
//! - Health probes bypass this module entirely (point-in-time reads)

pub mod backoff;

pub use backoff::{retry_with_backoff, RetryPolicy};
