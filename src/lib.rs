//! Wander API service library.
//!
//! An HTTP API over PostgreSQL (primary store) and Redis (cache store) with a
//! resilient startup sequence and a tri-state health endpoint.
//!
//! # Architecture Overview
//!
//! ```text
//!  startup (lifecycle::startup):
//!      Migrating -> ConnectingPrimary -> ConnectingCache -> Serving
//!          |              |                  |
//!          | fatal        | fatal            | best-effort (warn + continue)
//!          v              v                  v
//!       Aborted        Aborted         closed cache handle
//!
//!  serving (http::server):
//!      GET /health        -> health::aggregator (fresh probes, tri-state fold)
//!      GET /api/status    -> static service info
//!      GET /api/users...  -> pass-through reads over the primary store
//!      GET /api/posts...  -> pass-through reads over the primary store
//! ```
//!
//! Every startup step runs through the fixed-delay retry executor in
//! [`resilience::backoff`]; health probes never retry.

pub mod config;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod resilience;
pub mod store;

pub use config::ApiConfig;
pub use http::ApiServer;
