//! HTTP subsystem.
//!
//! # Responsibilities
//! - Build the Axum router over the shared application state
//! - Wire up middleware (tracing, CORS, request timeout)
//! - Serve with graceful shutdown, then release the store handles

pub mod handlers;
pub mod server;

pub use server::{ApiServer, AppState};
