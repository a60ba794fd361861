//! HTTP server setup.
//!
//! # Responsibilities
//! - Create the Axum Router with all handlers
//! - Wire up middleware (trace, CORS, request timeout)
//! - Serve on a pre-bound listener with graceful shutdown
//! - Release the two long-lived store handles exactly once, after draining

use std::sync::Arc;
use std::time::Duration;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::http::handlers;
use crate::lifecycle::signals::shutdown_signal;
use crate::store::{CacheStore, PrimaryStore};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub primary: Arc<PrimaryStore>,
    pub cache: Arc<CacheStore>,
    pub environment: String,
}

/// HTTP server for the API.
pub struct ApiServer {
    router: Router,
    primary: Arc<PrimaryStore>,
    cache: Arc<CacheStore>,
}

impl ApiServer {
    /// Create a new server over already-initialized store handles.
    pub fn new(config: &ApiConfig, primary: Arc<PrimaryStore>, cache: Arc<CacheStore>) -> Self {
        let state = AppState {
            primary: primary.clone(),
            cache: cache.clone(),
            environment: config.environment.clone(),
        };

        let router = Self::build_router(config, state);
        Self {
            router,
            primary,
            cache,
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ApiConfig, state: AppState) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .route("/api/status", get(handlers::status))
            .route("/api/users", get(handlers::list_users))
            .route("/api/users/{id}", get(handlers::get_user))
            .route("/api/posts", get(handlers::list_posts))
            .route("/api/posts/{id}", get(handlers::get_post))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.listener.request_timeout_secs,
            )))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
    }

    /// The router alone, for in-process tests.
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Returns after a shutdown signal once in-flight requests have drained;
    /// the pool and the cache connection are closed here and nowhere else.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server drained, releasing store handles");
        self.primary.close().await;
        self.cache.close().await;
        Ok(())
    }
}
