//! Wander API server binary.

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wander_api::http::ApiServer;
use wander_api::{config, lifecycle};

#[tokio::main]
async fn main() {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wander_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "wander-api starting");

    let config = match config::load_from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "invalid configuration");
            std::process::exit(1);
        }
    };

    tracing::info!(
        bind_address = %config.listener.bind_address,
        environment = %config.environment,
        "Configuration loaded"
    );

    // Migrating → ConnectingPrimary → ConnectingCache. Fatal failures have
    // already logged their remediation hints by the time we get an Err.
    let (primary, cache) = match lifecycle::bring_up(&config).await {
        Ok(handles) => handles,
        Err(err) => {
            tracing::error!(error = %err, "startup aborted");
            std::process::exit(1);
        }
    };

    // Serving: the port binds only after both fatal steps succeeded.
    let listener = match TcpListener::bind(&config.listener.bind_address).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!(
                error = %err,
                bind_address = %config.listener.bind_address,
                "failed to bind listener"
            );
            std::process::exit(1);
        }
    };

    let server = ApiServer::new(&config, primary, cache);
    if let Err(err) = server.run(listener).await {
        tracing::error!(error = %err, "server error");
        std::process::exit(1);
    }

    tracing::info!("Shutdown complete");
}
