//! Seed runner: loads development data into the database.

use std::time::Duration;

use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wander_api::store::seed;

#[derive(Debug, Parser)]
#[command(name = "seed", about = "Seed the Wander database with development data")]
struct Args {
    /// PostgreSQL connection string.
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// How long to wait for a connection before giving up, in seconds.
    #[arg(long, default_value_t = 10)]
    connect_timeout_secs: u64,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wander_api=info,seed=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    tracing::info!("starting database seeding");

    let pool = match PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(args.connect_timeout_secs))
        .connect(&args.database_url)
        .await
    {
        Ok(pool) => pool,
        Err(err) => {
            tracing::error!(error = %err, "could not connect to the database");
            std::process::exit(1);
        }
    };

    let result = seed::run(&pool).await;
    pool.close().await;

    match result {
        Ok(()) => tracing::info!("seeding completed successfully"),
        Err(err) => {
            tracing::error!(error = %err, "seeding failed");
            std::process::exit(1);
        }
    }
}
