//! Cache store (Redis) handle.
//!
//! # Responsibilities
//! - Hold the single long-lived multiplexed connection
//! - Expose connect / ping / is_open / close to the sequencer and aggregator
//!
//! # Design Decisions
//! - A plain multiplexed connection, not a connection manager: the service
//!   deliberately has no background reconnection, so a lost cache stays lost
//!   (and visible as `degraded`) until restart
//! - The handle tolerates never connecting at all; every caller treats a
//!   closed handle as `disconnected`, never as an error worth crashing for

use redis::aio::MultiplexedConnection;
use redis::Client;
use tokio::sync::RwLock;

use crate::config::RedisConfig;
use crate::store::StoreError;

/// Long-lived handle around the optional cache connection.
pub struct CacheStore {
    client: Option<Client>,
    conn: RwLock<Option<MultiplexedConnection>>,
}

impl CacheStore {
    /// Parse the configured URL. No network traffic happens here.
    pub fn new(config: &RedisConfig) -> Result<Self, redis::RedisError> {
        let client = Client::open(config.url.as_str())?;
        Ok(Self {
            client: Some(client),
            conn: RwLock::new(None),
        })
    }

    /// A handle that can never connect. Used when even the cache client
    /// could not be built; the service serves degraded from the start.
    pub fn disconnected() -> Self {
        Self {
            client: None,
            conn: RwLock::new(None),
        }
    }

    /// Open the multiplexed connection. Idempotent: reconnecting replaces
    /// the previous handle.
    pub async fn connect(&self) -> Result<(), StoreError> {
        let client = self.client.as_ref().ok_or(StoreError::CacheClosed)?;
        let conn = client.get_multiplexed_async_connection().await?;
        *self.conn.write().await = Some(conn);
        Ok(())
    }

    /// Whether the connection handle is currently marked open.
    pub async fn is_open(&self) -> bool {
        self.conn.read().await.is_some()
    }

    /// Liveness ping over the open connection.
    pub async fn ping(&self) -> Result<(), StoreError> {
        let mut conn = self
            .conn
            .read()
            .await
            .clone()
            .ok_or(StoreError::CacheClosed)?;
        redis::cmd("PING").query_async::<String>(&mut conn).await?;
        Ok(())
    }

    /// Drop the connection handle. Called once on graceful shutdown.
    pub async fn close(&self) {
        self.conn.write().await.take();
    }
}
