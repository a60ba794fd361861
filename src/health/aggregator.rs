//! Probe-time health aggregation.
//!
//! # Responsibilities
//! - Re-check both stores on every inbound probe, without retries
//! - Short-circuit on primary failure (the cache is never probed)
//! - Fold the results into a fresh [`HealthReport`]
//!
//! # Design Decisions
//! - A failed cache PING downgrades to degraded instead of being swallowed
//!   the way startup swallows a failed connect: startup tolerates absence,
//!   probe time reports it
//! - No state is mutated; concurrent probes need no coordination

use async_trait::async_trait;

use crate::health::report::{HealthReport, ServiceStatus};
use crate::store::{CacheStore, PrimaryStore, StoreError};

/// Liveness view of the primary store.
#[async_trait]
pub trait PrimaryCheck: Send + Sync {
    async fn check(&self) -> Result<(), StoreError>;
}

/// Liveness view of the cache store.
#[async_trait]
pub trait CacheCheck: Send + Sync {
    async fn is_open(&self) -> bool;
    async fn ping(&self) -> Result<(), StoreError>;
}

#[async_trait]
impl PrimaryCheck for PrimaryStore {
    async fn check(&self) -> Result<(), StoreError> {
        PrimaryStore::liveness(self).await?;
        Ok(())
    }
}

#[async_trait]
impl CacheCheck for CacheStore {
    async fn is_open(&self) -> bool {
        CacheStore::is_open(self).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        CacheStore::ping(self).await
    }
}

/// Evaluate both stores and assemble a fresh report.
pub async fn evaluate<P, C>(primary: &P, cache: &C) -> HealthReport
where
    P: PrimaryCheck + ?Sized,
    C: CacheCheck + ?Sized,
{
    if let Err(err) = primary.check().await {
        tracing::debug!(error = %err, "primary store liveness check failed");
        return HealthReport::new(ServiceStatus::Disconnected, ServiceStatus::Unknown);
    }

    let redis = if !cache.is_open().await {
        ServiceStatus::Disconnected
    } else {
        match cache.ping().await {
            Ok(()) => ServiceStatus::Connected,
            Err(err) => {
                tracing::debug!(error = %err, "cache store ping failed");
                ServiceStatus::Disconnected
            }
        }
    };

    HealthReport::new(ServiceStatus::Connected, redis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::report::SystemStatus;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubPrimary {
        healthy: bool,
        calls: AtomicUsize,
    }

    impl StubPrimary {
        fn new(healthy: bool) -> Self {
            Self {
                healthy,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl PrimaryCheck for StubPrimary {
        async fn check(&self) -> Result<(), StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.healthy {
                Ok(())
            } else {
                Err(StoreError::Database(sqlx::Error::PoolTimedOut))
            }
        }
    }

    struct SpyCache {
        open: bool,
        ping_ok: bool,
        is_open_calls: AtomicUsize,
        ping_calls: AtomicUsize,
    }

    impl SpyCache {
        fn new(open: bool, ping_ok: bool) -> Self {
            Self {
                open,
                ping_ok,
                is_open_calls: AtomicUsize::new(0),
                ping_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl CacheCheck for SpyCache {
        async fn is_open(&self) -> bool {
            self.is_open_calls.fetch_add(1, Ordering::SeqCst);
            self.open
        }

        async fn ping(&self) -> Result<(), StoreError> {
            self.ping_calls.fetch_add(1, Ordering::SeqCst);
            if self.ping_ok {
                Ok(())
            } else {
                Err(StoreError::CacheClosed)
            }
        }
    }

    #[tokio::test]
    async fn both_stores_up_reports_healthy() {
        let primary = StubPrimary::new(true);
        let cache = SpyCache::new(true, true);

        let report = evaluate(&primary, &cache).await;

        assert_eq!(report.status, SystemStatus::Healthy);
        assert_eq!(report.services.database, ServiceStatus::Connected);
        assert_eq!(report.services.redis, ServiceStatus::Connected);
    }

    #[tokio::test]
    async fn primary_failure_short_circuits_the_cache() {
        let primary = StubPrimary::new(false);
        let cache = SpyCache::new(true, true);

        let report = evaluate(&primary, &cache).await;

        assert_eq!(report.status, SystemStatus::Unhealthy);
        assert_eq!(report.services.database, ServiceStatus::Disconnected);
        assert_eq!(report.services.redis, ServiceStatus::Unknown);
        // The cache client must receive zero calls of any kind.
        assert_eq!(cache.is_open_calls.load(Ordering::SeqCst), 0);
        assert_eq!(cache.ping_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn failed_ping_downgrades_to_degraded() {
        let primary = StubPrimary::new(true);
        let cache = SpyCache::new(true, false);

        let report = evaluate(&primary, &cache).await;

        assert_eq!(report.status, SystemStatus::Degraded);
        assert_eq!(report.services.redis, ServiceStatus::Disconnected);
        assert_eq!(cache.ping_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn closed_handle_is_degraded_without_a_ping() {
        let primary = StubPrimary::new(true);
        let cache = SpyCache::new(false, true);

        let report = evaluate(&primary, &cache).await;

        assert_eq!(report.status, SystemStatus::Degraded);
        assert_eq!(report.services.redis, ServiceStatus::Disconnected);
        assert_eq!(cache.ping_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn each_probe_checks_the_primary_exactly_once() {
        let primary = StubPrimary::new(true);
        let cache = SpyCache::new(true, true);

        evaluate(&primary, &cache).await;
        evaluate(&primary, &cache).await;

        assert_eq!(primary.calls.load(Ordering::SeqCst), 2);
    }
}
