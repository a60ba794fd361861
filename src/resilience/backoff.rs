//! Fixed-delay retry executor.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

/// Bounded retry policy for one startup operation.
///
/// Constructed per call site, never shared or persisted. `max_attempts` counts
/// total attempts, not retries: a policy of 1 performs exactly one attempt and
/// never sleeps.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total number of attempts (>= 1).
    pub max_attempts: u32,

    /// Delay between consecutive attempts.
    pub delay: Duration,

    /// Label naming the operation in diagnostics.
    pub operation: &'static str,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration, operation: &'static str) -> Self {
        Self {
            max_attempts,
            delay,
            operation,
        }
    }
}

/// Run `operation` up to `policy.max_attempts` times, sleeping `policy.delay`
/// between failed attempts.
///
/// Attempts are strictly sequential. The first success returns immediately;
/// after the final failure the last error is returned verbatim, unwrapped.
/// The delay is a true suspension point, so work already scheduled on the
/// runtime keeps making progress while an attempt backs off.
pub async fn retry_with_backoff<T, E, F, Fut>(policy: &RetryPolicy, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let mut attempt: u32 = 1;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if attempt >= policy.max_attempts {
                    return Err(err);
                }
                tracing::warn!(
                    operation = policy.operation,
                    attempt,
                    max_attempts = policy.max_attempts,
                    delay_ms = policy.delay.as_millis() as u64,
                    error = %err,
                    "attempt failed, backing off before retry"
                );
                tokio::time::sleep(policy.delay).await;
                attempt += 1;
            }
        }
    }
}
