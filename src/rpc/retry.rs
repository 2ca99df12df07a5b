//! Retry logic utilities for fetch backends
//!
//! Both backends share the same exponential backoff loop. Blocking RPC calls
//! additionally go through [`execute_with_timeout`].

use crate::config::{BitcoinRpcConfig, WhatsOnChainConfig};
use crate::errors::{FetchError, FetchResult};
use std::future::Future;
use std::time::Duration;
use tokio::time::{sleep, timeout};
use tracing::{debug, error, warn};

/// Calculate next backoff duration using exponential backoff with a maximum cap
///
/// `new_backoff = min(current_backoff * multiplier, max_backoff)`
///
/// # Example
/// ```
/// use std::time::Duration;
/// use bitcom_peek::rpc::calculate_next_backoff;
///
/// let backoff = Duration::from_millis(100);
/// let next = calculate_next_backoff(backoff, 2.0, 30);
/// assert_eq!(next, Duration::from_millis(200));
/// ```
pub fn calculate_next_backoff(
    current_backoff: Duration,
    multiplier: f64,
    max_backoff_seconds: u64,
) -> Duration {
    Duration::from_millis((current_backoff.as_millis() as f64 * multiplier) as u64)
        .min(Duration::from_secs(max_backoff_seconds))
}

/// Attempt limit and backoff schedule for one backend
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    pub max_retries: usize,
    pub initial_backoff: Duration,
    pub backoff_multiplier: f64,
    pub max_backoff_seconds: u64,
}

impl From<&BitcoinRpcConfig> for RetryPolicy {
    fn from(config: &BitcoinRpcConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            initial_backoff: Duration::from_millis(config.initial_backoff_ms),
            backoff_multiplier: config.backoff_multiplier,
            max_backoff_seconds: config.max_backoff_seconds,
        }
    }
}

impl From<&WhatsOnChainConfig> for RetryPolicy {
    fn from(config: &WhatsOnChainConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            initial_backoff: Duration::from_millis(config.initial_backoff_ms),
            backoff_multiplier: config.backoff_multiplier,
            max_backoff_seconds: config.max_backoff_seconds,
        }
    }
}

/// Run `attempt` until it succeeds, fails with a non-retryable error, or the
/// policy's attempt limit is reached
///
/// A final timeout is returned as-is; any other exhausted failure becomes
/// [`FetchError::MaxRetriesExceeded`].
pub async fn retry_fetch<T, F, Fut>(
    policy: &RetryPolicy,
    operation: &str,
    mut attempt: F,
) -> FetchResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = FetchResult<T>>,
{
    let max_attempts = policy.max_retries.max(1);
    let mut attempts = 0;
    let mut backoff = policy.initial_backoff;

    loop {
        match attempt().await {
            Ok(value) => {
                if attempts > 0 {
                    debug!("{} succeeded after {} attempts", operation, attempts + 1);
                }
                return Ok(value);
            }
            Err(e) if !e.is_retryable() => {
                debug!("{} failed (non-retryable): {}", operation, e);
                return Err(e);
            }
            Err(e) => {
                attempts += 1;
                if attempts >= max_attempts {
                    error!("{} failed after {} attempts: {}", operation, attempts, e);
                    return Err(match e {
                        FetchError::Timeout { .. } => e,
                        _ => FetchError::MaxRetriesExceeded {
                            operation: operation.to_string(),
                        },
                    });
                }

                warn!(
                    "{} attempt {} failed, retrying in {:?}: {}",
                    operation, attempts, backoff, e
                );
                sleep(backoff).await;
                backoff = calculate_next_backoff(
                    backoff,
                    policy.backoff_multiplier,
                    policy.max_backoff_seconds,
                );
            }
        }
    }
}

/// Execute a blocking RPC operation on the blocking pool with a timeout
pub async fn execute_with_timeout<T, F>(
    timeout_seconds: u64,
    operation: &str,
    call: F,
) -> FetchResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> FetchResult<T> + Send + 'static,
{
    match timeout(
        Duration::from_secs(timeout_seconds),
        tokio::task::spawn_blocking(call),
    )
    .await
    {
        Ok(Ok(result)) => result,
        Ok(Err(e)) => Err(FetchError::CallFailed {
            method: "spawn_blocking".to_string(),
            message: format!("Task execution error: {}", e),
        }),
        Err(_) => Err(FetchError::Timeout {
            timeout_seconds,
            operation: operation.to_string(),
        }),
    }
}
