use core_config::upstream::UpstreamConfig;
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Errors that tell the retry loop whether another attempt may succeed
pub trait Retryable {
    fn is_retryable(&self) -> bool;
}

/// Retry configuration for upstream calls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Total attempts, including the first one
    pub max_attempts: u32,

    /// Delay before the first retry
    pub initial_delay: Duration,

    /// Factor applied to the delay after each retry
    pub backoff_multiplier: u32,
}

impl Default for RetryConfig {
    /// Three attempts, waiting 500ms then 1s
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(500),
            backoff_multiplier: 2,
        }
    }
}

impl From<&UpstreamConfig> for RetryConfig {
    fn from(config: &UpstreamConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            initial_delay: config.retry_delay,
            ..Self::default()
        }
    }
}

/// Retry an async operation with exponential backoff
///
/// Only errors reporting [`Retryable::is_retryable`] are retried; anything
/// else is returned from the attempt that produced it. When attempts run out
/// the last error is returned unchanged.
///
/// # Example
/// ```ignore
/// let config = RetryConfig::from(&upstream_config);
///
/// let employees = retry_with_backoff("list employees", &config, || async {
///     upstream.fetch_all().await
/// })
/// .await?;
/// ```
pub async fn retry_with_backoff<F, Fut, T, E>(
    operation_name: &str,
    config: &RetryConfig,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Retryable + Display,
{
    let max_attempts = config.max_attempts.max(1);
    let mut attempt = 1;
    let mut delay = config.initial_delay;

    loop {
        match operation().await {
            Ok(result) => {
                if attempt > 1 {
                    debug!("{} succeeded on attempt {}", operation_name, attempt);
                }
                return Ok(result);
            }
            Err(e) if e.is_retryable() && attempt < max_attempts => {
                warn!(
                    "{} failed (attempt {}/{}): {}. Retrying in {:?}",
                    operation_name, attempt, max_attempts, e, delay
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
                delay = delay.saturating_mul(config.backoff_multiplier);
            }
            Err(e) => {
                if e.is_retryable() {
                    warn!(
                        "{} failed after {} attempts: {}",
                        operation_name, max_attempts, e
                    );
                }
                return Err(e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio::time::Instant;

    #[derive(Debug, PartialEq)]
    enum TestError {
        Busy(u32),
        Fatal,
    }

    impl Display for TestError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{self:?}")
        }
    }

    impl Retryable for TestError {
        fn is_retryable(&self) -> bool {
            matches!(self, TestError::Busy(_))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_on_third_attempt_after_two_waits() {
        let calls = Arc::new(AtomicU32::new(0));
        let started = Instant::now();

        let result = retry_with_backoff("op", &RetryConfig::default(), || {
            let calls = calls.clone();
            async move {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                if n < 3 { Err(TestError::Busy(n)) } else { Ok("done") }
            }
        })
        .await;

        assert_eq!(result, Ok("done"));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        // 500ms + 1000ms, no third wait
        let waited = started.elapsed();
        assert!(waited >= Duration::from_millis(1500) && waited < Duration::from_millis(1600));
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhaustion_returns_last_error_without_fourth_attempt() {
        let calls = Arc::new(AtomicU32::new(0));
        let started = Instant::now();

        let result: Result<(), _> = retry_with_backoff("op", &RetryConfig::default(), || {
            let calls = calls.clone();
            async move { Err(TestError::Busy(calls.fetch_add(1, Ordering::SeqCst) + 1)) }
        })
        .await;

        assert_eq!(result, Err(TestError::Busy(3)));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        let waited = started.elapsed();
        assert!(waited >= Duration::from_millis(1500) && waited < Duration::from_millis(1600));
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_retryable_error_is_not_retried() {
        let calls = Arc::new(AtomicU32::new(0));
        let started = Instant::now();

        let result: Result<(), _> = retry_with_backoff("op", &RetryConfig::default(), || {
            let calls = calls.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(TestError::Fatal)
            }
        })
        .await;

        assert_eq!(result, Err(TestError::Fatal));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(started.elapsed() < Duration::from_millis(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_attempts_runs_once() {
        let calls = Arc::new(AtomicU32::new(0));
        let config = RetryConfig {
            max_attempts: 0,
            ..RetryConfig::default()
        };

        let result: Result<(), _> = retry_with_backoff("op", &config, || {
            let calls = calls.clone();
            async move { Err(TestError::Busy(calls.fetch_add(1, Ordering::SeqCst) + 1)) }
        })
        .await;

        assert_eq!(result, Err(TestError::Busy(1)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_from_upstream_config() {
        let upstream = UpstreamConfig {
            max_attempts: 5,
            retry_delay: Duration::from_millis(50),
            ..UpstreamConfig::default()
        };

        let config = RetryConfig::from(&upstream);
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.initial_delay, Duration::from_millis(50));
        assert_eq!(config.backoff_multiplier, 2);
    }
}
