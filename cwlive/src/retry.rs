//! Bounded fixed-interval retry.
//!
//! Used for sequential polling loops (bucket availability, stack
//! deletion). Retries never run in the background: each attempt is
//! awaited before the next delay starts.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for retry behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum attempts, including the first one.
    pub max_attempts: usize,
    /// Delay between attempts in milliseconds.
    pub delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay_ms: 1000,
        }
    }
}

impl RetryConfig {
    /// Creates a fixed-interval polling config.
    #[must_use]
    pub fn fixed(max_attempts: usize, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay_ms: u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// Returns the delay between attempts.
    #[must_use]
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// State tracking for a retry loop.
#[derive(Debug, Default, Clone, Copy)]
pub struct RetryState {
    /// Number of attempts made so far.
    pub attempt: usize,
}

impl RetryState {
    /// Creates a new retry state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an attempt and returns true if another one is allowed.
    pub fn record_attempt(&mut self, config: &RetryConfig) -> bool {
        self.attempt += 1;
        self.attempt < config.max_attempts
    }
}

/// Outcome of a retry decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryDecision {
    /// Retry after the specified delay.
    Retry(Duration),
    /// No more attempts, give up.
    GiveUp,
}

/// Records a failed attempt and decides whether to try again.
#[must_use]
pub fn should_retry(state: &mut RetryState, config: &RetryConfig) -> RetryDecision {
    if state.record_attempt(config) {
        RetryDecision::Retry(config.delay())
    } else {
        RetryDecision::GiveUp
    }
}

/// Executes an operation up to `config.max_attempts` times.
///
/// Returns the first success, or the error of the last attempt once the
/// bound is exhausted. `on_retry` runs before each delay with the 1-indexed
/// number of the failed attempt and its error.
pub async fn with_retry<T, E, F, Fut, R>(
    config: &RetryConfig,
    mut operation: F,
    mut on_retry: R,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
    E: std::fmt::Display,
    R: FnMut(usize, &E),
{
    let mut state = RetryState::new();

    loop {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) => match should_retry(&mut state, config) {
                RetryDecision::Retry(delay) => {
                    tracing::debug!(
                        attempt = state.attempt,
                        delay_ms = config.delay_ms,
                        error = %e,
                        "Retrying after error"
                    );
                    on_retry(state.attempt, &e);
                    tokio::time::sleep(delay).await;
                }
                RetryDecision::GiveUp => return Err(e),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_retry_config_default() {
        let config = RetryConfig::default();
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.delay(), Duration::from_secs(1));
    }

    #[test]
    fn test_fixed_config() {
        let config = RetryConfig::fixed(5, Duration::from_secs(2));
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.delay_ms, 2000);
    }

    #[test]
    fn test_should_retry_gives_up_after_max_attempts() {
        let config = RetryConfig::fixed(3, Duration::from_millis(10));
        let mut state = RetryState::new();

        assert_eq!(should_retry(&mut state, &config), RetryDecision::Retry(Duration::from_millis(10)));
        assert_eq!(should_retry(&mut state, &config), RetryDecision::Retry(Duration::from_millis(10)));
        assert_eq!(should_retry(&mut state, &config), RetryDecision::GiveUp);
        assert_eq!(state.attempt, 3);
    }

    #[test]
    fn test_with_retry_success_first_try() {
        let config = RetryConfig::default();
        let mut calls = 0;

        let result: Result<i32, &str> = tokio_test::block_on(with_retry(
            &config,
            || {
                calls += 1;
                async { Ok(42) }
            },
            |_, _| {},
        ));

        tokio_test::assert_ok!(result);
        assert_eq!(calls, 1);
    }

    #[tokio::test]
    async fn test_with_retry_success_after_failures() {
        let config = RetryConfig::fixed(5, Duration::from_millis(1));
        let calls = Arc::new(AtomicUsize::new(0));
        let mut retried = Vec::new();

        let result: Result<usize, String> = with_retry(
            &config,
            || {
                let calls = calls.clone();
                async move {
                    let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                    if n < 3 {
                        Err(format!("attempt {n}"))
                    } else {
                        Ok(n)
                    }
                }
            },
            |attempt, _| retried.push(attempt),
        )
        .await;

        assert_eq!(result, Ok(3));
        assert_eq!(retried, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_with_retry_returns_last_error_after_exact_attempts() {
        let config = RetryConfig::fixed(5, Duration::from_millis(1));
        let calls = Arc::new(AtomicUsize::new(0));

        let result: Result<(), String> = with_retry(
            &config,
            || {
                let calls = calls.clone();
                async move {
                    let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                    Err(format!("failure {n}"))
                }
            },
            |_, _| {},
        )
        .await;

        assert_eq!(result, Err("failure 5".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 5);
    }
}
