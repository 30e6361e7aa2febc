//! Retry policies for document loads.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::error::{DataError, DataResult};

/// Backoff strategy between retry attempts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackoffStrategy {
    /// No delay between retries.
    None,
    /// Fixed delay between retries.
    Fixed(Duration),
    /// Exponential backoff with base and max.
    Exponential {
        /// Initial delay.
        base: Duration,
        /// Maximum delay.
        max: Duration,
    },
}

impl BackoffStrategy {
    /// Delay before retry number `attempt` (0-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        match self {
            Self::None => Duration::ZERO,
            Self::Fixed(d) => *d,
            Self::Exponential { base, max } => {
                let multiplier = 2u32.saturating_pow(attempt);
                base.saturating_mul(multiplier).min(*max)
            }
        }
    }
}

impl Default for BackoffStrategy {
    fn default() -> Self {
        Self::Exponential {
            base: Duration::from_millis(100),
            max: Duration::from_secs(1),
        }
    }
}

/// How often, and how patiently, a load is retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    pub backoff: BackoffStrategy,
}

impl RetryPolicy {
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            backoff: BackoffStrategy::default(),
        }
    }

    /// A policy that never retries.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            backoff: BackoffStrategy::None,
        }
    }

    pub fn with_backoff(mut self, strategy: BackoffStrategy) -> Self {
        self.backoff = strategy;
        self
    }

    /// Whether a failure on `attempt` (0-indexed) earns another try.
    pub fn should_retry(&self, error: &DataError, attempt: u32) -> bool {
        attempt < self.max_retries && error.is_transient()
    }

    /// Run `operation` until it succeeds, fails permanently, or the policy
    /// runs out of retries.
    pub async fn run<T, F, Fut>(&self, what: &str, mut operation: F) -> DataResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = DataResult<T>>,
    {
        let mut attempt = 0;
        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(e) if self.should_retry(&e, attempt) => {
                    let delay = self.backoff.delay_for_attempt(attempt);
                    warn!(what, attempt, ?delay, error = %e, "retrying");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_exponential_backoff() {
        let strategy = BackoffStrategy::Exponential {
            base: Duration::from_millis(100),
            max: Duration::from_millis(500),
        };

        assert_eq!(strategy.delay_for_attempt(0), Duration::from_millis(100));
        assert_eq!(strategy.delay_for_attempt(1), Duration::from_millis(200));
        assert_eq!(strategy.delay_for_attempt(2), Duration::from_millis(400));
        assert_eq!(strategy.delay_for_attempt(3), Duration::from_millis(500));
        assert_eq!(strategy.delay_for_attempt(40), Duration::from_millis(500));
    }

    #[test]
    fn test_should_retry_only_transient() {
        let policy = RetryPolicy::new(2);
        let timeout = DataError::Timeout(Duration::from_secs(1));
        let parse = DataError::Parse {
            document: "products",
            message: "bad".to_string(),
        };

        assert!(policy.should_retry(&timeout, 0));
        assert!(policy.should_retry(&timeout, 1));
        assert!(!policy.should_retry(&timeout, 2));
        assert!(!policy.should_retry(&parse, 0));
        assert!(!RetryPolicy::none().should_retry(&timeout, 0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_retries_until_success() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let policy = RetryPolicy::new(3);

        let result = policy
            .run("doc", move || async move {
                if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(DataError::Timeout(Duration::from_millis(10)))
                } else {
                    Ok(42)
                }
            })
            .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_gives_up() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let policy = RetryPolicy::new(1).with_backoff(BackoffStrategy::None);

        let result: DataResult<()> = policy
            .run("doc", move || async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(DataError::Timeout(Duration::from_millis(10)))
            })
            .await;

        assert!(matches!(result, Err(DataError::Timeout(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
