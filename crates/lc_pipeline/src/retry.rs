use lc_core::Result;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Bounded retry for calls that fail with [`lc_core::Error::RateLimited`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    /// Run `operation` until it succeeds, fails with a non rate-limit error,
    /// or `max_attempts` is used up. The last error is returned.
    pub async fn run<T, F, Fut>(&self, mut operation: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 1;
        loop {
            match operation().await {
                Err(e) if e.is_rate_limited() && attempt < self.max_attempts => {
                    warn!(
                        "⏳ Rate limited, retrying in {:?} ({}/{})...",
                        self.delay, attempt, self.max_attempts
                    );
                    tokio::time::sleep(self.delay).await;
                    attempt += 1;
                }
                result => return result,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lc_core::Error;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn test_retries_rate_limits_until_success() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let policy = RetryPolicy::new(3, Duration::ZERO);
        let result = policy
            .run(move || async move {
                if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(Error::RateLimited("429".to_string()))
                } else {
                    Ok("fertig")
                }
            })
            .await;
        assert_eq!(result.unwrap(), "fertig");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let policy = RetryPolicy::new(2, Duration::ZERO);
        let result: Result<()> = policy
            .run(move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(Error::RateLimited("429".to_string()))
            })
            .await;
        assert!(result.unwrap_err().is_rate_limited());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_other_errors_are_not_retried() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let policy = RetryPolicy::new(5, Duration::ZERO);
        let result: Result<()> = policy
            .run(move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(Error::Api {
                    status: 500,
                    message: "overloaded".to_string(),
                })
            })
            .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
