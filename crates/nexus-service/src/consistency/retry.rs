//! Bounded retry for multi-step operations.

use std::future::Future;

use tracing::warn;

use nexus_core::config::ConsistencyConfig;
use nexus_core::result::AppResult;

/// Retries `StorageUnavailable` failures a fixed number of times with
/// linear backoff. Every other error kind is returned immediately.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    config: ConsistencyConfig,
}

impl RetryPolicy {
    /// Policy from the consistency section.
    pub fn from_config(config: &ConsistencyConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Total attempts made before giving up.
    pub fn attempts(&self) -> u32 {
        self.config.count_retry_attempts.max(1)
    }

    /// Run `op` until it succeeds, fails permanently, or attempts run out.
    pub async fn run<T, F, Fut>(&self, operation: &'static str, mut op: F) -> AppResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = AppResult<T>>,
    {
        let max_attempts = self.attempts();
        let mut attempt = 1;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && attempt < max_attempts => {
                    warn!(
                        operation,
                        attempt,
                        max_attempts,
                        error = %e,
                        "Retrying after transient failure"
                    );
                    tokio::time::sleep(self.config.backoff_for(attempt)).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    use nexus_core::error::AppError;

    use super::*;

    fn policy(attempts: u32) -> RetryPolicy {
        RetryPolicy::from_config(&ConsistencyConfig {
            count_retry_attempts: attempts,
            retry_backoff_ms: 10,
            reconcile_on_startup: false,
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_failure_is_retried() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);
        let result = policy(3)
            .run("count", || {
                let counter = Arc::clone(&counter);
                async move {
                    if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                        Err(AppError::storage_unavailable("down"))
                    } else {
                        Ok(5)
                    }
                }
            })
            .await;
        assert_eq!(result.unwrap(), 5);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_gives_up_after_attempts() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);
        let result: AppResult<()> = policy(2)
            .run("count", || {
                let counter = Arc::clone(&counter);
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err(AppError::storage_unavailable("down"))
                }
            })
            .await;
        assert!(result.unwrap_err().is_retryable());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_permanent_failure_is_not_retried() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);
        let result: AppResult<()> = policy(5)
            .run("count", || {
                let counter = Arc::clone(&counter);
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err(AppError::not_found("gone"))
                }
            })
            .await;
        assert!(result.unwrap_err().is_not_found());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
