//! Bounded deadline for backend calls.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use nexus_core::config::DatabaseConfig;
use nexus_core::error::AppError;
use nexus_core::result::AppResult;

/// Upper bound applied to every repository and storage call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    timeout: Duration,
}

impl Deadline {
    /// A deadline of `timeout`.
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// The deadline configured by `database.query_timeout_ms`.
    pub fn from_config(config: &DatabaseConfig) -> Self {
        Self::new(config.query_timeout())
    }

    /// The configured bound.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Await `fut`, failing with `StorageUnavailable` once the bound expires.
    pub async fn run<T, F>(&self, operation: &'static str, fut: F) -> AppResult<T>
    where
        F: Future<Output = AppResult<T>>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                let timeout_ms = self.timeout.as_millis() as u64;
                warn!(operation, timeout_ms, "Backend call timed out");
                Err(AppError::storage_unavailable(format!(
                    "{operation} timed out after {timeout_ms}ms"
                )))
            }
        }
    }
}

impl Default for Deadline {
    fn default() -> Self {
        Self::from_config(&DatabaseConfig::default())
    }
}
