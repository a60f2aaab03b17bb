//! Folder file-count maintenance configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Retry and reconciliation settings for the folder file-count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsistencyConfig {
    /// Attempts made for a count adjustment before giving up.
    #[serde(default = "default_retry_attempts")]
    pub count_retry_attempts: u32,
    /// Base backoff between attempts in milliseconds; grows linearly.
    #[serde(default = "default_retry_backoff")]
    pub retry_backoff_ms: u64,
    /// Run a full reconciliation pass when the server starts.
    #[serde(default = "default_reconcile_on_startup")]
    pub reconcile_on_startup: bool,
}

impl ConsistencyConfig {
    /// Backoff to wait after the given (1-based) failed attempt.
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.retry_backoff_ms.saturating_mul(u64::from(attempt)))
    }
}

impl Default for ConsistencyConfig {
    fn default() -> Self {
        Self {
            count_retry_attempts: default_retry_attempts(),
            retry_backoff_ms: default_retry_backoff(),
            reconcile_on_startup: default_reconcile_on_startup(),
        }
    }
}

fn default_retry_attempts() -> u32 {
    3
}

fn default_retry_backoff() -> u64 {
    50
}

fn default_reconcile_on_startup() -> bool {
    true
}
