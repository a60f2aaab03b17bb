//! Log output settings.

use serde::{Deserialize, Serialize};

/// Filter and format for `tracing-subscriber`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset, e.g. `info`
    /// or `nexus_service=debug,info`.
    pub level: String,
    /// `json` for structured lines, anything else for human-readable output.
    pub format: String,
}

impl LoggingConfig {
    /// Whether structured JSON output is selected.
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "json".into(),
        }
    }
}
