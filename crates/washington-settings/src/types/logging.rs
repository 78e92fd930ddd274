//! Logging settings.

use serde::{Deserialize, Serialize};
use washington_core::logging::LogFormat;

/// Diagnostic logging settings. `RUST_LOG` still wins at runtime.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingSettings {
    /// Default filter directive (e.g. `info`, `washington_events=debug`).
    pub level: String,
    /// Output format on stderr.
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
        }
    }
}
