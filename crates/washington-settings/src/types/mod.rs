//! Settings type definitions.
//!
//! All types use `#[serde(rename_all = "camelCase", default)]`, so a settings
//! file may be partial: missing fields keep their compiled default.

mod events;
mod logging;

pub use events::*;
pub use logging::*;

use serde::{Deserialize, Serialize};
use washington_core::constants::DEFAULT_SESSION_PREFIX;

/// Root settings type.
///
/// ```json
/// {
///   "events": { "channel": "washington.eventstream.v0" },
///   "logging": { "level": "debug", "format": "json" }
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WashingtonSettings {
    /// Event pipeline settings.
    pub events: EventSettings,
    /// Diagnostic logging settings.
    pub logging: LoggingSettings,
    /// Session identity settings.
    pub session: SessionSettings,
    /// VIA stub settings.
    pub via: ViaSettings,
}

/// Session identity settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionSettings {
    /// Prefix of generated session ids.
    pub id_prefix: String,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            id_prefix: DEFAULT_SESSION_PREFIX.to_string(),
        }
    }
}

/// VIA stub settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViaSettings {
    /// Insight catalog to load instead of the bundled one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<String>,
}
