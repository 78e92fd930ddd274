//! Event pipeline settings.

use serde::{Deserialize, Serialize};
use washington_core::constants::DEFAULT_CHANNEL;

/// Event pipeline settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventSettings {
    /// Channel name used when handing records to an external bus.
    pub channel: String,
    /// Per-subscriber buffer of the in-process broadcast bus.
    pub bus_capacity: usize,
}

impl Default for EventSettings {
    fn default() -> Self {
        Self {
            channel: DEFAULT_CHANNEL.to_string(),
            bus_capacity: 1024,
        }
    }
}
