//! # washington-settings
//!
//! Configuration with layered sources.
//!
//! Settings are loaded from three layers (in priority order):
//! 1. **Compiled defaults**: [`WashingtonSettings::default()`]
//! 2. **User file**: `~/.washington/settings.json` (deep-merged over defaults)
//! 3. **Environment variables**: `WASHINGTON_*` overrides (highest priority)

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{deep_merge, load_settings, load_settings_from_path, load_settings_with_env, settings_path};
pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn re_exports_work() {
        let _settings = WashingtonSettings::default();
        let _path = settings_path();
        let merged = deep_merge(serde_json::json!({"x": 1}), serde_json::json!({"y": 2}));
        assert_eq!(merged["x"], 1);
    }

    #[test]
    fn settings_serialize_camel_case() {
        let json = serde_json::to_value(WashingtonSettings::default()).unwrap();
        assert!(json["events"].get("busCapacity").is_some());
        assert!(json["session"].get("idPrefix").is_some());
        assert!(json["via"].get("catalogPath").is_none());
        let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 4, "unexpected top-level keys: {keys:?}");
    }

    #[test]
    fn unread_top_level_keys_are_ignored() {
        let settings: WashingtonSettings =
            serde_json::from_str(r#"{"version": "0.1.0", "name": "washington", "logging": {"level": "warn"}}"#).unwrap();
        assert_eq!(settings.logging.level, "warn");
        assert_eq!(settings.events, EventSettings::default());
    }
}
