//! Settings loading with deep merge and environment variable overrides.
//!
//! Loading flow:
//! 1. Start with compiled [`WashingtonSettings::default()`]
//! 2. If `~/.washington/settings.json` exists, deep-merge user values over defaults
//! 3. Apply `WASHINGTON_*` environment variable overrides (highest priority)
//! 4. Validate the result
//!
//! Deep merge rules:
//! - Objects are merged recursively (source overrides target per-key)
//! - Arrays and primitives are replaced entirely by source
//! - Null values in source are skipped (preserving target)

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;
use washington_core::constants::{MAX_BUS_CAPACITY, PRODUCT_NAME};
use washington_core::logging::LogFormat;

use crate::errors::{Result, SettingsError};
use crate::types::WashingtonSettings;

/// Resolve the path to the settings file (`~/.washington/settings.json`).
pub fn settings_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home)
        .join(format!(".{PRODUCT_NAME}"))
        .join("settings.json")
}

/// Load settings from the default path with env var overrides.
pub fn load_settings() -> Result<WashingtonSettings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from a specific path with env var overrides.
///
/// A missing file yields defaults. Invalid JSON is an error.
pub fn load_settings_from_path(path: &Path) -> Result<WashingtonSettings> {
    load_settings_with_env(path, |name| std::env::var(name).ok())
}

/// Load settings from `path`, reading overrides through `env`.
pub fn load_settings_with_env(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> Result<WashingtonSettings> {
    let defaults = serde_json::to_value(WashingtonSettings::default())?;

    let merged = if path.exists() {
        debug!(?path, "loading settings from file");
        let content = std::fs::read_to_string(path)?;
        let user: Value = serde_json::from_str(&content)?;
        deep_merge(defaults, user)
    } else {
        debug!(?path, "settings file not found, using defaults");
        defaults
    };

    let mut settings: WashingtonSettings = serde_json::from_value(merged)?;
    apply_env_overrides(&mut settings, env);
    validate(&settings)?;
    Ok(settings)
}

/// Recursive deep merge of two JSON values.
pub fn deep_merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Object(mut target_map), Value::Object(source_map)) => {
            for (key, source_val) in source_map {
                if source_val.is_null() {
                    continue;
                }
                let merged = if let Some(target_val) = target_map.remove(&key) {
                    deep_merge(target_val, source_val)
                } else {
                    source_val
                };
                let _ = target_map.insert(key, merged);
            }
            Value::Object(target_map)
        }
        (_, source) => source,
    }
}

/// Apply `WASHINGTON_*` overrides read through `env`.
///
/// Invalid values are ignored with a warning (file/default value kept).
pub fn apply_env_overrides(settings: &mut WashingtonSettings, env: impl Fn(&str) -> Option<String>) {
    let read = |name: &str| env(name).filter(|v| !v.is_empty());

    if let Some(v) = read("WASHINGTON_EVENT_CHANNEL") {
        settings.events.channel = v;
    }
    if let Some(v) = read("WASHINGTON_BUS_CAPACITY") {
        match parse_usize_range(&v, 1, MAX_BUS_CAPACITY) {
            Some(n) => settings.events.bus_capacity = n,
            None => tracing::warn!(key = "WASHINGTON_BUS_CAPACITY", value = %v, "invalid usize env var, ignoring"),
        }
    }
    if let Some(v) = read("WASHINGTON_LOG_LEVEL") {
        settings.logging.level = v;
    }
    if let Some(v) = read("WASHINGTON_LOG_FORMAT") {
        match LogFormat::parse(&v) {
            Some(format) => settings.logging.format = format,
            None => tracing::warn!(key = "WASHINGTON_LOG_FORMAT", value = %v, "invalid log format env var, ignoring"),
        }
    }
    if let Some(v) = read("WASHINGTON_SESSION_PREFIX") {
        settings.session.id_prefix = v;
    }
    if let Some(v) = read("WASHINGTON_VIA_CATALOG") {
        settings.via.catalog_path = Some(v);
    }
}

/// Reject settings the pipeline cannot run with.
pub fn validate(settings: &WashingtonSettings) -> Result<()> {
    if settings.events.channel.trim().is_empty() {
        return Err(SettingsError::InvalidValue("events.channel must not be empty".into()));
    }
    if !(1..=MAX_BUS_CAPACITY).contains(&settings.events.bus_capacity) {
        return Err(SettingsError::InvalidValue(format!(
            "events.busCapacity must be in 1..={MAX_BUS_CAPACITY}, got {}",
            settings.events.bus_capacity
        )));
    }
    if settings.session.id_prefix.is_empty() || settings.session.id_prefix.contains(char::is_whitespace) {
        return Err(SettingsError::InvalidValue(format!(
            "session.idPrefix must be a non-empty word, got {:?}",
            settings.session.id_prefix
        )));
    }
    Ok(())
}

/// Parse a string as a `usize` within a range.
pub fn parse_usize_range(val: &str, min: usize, max: usize) -> Option<usize> {
    let n: usize = val.parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    fn write_settings(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    // ── deep_merge ──────────────────────────────────────────────────

    #[test]
    fn merge_nested_override() {
        let target = serde_json::json!({"events": {"channel": "a", "busCapacity": 8}});
        let source = serde_json::json!({"events": {"channel": "b"}});
        let merged = deep_merge(target, source);
        assert_eq!(merged["events"]["channel"], "b");
        assert_eq!(merged["events"]["busCapacity"], 8);
    }

    #[test]
    fn merge_null_preserves_target() {
        let target = serde_json::json!({"a": 1});
        let source = serde_json::json!({"a": null});
        assert_eq!(deep_merge(target, source)["a"], 1);
    }

    #[test]
    fn merge_array_replace() {
        let target = serde_json::json!({"a": [1, 2, 3]});
        let source = serde_json::json!({"a": [9]});
        assert_eq!(deep_merge(target, source)["a"], serde_json::json!([9]));
    }

    #[test]
    fn merge_new_keys_added() {
        let target = serde_json::json!({"a": 1});
        let source = serde_json::json!({"b": 2});
        let merged = deep_merge(target, source);
        assert_eq!(merged["a"], 1);
        assert_eq!(merged["b"], 2);
    }

    // ── load_settings_with_env ──────────────────────────────────────

    #[test]
    fn load_missing_file_returns_defaults() {
        let path = Path::new("/nonexistent/settings.json");
        let settings = load_settings_with_env(path, no_env).unwrap();
        assert_eq!(settings, WashingtonSettings::default());
        assert_eq!(settings.events.channel, "washington.eventstream.v0");
        assert_eq!(settings.session.id_prefix, "sess");
        assert_eq!(settings.logging.level, "info");
    }

    #[test]
    fn load_partial_json_overrides() {
        let (_dir, path) = write_settings(r#"{"logging": {"format": "json"}, "events": {"busCapacity": 64}}"#);

        let settings = load_settings_with_env(&path, no_env).unwrap();
        assert_eq!(settings.logging.format, LogFormat::Json);
        assert_eq!(settings.logging.level, "info");
        assert_eq!(settings.events.bus_capacity, 64);
        assert_eq!(settings.events.channel, "washington.eventstream.v0");
    }

    #[test]
    fn load_invalid_json_returns_error() {
        let (_dir, path) = write_settings("not valid json");
        let result = load_settings_with_env(&path, no_env);
        assert_matches!(result, Err(SettingsError::Json(_)));
    }

    #[test]
    fn load_rejects_empty_channel() {
        let (_dir, path) = write_settings(r#"{"events": {"channel": "  "}}"#);
        let result = load_settings_with_env(&path, no_env);
        assert_matches!(result, Err(SettingsError::InvalidValue(_)));
    }

    #[test]
    fn load_rejects_out_of_range_bus_capacity() {
        for capacity in ["0", "1048577", "18446744073709551615"] {
            let (_dir, path) = write_settings(&format!(r#"{{"events": {{"busCapacity": {capacity}}}}}"#));
            let result = load_settings_with_env(&path, no_env);
            assert_matches!(result, Err(SettingsError::InvalidValue(_)), "capacity {capacity}");
        }
    }

    #[test]
    fn load_accepts_max_bus_capacity() {
        let (_dir, path) = write_settings(r#"{"events": {"busCapacity": 1048576}}"#);
        let settings = load_settings_with_env(&path, no_env).unwrap();
        assert_eq!(settings.events.bus_capacity, MAX_BUS_CAPACITY);
    }

    #[test]
    fn env_overrides_file() {
        let (_dir, path) = write_settings(r#"{"events": {"channel": "from.file"}}"#);
        let env = env_from(&[
            ("WASHINGTON_EVENT_CHANNEL", "from.env"),
            ("WASHINGTON_LOG_LEVEL", "debug"),
            ("WASHINGTON_LOG_FORMAT", "JSON"),
            ("WASHINGTON_SESSION_PREFIX", "guest"),
            ("WASHINGTON_VIA_CATALOG", "/tmp/insights.json"),
            ("WASHINGTON_BUS_CAPACITY", "32"),
        ]);

        let settings = load_settings_with_env(&path, env).unwrap();
        assert_eq!(settings.events.channel, "from.env");
        assert_eq!(settings.logging.level, "debug");
        assert_eq!(settings.logging.format, LogFormat::Json);
        assert_eq!(settings.session.id_prefix, "guest");
        assert_eq!(settings.via.catalog_path.as_deref(), Some("/tmp/insights.json"));
        assert_eq!(settings.events.bus_capacity, 32);
    }

    #[test]
    fn invalid_env_values_are_ignored() {
        let mut settings = WashingtonSettings::default();
        apply_env_overrides(
            &mut settings,
            env_from(&[
                ("WASHINGTON_LOG_FORMAT", "xml"),
                ("WASHINGTON_BUS_CAPACITY", "0"),
                ("WASHINGTON_EVENT_CHANNEL", ""),
            ]),
        );
        assert_eq!(settings, WashingtonSettings::default());
    }

    // ── parsing ─────────────────────────────────────────────────────

    #[test]
    fn parse_usize_bounds() {
        assert_eq!(parse_usize_range("16", 1, 100), Some(16));
        assert_eq!(parse_usize_range("0", 1, 100), None);
        assert_eq!(parse_usize_range("101", 1, 100), None);
        assert_eq!(parse_usize_range("abc", 1, 100), None);
    }

    #[test]
    fn settings_path_is_under_home() {
        let path = settings_path();
        assert!(path.ends_with(".washington/settings.json"));
    }
}
