//! Session identifier newtype.
//!
//! A [`SessionId`] labels one load of the application. It is generated
//! locally with no server round-trip as `<prefix>-<random>-<time>`:
//! eight hex digits of randomness followed by the Unix time in milliseconds
//! (hex). Collisions across concurrent tabs are practically negligible; the
//! id is a diagnostic label, not a security token.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::DEFAULT_SESSION_PREFIX;

/// Opaque identifier for one application session.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a fresh id with the default `sess` prefix.
    #[must_use]
    pub fn new() -> Self {
        Self::generate(DEFAULT_SESSION_PREFIX)
    }

    /// Generate a fresh id with a custom prefix.
    #[must_use]
    pub fn generate(prefix: &str) -> Self {
        let random: u32 = rand::random();
        let millis = chrono::Utc::now().timestamp_millis();
        Self(format!("{prefix}-{random:08x}-{millis:x}"))
    }

    /// Create from an existing string value.
    #[must_use]
    pub fn from_string(s: String) -> Self {
        Self(s)
    }

    /// Return the inner string as a slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume self and return the inner `String`.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Deref for SessionId {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SessionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SessionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Generate a session id with the default prefix.
#[must_use]
pub fn create_session_id() -> SessionId {
    SessionId::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_id_has_prefix() {
        let id = SessionId::new();
        assert!(id.as_str().starts_with("sess-"), "got: {id}");
    }

    #[test]
    fn session_id_has_three_parts() {
        let id = SessionId::new();
        let parts: Vec<&str> = id.split('-').collect();
        assert_eq!(parts.len(), 3, "got: {id}");
        assert_eq!(parts[1].len(), 8);
        assert!(parts[1].chars().all(|c| c.is_ascii_hexdigit()));
        assert!(parts[2].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn time_component_is_current_millis() {
        let before = chrono::Utc::now().timestamp_millis();
        let id = SessionId::new();
        let after = chrono::Utc::now().timestamp_millis();
        let time_part = id.rsplit('-').next().unwrap();
        let millis = i64::from_str_radix(time_part, 16).unwrap();
        assert!(millis >= before && millis <= after);
    }

    #[test]
    fn custom_prefix() {
        let id = SessionId::generate("guest");
        assert!(id.starts_with("guest-"), "got: {id}");
    }

    #[test]
    fn ids_are_unique() {
        let ids: std::collections::HashSet<SessionId> =
            (0..200).map(|_| create_session_id()).collect();
        assert_eq!(ids.len(), 200);
    }

    #[test]
    fn serde_is_transparent() {
        let id = SessionId::from("sess-abc-123");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"sess-abc-123\"");
        let back: SessionId = serde_json::from_str("\"sess-abc-123\"").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn from_string_preserves_value() {
        let id = SessionId::from_string("custom-id".to_string());
        assert_eq!(id.as_str(), "custom-id");
        assert_eq!(id.into_inner(), "custom-id");
    }
}
