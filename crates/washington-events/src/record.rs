//! The [`EventRecord`] struct.
//!
//! Wire shape:
//!
//! ```json
//! {
//!   "type": "page-view",
//!   "sessionId": "sess-1a2b3c4d-18f3a2b4c1d",
//!   "timestamp": "2026-10-19T12:00:00.000Z",
//!   "payload": { "source": "app-shell", "route": "/" }
//! }
//! ```
//!
//! Fields are private; a record cannot be changed after construction.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use washington_core::SessionId;

use crate::kind::EventKind;

/// Payload key carrying the emitting UI region.
pub const SOURCE_KEY: &str = "source";

/// One immutable fact about user or system behavior.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    #[serde(rename = "type")]
    kind: EventKind,
    session_id: SessionId,
    timestamp: String,
    payload: Map<String, Value>,
}

impl EventRecord {
    /// Stamp a record with the current time.
    pub(crate) fn new(kind: EventKind, session_id: SessionId, payload: Map<String, Value>) -> Self {
        Self {
            kind,
            session_id,
            timestamp: now_iso8601(),
            payload,
        }
    }

    /// Event kind.
    pub fn kind(&self) -> &EventKind {
        &self.kind
    }

    /// Session the record belongs to.
    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// ISO 8601 UTC timestamp with millisecond precision.
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Payload object, including `source`.
    pub fn payload(&self) -> &Map<String, Value> {
        &self.payload
    }

    /// The `source` label, when present.
    pub fn source(&self) -> Option<&str> {
        self.payload.get(SOURCE_KEY).and_then(Value::as_str)
    }

    /// Serialize to a JSON string in the wire shape.
    pub fn to_json_string(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| format!("{self:?}"))
    }
}

/// Current wall clock as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
pub(crate) fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
