//! Event creation.
//!
//! [`EventFactory`] is acquired once per UI region. It binds the session id
//! and the region's `source` label at acquisition, so call sites only pass the
//! kind and kind-specific fields. The bound `source` always overrides a
//! `source` key supplied in the payload.
//!
//! [`EventFactory::emit`] builds the record, hands it to the [`EventSink`],
//! and returns the record without waiting on or reporting delivery.

use std::sync::Arc;

use serde_json::{Map, Value, json};
use washington_core::SessionId;

use crate::kind::EventKind;
use crate::record::{EventRecord, SOURCE_KEY};
use crate::sink::EventSink;

/// Factory scoped to one session and one source label.
#[derive(Clone, Debug)]
pub struct EventFactory {
    session_id: SessionId,
    source: String,
    sink: Arc<EventSink>,
}

impl EventFactory {
    /// Bind a factory to a session, a source label, and a sink.
    pub fn new(session_id: SessionId, source: impl Into<String>, sink: Arc<EventSink>) -> Self {
        Self {
            session_id,
            source: source.into(),
            sink,
        }
    }

    /// Another factory sharing this session and sink under a different source.
    #[must_use]
    pub fn for_source(&self, source: impl Into<String>) -> Self {
        Self::new(self.session_id.clone(), source, Arc::clone(&self.sink))
    }

    /// Session id stamped on every record.
    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// Source label merged into every payload.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Build a record without publishing it.
    ///
    /// `None` and `Value::Null` give an empty payload. A non-object payload is
    /// kept under the `value` key.
    pub fn create(&self, kind: impl Into<EventKind>, payload: Option<Value>) -> EventRecord {
        let mut fields = match payload {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(map)) => map,
            Some(other) => {
                let mut map = Map::new();
                let _ = map.insert("value".to_owned(), other);
                map
            }
        };
        let _ = fields.insert(SOURCE_KEY.to_owned(), Value::String(self.source.clone()));
        EventRecord::new(kind.into(), self.session_id.clone(), fields)
    }

    /// Build a record and hand it to the sink.
    pub fn emit(&self, kind: impl Into<EventKind>, payload: Option<Value>) -> EventRecord {
        let record = self.create(kind, payload);
        // Fire-and-forget: the sink has already logged any transport failure.
        let _ = self.sink.publish(&record);
        record
    }

    /// Emit `session-start`.
    pub fn session_start(&self) -> EventRecord {
        self.emit(EventKind::SessionStart, None)
    }

    /// Emit `page-view` for `route`.
    pub fn page_view(&self, route: &str) -> EventRecord {
        self.emit(EventKind::PageView, Some(json!({ "route": route })))
    }

    /// Emit `cta-click` named `cta_name`, merged with any extra object fields.
    pub fn cta_click(&self, cta_name: &str, extra: Option<Value>) -> EventRecord {
        let mut fields = match extra {
            Some(Value::Object(map)) => map,
            _ => Map::new(),
        };
        let _ = fields.insert("ctaName".to_owned(), Value::from(cta_name));
        self.emit(EventKind::CtaClick, Some(Value::Object(fields)))
    }

    /// Emit `onboarding-event` for `action` at 1-based `step`.
    pub fn onboarding(&self, action: &str, step: u32) -> EventRecord {
        self.emit(
            EventKind::OnboardingEvent,
            Some(json!({ "action": action, "step": step })),
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
