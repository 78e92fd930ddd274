//! VIA v0.1 client.
//!
//! Every operation is a lookup in a static [`InsightCatalog`]. `init` and
//! `log_event` only write debug logs; nothing leaves the process.

use std::path::Path;

use washington_core::SessionId;
use washington_events::EventRecord;

use crate::catalog::{Insight, InsightCatalog};
use crate::errors::Result;

/// Shown in the ribbon when the catalog has no messages.
pub const FALLBACK_RIBBON_MESSAGE: &str =
    "Calm preview: VIA will handle search, questions, and routing in the full OS.";

const EMBEDDED_CATALOG: &str = include_str!("../data/via_insights.json");

/// Stub assistant backed by pre-computed insights.
#[derive(Clone, Debug)]
pub struct ViaClient {
    catalog: InsightCatalog,
}

impl ViaClient {
    /// Wrap an already loaded catalog.
    pub fn new(catalog: InsightCatalog) -> Self {
        Self { catalog }
    }

    /// Client over the catalog bundled with this crate.
    pub fn from_embedded() -> Result<Self> {
        Self::from_json(EMBEDDED_CATALOG)
    }

    /// Parse a catalog from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    /// Load a catalog file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Record that VIA was started for a session.
    pub fn init(&self, session_id: &SessionId) {
        tracing::debug!(session_id = %session_id, "VIA init (stub)");
    }

    /// Observe an emitted event. The stub only logs it.
    pub fn log_event(&self, record: &EventRecord) {
        tracing::debug!(
            event_type = %record.kind(),
            session_id = %record.session_id(),
            "VIA event (stub)"
        );
    }

    /// All ribbon messages, possibly empty.
    pub fn ribbon_messages(&self) -> &[String] {
        &self.catalog.ribbon_messages
    }

    /// The message the ribbon shows first.
    pub fn current_ribbon_message(&self) -> &str {
        self.catalog
            .ribbon_messages
            .first()
            .map_or(FALLBACK_RIBBON_MESSAGE, String::as_str)
    }

    /// Insight for a content id, or the default insight.
    pub fn investigate(&self, content_id: Option<&str>) -> Option<&Insight> {
        self.catalog.lookup(content_id)
    }

    /// The underlying catalog.
    pub fn catalog(&self) -> &InsightCatalog {
        &self.catalog
    }
}
