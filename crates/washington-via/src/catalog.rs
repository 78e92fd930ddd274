//! Pre-computed insight catalog.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Key of the fallback insight.
pub const DEFAULT_INSIGHT_KEY: &str = "default";

/// One pre-computed insight about a piece of content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    /// Panel heading.
    pub title: String,
    /// One-paragraph summary.
    pub summary: String,
    /// Short labels shown under the summary.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Ribbon messages and per-content insights.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InsightCatalog {
    /// Messages cycled in the VIA ribbon.
    pub ribbon_messages: Vec<String>,
    /// Insights keyed by content id, plus an optional `default` entry.
    pub content_insights: HashMap<String, Insight>,
}

impl InsightCatalog {
    /// Insight for `content_id`, falling back to `default`.
    ///
    /// A missing or empty id goes straight to the fallback.
    pub fn lookup(&self, content_id: Option<&str>) -> Option<&Insight> {
        content_id
            .filter(|id| !id.is_empty())
            .and_then(|id| self.content_insights.get(id))
            .or_else(|| self.content_insights.get(DEFAULT_INSIGHT_KEY))
    }
}
