//! The [`EventKind`] taxonomy.
//!
//! Four kinds are well known. The taxonomy is open: any other string is kept
//! verbatim as [`EventKind::Custom`], so call sites can introduce kinds such
//! as `via-open` without touching this crate. Kinds serialize as plain strings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of an event record.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventKind {
    /// Application loaded; emitted once per session.
    SessionStart,
    /// A page or route was shown.
    PageView,
    /// A call-to-action was clicked.
    CtaClick,
    /// The onboarding modal was viewed, advanced, started, or skipped.
    OnboardingEvent,
    /// Any kind outside the well-known set.
    Custom(String),
}

impl EventKind {
    /// All well-known kinds.
    pub const WELL_KNOWN: [Self; 4] = [
        Self::SessionStart,
        Self::PageView,
        Self::CtaClick,
        Self::OnboardingEvent,
    ];

    /// Build a kind from a string, mapping well-known names to their variants.
    pub fn custom(name: impl Into<String>) -> Self {
        Self::from(name.into())
    }

    /// Wire name of this kind.
    pub fn as_str(&self) -> &str {
        match self {
            Self::SessionStart => "session-start",
            Self::PageView => "page-view",
            Self::CtaClick => "cta-click",
            Self::OnboardingEvent => "onboarding-event",
            Self::Custom(name) => name,
        }
    }

    /// Whether this is one of the four well-known kinds.
    pub fn is_well_known(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for EventKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "session-start" => Self::SessionStart,
            "page-view" => Self::PageView,
            "cta-click" => Self::CtaClick,
            "onboarding-event" => Self::OnboardingEvent,
            _ => Self::Custom(s),
        }
    }
}

impl From<&str> for EventKind {
    fn from(s: &str) -> Self {
        Self::from(s.to_owned())
    }
}

impl From<EventKind> for String {
    fn from(kind: EventKind) -> Self {
        match kind {
            EventKind::Custom(name) => name,
            other => other.as_str().to_owned(),
        }
    }
}
