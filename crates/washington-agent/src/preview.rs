//! Guest preview walkthrough.
//!
//! Drives the same event sequence the guest shell produces: boot, the
//! onboarding modal, and the VIA investigate toggle. Every record is also
//! handed to the VIA stub.

use std::sync::Arc;

use serde_json::json;
use washington_core::SessionId;
use washington_events::{EventFactory, EventRecord, EventSink};
use washington_via::{DEFAULT_INSIGHT_KEY, Insight, ViaClient};

/// Number of onboarding steps.
pub const ONBOARDING_STEPS: u32 = 3;

/// Source labels used by the preview surfaces.
pub mod sources {
    /// The shell that boots the session.
    pub const APP_SHELL: &str = "app-shell";
    /// The first-run onboarding modal.
    pub const ONBOARDING_MODAL: &str = "onboarding-modal";
    /// The VIA ribbon.
    pub const VIA_RIBBON: &str = "via-ribbon";
    /// The VIA investigate panel.
    pub const VIA_PANEL: &str = "via-panel";
}

/// CTA fired when the investigate panel is opened from the ribbon.
pub const CTA_INVESTIGATE_OPEN: &str = "via_investigate_open";
/// CTA fired when the investigate panel is closed from the ribbon.
pub const CTA_INVESTIGATE_CLOSE: &str = "via_investigate_close";
/// CTA fired when the ribbon is collapsed or expanded.
pub const CTA_RIBBON_EXPAND_TOGGLE: &str = "via_ribbon_expand_toggle";
/// CTA fired by the panel itself when it renders an insight.
pub const CTA_INVESTIGATE_PANEL_OPEN: &str = "via_investigate_panel_open";

/// Where the onboarding modal currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum OnboardingState {
    /// Not opened yet.
    Closed,
    /// Showing a 1-based step.
    Step(u32),
    /// Started or skipped.
    Done,
}

/// Onboarding modal state machine.
///
/// `open` emits `view` for step 1. `advance` emits `next` with the new step,
/// or `start` when already on the last step. `skip` emits `skip` with the
/// current step. Calls that make no sense in the current state emit nothing.
#[derive(Debug)]
pub struct OnboardingFlow {
    events: EventFactory,
    total: u32,
    state: OnboardingState,
}

impl OnboardingFlow {
    /// Flow over `total` steps (at least one).
    pub fn new(events: EventFactory, total: u32) -> Self {
        Self {
            events,
            total: total.max(1),
            state: OnboardingState::Closed,
        }
    }

    /// Show the first step.
    pub fn open(&mut self) -> Option<EventRecord> {
        if self.state != OnboardingState::Closed {
            return None;
        }
        self.state = OnboardingState::Step(1);
        Some(self.events.onboarding("view", 1))
    }

    /// Move forward, finishing on the last step.
    pub fn advance(&mut self) -> Option<EventRecord> {
        let OnboardingState::Step(step) = self.state else {
            return None;
        };
        if step < self.total {
            self.state = OnboardingState::Step(step + 1);
            Some(self.events.onboarding("next", step + 1))
        } else {
            self.state = OnboardingState::Done;
            Some(self.events.onboarding("start", step))
        }
    }

    /// Dismiss the modal.
    pub fn skip(&mut self) -> Option<EventRecord> {
        let OnboardingState::Step(step) = self.state else {
            return None;
        };
        self.state = OnboardingState::Done;
        Some(self.events.onboarding("skip", step))
    }
}

/// The preview surfaces bound to one session and one sink.
#[derive(Debug)]
pub struct Preview {
    shell: EventFactory,
    onboarding: EventFactory,
    ribbon: EventFactory,
    panel: EventFactory,
    via: ViaClient,
    investigate_open: bool,
    ribbon_expanded: bool,
}

impl Preview {
    /// Bind all surfaces to `session_id` and `sink`.
    pub fn new(session_id: SessionId, sink: Arc<EventSink>, via: ViaClient) -> Self {
        let shell = EventFactory::new(session_id, sources::APP_SHELL, sink);
        Self {
            onboarding: shell.for_source(sources::ONBOARDING_MODAL),
            ribbon: shell.for_source(sources::VIA_RIBBON),
            panel: shell.for_source(sources::VIA_PANEL),
            shell,
            via,
            investigate_open: false,
            ribbon_expanded: true,
        }
    }

    /// Start the session: VIA init, `session-start`, then `page-view`.
    pub fn boot(&self, route: &str) -> Vec<EventRecord> {
        self.via.init(self.shell.session_id());
        let records = vec![self.shell.session_start(), self.shell.page_view(route)];
        self.observe(&records);
        records
    }

    /// Walk the onboarding modal to the end, or skip it after the first step.
    pub fn onboarding(&self, skip: bool) -> Vec<EventRecord> {
        let mut flow = OnboardingFlow::new(self.onboarding.clone(), ONBOARDING_STEPS);
        let mut records: Vec<EventRecord> = flow.open().into_iter().collect();
        if skip {
            records.extend(flow.skip());
        } else {
            while let Some(record) = flow.advance() {
                records.push(record);
            }
        }
        self.observe(&records);
        records
    }

    /// Flip the investigate panel from the ribbon.
    pub fn toggle_investigate(&mut self) -> EventRecord {
        self.investigate_open = !self.investigate_open;
        let cta = if self.investigate_open {
            CTA_INVESTIGATE_OPEN
        } else {
            CTA_INVESTIGATE_CLOSE
        };
        let record = self
            .ribbon
            .cta_click(cta, Some(json!({ "open": self.investigate_open })));
        self.via.log_event(&record);
        record
    }

    /// Whether the investigate panel is showing.
    pub fn is_investigate_open(&self) -> bool {
        self.investigate_open
    }

    /// Collapse or expand the ribbon. It starts expanded.
    pub fn expand_ribbon(&mut self) -> EventRecord {
        self.ribbon_expanded = !self.ribbon_expanded;
        let record = self.ribbon.cta_click(
            CTA_RIBBON_EXPAND_TOGGLE,
            Some(json!({ "expanded": self.ribbon_expanded })),
        );
        self.via.log_event(&record);
        record
    }

    /// Whether the ribbon is expanded.
    pub fn is_ribbon_expanded(&self) -> bool {
        self.ribbon_expanded
    }

    /// Render the panel for `content_id`.
    ///
    /// Emits the panel-open CTA with the id (or `default`) and returns the
    /// matching insight, if the catalog has one.
    pub fn investigate(&self, content_id: Option<&str>) -> (EventRecord, Option<&Insight>) {
        let key = content_id
            .filter(|id| !id.is_empty())
            .unwrap_or(DEFAULT_INSIGHT_KEY);
        let record = self
            .panel
            .cta_click(CTA_INVESTIGATE_PANEL_OPEN, Some(json!({ "contentId": key })));
        self.via.log_event(&record);
        (record, self.via.investigate(content_id))
    }

    /// Boot, onboard, open the investigate panel for the route's content,
    /// close it, then collapse the ribbon.
    pub fn run(&mut self, route: &str, skip_onboarding: bool) -> Vec<EventRecord> {
        let mut records = self.boot(route);
        records.extend(self.onboarding(skip_onboarding));
        records.push(self.toggle_investigate());
        if self.investigate_open {
            let (record, _) = self.investigate(content_id_for_route(route));
            records.push(record);
        }
        records.push(self.toggle_investigate());
        records.push(self.expand_ribbon());
        records
    }

    fn observe(&self, records: &[EventRecord]) {
        for record in records {
            self.via.log_event(record);
        }
    }
}

/// Last non-empty path segment of `route`, if any.
fn content_id_for_route(route: &str) -> Option<&str> {
    route.rsplit('/').find(|segment| !segment.is_empty())
}
