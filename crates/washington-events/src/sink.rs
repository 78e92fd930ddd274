//! Best-effort delivery of event records.
//!
//! [`EventSink::publish`] tries the injected [`EventBus`] first:
//!
//! - **No bus**: the full record is written to the diagnostic log at `info`
//!   and the call reports [`Delivery::LocalLog`].
//! - **Bus accepts**: nothing is logged; [`Delivery::Bus`].
//! - **Bus errors or panics**: one `error` line is logged and the failure is
//!   returned as a [`TransportFailure`] value.
//!
//! `publish` never panics. There is no retry, queueing, or delivery
//! confirmation; records are handed over in call order and forgotten.
//!
//! A panicking bus is caught with `catch_unwind`, but the process panic hook
//! still runs first. With the default hook that prints its own message to
//! stderr next to the `error` line. Hosts that install a bus which may panic
//! and want exactly one diagnostic line should install their own hook with
//! [`std::panic::set_hook`].

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use washington_core::constants::DEFAULT_CHANNEL;

use crate::errors::{BusError, TransportFailure};
use crate::record::EventRecord;

/// An external transport that accepts records on a named channel.
pub trait EventBus: Send + Sync {
    /// Hand `record` to the bus on `channel`.
    fn publish(&self, channel: &str, record: &EventRecord) -> Result<(), BusError>;
}

/// Where a published record ended up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Delivery {
    /// Accepted by the external bus.
    Bus,
    /// No bus registered; written to the diagnostic log.
    LocalLog,
}

/// Delivers records to an optional external bus, falling back to the log.
#[derive(Clone)]
pub struct EventSink {
    bus: Option<Arc<dyn EventBus>>,
    channel: String,
}

impl EventSink {
    /// Create a sink with an optional bus on the given channel.
    pub fn new(bus: Option<Arc<dyn EventBus>>, channel: impl Into<String>) -> Self {
        Self {
            bus,
            channel: channel.into(),
        }
    }

    /// A sink with no bus, on the default channel.
    pub fn local() -> Self {
        Self::new(None, DEFAULT_CHANNEL)
    }

    /// A sink publishing to `bus` on the default channel.
    pub fn with_bus(bus: Arc<dyn EventBus>) -> Self {
        Self::new(Some(bus), DEFAULT_CHANNEL)
    }

    /// Channel records are published on.
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Whether an external bus is registered.
    pub fn has_bus(&self) -> bool {
        self.bus.is_some()
    }

    /// Deliver one record. Never panics.
    pub fn publish(&self, record: &EventRecord) -> Result<Delivery, TransportFailure> {
        let Some(bus) = &self.bus else {
            tracing::info!(
                channel = %self.channel,
                record = %record.to_json_string(),
                "WashingtonEvent (no bus registered)"
            );
            return Ok(Delivery::LocalLog);
        };

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| bus.publish(&self.channel, record)));
        let failure = match outcome {
            Ok(Ok(())) => return Ok(Delivery::Bus),
            Ok(Err(source)) => TransportFailure::Rejected {
                channel: self.channel.clone(),
                source,
            },
            Err(payload) => TransportFailure::Panicked {
                channel: self.channel.clone(),
                message: panic_message(payload.as_ref()),
            },
        };

        tracing::error!(
            channel = %self.channel,
            event_type = %record.kind(),
            session_id = %record.session_id(),
            error = %failure,
            "event bus publish failed"
        );
        Err(failure)
    }
}

impl Default for EventSink {
    fn default() -> Self {
        Self::local()
    }
}

impl std::fmt::Debug for EventSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventSink")
            .field("channel", &self.channel)
            .field("has_bus", &self.has_bus())
            .finish()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}
