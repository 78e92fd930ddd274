//! # washington-events
//!
//! Guest-session event emission pipeline.
//!
//! - **Event kinds**: open [`EventKind`] taxonomy with four well-known kinds
//! - **Event records**: immutable [`EventRecord`] matching the wire shape
//!   `{type, sessionId, timestamp, payload}`
//! - **Event factory**: [`EventFactory`] bound to a session id and a UI source
//!   label; stamps records and hands them to the sink
//! - **Event sink**: [`EventSink`] delivering to an injected [`EventBus`] or,
//!   when none is present, to the local diagnostic log. Never panics to callers.
//! - **Broadcast bus**: in-process [`BroadcastBus`] built on `tokio::sync::broadcast`

#![deny(unsafe_code)]

pub mod bus;
pub mod errors;
pub mod factory;
pub mod kind;
pub mod record;
pub mod sink;

pub use bus::{BroadcastBus, BusMessage};
pub use errors::{BusError, TransportFailure};
pub use factory::EventFactory;
pub use kind::EventKind;
pub use record::EventRecord;
pub use sink::{Delivery, EventBus, EventSink};
