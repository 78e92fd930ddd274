//! In-process event bus over `tokio::sync::broadcast`.
//!
//! [`BroadcastBus`] fans every published record out to all current
//! subscribers. Publishing while nobody listens is accepted and the record is
//! simply dropped; slow subscribers see `RecvError::Lagged`.

use tokio::sync::broadcast;
use washington_core::constants::MAX_BUS_CAPACITY;

use crate::errors::BusError;
use crate::record::EventRecord;
use crate::sink::EventBus;

/// Default number of buffered messages per subscriber.
pub const DEFAULT_CAPACITY: usize = 1024;

/// A record together with the channel it was published on.
#[derive(Clone, Debug, PartialEq)]
pub struct BusMessage {
    /// Channel name.
    pub channel: String,
    /// The published record.
    pub record: EventRecord,
}

/// Broadcast channel that fans records out to subscribers.
#[derive(Clone, Debug)]
pub struct BroadcastBus {
    sender: broadcast::Sender<BusMessage>,
}

impl BroadcastBus {
    /// Create a bus buffering up to `capacity` messages per subscriber.
    ///
    /// `capacity` is clamped to `1..=MAX_BUS_CAPACITY`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.clamp(1, MAX_BUS_CAPACITY));
        Self { sender }
    }

    /// A receiver for all records published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<BusMessage> {
        self.sender.subscribe()
    }

    /// Number of live subscribers.
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for BroadcastBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl EventBus for BroadcastBus {
    fn publish(&self, channel: &str, record: &EventRecord) -> Result<(), BusError> {
        // send only fails when there are no receivers
        let _ = self.sender.send(BusMessage {
            channel: channel.to_owned(),
            record: record.clone(),
        });
        Ok(())
    }
}
