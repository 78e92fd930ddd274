//! Error types for event delivery.
//!
//! [`BusError`] is what an [`EventBus`](crate::EventBus) implementation
//! reports. [`TransportFailure`] is what the sink reports after containing a
//! failed hand-off; it is logged once and never re-raised.

use thiserror::Error;

/// Errors reported by an external bus.
#[derive(Debug, Error)]
pub enum BusError {
    /// The bus has shut down and accepts nothing.
    #[error("bus closed")]
    Closed,

    /// The bus refused the channel or the record.
    #[error("rejected: {0}")]
    Rejected(String),

    /// Any other transport error.
    #[error("transport error: {0}")]
    Other(String),
}

/// A bus was present but handing the record to it failed.
#[derive(Debug, Error)]
pub enum TransportFailure {
    /// The bus returned an error.
    #[error("publish on {channel} failed: {source}")]
    Rejected {
        /// Channel the record was published on.
        channel: String,
        /// Error returned by the bus.
        #[source]
        source: BusError,
    },

    /// The bus panicked during the hand-off.
    #[error("publish on {channel} panicked: {message}")]
    Panicked {
        /// Channel the record was published on.
        channel: String,
        /// Panic payload, when it was a string.
        message: String,
    },
}

impl TransportFailure {
    /// Channel the failed publish targeted.
    pub fn channel(&self) -> &str {
        match self {
            Self::Rejected { channel, .. } | Self::Panicked { channel, .. } => channel,
        }
    }
}

/// Convenience type alias for bus results.
pub type Result<T> = std::result::Result<T, BusError>;
