//! # washington-via
//!
//! VIA v0.1 stub. VIA is mocked in the guest preview: the ribbon shows
//! static messages and "investigate" returns a pre-computed insight for the
//! current content id, falling back to a default insight. No reasoning,
//! ranking, or network access happens here.

#![deny(unsafe_code)]

pub mod catalog;
pub mod client;
pub mod errors;

pub use catalog::{DEFAULT_INSIGHT_KEY, Insight, InsightCatalog};
pub use client::{FALLBACK_RIBBON_MESSAGE, ViaClient};
pub use errors::{Result, ViaError};
