//! Well-known names shared across crates.

/// Channel the event sink hands records to when an external bus is present.
pub const DEFAULT_CHANNEL: &str = "washington.eventstream.v0";

/// Prefix for generated session ids (`sess-<random>-<time>`).
pub const DEFAULT_SESSION_PREFIX: &str = "sess";

/// Largest per-subscriber buffer the in-process bus accepts.
pub const MAX_BUS_CAPACITY: usize = 1_048_576;

/// Product name used in log targets and settings paths.
pub const PRODUCT_NAME: &str = "washington";
