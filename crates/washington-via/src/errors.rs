//! VIA catalog loading errors.

use thiserror::Error;

/// Errors that can occur when loading an insight catalog.
#[derive(Debug, Error)]
pub enum ViaError {
    /// Failed to read the catalog file.
    #[error("failed to read insight catalog: {0}")]
    Io(#[from] std::io::Error),
    /// The catalog is not valid JSON of the expected shape.
    #[error("failed to parse insight catalog: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for VIA operations.
pub type Result<T> = std::result::Result<T, ViaError>;
