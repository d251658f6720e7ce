//! Error types for telemetry assembly and serialization

use thiserror_no_std::Error;

/// Result type for telemetry operations
pub type TelemetryResult<T> = Result<T, TelemetryError>;

/// Errors reported by the telemetry layer
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// Rendered text does not fit the provided buffer
    #[error("telemetry line does not fit in a {capacity} byte buffer")]
    BufferTooSmall {
        /// Capacity of the buffer that was offered
        capacity: usize,
    },

    /// Document could not be serialized or parsed
    #[error("invalid telemetry document: {0}")]
    Json(#[from] serde_json::Error),

    /// Serial line carries no `{...}` payload
    #[error("no telemetry document in line")]
    NoDocument,
}
