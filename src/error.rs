//! Typed failures of the edge detection engine.

use thiserror::Error;

/// Errors returned by [`detect_edges`](crate::edge_detector::detect_edges).
///
/// All checks happen before any pixel is touched, so an error never comes
/// with a partially written buffer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EdgeError {
    /// Empty image, zero width/height, or a buffer that does not hold
    /// exactly `width * height` samples.
    #[error("invalid input image: {0}")]
    InvalidInput(String),

    /// Strength ratio outside `[0.0, 1.0]` (or NaN).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The output buffer could not be obtained.
    #[error("failed to allocate {bytes} bytes for the edge detected image")]
    AllocationFailure { bytes: usize },
}
