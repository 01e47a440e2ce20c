//! Error types for the geo crate.

use thiserror::Error;

/// Result type alias for geo operations.
pub type Result<T> = std::result::Result<T, GeoError>;

/// Errors that can occur while decoding a location.
///
/// These only surface through the strict parsing API; the lenient
/// [`Location::resolve`](crate::Location::resolve) path logs them and treats
/// the location as absent.
#[derive(Debug, Error)]
pub enum GeoError {
    /// Coordinates outside the valid range, or not finite
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    /// A value that is neither a point object nor an encoded point
    #[error("Unrecognized location shape: {0}")]
    UnrecognizedShape(String),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Error code for integration with dogfinder-core error handling.
/// Range: 10xxx for geo errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoErrorCode {
    /// Invalid coordinate values
    InvalidCoordinate = 10001,
    /// Unrecognized location shape
    UnrecognizedShape = 10002,
    /// JSON parsing error
    JsonParsing = 10003,
}

impl GeoError {
    /// Returns the error code for this error.
    pub fn code(&self) -> GeoErrorCode {
        match self {
            GeoError::InvalidCoordinate(_) => GeoErrorCode::InvalidCoordinate,
            GeoError::UnrecognizedShape(_) => GeoErrorCode::UnrecognizedShape,
            GeoError::JsonError(_) => GeoErrorCode::JsonParsing,
        }
    }
}
