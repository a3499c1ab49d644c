//! Error types for the core data model.

use thiserror::Error;

/// Errors raised while validating or constructing core data.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Workpiece dimensions are zero or negative.
    #[error("Invalid workpiece dimensions: {width}x{height}x{thickness}mm (must be positive)")]
    InvalidDimensions {
        width: f64,
        height: f64,
        thickness: f64,
    },

    /// The workpiece does not carry enough corner points.
    #[error("Workpiece has insufficient corner points ({count}, need at least 4)")]
    InsufficientCornerPoints { count: usize },

    /// An input record is malformed.
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

/// Result type alias for core data operations.
pub type CoreResult<T> = Result<T, CoreError>;
