//! Error types for the geometry pipeline.
//!
//! Structural preconditions (bad dimensions, missing workpiece data, empty
//! batches) surface as errors and abort a stage. Per-point problems never
//! do; they are recorded on the points and in the stage reports.

use thiserror::Error;

use drillkit_core::error::CoreError;

/// Errors that can occur in the geometry pipeline.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Workpiece dimensions are zero or negative.
    #[error("Invalid workpiece dimensions: {width}x{height}x{thickness}mm (must be positive)")]
    InvalidDimensions {
        width: f64,
        height: f64,
        thickness: f64,
    },

    /// The edge label is not supported by the requested transform.
    #[error("Unsupported edge: {0}")]
    UnsupportedEdge(String),

    /// No workpiece boundary was supplied.
    #[error("Missing workpiece data")]
    MissingWorkpiece,

    /// The workpiece does not carry enough corner points.
    #[error("Workpiece has insufficient corner points ({0})")]
    InsufficientCorners(usize),

    /// The batch contains no drill points.
    #[error("No drill points provided")]
    EmptyPointList,

    /// A drill point lacks a direction vector.
    #[error("Drill point missing direction vector")]
    MissingDirection,

    /// No point in the batch could be processed.
    #[error("No valid horizontal drilling points found for translation")]
    NothingToTranslate,

    /// Core data validation failed.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type alias for geometry operations.
pub type GeometryResult<T> = Result<T, GeometryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_error_display() {
        let err = GeometryError::InvalidDimensions {
            width: 0.0,
            height: 300.0,
            thickness: 20.0,
        };
        assert_eq!(
            err.to_string(),
            "Invalid workpiece dimensions: 0x300x20mm (must be positive)"
        );

        let err = GeometryError::UnsupportedEdge("VERTICAL".to_string());
        assert_eq!(err.to_string(), "Unsupported edge: VERTICAL");

        let err = GeometryError::InsufficientCorners(2);
        assert_eq!(
            err.to_string(),
            "Workpiece has insufficient corner points (2)"
        );

        let err = GeometryError::EmptyPointList;
        assert_eq!(err.to_string(), "No drill points provided");
    }

    #[test]
    fn test_core_error_conversion() {
        let core_err = CoreError::InvalidRecord("bad".to_string());
        let err: GeometryError = core_err.into();
        assert!(matches!(err, GeometryError::Core(_)));
    }
}
