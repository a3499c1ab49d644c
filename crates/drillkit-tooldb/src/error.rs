//! Error types for the tool database crate.
//!
//! This module provides structured error types for tool table loading,
//! validation, and tool matching.

use std::io;
use thiserror::Error;

/// Errors that can occur during tool table operations.
#[derive(Error, Debug)]
pub enum ToolDbError {
    /// No tool in the table satisfies the requirement.
    #[error("No tool found for {diameter}mm drilling with direction {direction}")]
    ToolNotFound {
        /// Required diameter in mm.
        diameter: f64,
        /// Required direction code.
        direction: u8,
    },

    /// The direction vector maps to no direction code.
    #[error("Unsupported direction vector: {0}")]
    UnsupportedDirection(String),

    /// A tool row is malformed.
    #[error("Invalid tool row: {0}")]
    InvalidRow(String),

    /// Failed to load the tool table from storage.
    #[error("Failed to load tool table: {0}")]
    LoadError(String),

    /// Failed to save the tool table to storage.
    #[error("Failed to save tool table: {0}")]
    SaveError(String),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type alias for tool database operations.
pub type ToolDbResult<T> = Result<T, ToolDbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_db_error_display() {
        let err = ToolDbError::ToolNotFound {
            diameter: 8.0,
            direction: 2,
        };
        assert_eq!(
            err.to_string(),
            "No tool found for 8mm drilling with direction 2"
        );

        let err = ToolDbError::UnsupportedDirection("(0.5, 0.5, 0.0)".to_string());
        assert_eq!(err.to_string(), "Unsupported direction vector: (0.5, 0.5, 0.0)");

        let err = ToolDbError::LoadError("corrupted JSON".to_string());
        assert_eq!(err.to_string(), "Failed to load tool table: corrupted JSON");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let db_err: ToolDbError = io_err.into();
        assert!(matches!(db_err, ToolDbError::IoError(_)));
    }
}
