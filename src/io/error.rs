//! Error types for stereogram synthesis and its file/encoder plumbing

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for all stereogram operations
#[derive(Error, Debug)]
pub enum StereogramError {
    /// An input grid has a zero extent or a target size is zero
    #[error("Invalid dimension for {name}: {reason}")]
    InvalidDimension {
        /// Which input or target the dimension belongs to
        name: &'static str,
        /// Description of what's wrong with the dimension
        reason: String,
    },

    /// A numeric option is outside its accepted range
    #[error("Invalid parameter '{parameter}' = '{value}': {reason}")]
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Pattern channel count differs from the canvas channel count
    #[error("Channel mismatch: expected {expected} channels, found {found}")]
    DimensionMismatch {
        /// Channel count the canvas requires
        expected: usize,
        /// Channel count the pattern provided
        found: usize,
    },

    /// Failed to load an image from the filesystem
    #[error("Failed to load image '{}': {source}", .path.display())]
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save a generated image to disk
    #[error("Failed to export image to '{}': {source}", .path.display())]
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    #[error("File system error during {operation} on '{}': {source}", .path.display())]
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// An external decoder/encoder process could not run or exited unsuccessfully
    #[error("External tool '{program}' failed: {reason}")]
    Encoder {
        /// Program that was invoked
        program: String,
        /// Exit status or spawn failure description
        reason: String,
    },
}

/// Convenience type alias for stereogram results
pub type Result<T> = std::result::Result<T, StereogramError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> StereogramError {
    StereogramError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid dimension error
pub fn invalid_dimension(name: &'static str, reason: &impl ToString) -> StereogramError {
    StereogramError::InvalidDimension {
        name,
        reason: reason.to_string(),
    }
}

/// Create a file system error bound to the path it occurred on
pub fn file_system(
    path: impl Into<PathBuf>,
    operation: &'static str,
    source: std::io::Error,
) -> StereogramError {
    StereogramError::FileSystem {
        path: path.into(),
        operation,
        source,
    }
}
