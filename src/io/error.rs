//! Error types for grid construction, configuration parsing and rendering output

use std::fmt;
use std::path::PathBuf;

/// Main error type for all engine and runner operations
#[derive(Debug)]
pub enum LifeError {
    /// Grid dimensions are zero or exceed the supported maximum
    InvalidDimensions {
        /// Requested width in cells
        width: usize,
        /// Requested height in cells
        height: usize,
        /// Explanation of why the dimensions were rejected
        reason: String,
    },

    /// Cell buffers could not be reserved
    AllocationFailed {
        /// Number of cells that were requested per buffer
        cells: usize,
    },

    /// Configuration value validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Worker pool for the parallel tick could not be created
    ThreadPool {
        /// Description reported by the pool builder
        reason: String,
    },

    /// Failed to encode or save a rendering
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for LifeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions {
                width,
                height,
                reason,
            } => {
                write!(f, "Invalid grid dimensions {width}x{height}: {reason}")
            }
            Self::AllocationFailed { cells } => {
                write!(f, "Failed to allocate cell buffers for {cells} cells")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ThreadPool { reason } => {
                write!(f, "Failed to build tick worker pool: {reason}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for LifeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for engine results
pub type Result<T> = std::result::Result<T, LifeError>;

impl From<std::io::Error> for LifeError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> LifeError {
    LifeError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid dimensions error
pub fn invalid_dimensions(width: usize, height: usize, reason: &impl ToString) -> LifeError {
    LifeError::InvalidDimensions {
        width,
        height,
        reason: reason.to_string(),
    }
}
