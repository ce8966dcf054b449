//! Error types for the lloyd crate

use thiserror::Error;

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading points or clustering them
#[derive(Error, Debug)]
pub enum Error {
    /// Cluster count outside `(1, N)`
    #[error("Invalid number of clusters!")]
    InvalidClusterCount {
        /// Requested number of clusters
        k: usize,
        /// Number of points available
        n: usize,
    },

    /// Iteration cap outside `(1, limit)`
    #[error("Invalid maximum iteration!")]
    InvalidIterationCount {
        /// Requested maximum iteration count
        max_iter: usize,
        /// Exclusive upper bound it was checked against
        limit: usize,
    },

    /// Any other invalid configuration value
    #[error("Invalid parameter: {message}")]
    InvalidParameter {
        /// Error message
        message: String,
    },

    /// A record could not be read as a comma-separated numeric row
    #[error("Malformed input on line {line}: {message}")]
    MalformedInput {
        /// 1-based line number of the offending record
        line: usize,
        /// Error message
        message: String,
    },

    /// Two vectors that must share a dimension do not
    #[error("Dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Dimension that was expected
        expected: usize,
        /// Dimension that was found
        found: usize,
    },

    /// Underlying I/O failure
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a new InvalidClusterCount error
    pub fn invalid_cluster_count(k: usize, n: usize) -> Self {
        Self::InvalidClusterCount { k, n }
    }

    /// Create a new InvalidIterationCount error
    pub fn invalid_iteration_count(max_iter: usize, limit: usize) -> Self {
        Self::InvalidIterationCount { max_iter, limit }
    }

    /// Create a new InvalidParameter error
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }

    /// Create a new MalformedInput error
    pub fn malformed_input(line: usize, message: impl Into<String>) -> Self {
        Self::MalformedInput {
            line,
            message: message.into(),
        }
    }

    /// Create a new DimensionMismatch error
    pub fn dimension_mismatch(expected: usize, found: usize) -> Self {
        Self::DimensionMismatch { expected, found }
    }
}
