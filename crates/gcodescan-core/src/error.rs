//! Error handling for GCodeScan
//!
//! Provides the error types shared by every layer of the workspace:
//! - Analysis errors (cancellation, unusable input)
//! - I/O errors from reading programs
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Analysis error type
///
/// Conditions that end a scan without producing a result. Everything else
/// that can go wrong with a program line (bad numbers, unknown codes, broken
/// metadata) is absorbed by the interpreter and never surfaces here.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// The scan was cancelled through its abort handle
    #[error("Analysis aborted after {lines_processed} lines")]
    Aborted {
        /// Number of lines fully processed before cancellation was seen.
        lines_processed: u64,
    },

    /// The input cannot be analyzed at all
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Why the input was rejected.
        reason: String,
    },
}

/// Main error type for GCodeScan
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Analysis error
    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this error is a cancellation rather than a failure
    pub fn is_aborted(&self) -> bool {
        matches!(self, Error::Analysis(AnalysisError::Aborted { .. }))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
