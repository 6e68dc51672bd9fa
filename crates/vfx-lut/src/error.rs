//! LUT and CDL file error types.

use thiserror::Error;

/// Result type for LUT operations.
pub type LutResult<T> = Result<T, LutError>;

/// Errors that can occur while reading color-correction files or
/// querying the format registry.
#[derive(Debug, Error)]
pub enum LutError {
    /// Parse error when loading a file or record.
    #[error("parse error: {0}")]
    ParseError(String),

    /// Index past the end of a fixed table.
    #[error("index {index} out of range (0..{len})")]
    OutOfRange {
        /// Requested index
        index: usize,
        /// Number of entries
        len: usize,
    },

    /// A record or format was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
