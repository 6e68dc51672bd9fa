//! Error types for transform construction, serialization and processing.
//!
//! This module provides error handling for:
//! - Field validation (setters, constructors, processor compilation)
//! - Index access into groups and the file-format registry
//! - CDL XML records and YAML transform documents
//! - Descriptors that need an external config to evaluate

use thiserror::Error;

/// Result type for OCIO operations.
pub type OcioResult<T> = Result<T, OcioError>;

/// Errors that can occur during OCIO operations.
#[derive(Debug, Error)]
pub enum OcioError {
    /// Malformed field or a value the math cannot handle.
    #[error("validation error: {0}")]
    Validation(String),

    /// Index past the end of a group or registry.
    #[error("index {index} out of range (0..{len})")]
    OutOfRange {
        /// Requested index.
        index: usize,
        /// Number of entries.
        len: usize,
    },

    /// Malformed CDL XML record.
    #[error("parse error: {0}")]
    Parse(String),

    /// YAML transform document error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// I/O error reading referenced files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from the CDL file layer.
    #[error("CDL file error: {0}")]
    Lut(#[from] vfx_lut::LutError),

    /// Descriptor that can only be evaluated against a config.
    #[error("{kind} cannot be evaluated without a config")]
    Unresolved {
        /// Transform kind name.
        kind: &'static str,
    },

    /// File format outside the evaluation engine.
    #[error("unsupported file format: {0}")]
    Unsupported(String),
}

impl OcioError {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
