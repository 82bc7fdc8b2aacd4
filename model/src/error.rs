//! Error types for model loading.
//!
//! Covers every way building a [`Model`](crate::Model) can fail: I/O,
//! document parsing, and structural problems in the document itself.

use thiserror::Error;

/// Errors that can occur while loading a model document.
#[derive(Debug, Error)]
pub enum ModelError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// The file extension does not name a supported document format.
    #[error("unsupported model format '{0}': expected .json, .yaml or .yml")]
    UnsupportedFormat(String),

    /// Two elements share the same identifier.
    #[error("duplicate element ID in model: {0}")]
    DuplicateUuid(String),
}

/// Convenience alias for results with [`ModelError`].
pub type Result<T> = std::result::Result<T, ModelError>;
