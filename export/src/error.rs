//! Error types for export operations.
//!
//! Wraps reference resolution failures together with the serialization and
//! I/O failures of the output boundary.

use thiserror::Error;

use crate::resolve::ResolveError;

/// Errors that abort an export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The requested package could not be resolved.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// JSON serialization failure.
    #[error("JSON serialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Writing the output failed.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Convenience alias for results with [`ExportError`].
pub type Result<T> = std::result::Result<T, ExportError>;
