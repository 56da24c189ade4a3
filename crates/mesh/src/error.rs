//! Error types for mesh I/O.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for mesh I/O operations.
pub type MeshIoResult<T> = Result<T, MeshIoError>;

/// Errors raised while reading or writing mesh files.
#[derive(Debug, Error)]
pub enum MeshIoError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// The file was read but does not describe a usable surface.
    #[error("invalid file content: {message}")]
    InvalidContent { message: String },

    /// Underlying read/write failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MeshIoError {
    #[must_use]
    pub fn invalid_content(message: impl Into<String>) -> Self {
        Self::InvalidContent {
            message: message.into(),
        }
    }
}
