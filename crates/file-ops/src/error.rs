//! Error types for file operations.

/// Errors produced by shell and filesystem helpers.
#[derive(Debug, thiserror::Error)]
pub enum FileOpsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("invalid download URL: {0}")]
    InvalidUrl(String),

    #[error("path not found: {0}")]
    NotFound(std::path::PathBuf),
}
