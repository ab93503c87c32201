use std::io;
use std::path::Path;

/// Canonical result type for Logbook code
pub type Result<T> = std::result::Result<T, LogbookError>;

/// Common error type for Logbook operations
#[derive(Debug, thiserror::Error)]
pub enum LogbookError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Helper to create an IO error with file path context
pub fn io_error_with_path<P: AsRef<Path>>(error: io::Error, path: P) -> io::Error {
    io::Error::new(
        error.kind(),
        format!("{}: {}", path.as_ref().display(), error),
    )
}
