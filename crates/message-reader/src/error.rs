//! Error types for the message reader front-end.

use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum ReaderError {
    /// Directory error.
    #[error("Directory error: {0}")]
    Directory(#[from] chat_core::DirectoryError),

    /// No conversation with this user name.
    #[error("No conversation with {0}")]
    UnknownUser(String),

    /// JSON output failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing output failed.
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for reader commands.
pub type Result<T> = std::result::Result<T, ReaderError>;
