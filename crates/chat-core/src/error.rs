//! Error types for directory operations.

use thiserror::Error;

/// Errors that can occur when querying or mutating a conversation directory.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// The targeted record does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// A message kind discriminant that is not one of the supported kinds.
    #[error("unknown message kind: {0}")]
    UnknownMessageKind(String),

    /// A timestamp string that could not be parsed.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Attempted to send a message with no text.
    #[error("message text is empty")]
    EmptyMessage,

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    Configuration(String),
}

impl DirectoryError {
    /// Shorthand for a missing conversation.
    pub fn conversation_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: "conversation",
            id: id.into(),
        }
    }

    /// Whether this error means the target record was missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type for directory operations.
pub type Result<T> = std::result::Result<T, DirectoryError>;
