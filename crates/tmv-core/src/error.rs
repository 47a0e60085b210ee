//! Error types for topic-mover.

use thiserror::Error;

/// Top-level result type for topic-mover operations.
pub type Result<T> = std::result::Result<T, TmvError>;

/// Top-level error type for topic-mover.
#[derive(Debug, Error)]
pub enum TmvError {
    #[error("settings error: {0}")]
    Settings(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("invalid vault path: {0}")]
    InvalidPath(String),

    #[error("watch error: {0}")]
    Watch(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
