//! Error types for the directory core.
//!
//! Query intents never fail for business reasons: a missing id yields an
//! empty result. Errors come from store mutations, dataset files and
//! configuration.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DirectoryError>;

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: i64 },

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("invalid dataset: {0}")]
    InvalidFormat(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl DirectoryError {
    pub(crate) fn not_found(kind: &'static str, id: i64) -> Self {
        Self::NotFound { kind, id }
    }
}
