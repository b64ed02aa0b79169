//! Error types for Wikinav Core

use thiserror::Error;

/// Result type alias using Wikinav's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Wikinav error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("Article not found: {0}")]
    ArticleNotFound(String),

    #[error("Remote lookup failed: {0}")]
    Remote(String),

    #[error("Remote lookup timed out: {0}")]
    Timeout(String),

    #[error("Request cancelled")]
    Cancelled,

    #[error("Invalid dataset: {0}")]
    InvalidDataset(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}
