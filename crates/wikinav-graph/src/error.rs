//! Graph backend error types

use thiserror::Error;
use wikinav_core::RemoteError;

/// Result type alias for graph backend operations
pub type GraphResult<T> = std::result::Result<T, GraphError>;

/// Graph backend error types
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("API error {code}: {info}")]
    Api { code: String, info: String },

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("HTML error: {0}")]
    Html(String),

    #[error("Giving up after {attempts} attempts: {last}")]
    RetriesExhausted { attempts: usize, last: Box<GraphError> },

    #[error("Request cancelled")]
    Cancelled,
}

impl GraphError {
    /// Whether retrying the same request may succeed
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            Self::Api { code, .. } => code == "maxlag" || code == "ratelimited",
            _ => false,
        }
    }
}

impl RemoteError for GraphError {
    fn is_transient(&self) -> bool {
        GraphError::is_transient(self)
    }

    fn cancelled() -> Self {
        Self::Cancelled
    }

    fn retries_exhausted(attempts: usize, last: Self) -> Self {
        Self::RetriesExhausted {
            attempts,
            last: Box::new(last),
        }
    }
}

impl From<GraphError> for wikinav_core::Error {
    fn from(err: GraphError) -> Self {
        match err {
            GraphError::Cancelled => Self::Cancelled,
            GraphError::Http(e) if e.is_timeout() => Self::Timeout(e.to_string()),
            GraphError::Serialization(e) => Self::Serialization(e),
            other => Self::Remote(other.to_string()),
        }
    }
}
