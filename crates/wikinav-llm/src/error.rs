//! Model client error types

use std::time::Duration;

use thiserror::Error;
use wikinav_core::RemoteError;

/// Result type alias for model calls
pub type ModelResult<T> = std::result::Result<T, ModelError>;

/// Model client error types
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Rate limited (status {status}): retry after {retry_after_ms}ms")]
    RateLimited { status: u16, retry_after_ms: u64 },

    #[error("Authentication failed (status {status}): {message}")]
    Auth { status: u16, message: String },

    #[error("Server error (status {status}): {message}")]
    Server { status: u16, message: String },

    #[error("Request rejected (status {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("No choices in completion response")]
    MissingChoices,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("No API key configured for {0}")]
    MissingApiKey(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Giving up after {attempts} attempts: {last}")]
    RetriesExhausted { attempts: usize, last: Box<ModelError> },

    #[error("Request cancelled")]
    Cancelled,
}

impl ModelError {
    /// Whether retrying the same call may succeed
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout() || e.is_connect() || e.is_request() || e.is_body(),
            Self::RateLimited { .. } | Self::Server { .. } | Self::MissingChoices => true,
            _ => false,
        }
    }

    /// Classify a non-success HTTP status
    pub fn from_status(status: u16, retry_after_secs: Option<u64>, message: String) -> Self {
        match status {
            429 => Self::RateLimited {
                status,
                retry_after_ms: retry_after_secs.unwrap_or(0).saturating_mul(1000),
            },
            401 | 403 => Self::Auth { status, message },
            s if s >= 500 => Self::Server { status, message },
            _ => Self::Rejected { status, message },
        }
    }
}

impl RemoteError for ModelError {
    fn is_transient(&self) -> bool {
        ModelError::is_transient(self)
    }

    fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after_ms, .. } => {
                Some(Duration::from_millis(*retry_after_ms))
            }
            _ => None,
        }
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

impl From<ModelError> for wikinav_core::Error {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::Cancelled => Self::Cancelled,
            ModelError::Http(e) if e.is_timeout() => Self::Timeout(e.to_string()),
            ModelError::Serialization(e) => Self::Serialization(e),
            other => Self::Remote(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(matches!(
            ModelError::from_status(429, Some(3), String::new()),
            ModelError::RateLimited {
                retry_after_ms: 3000,
                ..
            }
        ));
        assert!(matches!(
            ModelError::from_status(401, None, "bad key".to_string()),
            ModelError::Auth { status: 401, .. }
        ));
        assert!(matches!(
            ModelError::from_status(502, None, String::new()),
            ModelError::Server { .. }
        ));
        assert!(matches!(
            ModelError::from_status(400, None, String::new()),
            ModelError::Rejected { .. }
        ));
    }

    #[test]
    fn test_huge_retry_after_saturates() {
        assert!(matches!(
            ModelError::from_status(429, Some(u64::MAX / 10), String::new()),
            ModelError::RateLimited {
                retry_after_ms: u64::MAX,
                ..
            }
        ));
    }

    #[test]
    fn test_rate_limit_stretches_backoff() {
        let throttled = ModelError::from_status(429, Some(5), String::new());
        assert_eq!(
            wikinav_core::adjust_for_rate_limit(&throttled, Some(Duration::from_secs(1))),
            Some(Duration::from_secs(5))
        );

        let overloaded = ModelError::from_status(503, Some(5), String::new());
        assert_eq!(
            wikinav_core::adjust_for_rate_limit(&overloaded, Some(Duration::from_secs(1))),
            Some(Duration::from_secs(1))
        );
    }

    #[test]
    fn test_transient_errors() {
        assert!(ModelError::MissingChoices.is_transient());
        assert!(ModelError::from_status(503, None, String::new()).is_transient());
        assert!(!ModelError::from_status(401, None, String::new()).is_transient());
        assert!(!ModelError::Cancelled.is_transient());
        assert!(!ModelError::MissingApiKey("openai".to_string()).is_transient());
    }

    #[test]
    fn test_conversion_to_core_error() {
        let core: wikinav_core::Error = ModelError::Cancelled.into();
        assert!(matches!(core, wikinav_core::Error::Cancelled));

        let core: wikinav_core::Error = ModelError::MissingChoices.into();
        assert!(matches!(core, wikinav_core::Error::Remote(_)));
    }
}
