//! Evaluation error types

use thiserror::Error;

/// Result type alias for evaluation runs
pub type EvalResult<T> = std::result::Result<T, EvalError>;

#[derive(Error, Debug)]
pub enum EvalError {
    #[error(transparent)]
    Core(#[from] wikinav_core::Error),

    #[error("Model error: {0}")]
    Model(#[from] wikinav_llm::ModelError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("No models configured")]
    NoModels,

    #[error("Evaluation cancelled")]
    Cancelled,
}

impl EvalError {
    /// Whether the error stems from a cancelled run
    pub fn is_cancelled(&self) -> bool {
        matches!(
            self,
            Self::Cancelled
                | Self::Core(wikinav_core::Error::Cancelled)
                | Self::Model(wikinav_llm::ModelError::Cancelled)
        )
    }
}
