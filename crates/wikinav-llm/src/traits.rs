//! Model client trait

use async_trait::async_trait;

pub use crate::error::{ModelError, ModelResult as Result};

/// A language model that answers one request under a system context
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Backend family, e.g. `openai`
    fn provider(&self) -> &str;

    /// Model identifier reported in results
    fn version(&self) -> &str;

    /// Return the raw text of the model's answer
    async fn complete(&self, context: &str, request: &str) -> Result<String>;
}
