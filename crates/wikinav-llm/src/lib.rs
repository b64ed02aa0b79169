//! Wikinav LLM - Model clients and the answer protocol
//!
//! Two backends are provided: an OpenAI-compatible chat completion client
//! and a plain HTTP endpoint that takes a request and a context. Both
//! apply bounded retry with backoff and honour a cancellation token.

pub mod config;
pub mod endpoint;
pub mod error;
pub mod openai;
pub mod protocol;
#[cfg(any(test, feature = "test-support"))]
pub mod scripted;
pub mod traits;

pub use config::{EndpointConfig, ModelProvider, ModelSpec, OpenAiConfig};
pub use endpoint::EndpointClient;
pub use error::{ModelError, ModelResult};
pub use openai::OpenAiClient;
pub use protocol::{link_request, parse_link_answer, parse_path_answer, path_request};
#[cfg(any(test, feature = "test-support"))]
pub use scripted::ScriptedModel;
pub use traits::ModelClient;
