//! OpenAI-compatible chat completion backend

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use wikinav_core::{retry_remote, RetryPolicy};

use crate::config::OpenAiConfig;
use crate::error::{ModelError, ModelResult};
use crate::traits::ModelClient;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    seed: u64,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Option<Vec<Choice>>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Extract the first choice's content; a body without choices is retryable
fn parse_completion(body: &str) -> ModelResult<String> {
    let response: ChatResponse = serde_json::from_str(body)?;
    let choice = response
        .choices
        .and_then(|choices| choices.into_iter().next())
        .ok_or(ModelError::MissingChoices)?;
    Ok(choice.message.content.unwrap_or_default())
}

/// Chat completion client for one model
pub struct OpenAiClient {
    http: reqwest::Client,
    config: OpenAiConfig,
    api_key: String,
    model: String,
    retry: RetryPolicy,
    cancel: CancellationToken,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig, model: impl Into<String>) -> ModelResult<Self> {
        let api_key = config
            .resolve_api_key()
            .ok_or_else(|| ModelError::MissingApiKey("openai".to_string()))?;
        let http = reqwest::Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            http,
            config,
            api_key,
            model: model.into(),
            retry: RetryPolicy::default(),
            cancel: CancellationToken::new(),
        })
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    async fn post_once(&self, context: &str, request: &str) -> ModelResult<String> {
        let body = ChatRequest {
            model: &self.model,
            seed: self.config.seed,
            messages: [
                ChatMessage {
                    role: "system",
                    content: context,
                },
                ChatMessage {
                    role: "user",
                    content: request,
                },
            ],
        };

        let response = self
            .http
            .post(&self.config.api_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok());
            let message = response.text().await.unwrap_or_default();
            return Err(ModelError::from_status(status.as_u16(), retry_after, message));
        }

        let text = response.text().await?;
        parse_completion(&text)
    }
}

#[async_trait]
impl ModelClient for OpenAiClient {
    fn provider(&self) -> &str {
        "openai"
    }

    fn version(&self) -> &str {
        &self.model
    }

    async fn complete(&self, context: &str, request: &str) -> ModelResult<String> {
        tracing::debug!("Querying {} ({} request bytes)", self.model, request.len());
        retry_remote(&self.retry, &self.cancel, &self.model, || {
            self.post_once(context, request)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let body = ChatRequest {
            model: "gpt-4o",
            seed: 42,
            messages: [
                ChatMessage {
                    role: "system",
                    content: "rules",
                },
                ChatMessage {
                    role: "user",
                    content: "Start_Node: A - End_Node: B",
                },
            ],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["seed"], 42);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "Start_Node: A - End_Node: B");
    }

    #[test]
    fn test_parse_completion() {
        let body = r####"{"id": "x", "choices": [{"index": 0, "message": {"role": "assistant", "content": "###\nA -> B"}}]}"####;
        assert_eq!(parse_completion(body).unwrap(), "###\nA -> B");
    }

    #[test]
    fn test_missing_choices_is_retryable() {
        let err = parse_completion(r#"{"error": {"message": "overloaded"}}"#).unwrap_err();
        assert!(matches!(err, ModelError::MissingChoices));
        assert!(err.is_transient());

        let err = parse_completion(r#"{"choices": []}"#).unwrap_err();
        assert!(matches!(err, ModelError::MissingChoices));
    }

    #[test]
    fn test_client_requires_key() {
        let config = OpenAiConfig {
            api_key: Some("sk-test".to_string()),
            ..Default::default()
        };
        let client = OpenAiClient::new(config, "gpt-4o-mini").unwrap();
        assert_eq!(client.provider(), "openai");
        assert_eq!(client.version(), "gpt-4o-mini");
    }
}
