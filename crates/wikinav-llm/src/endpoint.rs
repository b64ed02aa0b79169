//! Self-hosted model endpoint backend
//!
//! The service receives `{"richiesta": <request>, "contesto": <context>}`
//! and answers with the model's raw text as the response body.

use async_trait::async_trait;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use wikinav_core::{retry_remote, RetryPolicy};

use crate::config::EndpointConfig;
use crate::error::{ModelError, ModelResult};
use crate::traits::ModelClient;

#[derive(Debug, Serialize)]
struct EndpointRequest<'a> {
    #[serde(rename = "richiesta")]
    request: &'a str,
    #[serde(rename = "contesto")]
    context: &'a str,
}

pub struct EndpointClient {
    http: reqwest::Client,
    url: String,
    name: String,
    retry: RetryPolicy,
    cancel: CancellationToken,
}

impl EndpointClient {
    pub fn new(config: &EndpointConfig, name: impl Into<String>, url: impl Into<String>) -> ModelResult<Self> {
        let url = url.into();
        if url.is_empty() {
            return Err(ModelError::Config("endpoint model without url".to_string()));
        }
        let http = reqwest::Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            http,
            url,
            name: name.into(),
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
        let response = self
            .http
            .post(&self.url)
            .json(&EndpointRequest { request, context })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ModelError::from_status(status.as_u16(), None, message));
        }
        Ok(response.text().await?)
    }
}

#[async_trait]
impl ModelClient for EndpointClient {
    fn provider(&self) -> &str {
        "endpoint"
    }

    fn version(&self) -> &str {
        &self.name
    }

    async fn complete(&self, context: &str, request: &str) -> ModelResult<String> {
        tracing::debug!("Querying {} at {}", self.name, self.url);
        retry_remote(&self.retry, &self.cancel, &self.name, || {
            self.post_once(context, request)
        })
        .await
    }
}
