//! HTTP client for MediaWiki endpoints

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use wikinav_core::retry_remote;

use crate::config::WikiConfig;
use crate::error::{GraphError, GraphResult};

/// Thin wrapper around `reqwest` adding timeout, bounded retry and cancellation
#[derive(Debug, Clone)]
pub struct WikiClient {
    http: reqwest::Client,
    config: WikiConfig,
    cancel: CancellationToken,
}

impl WikiClient {
    pub fn new(config: WikiConfig) -> GraphResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout())
            .build()?;

        tracing::debug!(
            "Wiki client for {} (timeout {}s, {} attempts)",
            config.api_url,
            config.timeout_secs,
            config.retry.max_attempts
        );

        Ok(Self {
            http,
            config,
            cancel: CancellationToken::new(),
        })
    }

    /// Abort in-flight and future requests when `token` is cancelled
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn config(&self) -> &WikiConfig {
        &self.config
    }

    /// GET `api.php` with the given query parameters and decode the JSON body
    pub async fn api<T: DeserializeOwned>(&self, params: &[(&str, &str)]) -> GraphResult<T> {
        let http = &self.http;
        let url = self.config.api_url.as_str();
        retry_remote(&self.config.retry, &self.cancel, "Wiki api request", || async move {
            let response = http
                .get(url)
                .query(&[("format", "json"), ("formatversion", "2")])
                .query(params)
                .send()
                .await?;
            let response = check_status(response)?;
            Ok::<_, GraphError>(response.json::<T>().await?)
        })
        .await
    }

    /// GET the rendered HTML of an article page; `None` when the page does not exist
    pub async fn page_html(&self, title: &str) -> GraphResult<Option<String>> {
        let http = &self.http;
        let url = self.config.page_url_for(title);
        let url = url.as_str();
        retry_remote(&self.config.retry, &self.cancel, "Wiki page request", || async move {
            let response = http.get(url).send().await?;
            if response.status() == StatusCode::NOT_FOUND {
                return Ok(None);
            }
            let response = check_status(response)?;
            Ok::<_, GraphError>(Some(response.text().await?))
        })
        .await
    }
}

fn check_status(response: reqwest::Response) -> GraphResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(GraphError::Status {
            status: status.as_u16(),
            url: response.url().to_string(),
        })
    }
}
