//! Remote encyclopedia endpoints and request limits

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use wikinav_core::RetryPolicy;

/// Bytes escaped when a title becomes a page path segment. `/` stays literal
/// since subpage titles use it.
const TITLE_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Connection settings for a MediaWiki site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WikiConfig {
    /// `api.php` endpoint for metadata queries
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Prefix of rendered article pages; the title is appended
    #[serde(default = "default_page_url")]
    pub page_url: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Filled from the shared retry settings
    #[serde(skip)]
    pub retry: RetryPolicy,
}

fn default_api_url() -> String {
    "https://en.wikipedia.org/w/api.php".to_string()
}

fn default_page_url() -> String {
    "https://en.wikipedia.org/wiki/".to_string()
}

fn default_user_agent() -> String {
    format!("wikinav/{} (WikiGame benchmark)", env!("CARGO_PKG_VERSION"))
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            page_url: default_page_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            retry: RetryPolicy::default(),
        }
    }
}

impl WikiConfig {
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Rendered-page URL for a title, escaped as a single path segment
    pub fn page_url_for(&self, title: &str) -> String {
        format!("{}{}", self.page_url, utf8_percent_encode(title, TITLE_SEGMENT))
    }
}
