//! CLI configuration file

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use wikinav_core::RetryPolicy;
use wikinav_eval::EvalConfig;
use wikinav_graph::WikiConfig;
use wikinav_llm::{EndpointConfig, ModelSpec, OpenAiConfig};

/// Default config file location
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("wikinav")
        .join("config.toml")
}

/// Configuration for the CLI
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub wiki: WikiConfig,

    #[serde(default)]
    pub retry: RetryPolicy,

    #[serde(default)]
    pub eval: EvalConfig,

    #[serde(default)]
    pub openai: OpenAiConfig,

    #[serde(default)]
    pub endpoint: EndpointConfig,

    #[serde(default)]
    pub models: Vec<ModelSpec>,
}

const KEYS: &[&str] = &[
    "wiki.api_url",
    "wiki.page_url",
    "wiki.user_agent",
    "wiki.timeout_secs",
    "retry.max_attempts",
    "retry.min_delay_ms",
    "retry.max_delay_ms",
    "eval.games_per_tier",
    "eval.max_steps",
    "eval.missing_pages",
    "eval.flag_disambiguation",
    "eval.contexts",
    "openai.api_url",
    "openai.api_key",
    "openai.seed",
    "openai.timeout_secs",
    "endpoint.timeout_secs",
    "models",
];

impl Config {
    /// Read the file at `path`; a missing file yields the defaults
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn keys() -> &'static [&'static str] {
        KEYS
    }

    /// Graph backend settings with the shared retry policy applied
    pub fn wiki_config(&self) -> WikiConfig {
        self.wiki.clone().with_retry(self.retry)
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let root = toml::Value::try_from(self).ok()?;
        let found = key.split('.').try_fold(&root, |value, part| value.get(part))?;
        Some(match found {
            toml::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    /// Set a dotted key from its text form; the result must still be a valid config
    pub fn set(&mut self, key: &str, raw: &str) -> anyhow::Result<()> {
        if !KEYS.contains(&key) {
            anyhow::bail!("Unknown config key: {}", key);
        }

        let mut root = toml::Value::try_from(&*self)?;
        let (section, leaf) = match key.split_once('.') {
            Some((section, leaf)) => (Some(section), leaf),
            None => (None, key),
        };

        let mut table = root
            .as_table_mut()
            .context("Config did not serialize to a table")?;
        if let Some(section) = section {
            table = table
                .entry(section)
                .or_insert(toml::Value::Table(toml::Table::new()))
                .as_table_mut()
                .with_context(|| format!("{} is not a section", section))?;
        }

        let expects_list = matches!(table.get(leaf), Some(toml::Value::Array(_)));
        table.insert(leaf.to_string(), parse_value(raw, expects_list));

        *self = root
            .try_into()
            .with_context(|| format!("Invalid value for {}: {}", key, raw))?;
        Ok(())
    }
}

/// Interpret `raw` as a TOML value, falling back to a plain string
fn parse_value(raw: &str, expects_list: bool) -> toml::Value {
    let parsed = format!("value = {}", raw)
        .parse::<toml::Table>()
        .ok()
        .and_then(|mut t| t.remove("value"));

    match parsed {
        Some(value @ toml::Value::Array(_)) => value,
        _ if expects_list => toml::Value::Array(
            raw.split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(|item| toml::Value::String(item.to_string()))
                .collect(),
        ),
        Some(value) => value,
        None => toml::Value::String(raw.to_string()),
    }
}
