//! Evaluation run settings

use serde::{Deserialize, Serialize};
use wikinav_core::{MissingPagePolicy, ValidationPolicy};

use crate::context::ContextType;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvalConfig {
    /// Cases evaluated per difficulty tier, taken from the front
    #[serde(default = "default_games_per_tier")]
    pub games_per_tier: usize,

    /// Single-hop path length limit, start included
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,

    #[serde(default)]
    pub missing_pages: MissingPagePolicy,

    #[serde(default)]
    pub flag_disambiguation: bool,

    #[serde(default = "default_contexts")]
    pub contexts: Vec<ContextType>,
}

fn default_games_per_tier() -> usize {
    10
}

fn default_max_steps() -> usize {
    20
}

fn default_contexts() -> Vec<ContextType> {
    ContextType::ALL.to_vec()
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            games_per_tier: default_games_per_tier(),
            max_steps: default_max_steps(),
            missing_pages: MissingPagePolicy::default(),
            flag_disambiguation: false,
            contexts: default_contexts(),
        }
    }
}

impl EvalConfig {
    pub fn validation_policy(&self) -> ValidationPolicy {
        ValidationPolicy {
            missing_pages: self.missing_pages,
            flag_disambiguation: self.flag_disambiguation,
        }
    }
}
