//! One evaluated game

use serde::{Deserialize, Serialize};
use wikinav_core::DifficultyTier;

/// Inference mode reported for every row; models get no feedback mid-game
pub const INFERENCE_MODE: &str = "UNSUPERVISED";

/// Outcome of one model playing one benchmark case under one context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub game_mode: DifficultyTier,
    pub game_num: usize,
    pub model_name: String,
    pub version_model: String,
    pub type_context: String,
    pub inference_mode: String,
    pub start_node: String,
    pub end_node: String,
    /// Path titles joined by ` ->\n`
    pub steps: String,
    pub errors: Vec<String>,
    pub num_no_link: usize,
    pub num_no_page: usize,
    pub num_dis_page: usize,
    pub num_missing_page: usize,
    pub complete_path: bool,
    pub avg_human_step_to_win: Option<f64>,
    pub human_paths: String,
}

impl ResultRow {
    /// Column names in CSV order
    pub const COLUMNS: [&'static str; 17] = [
        "game_mode",
        "game_num",
        "model_name",
        "version_model",
        "type_context",
        "inference_mode",
        "start_node",
        "end_node",
        "steps",
        "errors",
        "num_no_link",
        "num_no_page",
        "num_dis_page",
        "num_missing_page",
        "complete_path",
        "avg_human_step_to_win",
        "human_paths",
    ];

    /// Field values as text, aligned with [`Self::COLUMNS`]
    pub fn fields(&self) -> [String; 17] {
        [
            self.game_mode.to_string(),
            self.game_num.to_string(),
            self.model_name.clone(),
            self.version_model.clone(),
            self.type_context.clone(),
            self.inference_mode.clone(),
            self.start_node.clone(),
            self.end_node.clone(),
            self.steps.clone(),
            self.errors.join("\n"),
            self.num_no_link.to_string(),
            self.num_no_page.to_string(),
            self.num_dis_page.to_string(),
            self.num_missing_page.to_string(),
            self.complete_path.to_string(),
            self.avg_human_step_to_win
                .map(|v| v.to_string())
                .unwrap_or_default(),
            self.human_paths.clone(),
        ]
    }
}
