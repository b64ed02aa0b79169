//! Human game logs, pair statistics and benchmark datasets

use crate::difficulty::DifficultyTier;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Separator between human path steps in statistics rows
pub const HUMAN_STEP_SEPARATOR: &str = " -> ";

/// Separator appended after each winning human path in result rows
pub const HUMAN_PATH_SEPARATOR: &str = " @#@\n";

/// One recorded human game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub player_name: String,
    pub path_concept: Vec<String>,
    pub won: bool,
    #[serde(default)]
    pub time: f64,
    #[serde(default)]
    pub points: f64,
}

/// All games played on one start/end pair
#[derive(Debug, Clone, PartialEq)]
pub struct PairGames {
    pub from_node: String,
    pub to_node: String,
    pub games: Vec<GameRecord>,
}

/// Complete human game log, pairs in file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameLog {
    pub pairs: Vec<PairGames>,
}

impl GameLog {
    /// Parse a log keyed by `FROM_<start>_TO_<end>`; other keys are ignored
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;
        let mut pairs = Vec::new();

        for (key, value) in raw {
            let Some((from_node, to_node)) = parse_pair_key(&key) else {
                tracing::debug!("Ignoring non-pair key in game log: {}", key);
                continue;
            };
            let games: Vec<GameRecord> = serde_json::from_value(value)
                .map_err(|e| Error::InvalidDataset(format!("{}: {}", key, e)))?;
            pairs.push(PairGames {
                from_node,
                to_node,
                games,
            });
        }

        Ok(Self { pairs })
    }
}

fn parse_pair_key(key: &str) -> Option<(String, String)> {
    let rest = key.strip_prefix("FROM_")?;
    let (from, to) = rest.split_once("_TO_")?;
    Some((from.to_string(), to.to_string()))
}

/// One row per human game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRow {
    pub from_node: String,
    pub to_node: String,
    pub player_name: String,
    pub path_length: usize,
    pub path: String,
    pub won: bool,
    pub time: f64,
    pub points: f64,
}

/// Aggregate statistics for one start/end pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairStatistics {
    pub from_node: String,
    pub to_node: String,
    pub total_games: usize,
    pub won_games: usize,
    pub win_percentage: f64,
    /// Mean path length of won games, `None` when nobody won
    pub avg_steps_to_win: Option<f64>,
    /// Mean time of won games, `None` when nobody won
    pub avg_time_to_win: Option<f64>,
}

/// Flattened games plus per-pair statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatisticsReport {
    pub matches: Vec<MatchRow>,
    pub statistics: Vec<PairStatistics>,
}

/// Flatten a game log and aggregate win statistics per pair
pub fn compute_statistics(log: &GameLog) -> StatisticsReport {
    let mut report = StatisticsReport::default();

    for pair in &log.pairs {
        for game in &pair.games {
            report.matches.push(MatchRow {
                from_node: pair.from_node.clone(),
                to_node: pair.to_node.clone(),
                player_name: game.player_name.clone(),
                path_length: game.path_concept.len(),
                path: game.path_concept.join(HUMAN_STEP_SEPARATOR),
                won: game.won,
                time: game.time,
                points: game.points,
            });
        }

        let total_games = pair.games.len();
        let won: Vec<&GameRecord> = pair.games.iter().filter(|g| g.won).collect();
        let win_percentage = if total_games > 0 {
            round2(won.len() as f64 / total_games as f64 * 100.0)
        } else {
            0.0
        };

        report.statistics.push(PairStatistics {
            from_node: pair.from_node.clone(),
            to_node: pair.to_node.clone(),
            total_games,
            won_games: won.len(),
            win_percentage,
            avg_steps_to_win: mean(won.iter().map(|g| g.path_concept.len() as f64)).map(round2),
            avg_time_to_win: mean(won.iter().map(|g| g.time)).map(round2),
        });
    }

    tracing::debug!(
        "Computed statistics for {} pairs ({} games)",
        report.statistics.len(),
        report.matches.len()
    );
    report
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    (count > 0).then(|| sum / count as f64)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// A start/end pair selected for the benchmark
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkCase {
    pub start_node: String,
    pub end_node: String,
    pub avg_human_step_to_win: Option<f64>,
    /// Human paths (steps joined by ` -> `) with their outcome
    pub list_path_user_with_result: Vec<(String, bool)>,
}

impl BenchmarkCase {
    /// Winning human paths, each followed by the ` @#@` separator line
    pub fn human_paths(&self) -> String {
        self.list_path_user_with_result
            .iter()
            .filter(|(_, won)| *won)
            .map(|(path, _)| format!("{}{}", path, HUMAN_PATH_SEPARATOR))
            .collect()
    }
}

/// Benchmark cases grouped by tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BenchmarkDataset(BTreeMap<DifficultyTier, Vec<BenchmarkCase>>);

impl BenchmarkDataset {
    /// Dataset with every benchmark tier present and empty
    pub fn new() -> Self {
        Self(
            DifficultyTier::BENCHMARK
                .iter()
                .map(|tier| (*tier, Vec::new()))
                .collect(),
        )
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn push(&mut self, tier: DifficultyTier, case: BenchmarkCase) {
        self.0.entry(tier).or_default().push(case);
    }

    pub fn cases(&self, tier: DifficultyTier) -> &[BenchmarkCase] {
        self.0.get(&tier).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Tiers in difficulty order with their cases
    pub fn tiers(&self) -> impl Iterator<Item = (DifficultyTier, &[BenchmarkCase])> {
        self.0.iter().map(|(tier, cases)| (*tier, cases.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for BenchmarkDataset {
    fn default() -> Self {
        Self::new()
    }
}

/// Bin every pair into a tier and attach its human games
pub fn classify_games(report: &StatisticsReport) -> BenchmarkDataset {
    let mut dataset = BenchmarkDataset::new();

    for stats in &report.statistics {
        let tier = DifficultyTier::from_win_percentage(stats.win_percentage);
        if !tier.is_benchmarked() {
            tracing::debug!(
                "Skipping {} -> {} ({}% won)",
                stats.from_node,
                stats.to_node,
                stats.win_percentage
            );
            continue;
        }

        let games = report
            .matches
            .iter()
            .filter(|m| m.from_node == stats.from_node && m.to_node == stats.to_node)
            .map(|m| (m.path.clone(), m.won))
            .collect();

        dataset.push(
            tier,
            BenchmarkCase {
                start_node: stats.from_node.clone(),
                end_node: stats.to_node.clone(),
                avg_human_step_to_win: stats.avg_steps_to_win,
                list_path_user_with_result: games,
            },
        );
    }

    dataset
}
