//! Difficulty tiers derived from human win rates

use serde::{Deserialize, Serialize};

/// Difficulty of a start/end pair, from the share of human games won
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DifficultyTier {
    Medium,
    Hard,
    VeryHard,
    Impossible,
    /// Excluded from the benchmark
    Skip,
}

impl DifficultyTier {
    /// Tiers that appear in a benchmark dataset, easiest first
    pub const BENCHMARK: [DifficultyTier; 4] = [
        DifficultyTier::Medium,
        DifficultyTier::Hard,
        DifficultyTier::VeryHard,
        DifficultyTier::Impossible,
    ];

    /// Bin a win percentage (0-100).
    ///
    /// Bands are closed on both ends, so values falling between them
    /// (e.g. 49.5) and anything above 75 are skipped.
    pub fn from_win_percentage(win_percentage: f64) -> Self {
        if (50.0..=75.0).contains(&win_percentage) {
            Self::Medium
        } else if (25.0..=49.0).contains(&win_percentage) {
            Self::Hard
        } else if (1.0..=24.0).contains(&win_percentage) {
            Self::VeryHard
        } else if win_percentage < 1.0 {
            Self::Impossible
        } else {
            Self::Skip
        }
    }

    pub fn is_benchmarked(&self) -> bool {
        !matches!(self, Self::Skip)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Medium => "MEDIUM",
            Self::Hard => "HARD",
            Self::VeryHard => "VERY_HARD",
            Self::Impossible => "IMPOSSIBLE",
            Self::Skip => "SKIP",
        }
    }
}

impl std::fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_edges() {
        assert_eq!(DifficultyTier::from_win_percentage(75.0), DifficultyTier::Medium);
        assert_eq!(DifficultyTier::from_win_percentage(50.0), DifficultyTier::Medium);
        assert_eq!(DifficultyTier::from_win_percentage(49.0), DifficultyTier::Hard);
        assert_eq!(DifficultyTier::from_win_percentage(25.0), DifficultyTier::Hard);
        assert_eq!(DifficultyTier::from_win_percentage(24.0), DifficultyTier::VeryHard);
        assert_eq!(DifficultyTier::from_win_percentage(1.0), DifficultyTier::VeryHard);
        assert_eq!(DifficultyTier::from_win_percentage(0.0), DifficultyTier::Impossible);
        assert_eq!(DifficultyTier::from_win_percentage(0.5), DifficultyTier::Impossible);
    }

    #[test]
    fn test_out_of_band_is_skipped() {
        assert_eq!(DifficultyTier::from_win_percentage(80.0), DifficultyTier::Skip);
        assert_eq!(DifficultyTier::from_win_percentage(49.5), DifficultyTier::Skip);
        assert_eq!(DifficultyTier::from_win_percentage(24.5), DifficultyTier::Skip);
        assert!(!DifficultyTier::Skip.is_benchmarked());
    }

    #[test]
    fn test_serialized_names() {
        let json = serde_json::to_string(&DifficultyTier::VeryHard).unwrap();
        assert_eq!(json, "\"VERY_HARD\"");
    }
}
