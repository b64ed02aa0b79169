//! Wikinav Core - WikiGame data model and path validation
//!
//! This crate provides the article/link types, the link graph trait that
//! remote and in-memory backends implement, the path validator, and the
//! dataset preparation used to derive difficulty-tiered benchmark cases.

pub mod dataset;
pub mod difficulty;
pub mod error;
pub mod graph;
pub mod path;
pub mod retry;
pub mod title;
pub mod validation;

pub use dataset::{
    classify_games, compute_statistics, BenchmarkCase, BenchmarkDataset, GameLog, GameRecord,
    MatchRow, PairGames, PairStatistics, StatisticsReport,
};
pub use difficulty::DifficultyTier;
pub use error::{Error, Result};
pub use graph::{Disambiguation, LinkGraph, LinkLookup, OutgoingLinks};
pub use path::GamePath;
pub use retry::{adjust_for_rate_limit, backoff, retry_remote, RemoteError, RetryPolicy};
pub use title::{ArticleTitle, LinkSet};
pub use validation::{
    ErrorCounts, MissingPagePolicy, PathError, PathValidator, ValidationPolicy, ValidationReport,
};
