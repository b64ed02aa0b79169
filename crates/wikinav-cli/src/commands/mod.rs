//! CLI command implementations

pub mod completions;
pub mod config;
pub mod dataset;
pub mod graph;
pub mod run;
pub mod validate;
