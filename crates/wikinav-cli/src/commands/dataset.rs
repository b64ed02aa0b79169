//! Benchmark preparation commands

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::output::{format_output, OutputFormat};
use crate::Cli;
use wikinav_core::{classify_games, compute_statistics, GameLog, StatisticsReport};

#[derive(Args)]
pub struct DatasetArgs {
    #[command(subcommand)]
    pub command: DatasetCommands,
}

#[derive(Subcommand)]
pub enum DatasetCommands {
    /// Per-game rows and per-pair statistics from a complete game log
    Stats {
        /// Game log (JSON object keyed by FROM_<start>_TO_<end>)
        input: PathBuf,
        /// Write the statistics report here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Bin pairs into difficulty tiers and build the benchmark file
    Classify {
        /// Statistics report written by `dataset stats`
        input: PathBuf,
        /// Write the benchmark here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

pub fn run(args: &DatasetArgs, cli: &Cli) -> anyhow::Result<()> {
    match &args.command {
        DatasetCommands::Stats { input, output } => {
            let log = GameLog::from_json(&read(input)?)?;
            let report = compute_statistics(&log);
            tracing::info!(
                "{} games over {} pairs",
                report.matches.len(),
                report.statistics.len()
            );
            match output {
                Some(path) => write_json(path, &report)?,
                None if cli.output_format() == OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&report)?)
                }
                None => print!("{}", format_output(&report.statistics, cli.output_format())?),
            }
        }
        DatasetCommands::Classify { input, output } => {
            let report: StatisticsReport = serde_json::from_str(&read(input)?)
                .with_context(|| format!("{} is not a statistics report", input.display()))?;
            let dataset = classify_games(&report);
            match output {
                Some(path) => write_json(path, &dataset)?,
                None if cli.output_format() == OutputFormat::Table => {
                    for (tier, cases) in dataset.tiers() {
                        println!("{}: {} pairs", tier, cases.len());
                    }
                }
                None => println!("{}", serde_json::to_string_pretty(&dataset)?),
            }
        }
    }
    Ok(())
}

fn read(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn write_json<T: Serialize>(path: &Path, data: &T) -> anyhow::Result<()> {
    std::fs::write(path, serde_json::to_string_pretty(data)?)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}
