//! Wikinav CLI - WikiGame benchmark for language models

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::{completions, config as config_cmd, dataset, graph, run, validate};
use config::{config_file_path, Config};
use output::OutputFormat;
use wikinav_core::LinkGraph;
use wikinav_graph::{MemoryLinkGraph, WikiClient, WikipediaGraph};

#[derive(Parser)]
#[command(name = "wikinav")]
#[command(author, version, about = "WikiGame navigation benchmark for language models")]
pub struct Cli {
    /// Config file (default: <config dir>/wikinav/config.toml)
    #[arg(short, long, global = true, env = "WIKINAV_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format: table, json, csv
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(config_file_path)
    }

    pub fn output_format(&self) -> OutputFormat {
        OutputFormat::from(self.format.as_str())
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Prepare benchmark data from human game logs
    Dataset(dataset::DatasetArgs),
    /// Inspect the encyclopedia link graph
    Graph(graph::GraphArgs),
    /// Validate a path of article titles
    Validate(validate::ValidateArgs),
    /// Evaluate the configured models on a benchmark
    Run(run::RunArgs),
    /// Manage configuration
    Config(config_cmd::ConfigArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Configuration and cancellation shared by the commands
pub struct AppContext {
    pub config: Config,
    pub cancel: CancellationToken,
}

impl AppContext {
    pub fn new(cli: &Cli) -> anyhow::Result<Self> {
        let path = cli.config_path();
        tracing::debug!("Using config at: {:?}", path);
        let config = Config::load(&path)?;

        let cancel = CancellationToken::new();
        let on_interrupt = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("Interrupted, cancelling outstanding requests");
                on_interrupt.cancel();
            }
        });

        Ok(Self { config, cancel })
    }

    /// Offline fixture graph when given, the live encyclopedia otherwise
    pub fn link_graph(&self, fixture: Option<&Path>) -> anyhow::Result<Box<dyn LinkGraph>> {
        if let Some(path) = fixture {
            tracing::debug!("Loading graph fixture {:?}", path);
            let json = std::fs::read_to_string(path)?;
            return Ok(Box::new(MemoryLinkGraph::from_json(&json)?));
        }

        let client = WikiClient::new(self.config.wiki_config())?.with_cancellation(self.cancel.clone());
        Ok(Box::new(WikipediaGraph::new(client)))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    tracing::debug!("Starting wikinav CLI");

    match &cli.command {
        Commands::Dataset(args) => dataset::run(args, &cli)?,
        Commands::Graph(args) => graph::run(args, &cli, &AppContext::new(&cli)?).await?,
        Commands::Validate(args) => validate::run(args, &cli, &AppContext::new(&cli)?).await?,
        Commands::Run(args) => run::run(args, &cli, &AppContext::new(&cli)?).await?,
        Commands::Config(args) => config_cmd::run(args, &cli.config_path())?,
        Commands::Completions(args) => completions::run(args)?,
    }

    Ok(())
}
