//! Benchmark evaluation command

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::output::OutputFormat;
use crate::{AppContext, Cli};
use wikinav_core::BenchmarkDataset;
use wikinav_eval::{report, EvaluationDriver, ResultRow};
use wikinav_llm::{EndpointClient, ModelClient, ModelProvider, OpenAiClient};

#[derive(Args)]
pub struct RunArgs {
    /// Benchmark file written by `dataset classify`
    pub benchmark: PathBuf,

    /// Write results here (.csv for CSV, JSON otherwise)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Cases per tier, overriding eval.games_per_tier
    #[arg(long)]
    pub games_per_tier: Option<usize>,

    /// Single-hop step limit, overriding eval.max_steps
    #[arg(long)]
    pub max_steps: Option<usize>,

    /// Read the graph from a JSON fixture instead of the live encyclopedia
    #[arg(long)]
    pub fixture: Option<PathBuf>,
}

pub async fn run(args: &RunArgs, cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    let json = std::fs::read_to_string(&args.benchmark)
        .with_context(|| format!("Failed to read {}", args.benchmark.display()))?;
    let dataset = BenchmarkDataset::from_json(&json)?;

    let mut settings = ctx.config.eval.clone();
    if let Some(games) = args.games_per_tier {
        settings.games_per_tier = games;
    }
    if let Some(steps) = args.max_steps {
        settings.max_steps = steps;
    }

    let graph = ctx.link_graph(args.fixture.as_deref())?;
    let models = build_models(&ctx.config, &ctx.cancel)?;
    tracing::info!(
        "Evaluating {} models on {} cases ({} per tier)",
        models.len(),
        dataset.len(),
        settings.games_per_tier
    );

    let driver = EvaluationDriver::new(
        &*graph,
        models.iter().map(|m| &**m).collect(),
        settings,
    )
    .with_cancellation(ctx.cancel.clone());
    let rows = driver.run(&dataset).await?;

    match &args.output {
        Some(path) => {
            write_results(path, &rows)?;
            println!("Wrote {} results to {}", rows.len(), path.display());
        }
        None => match cli.output_format() {
            OutputFormat::Json => println!("{}", report::to_json(&rows)?),
            OutputFormat::Csv => print!("{}", report::to_csv(&rows)),
            OutputFormat::Table => print_summary(&rows),
        },
    }
    Ok(())
}

/// Instantiate a client for every configured model
fn build_models(
    config: &Config,
    cancel: &CancellationToken,
) -> anyhow::Result<Vec<Box<dyn ModelClient>>> {
    if config.models.is_empty() {
        anyhow::bail!("No models configured. Add entries with `wikinav config set models ...`");
    }

    config
        .models
        .iter()
        .map(|spec| -> anyhow::Result<Box<dyn ModelClient>> {
            let client: Box<dyn ModelClient> = match spec.provider {
                ModelProvider::OpenAi => Box::new(
                    OpenAiClient::new(config.openai.clone(), &spec.name)?
                        .with_retry(config.retry)
                        .with_cancellation(cancel.clone()),
                ),
                ModelProvider::Endpoint => {
                    let url = spec
                        .url
                        .as_deref()
                        .with_context(|| format!("Endpoint model {} has no url", spec.name))?;
                    Box::new(
                        EndpointClient::new(&config.endpoint, &spec.name, url)?
                            .with_retry(config.retry)
                            .with_cancellation(cancel.clone()),
                    )
                }
            };
            Ok(client)
        })
        .collect()
}

fn write_results(path: &Path, rows: &[ResultRow]) -> anyhow::Result<()> {
    let is_csv = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);
    let text = if is_csv {
        report::to_csv(rows)
    } else {
        report::to_json(rows)?
    };
    std::fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

fn print_summary(rows: &[ResultRow]) {
    if rows.is_empty() {
        println!("No games played");
        return;
    }

    // (model, context) -> (games, completed, errors)
    let mut totals: BTreeMap<(&str, &str), (usize, usize, usize)> = BTreeMap::new();
    for row in rows {
        let entry = totals
            .entry((row.version_model.as_str(), row.type_context.as_str()))
            .or_default();
        entry.0 += 1;
        if row.complete_path {
            entry.1 += 1;
        }
        entry.2 += row.errors.len();
    }

    println!("{:<24} {:<10} {:>6} {:>9} {:>7}", "model", "context", "games", "complete", "errors");
    for ((model, context), (games, complete, errors)) in totals {
        println!("{:<24} {:<10} {:>6} {:>9} {:>7}", model, context, games, complete, errors);
    }
}
