//! Path validation command

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::output::{format_output, OutputFormat};
use crate::{AppContext, Cli};
use wikinav_core::{
    ArticleTitle, ErrorCounts, GamePath, MissingPagePolicy, PathValidator, ValidationPolicy,
};

#[derive(Args)]
pub struct ValidateArgs {
    /// Article titles in path order
    #[arg(required = true, num_args = 1..)]
    pub titles: Vec<String>,

    /// Target article; reports whether the path reaches it
    #[arg(long)]
    pub end: Option<String>,

    /// Record hops from articles that do not exist
    #[arg(long)]
    pub record_missing: bool,

    /// Record hops through disambiguation pages
    #[arg(long)]
    pub flag_disambiguation: bool,

    /// Read the graph from a JSON fixture instead of the live encyclopedia
    #[arg(long)]
    pub fixture: Option<PathBuf>,
}

#[derive(Serialize)]
struct ValidationOutput {
    path: Vec<ArticleTitle>,
    errors: Vec<String>,
    counts: ErrorCounts,
    aborted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    complete: Option<bool>,
}

pub async fn run(args: &ValidateArgs, cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    let graph = ctx.link_graph(args.fixture.as_deref())?;
    let path: GamePath = args.titles.iter().map(ArticleTitle::new).collect();

    let mut policy = ctx.config.eval.validation_policy();
    if args.record_missing {
        policy.missing_pages = MissingPagePolicy::Record;
    }
    if args.flag_disambiguation {
        policy.flag_disambiguation = true;
    }

    let report = PathValidator::new(&*graph)
        .with_policy(policy)
        .validate(path.steps())
        .await;
    if ctx.cancel.is_cancelled() {
        anyhow::bail!("Validation cancelled");
    }

    let output = ValidationOutput {
        complete: args.end.as_ref().map(|end| path.reaches(&ArticleTitle::new(end))),
        path: path.steps().to_vec(),
        errors: report.labels(),
        counts: report.counts,
        aborted: report.aborted,
    };

    match cli.output_format() {
        OutputFormat::Table => print_summary(&output, &policy),
        format => print!("{}", format_output(&output, format)?),
    }
    Ok(())
}

fn print_summary(output: &ValidationOutput, policy: &ValidationPolicy) {
    let steps: Vec<&str> = output.path.iter().map(ArticleTitle::as_str).collect();
    println!("Path: {}", steps.join(" -> "));
    if output.errors.is_empty() {
        println!("No errors");
    } else {
        println!("Errors ({}):", output.errors.len());
        for label in &output.errors {
            println!("  {}", label);
        }
    }
    println!(
        "no link: {}, no page: {}, disambiguation: {}, missing page: {} (missing pages {:?})",
        output.counts.no_link,
        output.counts.no_page,
        output.counts.disambiguation,
        output.counts.missing_page,
        policy.missing_pages
    );
    if let Some(complete) = output.complete {
        println!("Complete: {}", complete);
    }
}
