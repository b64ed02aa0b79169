//! Link graph inspection commands

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::output::format_output;
use crate::{AppContext, Cli};
use wikinav_core::{ArticleTitle, LinkGraph, LinkLookup, LinkSet};

#[derive(Args)]
pub struct GraphArgs {
    /// Read the graph from a JSON fixture instead of the live encyclopedia
    #[arg(long, global = true)]
    pub fixture: Option<PathBuf>,

    #[command(subcommand)]
    pub command: GraphCommands,
}

#[derive(Subcommand)]
pub enum GraphCommands {
    /// Every main-namespace link of an article
    Links {
        title: String,
    },
    /// Links rendered visibly in the article body
    Visible {
        title: String,
        /// Title to leave out (repeatable)
        #[arg(long)]
        exclude: Vec<String>,
    },
    /// Check whether an article is a disambiguation page
    Disambig {
        title: String,
    },
}

pub async fn run(args: &GraphArgs, cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    let graph = ctx.link_graph(args.fixture.as_deref())?;
    let format = cli.output_format();

    match &args.command {
        GraphCommands::Links { title } => {
            let title = ArticleTitle::new(title);
            match graph.outgoing_links(&title).await? {
                LinkLookup::Missing => anyhow::bail!("No such article: {}", title),
                LinkLookup::Found(outgoing) => {
                    if let Some(original) = &outgoing.redirected_from {
                        tracing::info!("{} is a disambiguation page, listing {}", original, outgoing.title);
                    }
                    print!("{}", format_output(&outgoing.links, format)?);
                }
            }
        }
        GraphCommands::Visible { title, exclude } => {
            let excluded: LinkSet = exclude.iter().map(ArticleTitle::new).collect();
            let title = ArticleTitle::new(title);
            let Some(links) = graph.visible_links(&title, &excluded).await? else {
                anyhow::bail!("No such article: {}", title);
            };
            print!("{}", format_output(&links, format)?);
        }
        GraphCommands::Disambig { title } => {
            let resolved = graph.resolve(&ArticleTitle::new(title)).await?;
            print!("{}", format_output(&resolved, format)?);
        }
    }
    Ok(())
}
