//! `contented`: browse a Contented media server from the terminal.
//!
//! Logs go to stderr (`RUST_LOG` controls the level); results go to stdout.

mod commands;
mod config;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use contented_client::ContentedClient;
use contented_core::types::{ContainerSearch, ContentSearch, TagQuery};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::App;
use config::{Overrides, ViewConfig};

#[derive(Debug, Parser)]
#[command(name = "contented", version, about = "Browse a Contented media server")]
struct Cli {
    /// Config file (default: <config dir>/contented/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Server origin.
    #[arg(long, global = true, env = "CONTENTED_BASE_URL")]
    base_url: Option<String>,

    /// Items per page when loading.
    #[arg(long, global = true)]
    page_size: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List containers.
    Containers {
        #[arg(long, default_value = "1")]
        page: usize,

        #[arg(long)]
        per_page: Option<usize>,
    },

    /// Load a whole container and print the window around an item.
    Load {
        container_id: String,

        /// Content id to centre the window on (default: first item).
        #[arg(long)]
        anchor: Option<String>,

        /// Window width.
        #[arg(long)]
        visible: Option<usize>,

        /// Items shown ahead of the anchor.
        #[arg(long)]
        before: Option<usize>,
    },

    /// Search content.
    Search {
        text: String,

        /// Restrict to one container.
        #[arg(long)]
        container: Option<String>,

        /// Comma-separated tag ids.
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,

        #[arg(long = "type")]
        content_type: Option<String>,

        #[arg(long, default_value = "0")]
        offset: usize,

        #[arg(long)]
        limit: Option<usize>,
    },

    /// Search containers.
    SearchContainers {
        text: String,

        /// Match the name exactly instead of searching the text.
        #[arg(long)]
        exact: bool,
    },

    /// Show one content item with its links.
    Show { content_id: String },

    /// List tags.
    Tags {
        #[arg(long = "type")]
        tag_type: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time(),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let overrides = Overrides {
        base_url: cli.base_url,
        page_size: cli.page_size,
    };
    let config = config::load(cli.config.as_deref(), &overrides)?;
    tracing::debug!("Using server {}", config.client.origin());

    let app = App::new(ContentedClient::new(config.client.clone())?);

    match cli.command {
        Commands::Containers { page, per_page } => app.containers(page, per_page).await,
        Commands::Load {
            container_id,
            anchor,
            visible,
            before,
        } => {
            let view = ViewConfig {
                visible: visible.unwrap_or(config.view.visible),
                before: before.unwrap_or(config.view.before),
            };
            app.load(&container_id, anchor.as_deref(), view, cli.page_size)
                .await
        }
        Commands::Search {
            text,
            container,
            tags,
            content_type,
            offset,
            limit,
        } => {
            let query = ContentSearch {
                text: Some(text),
                offset,
                limit,
                tags,
                container_id: container,
                content_type,
                duplicate: false,
            };
            app.search(&query).await
        }
        Commands::SearchContainers { text, exact } => {
            let query = if exact {
                ContainerSearch {
                    name: Some(text),
                    ..ContainerSearch::default()
                }
            } else {
                ContainerSearch {
                    search: Some(text),
                    ..ContainerSearch::default()
                }
            };
            app.search_containers(&query).await
        }
        Commands::Show { content_id } => app.show(&content_id).await,
        Commands::Tags { tag_type } => {
            let query = TagQuery {
                tag_type,
                ..TagQuery::default()
            };
            app.tags(&query).await
        }
    }
}
