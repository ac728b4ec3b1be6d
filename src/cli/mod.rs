//! Command-line interface.

pub mod commands;
pub mod output;
pub mod types;

pub use types::{CacheCommands, Cli, Commands, SearchArgs, TrendingArgs};

use anyhow::{Context, Result};
use console::style;
use std::sync::Arc;

use crate::domain::models::Config;
use crate::domain::ports::SystemClock;
use crate::infrastructure::config::ConfigLoader;
use crate::infrastructure::open_durable_store;
use crate::infrastructure::youtube::{YouTubeClient, YouTubeClientConfig};
use crate::services::QueryService;

/// Load configuration from `--config` or the project-local hierarchy.
pub fn load_config(cli: &Cli) -> Result<Config> {
    match cli.config {
        Some(ref path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
}

/// Wire the store, the YouTube client and the query service from `config`.
pub async fn build_service(config: &Config) -> Result<QueryService> {
    let store = open_durable_store(&config.storage).await;
    let provider = YouTubeClient::new(YouTubeClientConfig::from(&config.provider))
        .context("Failed to build YouTube client")?;

    Ok(QueryService::new(
        store,
        Arc::new(provider),
        Arc::new(SystemClock),
        config,
    ))
}

/// Run a parsed command against a ready service.
pub async fn run(cli: Cli, config: &Config, service: &QueryService) -> Result<()> {
    let json = cli.json;
    match cli.command {
        Commands::Search(args) => {
            commands::search::execute(service, args, config.search.default_max_results, json).await
        }
        Commands::Trending(args) => {
            commands::trending::execute(service, args, config.search.trending_max_results, json)
                .await
        }
        Commands::Usage => commands::usage::execute(service, json).await,
        Commands::Cache(command) => commands::cache::execute(service, command, json).await,
    }
}

/// Report a fatal error on stderr (or as JSON on stdout) and exit non-zero.
pub fn handle_error(err: &anyhow::Error, json: bool) -> ! {
    if json {
        let chain: Vec<String> = err.chain().skip(1).map(ToString::to_string).collect();
        println!(
            "{}",
            serde_json::json!({
                "error": err.to_string(),
                "causes": chain,
            })
        );
    } else {
        eprintln!("{} {err}", style("error:").red().bold());
        for cause in err.chain().skip(1) {
            eprintln!("  {} {cause}", style("caused by:").dim());
        }
    }
    std::process::exit(1);
}
