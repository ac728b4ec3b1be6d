//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "vidgate")]
#[command(about = "Quota-aware karaoke search over the YouTube Data API", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to .vidgate/config.yaml and .vidgate/local.yaml)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search for karaoke videos
    Search(SearchArgs),

    /// List trending karaoke videos
    Trending(TrendingArgs),

    /// Show today's API usage
    Usage,

    /// Cache maintenance commands
    #[command(subcommand)]
    Cache(CacheCommands),
}

#[derive(Args)]
pub struct SearchArgs {
    /// Search text
    pub query: String,

    /// Maximum number of results (defaults to search.default_max_results)
    #[arg(short = 'n', long)]
    pub max_results: Option<u32>,
}

#[derive(Args)]
pub struct TrendingArgs {
    /// Maximum number of results (defaults to search.trending_max_results)
    #[arg(short = 'n', long)]
    pub max_results: Option<u32>,
}

#[derive(Subcommand)]
pub enum CacheCommands {
    /// Remove expired and unreadable cache entries
    ClearExpired,

    /// Remove every cache entry
    ClearAll,
}
