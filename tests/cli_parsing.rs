//! Command-line parsing

use clap::Parser;
use std::path::PathBuf;
use vidgate::cli::types::{CacheCommands, Cli, Commands};

#[test]
fn test_search_with_bound_and_global_flags() {
    let cli = Cli::try_parse_from([
        "vidgate", "search", "bohemian rhapsody", "-n", "5", "--json", "-c", "custom.yaml",
    ])
    .unwrap();

    assert!(cli.json);
    assert_eq!(cli.config, Some(PathBuf::from("custom.yaml")));
    let Commands::Search(args) = cli.command else {
        panic!("expected search");
    };
    assert_eq!(args.query, "bohemian rhapsody");
    assert_eq!(args.max_results, Some(5));
}

#[test]
fn test_search_requires_query() {
    assert!(Cli::try_parse_from(["vidgate", "search"]).is_err());
}

#[test]
fn test_trending_defaults() {
    let cli = Cli::try_parse_from(["vidgate", "trending"]).unwrap();
    assert!(!cli.json);
    let Commands::Trending(args) = cli.command else {
        panic!("expected trending");
    };
    assert_eq!(args.max_results, None);
}

#[test]
fn test_usage_and_cache_subcommands() {
    let cli = Cli::try_parse_from(["vidgate", "usage", "-j"]).unwrap();
    assert!(cli.json);
    assert!(matches!(cli.command, Commands::Usage));

    let cli = Cli::try_parse_from(["vidgate", "cache", "clear-expired"]).unwrap();
    assert!(matches!(cli.command, Commands::Cache(CacheCommands::ClearExpired)));

    let cli = Cli::try_parse_from(["vidgate", "cache", "clear-all"]).unwrap();
    assert!(matches!(cli.command, Commands::Cache(CacheCommands::ClearAll)));

    assert!(Cli::try_parse_from(["vidgate", "cache"]).is_err());
}

#[test]
fn test_rejects_non_numeric_bound() {
    assert!(Cli::try_parse_from(["vidgate", "trending", "-n", "many"]).is_err());
}
