//! Command handlers.

pub mod cache;
pub mod search;
pub mod trending;
pub mod usage;

use console::style;
use serde::Serialize;

use crate::domain::models::Item;
use crate::services::QueryOutcome;

use super::output::TableFormatter;

/// JSON shape shared by `search` and `trending`.
#[derive(Serialize)]
struct QueryReport<'a> {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    wait_time_ms: Option<u64>,
    items: &'a [Item],
}

/// Print query results, or a notice that the caller should fall back to
/// built-in sample songs.
fn print_outcome(outcome: &QueryOutcome, json: bool) -> anyhow::Result<()> {
    if json {
        let wait_time_ms = match outcome {
            QueryOutcome::Denied(decision) => decision.wait_time_ms,
            _ => None,
        };
        let report = QueryReport {
            status: outcome.kind(),
            reason: outcome.reason(),
            wait_time_ms,
            items: outcome.items(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let items = outcome.items();
    if items.is_empty() {
        let reason = outcome
            .reason()
            .unwrap_or_else(|| "No results".to_string());
        println!("{} {reason}", style("!").yellow().bold());
        println!("{}", style("No live results; showing sample songs instead.").dim());
        return Ok(());
    }

    println!("{}", TableFormatter::new().format_items(items));
    let source = if matches!(outcome, QueryOutcome::Cached(_)) {
        "cache"
    } else {
        "YouTube"
    };
    println!(
        "\n{} result{} from {source}",
        items.len(),
        if items.len() == 1 { "" } else { "s" }
    );
    Ok(())
}
