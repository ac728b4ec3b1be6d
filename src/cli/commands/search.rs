use anyhow::Result;

use super::print_outcome;
use crate::cli::output::{create_spinner, ProgressBarExt};
use crate::cli::types::SearchArgs;
use crate::services::QueryService;

/// Handle `vidgate search`
pub async fn execute(
    service: &QueryService,
    args: SearchArgs,
    default_max_results: u32,
    json: bool,
) -> Result<()> {
    let max_results = args.max_results.unwrap_or(default_max_results);

    let spinner = create_spinner(format!("Searching for \"{}\"", args.query.trim()), json);
    let outcome = service.search_with_outcome(&args.query, max_results).await;
    if outcome.items().is_empty() {
        spinner.finish_warning(outcome.kind());
    } else {
        spinner.finish_success(outcome.kind());
    }

    print_outcome(&outcome, json)
}
