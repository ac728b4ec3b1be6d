use anyhow::Result;

use super::print_outcome;
use crate::cli::output::{create_spinner, ProgressBarExt};
use crate::cli::types::TrendingArgs;
use crate::services::QueryService;

/// Handle `vidgate trending`
pub async fn execute(
    service: &QueryService,
    args: TrendingArgs,
    default_max_results: u32,
    json: bool,
) -> Result<()> {
    let max_results = args.max_results.unwrap_or(default_max_results);

    let spinner = create_spinner("Loading trending karaoke", json);
    let outcome = service.trending_with_outcome(max_results).await;
    if outcome.items().is_empty() {
        spinner.finish_warning(outcome.kind());
    } else {
        spinner.finish_success(outcome.kind());
    }

    print_outcome(&outcome, json)
}
