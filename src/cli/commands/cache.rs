use anyhow::Result;
use console::style;

use crate::cli::types::CacheCommands;
use crate::services::QueryService;

/// Handle `vidgate cache ...`
pub async fn execute(service: &QueryService, command: CacheCommands, json: bool) -> Result<()> {
    let (action, cleared) = match command {
        CacheCommands::ClearExpired => ("clear_expired", service.clear_expired_cache().await),
        CacheCommands::ClearAll => ("clear_all", service.clear_all_cache().await),
    };

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "action": action,
                "cleared": cleared,
            }))?
        );
    } else {
        println!(
            "{} Removed {cleared} cache entr{}",
            style("✓").green(),
            if cleared == 1 { "y" } else { "ies" }
        );
    }
    Ok(())
}
