use anyhow::Result;
use serde::Serialize;

use crate::cli::output::TableFormatter;
use crate::domain::models::{AdmissionDecision, UsageReport};
use crate::services::QueryService;

#[derive(Serialize)]
struct UsageOutput {
    #[serde(flatten)]
    report: UsageReport,
    admission: AdmissionDecision,
}

/// Handle `vidgate usage`
pub async fn execute(service: &QueryService, json: bool) -> Result<()> {
    let report = service.usage_report().await;
    let admission = service.can_make_request().await;

    if json {
        let output = UsageOutput { report, admission };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", TableFormatter::new().format_usage(&report, &admission));
    }
    Ok(())
}
