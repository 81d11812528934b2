use crate::review::{AggregatedReport, OutcomeStatus, WorkerOutcome};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Render outcomes as a markdown report, one block per outcome, in the order given.
///
/// Failed aspects are shown inline rather than dropped.
pub fn render_markdown(outcomes: &[WorkerOutcome]) -> String {
    let mut content = String::new();

    content.push_str("## Parallel Code Review Results\n\n");

    for outcome in outcomes {
        match &outcome.status {
            OutcomeStatus::Error { message, .. } => {
                content.push_str(&format!(
                    "❌ **{}**: error - {}\n\n",
                    outcome.aspect,
                    message.trim_end()
                ));
            }
            OutcomeStatus::Success { review } => {
                content.push_str(&format!("### 📋 {}\n\n", outcome.aspect.to_uppercase()));
                content.push_str(&format!("{}\n\n", review.trim_end()));
                content.push_str("---\n\n");
            }
        }
    }

    content
}

#[derive(Serialize)]
struct JsonReport<'a> {
    run_id: Uuid,
    generated_at: DateTime<Utc>,
    duration_sec: f64,
    code_sha256: &'a str,
    outcomes: &'a [WorkerOutcome],
}

/// Render the full report, run metadata included, as pretty JSON
pub fn render_json(report: &AggregatedReport) -> Result<String, serde_json::Error> {
    let json = JsonReport {
        run_id: report.run_id,
        generated_at: report.generated_at,
        duration_sec: report.duration.as_secs_f64(),
        code_sha256: &report.code_sha256,
        outcomes: &report.outcomes,
    };
    serde_json::to_string_pretty(&json)
}
