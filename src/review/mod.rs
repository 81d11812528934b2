mod job;
mod orchestrator;

pub use orchestrator::ReviewOrchestrator;

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;
use uuid::Uuid;

/// Why a job ended in an error outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Worker could not be started (bad program, path, or aspect)
    LaunchFailure,
    NonZeroExit,
    /// Exit 0 but stdout was not one valid record
    MalformedOutput,
    /// IO failure or panic inside the job
    UnexpectedFault,
    /// Only with an explicit `worker.timeout_sec`
    TimedOut,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureKind::LaunchFailure => write!(f, "launch_failure"),
            FailureKind::NonZeroExit => write!(f, "non_zero_exit"),
            FailureKind::MalformedOutput => write!(f, "malformed_output"),
            FailureKind::UnexpectedFault => write!(f, "unexpected_fault"),
            FailureKind::TimedOut => write!(f, "timed_out"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum OutcomeStatus {
    Success { review: String },
    Error { kind: FailureKind, message: String },
}

/// Result of one aspect job. Exactly one of review/message exists by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkerOutcome {
    pub aspect: String,
    #[serde(flatten)]
    pub status: OutcomeStatus,
}

impl WorkerOutcome {
    pub fn success(aspect: &str, review: String) -> Self {
        Self {
            aspect: aspect.to_string(),
            status: OutcomeStatus::Success { review },
        }
    }

    pub fn error(aspect: &str, kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            aspect: aspect.to_string(),
            status: OutcomeStatus::Error {
                kind,
                message: message.into(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status, OutcomeStatus::Success { .. })
    }
}

/// Every outcome of one `run_all`, in request order
#[derive(Debug)]
pub struct AggregatedReport {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub duration: Duration,
    pub code_sha256: String,
    pub outcomes: Vec<WorkerOutcome>,
}

impl AggregatedReport {
    pub fn error_count(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_success()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_serialization() {
        let ok = serde_json::to_value(WorkerOutcome::success("security", "fine".to_string()))
            .unwrap();
        assert_eq!(
            ok,
            serde_json::json!({"aspect": "security", "status": "success", "review": "fine"})
        );

        let err = serde_json::to_value(WorkerOutcome::error(
            "performance",
            FailureKind::NonZeroExit,
            "boom",
        ))
        .unwrap();
        assert_eq!(
            err,
            serde_json::json!({
                "aspect": "performance",
                "status": "error",
                "kind": "non_zero_exit",
                "message": "boom"
            })
        );
    }
}
