use crate::error::ProcessError;
use crate::worker::{parse_record, run_worker_process, ProcessOutput, WorkerFactory};
use std::time::Duration;
use tracing::{debug, warn};

use super::{FailureKind, WorkerOutcome};

pub const MALFORMED_OUTPUT: &str = "malformed output";

/// Run one aspect job to an outcome. Never fails; every fault becomes an error outcome.
pub async fn execute_job(
    factory: &WorkerFactory,
    aspect: &str,
    code: &str,
    timeout: Option<Duration>,
) -> WorkerOutcome {
    let command = match factory.command_for(aspect) {
        Ok(c) => c,
        Err(e) => {
            warn!("Cannot launch worker for {}: {}", aspect, e);
            return WorkerOutcome::error(aspect, FailureKind::LaunchFailure, e.to_string());
        }
    };

    match run_worker_process(&command, code, timeout).await {
        Ok(output) => {
            debug!(
                "Worker {} exited with {} in {:?}",
                aspect, output.exit_code, output.duration
            );
            classify(aspect, &output)
        }
        Err(e @ ProcessError::Spawn { .. }) => {
            warn!("Worker {} failed to launch: {}", aspect, e);
            WorkerOutcome::error(aspect, FailureKind::LaunchFailure, e.to_string())
        }
        Err(e @ ProcessError::Timeout(_)) => {
            warn!("Worker {} killed: {}", aspect, e);
            WorkerOutcome::error(aspect, FailureKind::TimedOut, e.to_string())
        }
        Err(e @ ProcessError::Io(_)) => {
            warn!("Worker {} IO failure: {}", aspect, e);
            WorkerOutcome::error(aspect, FailureKind::UnexpectedFault, e.to_string())
        }
    }
}

/// Map a finished worker to its outcome
pub fn classify(aspect: &str, output: &ProcessOutput) -> WorkerOutcome {
    if !output.success() {
        return WorkerOutcome::error(aspect, FailureKind::NonZeroExit, output.stderr.clone());
    }

    match parse_record(&output.stdout, aspect) {
        Ok(record) => WorkerOutcome::success(aspect, record.review),
        Err(e) => {
            warn!("Worker {} produced malformed output: {}", aspect, e);
            WorkerOutcome::error(aspect, FailureKind::MalformedOutput, MALFORMED_OUTPUT)
        }
    }
}
