use crate::config::Config;
use crate::error::ReviewError;
use crate::worker::WorkerFactory;
use chrono::Utc;
use futures::stream::{FuturesUnordered, StreamExt};
use sha2::{Digest, Sha256};
use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use super::job::execute_job;
use super::{AggregatedReport, FailureKind, OutcomeStatus, WorkerOutcome};

/// Fans one worker process out per aspect and joins every outcome.
///
/// By default all workers start at once and none is ever timed out; both
/// `concurrency` and `worker.timeout_sec` are opt-in.
pub struct ReviewOrchestrator {
    factory: Arc<WorkerFactory>,
    timeout: Option<Duration>,
    semaphore: Option<Arc<Semaphore>>,
}

impl ReviewOrchestrator {
    pub fn new(config: &Config, config_path: Option<&Path>) -> std::io::Result<Self> {
        let factory = WorkerFactory::new(config, config_path)?;
        Ok(Self {
            factory: Arc::new(factory),
            timeout: config.worker.timeout_sec.map(Duration::from_secs),
            semaphore: config.concurrency.map(|n| Arc::new(Semaphore::new(n))),
        })
    }

    /// Review `code` once per entry of `aspects`.
    ///
    /// Returns one outcome per aspect, in the order given, after every job has
    /// finished. Only an empty `aspects` list is an error.
    pub async fn run_all(
        &self,
        code: &str,
        aspects: &[String],
    ) -> Result<AggregatedReport, ReviewError> {
        if aspects.is_empty() {
            return Err(ReviewError::EmptyAspects);
        }

        let run_id = Uuid::new_v4();
        let generated_at = Utc::now();
        let start = std::time::Instant::now();
        let code_sha256 = format!("{:x}", Sha256::digest(code.as_bytes()));

        let span = info_span!("review", %run_id);
        let outcomes = async {
            info!("Dispatching {} workers", aspects.len());

            let code: Arc<str> = Arc::from(code);
            let outcomes = fan_out(aspects, |_, aspect| {
                let factory = self.factory.clone();
                let semaphore = self.semaphore.clone();
                let code = code.clone();
                let timeout = self.timeout;
                async move {
                    let _permit = match semaphore {
                        Some(s) => match s.acquire_owned().await {
                            Ok(p) => Some(p),
                            Err(e) => {
                                return WorkerOutcome::error(
                                    &aspect,
                                    FailureKind::UnexpectedFault,
                                    e.to_string(),
                                )
                            }
                        },
                        None => None,
                    };
                    execute_job(&factory, &aspect, &code, timeout).await
                }
            })
            .await;

            let failed = outcomes.iter().filter(|o| !o.is_success()).count();
            info!(
                "All {} workers resolved ({} failed) in {:.1}s",
                outcomes.len(),
                failed,
                start.elapsed().as_secs_f64()
            );
            outcomes
        }
        .instrument(span)
        .await;

        Ok(AggregatedReport {
            run_id,
            generated_at,
            duration: start.elapsed(),
            code_sha256,
            outcomes,
        })
    }
}

/// Spawn `job` once per aspect and wait for all of them.
///
/// Outcomes come back in input order regardless of completion order. A job
/// that panics is recorded as an `UnexpectedFault` for its own aspect and
/// does not disturb its siblings.
async fn fan_out<F, Fut>(aspects: &[String], job: F) -> Vec<WorkerOutcome>
where
    F: Fn(usize, String) -> Fut,
    Fut: Future<Output = WorkerOutcome> + Send + 'static,
{
    let mut pending = FuturesUnordered::new();
    for (idx, aspect) in aspects.iter().enumerate() {
        let handle = tokio::spawn(job(idx, aspect.clone()));
        pending.push(async move { (idx, handle.await) });
    }

    let mut slots: Vec<Option<WorkerOutcome>> = vec![None; aspects.len()];
    while let Some((idx, joined)) = pending.next().await {
        let outcome = match joined {
            Ok(outcome) => {
                info!("Resolved {}: {}", aspects[idx], status_label(&outcome));
                outcome
            }
            Err(e) => {
                warn!("Job for {} aborted: {}", aspects[idx], e);
                WorkerOutcome::error(
                    &aspects[idx],
                    FailureKind::UnexpectedFault,
                    format!("worker task failed: {}", e),
                )
            }
        };
        slots[idx] = Some(outcome);
    }

    slots
        .into_iter()
        .zip(aspects)
        .map(|(slot, aspect)| {
            slot.unwrap_or_else(|| {
                WorkerOutcome::error(aspect, FailureKind::UnexpectedFault, "job produced no outcome")
            })
        })
        .collect()
}

fn status_label(outcome: &WorkerOutcome) -> String {
    match &outcome.status {
        OutcomeStatus::Success { .. } => "success".to_string(),
        OutcomeStatus::Error { kind, .. } => format!("error ({})", kind),
    }
}
