//! Polling dispatcher for database-enqueued optimization jobs.
//!
//! Claims enqueued `Pending` jobs every `poll_interval` using
//! `SELECT FOR UPDATE SKIP LOCKED` via [`OptimizationRepo::claim_next_queued`],
//! so any number of dispatcher instances (and the API's in-process pool)
//! can run side by side without double-dispatch.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use rosterd_core::solver::OptimizationParameters;
use rosterd_db::repositories::OptimizationRepo;
use rosterd_db::DbPool;

use crate::worker::Worker;

/// Default polling interval for the dispatcher loop.
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Background optimization dispatcher.
///
/// A single long-lived Tokio task that drains enqueued jobs from the
/// database and runs them on per-dispatch workers.
pub struct Dispatcher {
    pool: DbPool,
    poll_interval: Duration,
}

impl Dispatcher {
    /// Create a new dispatcher with the default 1-second poll interval.
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Run the dispatcher loop until the cancellation token is triggered.
    pub async fn run(&self, cancel: CancellationToken) {
        let mut ticker = tokio::time::interval(self.poll_interval);
        tracing::info!(
            poll_interval_ms = self.poll_interval.as_millis() as u64,
            "Optimization dispatcher started",
        );

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Optimization dispatcher shutting down");
                    break;
                }
                _ = ticker.tick() => {
                    if let Err(e) = self.try_dispatch().await {
                        tracing::error!(error = %e, "Dispatch cycle failed");
                    }
                }
            }
        }
    }

    /// One dispatch cycle: claim enqueued jobs until none remain.
    async fn try_dispatch(&self) -> Result<(), sqlx::Error> {
        while let Some(job) = OptimizationRepo::claim_next_queued(&self.pool).await? {
            tracing::info!(
                optimization_id = job.id,
                version = job.version,
                "Enqueued optimization claimed",
            );

            let params = job
                .parameters
                .clone()
                .ok_or("job was enqueued without parameters".to_string())
                .and_then(|value| {
                    serde_json::from_value::<OptimizationParameters>(value)
                        .map_err(|e| format!("stored parameters are malformed: {e}"))
                });

            match params {
                Ok(params) => {
                    Worker::new(self.pool.clone()).run_claimed(&job, &params).await;
                }
                Err(reason) => {
                    // The job is already InProgress; it must still end in a
                    // terminal, observable state.
                    tracing::error!(optimization_id = job.id, error = %reason, "Cannot rebuild solve request");
                    match OptimizationRepo::fail(&self.pool, job.id, job.version, &reason).await {
                        Ok(true) => {}
                        Ok(false) => {
                            tracing::warn!(
                                optimization_id = job.id,
                                "Ownership lost before failure could be recorded",
                            );
                        }
                        Err(db_err) => {
                            tracing::error!(
                                optimization_id = job.id,
                                error = %db_err,
                                "Failed to record dispatch failure",
                            );
                        }
                    }
                }
            }
        }

        Ok(())
    }
}
