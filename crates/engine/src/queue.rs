//! Job queue abstraction and the in-process worker pool.

use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use rosterd_core::solver::OptimizationParameters;
use rosterd_db::DbPool;

use crate::worker::Worker;

/// Handle returned for each accepted submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobHandle {
    pub id: Uuid,
}

/// Submission side of a job queue.
///
/// Orchestration depends on this trait only, never on a specific queue
/// product; implementations may be in-process or distributed.
pub trait JobQueue: Send + Sync {
    /// Accept a solve request for asynchronous execution.
    ///
    /// Returns immediately with one handle per submission; callers poll the
    /// status endpoint for completion.
    fn enqueue(&self, params: OptimizationParameters) -> Result<JobHandle, QueueError>;
}

#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("job queue is shut down")]
    Closed,
}

struct QueuedJob {
    handle: JobHandle,
    params: OptimizationParameters,
}

/// In-process queue backed by an unbounded channel.
pub struct InProcessQueue {
    tx: mpsc::UnboundedSender<QueuedJob>,
}

impl JobQueue for InProcessQueue {
    fn enqueue(&self, params: OptimizationParameters) -> Result<JobHandle, QueueError> {
        let handle = JobHandle { id: Uuid::now_v7() };
        self.tx
            .send(QueuedJob { handle, params })
            .map_err(|_| QueueError::Closed)?;
        Ok(handle)
    }
}

/// Worker pool draining the in-process queue.
///
/// Jobs for different optimization ids run concurrently across the pool;
/// the Job Store's CAS claim serializes duplicate submissions for the same
/// id, so pool workers never need to coordinate with each other.
pub struct WorkerPool {
    handles: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawn `workers` tasks sharing one receiver.
    ///
    /// A fresh [`Worker`] is constructed per dispatch; the tasks stop when
    /// the token is cancelled or the queue sender is dropped.
    pub fn spawn(
        pool: DbPool,
        workers: usize,
        cancel: CancellationToken,
    ) -> (InProcessQueue, WorkerPool) {
        let (tx, rx) = mpsc::unbounded_channel::<QueuedJob>();
        let rx = Arc::new(Mutex::new(rx));

        let mut handles = Vec::with_capacity(workers);
        for worker_id in 0..workers {
            let rx = Arc::clone(&rx);
            let pool = pool.clone();
            let cancel = cancel.clone();
            handles.push(tokio::spawn(async move {
                loop {
                    let job = {
                        let mut rx = rx.lock().await;
                        tokio::select! {
                            _ = cancel.cancelled() => break,
                            job = rx.recv() => job,
                        }
                    };
                    let Some(job) = job else { break };

                    tracing::info!(
                        worker_id,
                        job_id = %job.handle.id,
                        optimization_id = job.params.optimization_id,
                        "Optimization job dequeued",
                    );
                    Worker::new(pool.clone()).process(&job.params).await;
                }
                tracing::debug!(worker_id, "Queue worker stopped");
            }));
        }

        tracing::info!(workers, "In-process job queue started");
        (InProcessQueue { tx }, WorkerPool { handles })
    }

    /// Wait for all worker tasks to finish after cancellation.
    pub async fn shutdown(self) {
        for handle in self.handles {
            let _ = handle.await;
        }
    }
}
