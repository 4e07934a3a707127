//! Per-dispatch worker executing one optimization job.
//!
//! Dependencies are injected at construction and a new worker is built for
//! every dispatch; there is no shared mutable state beyond the job row,
//! which is only ever touched through the Job Store.

use rosterd_core::solver::{self, OptimizationParameters};
use rosterd_db::models::assignment::NewAssignment;
use rosterd_db::models::optimization::Optimization;
use rosterd_db::repositories::{AssignmentRepo, OptimizationRepo};
use rosterd_db::DbPool;

use crate::snapshot;

/// Executes a single optimization job end to end.
pub struct Worker {
    pool: DbPool,
}

#[derive(Debug, thiserror::Error)]
enum WorkerError {
    #[error(transparent)]
    Solve(#[from] solver::SolveError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Worker {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Resolve and claim the job referenced by `params`, then run it.
    ///
    /// Abandons (log, no retry) when the job is absent or the CAS claim is
    /// lost; every other failure ends in a guarded terminal `Failed`. The
    /// job row never stays `InProgress` past this call.
    pub async fn process(&self, params: &OptimizationParameters) {
        let id = params.optimization_id;

        match OptimizationRepo::find_by_id(&self.pool, id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                tracing::error!(optimization_id = id, "Optimization not found, abandoning job");
                return;
            }
            Err(e) => {
                tracing::error!(optimization_id = id, error = %e, "Failed to load optimization");
                return;
            }
        }

        let claimed = match OptimizationRepo::claim(&self.pool, id).await {
            Ok(Some(job)) => job,
            Ok(None) => {
                tracing::info!(
                    optimization_id = id,
                    "Claim lost (job not Pending or taken by another worker), abandoning",
                );
                return;
            }
            Err(e) => {
                tracing::error!(optimization_id = id, error = %e, "Failed to claim optimization");
                return;
            }
        };

        tracing::info!(optimization_id = id, version = claimed.version, "Optimization claimed");
        self.run_claimed(&claimed, params).await;
    }

    /// Run a job that has already been claimed (status `InProgress`).
    ///
    /// `job.version` must be the value returned by the claim; terminal
    /// writes are guarded on it so a reset issued mid-solve wins over the
    /// worker's result.
    pub async fn run_claimed(&self, job: &Optimization, params: &OptimizationParameters) {
        match self.solve_and_persist(job, params).await {
            Ok(true) => {
                tracing::info!(optimization_id = job.id, "Optimization completed");
            }
            Ok(false) => {
                tracing::warn!(
                    optimization_id = job.id,
                    "Ownership lost during solve (job was reset); result discarded",
                );
            }
            Err(err) => {
                tracing::error!(optimization_id = job.id, error = %err, "Optimization failed");
                match OptimizationRepo::fail(&self.pool, job.id, job.version, &err.to_string())
                    .await
                {
                    Ok(true) => {}
                    Ok(false) => {
                        tracing::warn!(
                            optimization_id = job.id,
                            "Ownership lost during solve; failure not recorded",
                        );
                    }
                    Err(db_err) => {
                        tracing::error!(
                            optimization_id = job.id,
                            error = %db_err,
                            "Failed to record optimization failure",
                        );
                    }
                }
            }
        }
    }

    /// Snapshot, solve, and persist the result with the terminal status in
    /// one transaction.
    ///
    /// Returns `Ok(false)` when the version guard rejected the write, in
    /// which case the whole result (assignments included) is rolled back.
    async fn solve_and_persist(
        &self,
        job: &Optimization,
        params: &OptimizationParameters,
    ) -> Result<bool, WorkerError> {
        let input = snapshot::load(&self.pool, job).await?;
        tracing::info!(
            optimization_id = job.id,
            resources = input.resources.len(),
            demand_periods = input.demand.len(),
            "Solver input snapshot loaded",
        );

        let solution = solver::solve(&input.resources, &input.demand, params)?;
        tracing::info!(
            optimization_id = job.id,
            assignments = solution.assignments.len(),
            unsatisfied = solution.unsatisfied.len(),
            feasible = solution.feasible,
            total_cost = solution.total_cost,
            "Solver finished",
        );

        let rows: Vec<NewAssignment> = solution.assignments.iter().map(NewAssignment::from).collect();

        let mut tx = self.pool.begin().await.map_err(WorkerError::Database)?;
        AssignmentRepo::replace_for_optimization(&mut *tx, job.id, &rows).await?;
        // Solver success is Completed even when some periods are
        // unsatisfied; infeasibility is data, not failure.
        let owned = OptimizationRepo::complete(
            &mut *tx,
            job.id,
            job.version,
            solution.unsatisfied.len() as i32,
            solution.total_cost,
        )
        .await?;

        if owned {
            tx.commit().await.map_err(WorkerError::Database)?;
        } else {
            tx.rollback().await.map_err(WorkerError::Database)?;
        }
        Ok(owned)
    }
}
