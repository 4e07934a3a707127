//! Repository for the `optimizations` table — the Job Store.
//!
//! Status transitions use compare-and-swap filters instead of blind writes:
//! `claim` succeeds only from Pending, and the terminal writes require the
//! claiming worker's `version`, so two dispatchers can never both own a job
//! and a reset always invalidates an in-flight result.

use sqlx::{PgConnection, PgPool};

use rosterd_core::types::DbId;

use crate::models::optimization::{
    CreateOptimization, Optimization, OptimizationListQuery, UpdateOptimization,
};
use crate::models::status::OptimizationStatus;

/// Column list for `optimizations` queries.
const COLUMNS: &str = "\
    id, tour_schedule_id, environment_id, start_date, end_date, \
    status_id, version, parameters, error_message, \
    unsatisfied_periods, total_cost, \
    queued_at, started_at, completed_at, created_at, updated_at";

/// Provides CRUD and lifecycle operations for optimization jobs.
pub struct OptimizationRepo;

impl OptimizationRepo {
    /// Create a new optimization job in `Pending` status.
    pub async fn insert(
        pool: &PgPool,
        input: &CreateOptimization,
    ) -> Result<Optimization, sqlx::Error> {
        let query = format!(
            "INSERT INTO optimizations \
                 (tour_schedule_id, environment_id, start_date, end_date, status_id) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Optimization>(&query)
            .bind(input.tour_schedule_id)
            .bind(input.environment_id)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(OptimizationStatus::Pending.id())
            .fetch_one(pool)
            .await
    }

    /// Find an optimization by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Optimization>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM optimizations WHERE id = $1");
        sqlx::query_as::<_, Optimization>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List optimizations, optionally scoped to one environment.
    pub async fn list(
        pool: &PgPool,
        params: &OptimizationListQuery,
    ) -> Result<Vec<Optimization>, sqlx::Error> {
        match params.environment_id {
            Some(environment_id) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM optimizations \
                     WHERE environment_id = $1 ORDER BY id"
                );
                sqlx::query_as::<_, Optimization>(&query)
                    .bind(environment_id)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!("SELECT {COLUMNS} FROM optimizations ORDER BY id");
                sqlx::query_as::<_, Optimization>(&query).fetch_all(pool).await
            }
        }
    }

    /// Full-record update, last-write-wins.
    ///
    /// Bumps `version`; returns `None` if the job does not exist.
    pub async fn update(
        pool: &PgPool,
        input: &UpdateOptimization,
    ) -> Result<Option<Optimization>, sqlx::Error> {
        let query = format!(
            "UPDATE optimizations \
             SET tour_schedule_id = $2, environment_id = $3, \
                 start_date = $4, end_date = $5, status_id = $6, \
                 version = version + 1, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Optimization>(&query)
            .bind(input.id)
            .bind(input.tour_schedule_id)
            .bind(input.environment_id)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.status_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete an optimization (assignments cascade).
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete_by_id(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM optimizations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Record the enqueued solve parameters and stamp `queued_at`.
    ///
    /// The polling dispatcher rebuilds the solver request from this row, so
    /// the parameters are stored verbatim. Returns `true` if the job exists.
    pub async fn mark_queued(
        pool: &PgPool,
        id: DbId,
        parameters: &serde_json::Value,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE optimizations \
             SET parameters = $2, queued_at = NOW(), updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(parameters)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Atomically claim a job: CAS `Pending -> InProgress`.
    ///
    /// Exactly one of any number of concurrent claims wins; the losers get
    /// `None`. Claiming bumps `version` and stamps `started_at`.
    pub async fn claim(pool: &PgPool, id: DbId) -> Result<Option<Optimization>, sqlx::Error> {
        let query = format!(
            "UPDATE optimizations \
             SET status_id = $2, version = version + 1, \
                 started_at = NOW(), error_message = NULL, updated_at = NOW() \
             WHERE id = $1 AND status_id = $3 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Optimization>(&query)
            .bind(id)
            .bind(OptimizationStatus::InProgress.id())
            .bind(OptimizationStatus::Pending.id())
            .fetch_optional(pool)
            .await
    }

    /// Atomically claim the oldest enqueued `Pending` job.
    ///
    /// Uses `SELECT FOR UPDATE SKIP LOCKED` so multiple dispatcher instances
    /// never double-dispatch.
    pub async fn claim_next_queued(pool: &PgPool) -> Result<Option<Optimization>, sqlx::Error> {
        let query = format!(
            "UPDATE optimizations \
             SET status_id = $1, version = version + 1, \
                 started_at = NOW(), error_message = NULL, updated_at = NOW() \
             WHERE id = ( \
                 SELECT id FROM optimizations \
                 WHERE status_id = $2 AND queued_at IS NOT NULL \
                 ORDER BY queued_at ASC \
                 LIMIT 1 \
                 FOR UPDATE SKIP LOCKED \
             ) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Optimization>(&query)
            .bind(OptimizationStatus::InProgress.id())
            .bind(OptimizationStatus::Pending.id())
            .fetch_optional(pool)
            .await
    }

    /// Terminal `InProgress -> Completed`, guarded by the claimed `version`.
    ///
    /// Intended to run inside the transaction that persists the assignments
    /// so result and status commit together. Returns `false` when ownership
    /// was lost (the job was reset or re-claimed since `version`).
    pub async fn complete(
        conn: &mut PgConnection,
        id: DbId,
        version: i64,
        unsatisfied_periods: i32,
        total_cost: f64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE optimizations \
             SET status_id = $2, version = version + 1, \
                 unsatisfied_periods = $4, total_cost = $5, \
                 error_message = NULL, completed_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND status_id = $6 AND version = $3",
        )
        .bind(id)
        .bind(OptimizationStatus::Completed.id())
        .bind(version)
        .bind(unsatisfied_periods)
        .bind(total_cost)
        .bind(OptimizationStatus::InProgress.id())
        .execute(conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Terminal `InProgress -> Failed`, guarded by the claimed `version`.
    ///
    /// The triggering error is retained on the row for diagnostics. Returns
    /// `false` when ownership was lost.
    pub async fn fail(
        pool: &PgPool,
        id: DbId,
        version: i64,
        error: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE optimizations \
             SET status_id = $2, version = version + 1, \
                 error_message = $4, completed_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND status_id = $5 AND version = $3",
        )
        .bind(id)
        .bind(OptimizationStatus::Failed.id())
        .bind(version)
        .bind(error)
        .bind(OptimizationStatus::InProgress.id())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Force the job back to `Pending` from any state and clear partial
    /// results (stored assignments included).
    ///
    /// Idempotent: resetting a `Pending` job is a state-wise no-op. Does not
    /// signal an in-flight worker; the `version` bump makes that worker's
    /// eventual terminal write a no-op instead. Returns `None` if the job
    /// does not exist.
    pub async fn reset_status(pool: &PgPool, id: DbId) -> Result<Option<Optimization>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM assignments WHERE optimization_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let query = format!(
            "UPDATE optimizations \
             SET status_id = $2, version = version + 1, \
                 error_message = NULL, unsatisfied_periods = NULL, total_cost = NULL, \
                 queued_at = NULL, started_at = NULL, completed_at = NULL, \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Optimization>(&query)
            .bind(id)
            .bind(OptimizationStatus::Pending.id())
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(row)
    }
}
