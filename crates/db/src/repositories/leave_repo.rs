//! Repository for the `leave_takes` table (availability exceptions).

use sqlx::PgPool;

use rosterd_core::types::{DbId, Timestamp};

use crate::models::leave::{CreateLeaveTake, LeaveTake};

const COLUMNS: &str =
    "id, human_resource_id, starts_at, ends_at, created_at";

/// Provides leave queries for the roster of a tour schedule.
pub struct LeaveRepo;

impl LeaveRepo {
    /// Insert a leave take.
    pub async fn insert(pool: &PgPool, input: &CreateLeaveTake) -> Result<LeaveTake, sqlx::Error> {
        let query = format!(
            "INSERT INTO leave_takes (human_resource_id, starts_at, ends_at) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LeaveTake>(&query)
            .bind(input.human_resource_id)
            .bind(input.starts_at)
            .bind(input.ends_at)
            .fetch_one(pool)
            .await
    }

    /// List leave of a schedule's roster intersecting `[from, to)`.
    pub async fn list_for_schedule_in_range(
        pool: &PgPool,
        tour_schedule_id: DbId,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<Vec<LeaveTake>, sqlx::Error> {
        let query = "\
            SELECT l.id, l.human_resource_id, l.starts_at, l.ends_at, l.created_at \
            FROM leave_takes l \
            JOIN human_resources hr ON hr.id = l.human_resource_id \
            WHERE hr.tour_schedule_id = $1 AND l.starts_at < $3 AND l.ends_at > $2 \
            ORDER BY l.id";
        sqlx::query_as::<_, LeaveTake>(query)
            .bind(tour_schedule_id)
            .bind(from)
            .bind(to)
            .fetch_all(pool)
            .await
    }
}
