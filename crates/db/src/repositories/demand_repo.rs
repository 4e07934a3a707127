//! Repository for the `demand_periods` table.

use sqlx::PgPool;

use rosterd_core::types::{DbId, Timestamp};

use crate::models::demand::{CreateDemandPeriod, DemandPeriodRow};

const COLUMNS: &str = "\
    id, tour_schedule_id, work_unit_id, starts_at, ends_at, \
    min_headcount, max_headcount, \
    skill_ids, qualification_ids, behaviour_ids, \
    created_at, updated_at";

/// Provides demand-period queries scoped to a tour schedule and date range.
pub struct DemandRepo;

impl DemandRepo {
    /// Insert a demand period.
    pub async fn insert(
        pool: &PgPool,
        input: &CreateDemandPeriod,
    ) -> Result<DemandPeriodRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO demand_periods \
                 (tour_schedule_id, work_unit_id, starts_at, ends_at, \
                  min_headcount, max_headcount, \
                  skill_ids, qualification_ids, behaviour_ids) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DemandPeriodRow>(&query)
            .bind(input.tour_schedule_id)
            .bind(input.work_unit_id)
            .bind(input.starts_at)
            .bind(input.ends_at)
            .bind(input.min_headcount)
            .bind(input.max_headcount)
            .bind(&input.skill_ids)
            .bind(&input.qualification_ids)
            .bind(&input.behaviour_ids)
            .fetch_one(pool)
            .await
    }

    /// List demand periods of one tour schedule intersecting `[from, to)`,
    /// in chronological order.
    pub async fn list_for_schedule_in_range(
        pool: &PgPool,
        tour_schedule_id: DbId,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<Vec<DemandPeriodRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM demand_periods \
             WHERE tour_schedule_id = $1 AND starts_at < $3 AND ends_at > $2 \
             ORDER BY starts_at, id"
        );
        sqlx::query_as::<_, DemandPeriodRow>(&query)
            .bind(tour_schedule_id)
            .bind(from)
            .bind(to)
            .fetch_all(pool)
            .await
    }
}
