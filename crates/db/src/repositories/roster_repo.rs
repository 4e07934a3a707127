//! Repository for the `human_resources` table (read-only roster snapshot
//! for the worker, plus inserts for seeding and upstream CRUD plumbing).

use sqlx::PgPool;

use rosterd_core::types::DbId;

use crate::models::roster::{CreateHumanResource, HumanResource};

const COLUMNS: &str = "\
    id, tour_schedule_id, environment_id, name, \
    skill_ids, qualification_ids, behaviour_ids, \
    contract_hours_per_week, cost_per_hour, overtime_cost_per_hour, \
    fixed_monthly_cost, min_quantity, max_quantity, priority, \
    created_at, updated_at";

/// Provides roster queries scoped to a tour schedule.
pub struct RosterRepo;

impl RosterRepo {
    /// Insert a roster member.
    pub async fn insert(
        pool: &PgPool,
        input: &CreateHumanResource,
    ) -> Result<HumanResource, sqlx::Error> {
        let query = format!(
            "INSERT INTO human_resources \
                 (tour_schedule_id, environment_id, name, \
                  skill_ids, qualification_ids, behaviour_ids, \
                  contract_hours_per_week, cost_per_hour, overtime_cost_per_hour, \
                  fixed_monthly_cost, min_quantity, max_quantity, priority) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, HumanResource>(&query)
            .bind(input.tour_schedule_id)
            .bind(input.environment_id)
            .bind(&input.name)
            .bind(&input.skill_ids)
            .bind(&input.qualification_ids)
            .bind(&input.behaviour_ids)
            .bind(input.contract_hours_per_week)
            .bind(input.cost_per_hour)
            .bind(input.overtime_cost_per_hour)
            .bind(input.fixed_monthly_cost)
            .bind(input.min_quantity)
            .bind(input.max_quantity)
            .bind(input.priority)
            .fetch_one(pool)
            .await
    }

    /// List the roster of one tour schedule in ascending id order.
    pub async fn list_for_schedule(
        pool: &PgPool,
        tour_schedule_id: DbId,
    ) -> Result<Vec<HumanResource>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM human_resources \
             WHERE tour_schedule_id = $1 ORDER BY id"
        );
        sqlx::query_as::<_, HumanResource>(&query)
            .bind(tour_schedule_id)
            .fetch_all(pool)
            .await
    }
}
