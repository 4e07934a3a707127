//! Repository for the `assignments` table (persisted solver results).

use sqlx::{PgConnection, PgPool};

use rosterd_core::types::DbId;

use crate::models::assignment::{AssignmentRow, NewAssignment};

const COLUMNS: &str = "\
    id, optimization_id, human_resource_id, demand_period_id, \
    starts_at, ends_at, hours, overtime_hours, cost, created_at";

/// Provides persistence for solver assignments.
pub struct AssignmentRepo;

impl AssignmentRepo {
    /// Replace all assignments of one optimization with a fresh result set.
    ///
    /// Runs on a caller-provided connection so the replacement can share a
    /// transaction with the guarded terminal status update.
    pub async fn replace_for_optimization(
        conn: &mut PgConnection,
        optimization_id: DbId,
        assignments: &[NewAssignment],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM assignments WHERE optimization_id = $1")
            .bind(optimization_id)
            .execute(&mut *conn)
            .await?;

        for assignment in assignments {
            sqlx::query(
                "INSERT INTO assignments \
                     (optimization_id, human_resource_id, demand_period_id, \
                      starts_at, ends_at, hours, overtime_hours, cost) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
            )
            .bind(optimization_id)
            .bind(assignment.human_resource_id)
            .bind(assignment.demand_period_id)
            .bind(assignment.starts_at)
            .bind(assignment.ends_at)
            .bind(assignment.hours)
            .bind(assignment.overtime_hours)
            .bind(assignment.cost)
            .execute(&mut *conn)
            .await?;
        }

        Ok(())
    }

    /// List the persisted assignments of one optimization in stable order.
    pub async fn list_for_optimization(
        pool: &PgPool,
        optimization_id: DbId,
    ) -> Result<Vec<AssignmentRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM assignments \
             WHERE optimization_id = $1 \
             ORDER BY starts_at, demand_period_id, human_resource_id"
        );
        sqlx::query_as::<_, AssignmentRow>(&query)
            .bind(optimization_id)
            .fetch_all(pool)
            .await
    }
}
