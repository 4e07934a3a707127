//! Persisted solver assignments.

use rosterd_core::solver;
use rosterd_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `assignments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AssignmentRow {
    pub id: DbId,
    pub optimization_id: DbId,
    pub human_resource_id: DbId,
    pub demand_period_id: DbId,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
    pub hours: f64,
    pub overtime_hours: f64,
    pub cost: f64,
    pub created_at: Timestamp,
}

/// Insert payload built from a solver assignment.
#[derive(Debug, Clone)]
pub struct NewAssignment {
    pub human_resource_id: DbId,
    pub demand_period_id: DbId,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
    pub hours: f64,
    pub overtime_hours: f64,
    pub cost: f64,
}

impl From<&solver::Assignment> for NewAssignment {
    fn from(solved: &solver::Assignment) -> Self {
        Self {
            human_resource_id: solved.human_resource_id,
            demand_period_id: solved.demand_period_id,
            starts_at: solved.start,
            ends_at: solved.end,
            hours: solved.hours,
            overtime_hours: solved.overtime_hours,
            cost: solved.cost,
        }
    }
}
