//! Human resource entity (the solver's resource roster).

use rosterd_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `human_resources` table with its skill profile.
///
/// Skill/qualification/behaviour sets are BIGINT[] columns referencing the
/// respective catalog entities.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct HumanResource {
    pub id: DbId,
    pub tour_schedule_id: DbId,
    pub environment_id: DbId,
    pub name: String,
    pub skill_ids: Vec<DbId>,
    pub qualification_ids: Vec<DbId>,
    pub behaviour_ids: Vec<DbId>,
    pub contract_hours_per_week: f64,
    pub cost_per_hour: f64,
    pub overtime_cost_per_hour: f64,
    pub fixed_monthly_cost: f64,
    pub min_quantity: i32,
    pub max_quantity: i32,
    pub priority: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a roster member.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHumanResource {
    pub tour_schedule_id: DbId,
    pub environment_id: DbId,
    pub name: String,
    #[serde(default)]
    pub skill_ids: Vec<DbId>,
    #[serde(default)]
    pub qualification_ids: Vec<DbId>,
    #[serde(default)]
    pub behaviour_ids: Vec<DbId>,
    pub contract_hours_per_week: f64,
    pub cost_per_hour: f64,
    pub overtime_cost_per_hour: f64,
    #[serde(default)]
    pub fixed_monthly_cost: f64,
    #[serde(default)]
    pub min_quantity: i32,
    #[serde(default = "default_max_quantity")]
    pub max_quantity: i32,
    #[serde(default)]
    pub priority: i32,
}

fn default_max_quantity() -> i32 {
    1
}
