//! Demand period entity (the solver's demand snapshot).

use rosterd_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `demand_periods` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DemandPeriodRow {
    pub id: DbId,
    pub tour_schedule_id: DbId,
    pub work_unit_id: Option<DbId>,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
    pub min_headcount: i32,
    pub max_headcount: i32,
    pub skill_ids: Vec<DbId>,
    pub qualification_ids: Vec<DbId>,
    pub behaviour_ids: Vec<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a demand period.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDemandPeriod {
    pub tour_schedule_id: DbId,
    pub work_unit_id: Option<DbId>,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
    pub min_headcount: i32,
    pub max_headcount: i32,
    #[serde(default)]
    pub skill_ids: Vec<DbId>,
    #[serde(default)]
    pub qualification_ids: Vec<DbId>,
    #[serde(default)]
    pub behaviour_ids: Vec<DbId>,
}
