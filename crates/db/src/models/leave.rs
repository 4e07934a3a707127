//! Leave take entity (availability exceptions).

use rosterd_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `leave_takes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LeaveTake {
    pub id: DbId,
    pub human_resource_id: DbId,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
    pub created_at: Timestamp,
}

/// DTO for inserting a leave take.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeaveTake {
    pub human_resource_id: DbId,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
}
