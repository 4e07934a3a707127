//! Optimization job entity and DTOs.

use chrono::NaiveDate;
use rosterd_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::status::StatusId;

/// A row from the `optimizations` table.
///
/// `version` is the generation stamp: every write bumps it, and the worker
/// re-checks it before writing a terminal status so a reset that happened
/// mid-solve is never overwritten with a stale result.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Optimization {
    pub id: DbId,
    pub tour_schedule_id: DbId,
    pub environment_id: DbId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status_id: StatusId,
    pub version: i64,
    /// Last enqueued solve parameters, verbatim.
    pub parameters: Option<serde_json::Value>,
    pub error_message: Option<String>,
    pub unsatisfied_periods: Option<i32>,
    pub total_cost: Option<f64>,
    pub queued_at: Option<Timestamp>,
    pub started_at: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new optimization job via `POST /optimizations`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOptimization {
    pub tour_schedule_id: DbId,
    pub environment_id: DbId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// DTO for the full-record update via `PUT /optimizations/{id}`.
///
/// Updates are last-write-wins with the caller's whole record; there is no
/// partial-field patch. Server-managed fields (version, timestamps, solve
/// outcome) are not client-writable.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOptimization {
    pub id: DbId,
    pub tour_schedule_id: DbId,
    pub environment_id: DbId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status_id: StatusId,
}

/// Query parameters for `GET /optimizations`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationListQuery {
    /// Restrict the listing to one environment.
    pub environment_id: Option<DbId>,
}
