//! Handlers for the `/optimizations` resource.
//!
//! The solve endpoint is non-blocking: it validates, enqueues, and returns
//! immediately with a job handle. Clients poll `/{id}/status` for progress
//! and `/{id}/assignments` for the persisted result.

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;
use serde::Serialize;
use validator::Validate;

use rosterd_core::error::CoreError;
use rosterd_core::solver::OptimizationParameters;
use rosterd_core::types::DbId;
use rosterd_db::models::optimization::{
    CreateOptimization, Optimization, OptimizationListQuery, UpdateOptimization,
};
use rosterd_db::models::status::OptimizationStatus;
use rosterd_db::repositories::{AssignmentRepo, OptimizationRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fetch an optimization by ID or bail with 404.
async fn find_or_404(pool: &sqlx::PgPool, id: DbId) -> AppResult<Optimization> {
    OptimizationRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Optimization",
            id,
        }))
}

fn check_date_range(start_date: NaiveDate, end_date: NaiveDate) -> AppResult<()> {
    if start_date > end_date {
        return Err(AppError::Core(CoreError::Validation(
            "startDate must not be after endDate".into(),
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// POST /api/v1/optimizations
///
/// Create a new optimization job record. The job starts in `Pending` status;
/// nothing is enqueued until `/optimizations/solve` is called.
pub async fn create_optimization(
    State(state): State<AppState>,
    Json(input): Json<CreateOptimization>,
) -> AppResult<impl IntoResponse> {
    check_date_range(input.start_date, input.end_date)?;

    let created = OptimizationRepo::insert(&state.pool, &input).await?;

    tracing::info!(
        optimization_id = created.id,
        tour_schedule_id = created.tour_schedule_id,
        environment_id = created.environment_id,
        "Optimization created",
    );

    let location = format!("/api/v1/optimizations/{}", created.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(DataResponse { data: created }),
    ))
}

/// GET /api/v1/optimizations
///
/// List optimization jobs, optionally scoped to one environment via the
/// `environmentId` query parameter.
pub async fn list_optimizations(
    State(state): State<AppState>,
    Query(params): Query<OptimizationListQuery>,
) -> AppResult<impl IntoResponse> {
    let jobs = OptimizationRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: jobs }))
}

/// GET /api/v1/optimizations/{id}
pub async fn get_optimization(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let job = find_or_404(&state.pool, id).await?;
    Ok(Json(DataResponse { data: job }))
}

/// PUT /api/v1/optimizations/{id}
///
/// Full-record update, last-write-wins. The path id must match the body id.
/// Used internally by tooling; not typically client-facing.
pub async fn update_optimization(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateOptimization>,
) -> AppResult<impl IntoResponse> {
    if id != input.id {
        return Err(AppError::BadRequest(
            "Path id does not match body id".into(),
        ));
    }
    check_date_range(input.start_date, input.end_date)?;

    let updated = OptimizationRepo::update(&state.pool, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Optimization",
            id,
        }))?;

    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/optimizations/{id}
///
/// Remove the job record (persisted assignments cascade). Returns 204.
pub async fn delete_optimization(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = OptimizationRepo::delete_by_id(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Optimization",
            id,
        }));
    }

    tracing::info!(optimization_id = id, "Optimization deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Solve
// ---------------------------------------------------------------------------

/// Response body of `POST /optimizations/solve`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveResponse {
    pub job_id: String,
    pub optimization_id: DbId,
    pub status: &'static str,
}

/// POST /api/v1/optimizations/solve
///
/// Validate the parameters, persist them on the job row, and enqueue.
/// Returns immediately; the solver runs on a background worker. 404 if the
/// referenced optimization does not exist (no state change, no queue entry).
pub async fn solve_optimization(
    State(state): State<AppState>,
    Json(params): Json<OptimizationParameters>,
) -> AppResult<impl IntoResponse> {
    params
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    let job = find_or_404(&state.pool, params.optimization_id).await?;

    let raw = serde_json::to_value(&params)
        .map_err(|e| AppError::InternalError(format!("Cannot serialize parameters: {e}")))?;
    OptimizationRepo::mark_queued(&state.pool, job.id, &raw).await?;

    let handle = state
        .queue
        .enqueue(params)
        .map_err(|e| AppError::InternalError(e.to_string()))?;

    tracing::info!(
        optimization_id = job.id,
        job_id = %handle.id,
        "Optimization solve enqueued",
    );

    Ok(Json(SolveResponse {
        job_id: handle.id.to_string(),
        optimization_id: job.id,
        status: OptimizationStatus::Pending.name(),
    }))
}

// ---------------------------------------------------------------------------
// Status / reset / result
// ---------------------------------------------------------------------------

/// Response body of `GET /optimizations/{id}/status`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub id: DbId,
    pub status: &'static str,
    pub tour_schedule_id: DbId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub environment_id: DbId,
}

/// GET /api/v1/optimizations/{id}/status
///
/// Lightweight status view for polling clients.
pub async fn get_status(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let job = find_or_404(&state.pool, id).await?;

    let status = OptimizationStatus::from_id(job.status_id)
        .map(OptimizationStatus::name)
        .unwrap_or("Unknown");

    Ok(Json(StatusResponse {
        id: job.id,
        status,
        tour_schedule_id: job.tour_schedule_id,
        start_date: job.start_date,
        end_date: job.end_date,
        environment_id: job.environment_id,
    }))
}

/// POST /api/v1/optimizations/{id}/reset-status
///
/// Force the job back to `Pending` and clear partial results. Idempotent on
/// `Pending` jobs. Does not signal an in-flight worker; the store's version
/// guard makes that worker's eventual terminal write a no-op.
pub async fn reset_status(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let reset = OptimizationRepo::reset_status(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Optimization",
            id,
        }))?;

    tracing::info!(optimization_id = id, "Optimization status reset to Pending");
    Ok(Json(DataResponse { data: reset }))
}

/// GET /api/v1/optimizations/{id}/assignments
///
/// The persisted result of the last completed solve, in stable order.
pub async fn list_assignments(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    find_or_404(&state.pool, id).await?;
    let assignments = AssignmentRepo::list_for_optimization(&state.pool, id).await?;
    Ok(Json(DataResponse { data: assignments }))
}
