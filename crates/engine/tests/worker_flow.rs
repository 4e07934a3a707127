//! End-to-end worker pipeline tests against a real database:
//! enqueue-shaped parameters in, terminal job state and persisted
//! assignments out.

use chrono::{NaiveDate, TimeZone, Utc};
use sqlx::PgPool;

use rosterd_core::solver::OptimizationParameters;
use rosterd_core::types::{DbId, Timestamp};
use rosterd_db::models::demand::CreateDemandPeriod;
use rosterd_db::models::leave::CreateLeaveTake;
use rosterd_db::models::optimization::CreateOptimization;
use rosterd_db::models::roster::CreateHumanResource;
use rosterd_db::models::status::OptimizationStatus;
use rosterd_db::repositories::{
    AssignmentRepo, DemandRepo, LeaveRepo, OptimizationRepo, RosterRepo,
};
use rosterd_engine::worker::Worker;

const SCHEDULE: DbId = 1;
const SKILL_X: DbId = 101;
const SKILL_Y: DbId = 102;

// ---------------------------------------------------------------------------
// Seed helpers
// ---------------------------------------------------------------------------

fn at(day: u32, hour: u32) -> Timestamp {
    Utc.with_ymd_and_hms(2025, 3, day, hour, 0, 0).unwrap()
}

async fn seed_optimization(pool: &PgPool) -> DbId {
    OptimizationRepo::insert(
        pool,
        &CreateOptimization {
            tour_schedule_id: SCHEDULE,
            environment_id: 1,
            start_date: NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 3, 9).unwrap(),
        },
    )
    .await
    .unwrap()
    .id
}

async fn seed_resource(pool: &PgPool, name: &str, skills: &[DbId]) -> DbId {
    RosterRepo::insert(
        pool,
        &CreateHumanResource {
            tour_schedule_id: SCHEDULE,
            environment_id: 1,
            name: name.to_string(),
            skill_ids: skills.to_vec(),
            qualification_ids: Vec::new(),
            behaviour_ids: Vec::new(),
            contract_hours_per_week: 8.0,
            cost_per_hour: 10.0,
            overtime_cost_per_hour: 15.0,
            fixed_monthly_cost: 0.0,
            min_quantity: 0,
            max_quantity: 1,
            priority: 0,
        },
    )
    .await
    .unwrap()
    .id
}

async fn seed_demand(
    pool: &PgPool,
    day: u32,
    from: u32,
    to: u32,
    headcount: (i32, i32),
    skills: &[DbId],
) -> DbId {
    DemandRepo::insert(
        pool,
        &CreateDemandPeriod {
            tour_schedule_id: SCHEDULE,
            work_unit_id: None,
            starts_at: at(day, from),
            ends_at: at(day, to),
            min_headcount: headcount.0,
            max_headcount: headcount.1,
            skill_ids: skills.to_vec(),
            qualification_ids: Vec::new(),
            behaviour_ids: Vec::new(),
        },
    )
    .await
    .unwrap()
    .id
}

// ---------------------------------------------------------------------------
// Happy path
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn worker_completes_job_and_persists_assignments(pool: PgPool) {
    let a = seed_resource(&pool, "A", &[SKILL_X]).await;
    let _b = seed_resource(&pool, "B", &[SKILL_X, SKILL_Y]).await;
    let period = seed_demand(&pool, 3, 8, 12, (1, 1), &[SKILL_X]).await;
    let optimization_id = seed_optimization(&pool).await;

    let params = OptimizationParameters::for_optimization(optimization_id);
    Worker::new(pool.clone()).process(&params).await;

    let job = OptimizationRepo::find_by_id(&pool, optimization_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(job.status_id, OptimizationStatus::Completed.id());
    assert_eq!(job.unsatisfied_periods, Some(0));
    assert!(job.completed_at.is_some());
    assert!(job.error_message.is_none());

    // Both carry skill X; the id tie-break picks resource A for 4 hours.
    let assignments = AssignmentRepo::list_for_optimization(&pool, optimization_id)
        .await
        .unwrap();
    assert_eq!(assignments.len(), 1);
    assert_eq!(assignments[0].human_resource_id, a);
    assert_eq!(assignments[0].demand_period_id, period);
    assert_eq!(assignments[0].hours, 4.0);
    assert_eq!(job.total_cost, Some(40.0));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn leave_is_reflected_in_the_snapshot(pool: PgPool) {
    let a = seed_resource(&pool, "A", &[SKILL_X]).await;
    let b = seed_resource(&pool, "B", &[SKILL_X]).await;
    LeaveRepo::insert(
        &pool,
        &CreateLeaveTake {
            human_resource_id: a,
            starts_at: at(3, 0),
            ends_at: at(4, 0),
        },
    )
    .await
    .unwrap();
    seed_demand(&pool, 3, 8, 12, (1, 1), &[SKILL_X]).await;
    let optimization_id = seed_optimization(&pool).await;

    let params = OptimizationParameters::for_optimization(optimization_id);
    Worker::new(pool.clone()).process(&params).await;

    let assignments = AssignmentRepo::list_for_optimization(&pool, optimization_id)
        .await
        .unwrap();
    assert_eq!(assignments.len(), 1);
    assert_eq!(assignments[0].human_resource_id, b);
}

// ---------------------------------------------------------------------------
// Infeasibility is Completed-with-partial-results, not Failed
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn understaffed_period_completes_with_unsatisfied_count(pool: PgPool) {
    seed_resource(&pool, "A", &[SKILL_X]).await;
    seed_demand(&pool, 3, 8, 12, (2, 3), &[SKILL_X]).await;
    let satisfiable = seed_demand(&pool, 4, 8, 12, (1, 1), &[SKILL_X]).await;
    let optimization_id = seed_optimization(&pool).await;

    let params = OptimizationParameters::for_optimization(optimization_id);
    Worker::new(pool.clone()).process(&params).await;

    let job = OptimizationRepo::find_by_id(&pool, optimization_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(job.status_id, OptimizationStatus::Completed.id());
    assert_eq!(job.unsatisfied_periods, Some(1));

    let assignments = AssignmentRepo::list_for_optimization(&pool, optimization_id)
        .await
        .unwrap();
    assert_eq!(assignments.len(), 1);
    assert_eq!(assignments[0].demand_period_id, satisfiable);
}

// ---------------------------------------------------------------------------
// Failure paths
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn empty_demand_marks_job_failed_with_diagnostics(pool: PgPool) {
    seed_resource(&pool, "A", &[SKILL_X]).await;
    let optimization_id = seed_optimization(&pool).await;

    let params = OptimizationParameters::for_optimization(optimization_id);
    Worker::new(pool.clone()).process(&params).await;

    let job = OptimizationRepo::find_by_id(&pool, optimization_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(job.status_id, OptimizationStatus::Failed.id());
    let message = job.error_message.unwrap();
    assert!(message.contains("demand is empty"), "got: {message}");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_job_is_abandoned_without_rows(pool: PgPool) {
    let params = OptimizationParameters::for_optimization(4242);
    Worker::new(pool.clone()).process(&params).await;

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM optimizations")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn claim_lost_leaves_job_untouched(pool: PgPool) {
    seed_resource(&pool, "A", &[SKILL_X]).await;
    seed_demand(&pool, 3, 8, 12, (1, 1), &[SKILL_X]).await;
    let optimization_id = seed_optimization(&pool).await;

    // Another worker already owns the job.
    let claimed = OptimizationRepo::claim(&pool, optimization_id)
        .await
        .unwrap()
        .unwrap();

    let params = OptimizationParameters::for_optimization(optimization_id);
    Worker::new(pool.clone()).process(&params).await;

    let job = OptimizationRepo::find_by_id(&pool, optimization_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(job.status_id, OptimizationStatus::InProgress.id());
    assert_eq!(job.version, claimed.version);
    assert!(AssignmentRepo::list_for_optimization(&pool, optimization_id)
        .await
        .unwrap()
        .is_empty());
}

// ---------------------------------------------------------------------------
// Reset race: stale result must be discarded
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn reset_between_claim_and_persist_discards_result(pool: PgPool) {
    seed_resource(&pool, "A", &[SKILL_X]).await;
    seed_demand(&pool, 3, 8, 12, (1, 1), &[SKILL_X]).await;
    let optimization_id = seed_optimization(&pool).await;

    let claimed = OptimizationRepo::claim(&pool, optimization_id)
        .await
        .unwrap()
        .unwrap();

    // Operator resets while the (simulated) solve is still running.
    OptimizationRepo::reset_status(&pool, optimization_id)
        .await
        .unwrap()
        .unwrap();

    let params = OptimizationParameters::for_optimization(optimization_id);
    Worker::new(pool.clone()).run_claimed(&claimed, &params).await;

    let job = OptimizationRepo::find_by_id(&pool, optimization_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(job.status_id, OptimizationStatus::Pending.id());
    assert!(AssignmentRepo::list_for_optimization(&pool, optimization_id)
        .await
        .unwrap()
        .is_empty());
}

// ---------------------------------------------------------------------------
// Determinism across repeated runs
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn rerun_after_reset_produces_identical_assignments(pool: PgPool) {
    seed_resource(&pool, "A", &[SKILL_X]).await;
    seed_resource(&pool, "B", &[SKILL_X, SKILL_Y]).await;
    seed_demand(&pool, 3, 8, 12, (1, 1), &[SKILL_X]).await;
    seed_demand(&pool, 3, 10, 14, (1, 1), &[SKILL_X]).await;
    let optimization_id = seed_optimization(&pool).await;

    let params = OptimizationParameters::for_optimization(optimization_id);
    Worker::new(pool.clone()).process(&params).await;
    let first: Vec<_> = AssignmentRepo::list_for_optimization(&pool, optimization_id)
        .await
        .unwrap()
        .into_iter()
        .map(|a| (a.human_resource_id, a.demand_period_id, a.starts_at, a.ends_at))
        .collect();

    OptimizationRepo::reset_status(&pool, optimization_id)
        .await
        .unwrap()
        .unwrap();
    Worker::new(pool.clone()).process(&params).await;
    let second: Vec<_> = AssignmentRepo::list_for_optimization(&pool, optimization_id)
        .await
        .unwrap()
        .into_iter()
        .map(|a| (a.human_resource_id, a.demand_period_id, a.starts_at, a.ends_at))
        .collect();

    assert_eq!(first, second);
}
