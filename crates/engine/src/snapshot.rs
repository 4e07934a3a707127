//! Solver input snapshot assembly.
//!
//! Loads the roster, demand, and leave collaborators scoped to the job's
//! tour schedule and date range, and converts the rows into the solver's
//! immutable input types. The solver never touches the database.

use std::collections::HashMap;

use chrono::NaiveTime;

use rosterd_core::solver::{DemandPeriod, Interval, ResourceDescriptor};
use rosterd_core::types::{DbId, Timestamp};
use rosterd_db::models::optimization::Optimization;
use rosterd_db::repositories::{DemandRepo, LeaveRepo, RosterRepo};
use rosterd_db::DbPool;

/// Immutable snapshot handed to the solver.
pub struct SolverInput {
    pub resources: Vec<ResourceDescriptor>,
    pub demand: Vec<DemandPeriod>,
}

/// Load the snapshot for one optimization job.
pub async fn load(pool: &DbPool, job: &Optimization) -> Result<SolverInput, sqlx::Error> {
    let (from, to) = date_bounds(job);

    let roster = RosterRepo::list_for_schedule(pool, job.tour_schedule_id).await?;
    let leave = LeaveRepo::list_for_schedule_in_range(pool, job.tour_schedule_id, from, to).await?;
    let periods =
        DemandRepo::list_for_schedule_in_range(pool, job.tour_schedule_id, from, to).await?;

    let mut leave_by_resource: HashMap<DbId, Vec<Interval>> = HashMap::new();
    for take in leave {
        leave_by_resource
            .entry(take.human_resource_id)
            .or_default()
            .push(Interval::new(take.starts_at, take.ends_at));
    }

    let resources = roster
        .into_iter()
        .map(|hr| ResourceDescriptor {
            leave: leave_by_resource.remove(&hr.id).unwrap_or_default(),
            id: hr.id,
            name: hr.name,
            skills: hr.skill_ids.into_iter().collect(),
            qualifications: hr.qualification_ids.into_iter().collect(),
            behaviours: hr.behaviour_ids.into_iter().collect(),
            contract_hours_per_week: hr.contract_hours_per_week,
            cost_per_hour: hr.cost_per_hour,
            overtime_cost_per_hour: hr.overtime_cost_per_hour,
            fixed_monthly_cost: hr.fixed_monthly_cost,
            min_quantity: hr.min_quantity,
            max_quantity: hr.max_quantity,
            priority: hr.priority,
        })
        .collect();

    let demand = periods
        .into_iter()
        .map(|row| DemandPeriod {
            id: row.id,
            work_unit_id: row.work_unit_id,
            window: Interval::new(row.starts_at, row.ends_at),
            min_headcount: row.min_headcount,
            max_headcount: row.max_headcount,
            skills: row.skill_ids.into_iter().collect(),
            qualifications: row.qualification_ids.into_iter().collect(),
            behaviours: row.behaviour_ids.into_iter().collect(),
        })
        .collect();

    Ok(SolverInput { resources, demand })
}

/// The job's `[start_date, end_date]` as an end-exclusive timestamp range.
fn date_bounds(job: &Optimization) -> (Timestamp, Timestamp) {
    let from = job.start_date.and_time(NaiveTime::MIN).and_utc();
    let to = job
        .end_date
        .succ_opt()
        .unwrap_or(job.end_date)
        .and_time(NaiveTime::MIN)
        .and_utc();
    (from, to)
}
