//! Greedy deterministic assignment search.
//!
//! Demand periods are processed chronologically. Within a period, eligible
//! candidates are ranked by (priority desc, accumulated cost asc, profile
//! surplus asc, id asc); candidates that would need overtime are only drawn
//! on when the normal-capacity pool cannot reach the minimum headcount.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::Datelike;

use super::input::{DemandPeriod, Interval, OptimizationParameters, ResourceDescriptor};
use super::plan::{Assignment, Solution, UnsatisfiedPeriod};
use crate::types::DbId;

/// Base month length used to pro-rate fixed monthly costs over the horizon.
const PRO_RATA_MONTH_DAYS: f64 = 30.0;

/// Mutable bookkeeping for one resource during a solve.
struct ResourceState<'a> {
    resource: &'a ResourceDescriptor,
    committed: Vec<Interval>,
    /// Hours assigned per (ISO year, ISO week), attributed to the week of
    /// the period start.
    week_hours: HashMap<(i32, u32), f64>,
    overtime_hours: f64,
    accumulated_cost: f64,
    assigned_hours: f64,
    used: bool,
}

impl<'a> ResourceState<'a> {
    fn new(resource: &'a ResourceDescriptor) -> Self {
        Self {
            resource,
            committed: Vec::new(),
            week_hours: HashMap::new(),
            overtime_hours: 0.0,
            accumulated_cost: 0.0,
            assigned_hours: 0.0,
            used: false,
        }
    }

    fn free_for(&self, window: &Interval) -> bool {
        self.resource.available_for(window)
            && self.committed.iter().all(|taken| !taken.overlaps(window))
    }

    /// Normal (non-overtime) hours still available in the window's week.
    fn remaining_normal(&self, window: &Interval) -> f64 {
        let booked = self
            .week_hours
            .get(&week_key(window))
            .copied()
            .unwrap_or(0.0);
        (self.resource.contract_hours_per_week - booked).max(0.0)
    }

    fn commit(&mut self, period: &DemandPeriod, prorated_fixed_cost: f64) -> Assignment {
        let hours = period.window.hours();
        let normal = self.remaining_normal(&period.window).min(hours);
        let overtime = hours - normal;

        let mut cost = normal * self.resource.cost_per_hour
            + overtime * self.resource.overtime_cost_per_hour;
        if !self.used {
            cost += prorated_fixed_cost;
            self.used = true;
        }

        self.committed.push(period.window);
        *self.week_hours.entry(week_key(&period.window)).or_insert(0.0) += hours;
        self.overtime_hours += overtime;
        self.accumulated_cost += cost;
        self.assigned_hours += hours;

        Assignment {
            human_resource_id: self.resource.id,
            demand_period_id: period.id,
            start: period.window.start,
            end: period.window.end,
            hours,
            overtime_hours: overtime,
            cost,
        }
    }
}

fn week_key(window: &Interval) -> (i32, u32) {
    let iso = window.start.iso_week();
    (iso.year(), iso.week())
}

/// Ranking snapshot for one eligible candidate of one period.
struct Candidate {
    idx: usize,
    priority: i32,
    cost_key: f64,
    profile_surplus: usize,
    id: DbId,
}

impl Candidate {
    fn rank(&self, other: &Candidate, prioritize_cost: bool) -> Ordering {
        let by_cost = |a: &Candidate, b: &Candidate| a.cost_key.total_cmp(&b.cost_key);
        let by_surplus = |a: &Candidate, b: &Candidate| a.profile_surplus.cmp(&b.profile_surplus);

        other
            .priority
            .cmp(&self.priority)
            .then_with(|| {
                if prioritize_cost {
                    by_cost(self, other).then_with(|| by_surplus(self, other))
                } else {
                    by_surplus(self, other).then_with(|| by_cost(self, other))
                }
            })
            .then_with(|| self.id.cmp(&other.id))
    }
}

pub(super) fn run(
    resources: &[ResourceDescriptor],
    demand: &[DemandPeriod],
    params: &OptimizationParameters,
) -> Solution {
    // Resources iterated in ascending id order so equal-rank candidates are
    // examined deterministically.
    let mut order: Vec<usize> = (0..resources.len()).collect();
    order.sort_by_key(|&i| resources[i].id);
    let mut states: Vec<ResourceState> =
        order.iter().map(|&i| ResourceState::new(&resources[i])).collect();

    // Demand processed chronologically; period id is the stable tie-break.
    let mut periods: Vec<&DemandPeriod> = demand.iter().collect();
    periods.sort_by_key(|p| (p.window.start, p.id));

    let prorated_fixed_base = horizon_days(&periods) / PRO_RATA_MONTH_DAYS;

    let mut assignments = Vec::new();
    let mut unsatisfied = Vec::new();

    for period in periods {
        let needed = period.min_headcount as usize;
        if needed == 0 {
            continue;
        }

        let hours = period.window.hours();
        let mut normal_pool = Vec::new();
        let mut overtime_pool = Vec::new();
        let mut eligible = 0;

        for (idx, state) in states.iter().enumerate() {
            if !state.resource.covers_profile(period) || !state.free_for(&period.window) {
                continue;
            }
            eligible += 1;

            let remaining = state.remaining_normal(&period.window);
            let overtime_needed = hours - remaining;
            let within_overtime_budget = match params.max_overtime_hours {
                Some(cap) => state.overtime_hours + overtime_needed <= cap,
                None => true,
            };

            let candidate = Candidate {
                idx,
                priority: state.resource.priority,
                cost_key: state.accumulated_cost
                    + params.fairness_weight * state.assigned_hours,
                profile_surplus: profile_surplus(state.resource, period),
                id: state.resource.id,
            };

            if overtime_needed <= 0.0 {
                normal_pool.push(candidate);
            } else if within_overtime_budget {
                overtime_pool.push(candidate);
            }
        }

        normal_pool.sort_by(|a, b| a.rank(b, params.prioritize_cost));
        overtime_pool.sort_by(|a, b| a.rank(b, params.prioritize_cost));

        let mut chosen: Vec<usize> = normal_pool.iter().take(needed).map(|c| c.idx).collect();
        if chosen.len() < needed {
            chosen.extend(
                overtime_pool
                    .iter()
                    .take(needed - chosen.len())
                    .map(|c| c.idx),
            );
        }

        if chosen.len() < needed {
            unsatisfied.push(UnsatisfiedPeriod {
                demand_period_id: period.id,
                required: period.min_headcount,
                eligible,
                reason: format!(
                    "requires {} resources, only {} assignable",
                    needed,
                    chosen.len()
                ),
            });
            continue;
        }

        for idx in chosen {
            let fixed = states[idx].resource.fixed_monthly_cost * prorated_fixed_base;
            assignments.push(states[idx].commit(period, fixed));
        }
    }

    assignments.sort_by(|a, b| {
        (a.start, a.demand_period_id, a.human_resource_id).cmp(&(
            b.start,
            b.demand_period_id,
            b.human_resource_id,
        ))
    });

    let total_cost = assignments.iter().map(|a| a.cost).sum();
    let feasible = unsatisfied.is_empty();

    Solution {
        assignments,
        unsatisfied,
        total_cost,
        feasible,
    }
}

/// Surplus of the resource's profile over the period's requirements;
/// zero means an exact match, which ranks first.
fn profile_surplus(resource: &ResourceDescriptor, period: &DemandPeriod) -> usize {
    (resource.skills.len() + resource.qualifications.len() + resource.behaviours.len())
        - (period.skills.len() + period.qualifications.len() + period.behaviours.len())
}

/// Demand horizon in whole days (at least one) for fixed-cost pro-rating.
fn horizon_days(periods: &[&DemandPeriod]) -> f64 {
    let start = periods.iter().map(|p| p.window.start).min();
    let end = periods.iter().map(|p| p.window.end).max();
    match (start, end) {
        (Some(start), Some(end)) => ((end - start).num_minutes() as f64 / (24.0 * 60.0))
            .ceil()
            .max(1.0),
        _ => 1.0,
    }
}
