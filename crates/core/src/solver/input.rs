//! Solver input snapshot types.
//!
//! Instances are immutable copies built by the worker before a solve; the
//! solver never touches shared state, so no locking is needed inside it.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::{DbId, Timestamp};

/// Half-open time window `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl Interval {
    pub fn new(start: Timestamp, end: Timestamp) -> Self {
        Self { start, end }
    }

    /// Two half-open windows overlap iff each starts before the other ends.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Window length in hours, at minute granularity.
    pub fn hours(&self) -> f64 {
        (self.end - self.start).num_minutes() as f64 / 60.0
    }

    pub fn is_inverted(&self) -> bool {
        self.end <= self.start
    }
}

/// A human resource available for assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceDescriptor {
    pub id: DbId,
    pub name: String,
    pub skills: BTreeSet<DbId>,
    pub qualifications: BTreeSet<DbId>,
    pub behaviours: BTreeSet<DbId>,
    /// Contracted working hours per ISO week before overtime applies.
    pub contract_hours_per_week: f64,
    pub cost_per_hour: f64,
    pub overtime_cost_per_hour: f64,
    /// Fixed monthly cost, pro-rated over the demand horizon and charged
    /// once when the resource receives its first assignment.
    pub fixed_monthly_cost: f64,
    pub min_quantity: i32,
    pub max_quantity: i32,
    /// Conflict-resolution weight; higher-priority resources win contested
    /// periods first.
    pub priority: i32,
    /// Leave and other unavailability windows.
    pub leave: Vec<Interval>,
}

impl ResourceDescriptor {
    /// Whether this resource carries every required skill, qualification,
    /// and behaviour of `period`.
    pub fn covers_profile(&self, period: &DemandPeriod) -> bool {
        period.skills.is_subset(&self.skills)
            && period.qualifications.is_subset(&self.qualifications)
            && period.behaviours.is_subset(&self.behaviours)
    }

    /// Whether the window is free of leave/unavailability intervals.
    pub fn available_for(&self, window: &Interval) -> bool {
        self.leave.iter().all(|leave| !leave.overlaps(window))
    }
}

/// A time-bounded slot requiring a headcount range and a skill profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemandPeriod {
    pub id: DbId,
    pub work_unit_id: Option<DbId>,
    pub window: Interval,
    pub min_headcount: i32,
    pub max_headcount: i32,
    pub skills: BTreeSet<DbId>,
    pub qualifications: BTreeSet<DbId>,
    pub behaviours: BTreeSet<DbId>,
}

/// Solve request payload.
///
/// Orchestration treats the toggles and weights as opaque; they are passed
/// verbatim to the solver.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationParameters {
    /// The optimization job this request refers to.
    #[validate(range(min = 1, message = "optimizationId must be positive"))]
    pub optimization_id: DbId,
    /// Rank candidates by accumulated cost before skill-match quality.
    #[serde(default = "default_prioritize_cost")]
    pub prioritize_cost: bool,
    /// Cap on overtime hours per resource across the horizon; `None` means
    /// uncapped.
    #[serde(default)]
    pub max_overtime_hours: Option<f64>,
    /// Strength of the hour-spreading nudge when ranking candidates by cost.
    /// Zero disables it.
    #[serde(default)]
    pub fairness_weight: f64,
}

fn default_prioritize_cost() -> bool {
    true
}

impl OptimizationParameters {
    /// Parameters with default weights for the given optimization.
    pub fn for_optimization(optimization_id: DbId) -> Self {
        Self {
            optimization_id,
            prioritize_cost: true,
            max_overtime_hours: None,
            fairness_weight: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use validator::Validate;

    fn window(start_hour: u32, end_hour: u32) -> Interval {
        Interval::new(
            Utc.with_ymd_and_hms(2025, 3, 3, start_hour, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 3, 3, end_hour, 0, 0).unwrap(),
        )
    }

    #[test]
    fn overlapping_windows_detected() {
        assert!(window(8, 12).overlaps(&window(11, 15)));
        assert!(window(11, 15).overlaps(&window(8, 12)));
    }

    #[test]
    fn touching_windows_do_not_overlap() {
        assert!(!window(8, 12).overlaps(&window(12, 16)));
    }

    #[test]
    fn interval_hours() {
        assert_eq!(window(8, 12).hours(), 4.0);
    }

    #[test]
    fn inverted_interval_detected() {
        assert!(window(12, 12).is_inverted());
        assert!(!window(8, 12).is_inverted());
    }

    #[test]
    fn parameters_reject_non_positive_id() {
        let params = OptimizationParameters::for_optimization(0);
        assert!(params.validate().is_err());

        let params = OptimizationParameters::for_optimization(7);
        assert!(params.validate().is_ok());
    }
}
