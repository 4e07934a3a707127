//! Solver output types.

use serde::Serialize;

use crate::types::{DbId, Timestamp};

/// A binding of one resource to one demand period for a specific window.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub human_resource_id: DbId,
    pub demand_period_id: DbId,
    pub start: Timestamp,
    pub end: Timestamp,
    pub hours: f64,
    /// Portion of `hours` exceeding the resource's contracted weekly
    /// capacity, charged at the overtime rate.
    pub overtime_hours: f64,
    pub cost: f64,
}

/// A demand period the solver could not staff to its minimum headcount.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnsatisfiedPeriod {
    pub demand_period_id: DbId,
    pub required: i32,
    pub eligible: i32,
    pub reason: String,
}

/// Complete solver outcome.
///
/// Assignments for satisfiable periods survive even when other periods are
/// unsatisfied; `feasible` is false iff `unsatisfied` is non-empty.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Solution {
    pub assignments: Vec<Assignment>,
    pub unsatisfied: Vec<UnsatisfiedPeriod>,
    pub total_cost: f64,
    pub feasible: bool,
}
