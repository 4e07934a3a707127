//! Constrained assignment solver.
//!
//! Pure function over immutable snapshots: no I/O, no state across calls.
//! Repeated runs on identical input produce identical output, ordering
//! included, so results are reproducible and unit-testable with synthetic
//! inputs.

mod engine;
pub mod input;
pub mod plan;

pub use input::{DemandPeriod, Interval, OptimizationParameters, ResourceDescriptor};
pub use plan::{Assignment, Solution, UnsatisfiedPeriod};

/// Input rejected before any search is attempted.
///
/// `Preconditions` lists every violation found, not just the first one.
#[derive(Debug, thiserror::Error)]
pub enum SolveError {
    #[error("demand is empty; nothing to solve")]
    EmptyDemand,

    #[error("invalid solver input: {}", violations.join("; "))]
    Preconditions { violations: Vec<String> },
}

/// Assign resources to demand periods subject to skill, availability, and
/// cost constraints.
///
/// Periods that cannot reach their minimum headcount are reported in
/// [`Solution::unsatisfied`] while the remaining periods still receive
/// assignments; see [`Solution::feasible`].
pub fn solve(
    resources: &[ResourceDescriptor],
    demand: &[DemandPeriod],
    params: &OptimizationParameters,
) -> Result<Solution, SolveError> {
    validate(resources, demand)?;
    Ok(engine::run(resources, demand, params))
}

fn validate(resources: &[ResourceDescriptor], demand: &[DemandPeriod]) -> Result<(), SolveError> {
    if demand.is_empty() {
        return Err(SolveError::EmptyDemand);
    }

    let mut violations = Vec::new();

    for resource in resources {
        if resource.min_quantity > resource.max_quantity {
            violations.push(format!(
                "resource {} has min quantity {} greater than max quantity {}",
                resource.id, resource.min_quantity, resource.max_quantity
            ));
        }
        if resource.contract_hours_per_week < 0.0 {
            violations.push(format!(
                "resource {} has negative contracted hours",
                resource.id
            ));
        }
    }

    for period in demand {
        if period.window.is_inverted() {
            violations.push(format!("demand period {} has an inverted window", period.id));
        }
        if period.min_headcount < 0 {
            violations.push(format!(
                "demand period {} has negative minimum headcount",
                period.id
            ));
        }
        if period.min_headcount > period.max_headcount {
            violations.push(format!(
                "demand period {} requires min headcount {} greater than max {}",
                period.id, period.min_headcount, period.max_headcount
            ));
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(SolveError::Preconditions { violations })
    }
}
