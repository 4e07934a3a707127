//! Optimization job status lifecycle.
//!
//! This module lives in `core` (zero internal deps) so it can be used by
//! both the API/repository layer and the worker engine.

/// Status IDs matching the `optimization_statuses` seed data (1-based
/// SMALLSERIAL).
///
/// The state machine is intentionally expressed on raw ids because `core`
/// must not depend on the `db` crate's status enum.
pub mod state_machine {
    /// Returns the set of valid target status IDs reachable from `from_status`.
    ///
    /// Every state can reach Pending (1) again through the reset operation;
    /// resetting a Pending job is a state-wise no-op, so 1 -> 1 is listed as
    /// valid. The InProgress (2) transition is reserved for the worker's
    /// claim, and the terminal states Completed (3) and Failed (4) are only
    /// ever written by the worker that owns the job.
    pub fn valid_transitions(from_status: i16) -> &'static [i16] {
        match from_status {
            // Pending -> InProgress (claim), Pending (reset no-op)
            1 => &[2, 1],
            // InProgress -> Completed, Failed, Pending (reset)
            2 => &[3, 4, 1],
            // Completed -> Pending (reset)
            3 => &[1],
            // Failed -> Pending (reset)
            4 => &[1],
            // Unknown status: no transitions allowed
            _ => &[],
        }
    }

    /// Check whether a transition from `from` to `to` is valid.
    pub fn can_transition(from: i16, to: i16) -> bool {
        valid_transitions(from).contains(&to)
    }

    /// Validate a state transition, returning an error message for invalid ones.
    pub fn validate_transition(from: i16, to: i16) -> Result<(), String> {
        if can_transition(from, to) {
            Ok(())
        } else {
            let from_name = status_name(from);
            let to_name = status_name(to);
            Err(format!(
                "Invalid transition: {from_name} ({from}) -> {to_name} ({to})"
            ))
        }
    }

    /// Human-readable name for a status ID (for error messages).
    fn status_name(id: i16) -> &'static str {
        match id {
            1 => "Pending",
            2 => "InProgress",
            3 => "Completed",
            4 => "Failed",
            _ => "Unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::state_machine::*;

    // -----------------------------------------------------------------------
    // Valid transitions
    // -----------------------------------------------------------------------

    #[test]
    fn pending_to_in_progress() {
        assert!(can_transition(1, 2));
    }

    #[test]
    fn pending_reset_is_valid_noop() {
        assert!(can_transition(1, 1));
    }

    #[test]
    fn in_progress_to_completed() {
        assert!(can_transition(2, 3));
    }

    #[test]
    fn in_progress_to_failed() {
        assert!(can_transition(2, 4));
    }

    #[test]
    fn in_progress_reset_to_pending() {
        assert!(can_transition(2, 1));
    }

    #[test]
    fn completed_reset_to_pending() {
        assert!(can_transition(3, 1));
    }

    #[test]
    fn failed_reset_to_pending() {
        assert!(can_transition(4, 1));
    }

    // -----------------------------------------------------------------------
    // Invalid transitions
    // -----------------------------------------------------------------------

    #[test]
    fn pending_to_completed_invalid() {
        assert!(!can_transition(1, 3));
    }

    #[test]
    fn pending_to_failed_invalid() {
        assert!(!can_transition(1, 4));
    }

    #[test]
    fn completed_to_in_progress_invalid() {
        assert!(!can_transition(3, 2));
    }

    #[test]
    fn failed_to_completed_invalid() {
        assert!(!can_transition(4, 3));
    }

    // -----------------------------------------------------------------------
    // validate_transition returns descriptive error
    // -----------------------------------------------------------------------

    #[test]
    fn validate_transition_ok() {
        assert!(validate_transition(1, 2).is_ok());
    }

    #[test]
    fn validate_transition_err() {
        let err = validate_transition(3, 2).unwrap_err();
        assert!(err.contains("Completed"));
        assert!(err.contains("InProgress"));
    }

    // -----------------------------------------------------------------------
    // Unknown status ID
    // -----------------------------------------------------------------------

    #[test]
    fn unknown_status_has_no_transitions() {
        assert!(valid_transitions(99).is_empty());
    }
}
