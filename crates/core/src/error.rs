//! Domain error taxonomy shared across crates.

use crate::types::DbId;

/// A domain-level error.
///
/// The API layer maps each variant onto an HTTP status; the worker engine
/// records them on the job row instead of propagating them upward.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A referenced entity does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Malformed or contradictory input, rejected before any state change.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The requested operation conflicts with the entity's current state.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// An unexpected internal failure.
    #[error("Internal error: {0}")]
    Internal(String),
}
