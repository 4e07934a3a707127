//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` DTOs for the write operations the entity supports

pub mod assignment;
pub mod demand;
pub mod leave;
pub mod optimization;
pub mod roster;
pub mod status;
