//! Entity models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts (where inserts happen through
//!   the engine or its fixtures)

pub mod assignment;
pub mod compliance;
pub mod contractor;
pub mod document;
pub mod insurance;
pub mod onboarding;
pub mod safety;
pub mod team;
