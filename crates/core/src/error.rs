//! Domain error type shared by all crates.

use crate::types::DbId;

/// Domain-level error for the qualification engine.
///
/// The API layer maps each variant to an HTTP status; see
/// `fibreops-api/src/error.rs`.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// An entity addressed by numeric id does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// An entity addressed by string key (stage id, checklist item id)
    /// does not exist.
    #[error("{entity} '{key}' not found")]
    UnknownKey { entity: &'static str, key: String },

    /// A business-rule validation failed. The message carries the specific
    /// facts the caller needs to remediate.
    #[error("{0}")]
    Validation(String),

    /// A state-machine transition was attempted from the wrong state.
    #[error("{0}")]
    Precondition(String),

    /// A concurrent modification was detected and retries were exhausted.
    #[error("{0}")]
    Conflict(String),

    /// Invariant violation or corrupt stored data.
    #[error("{0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display_includes_entity_and_id() {
        let err = CoreError::NotFound {
            entity: "Contractor",
            id: 42,
        };
        assert_eq!(err.to_string(), "Contractor with id 42 not found");
    }

    #[test]
    fn unknown_key_display_includes_key() {
        let err = CoreError::UnknownKey {
            entity: "OnboardingStage",
            key: "no_such_stage".to_string(),
        };
        assert_eq!(err.to_string(), "OnboardingStage 'no_such_stage' not found");
    }

    #[test]
    fn validation_display_is_message() {
        let err = CoreError::Validation("reason must not be empty".to_string());
        assert_eq!(err.to_string(), "reason must not be empty");
    }
}
