//! Domain error types

use thiserror::Error;

/// What kind of entity a [`DomainError::NotFound`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    QueuedMotion,
    Motion,
    Event,
    Topic,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::QueuedMotion => "queued motion",
            EntityKind::Motion => "motion",
            EntityKind::Event => "event",
            EntityKind::Topic => "topic",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Domain-level errors
///
/// None of these are fatal: the state that produced them is left unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Malformed input (imported snapshot, negative ballot counts, bad parameters)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// An id that does not exist was referenced
    #[error("{kind} '{id}' not found")]
    NotFound { kind: EntityKind, id: String },

    /// A workflow operation was invoked outside its valid state
    #[error("Cannot {operation} while {state}")]
    InvalidState {
        operation: &'static str,
        state: &'static str,
    },

    /// A motion ballot was finalized without a single yes or no vote
    #[error("No votes cast: record at least one yes or no vote before finalizing")]
    NoVotesCast,
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation(message.into())
    }

    pub fn not_found(kind: EntityKind, id: impl ToString) -> Self {
        DomainError::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    /// Check if this error is a programming/UI error rather than a user mistake
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, DomainError::InvalidState { .. })
    }

    /// Check if this error signals a missing entity
    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let error = DomainError::not_found(EntityKind::QueuedMotion, 7);
        assert_eq!(error.to_string(), "queued motion '7' not found");
        assert!(error.is_not_found());
    }

    #[test]
    fn test_invalid_state_display() {
        let error = DomainError::InvalidState {
            operation: "finalize",
            state: "idle",
        };
        assert_eq!(error.to_string(), "Cannot finalize while idle");
        assert!(error.is_invalid_state());
        assert!(!DomainError::NoVotesCast.is_invalid_state());
    }

    #[test]
    fn test_validation_display() {
        let error = DomainError::validation("Missing topics array");
        assert_eq!(error.to_string(), "Validation failed: Missing topics array");
    }
}
