//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Vote already exists for this target")]
    VoteAlreadyExists,

    #[error("Vote was modified concurrently, please retry")]
    VoteConflict,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::VoteAlreadyExists => "VOTE_ALREADY_EXISTS",
            Self::VoteConflict => "VOTE_CONFLICT",
            Self::DatabaseError(_) => "DATABASE_ERROR",
        }
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::VoteAlreadyExists)
    }

    /// Check if the caller may retry the whole operation
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::VoteConflict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(DomainError::VoteAlreadyExists.code(), "VOTE_ALREADY_EXISTS");
        assert_eq!(DomainError::VoteConflict.code(), "VOTE_CONFLICT");
        assert_eq!(
            DomainError::DatabaseError("down".to_string()).code(),
            "DATABASE_ERROR"
        );
    }

    #[test]
    fn test_classification() {
        assert!(DomainError::VoteAlreadyExists.is_conflict());
        assert!(DomainError::VoteConflict.is_transient());
        assert!(!DomainError::VoteConflict.is_conflict());
        assert!(!DomainError::DatabaseError("x".to_string()).is_transient());
    }

    #[test]
    fn test_error_display() {
        let err = DomainError::DatabaseError("connection refused".to_string());
        assert_eq!(err.to_string(), "Database error: connection refused");
    }
}
