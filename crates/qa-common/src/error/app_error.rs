//! Application error types
//!
//! Unified error handling for the entire application.

use qa_core::DomainError;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Authentication errors
    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    // Database errors
    #[error("Database error: {0}")]
    Database(String),

    // Internal errors
    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            // 401 Unauthorized
            Self::InvalidToken | Self::TokenExpired => 401,

            // 500 Internal Server Error
            Self::Database(_) | Self::Internal(_) | Self::Config(_) => 500,
        }
    }

    /// Get error code for API responses
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidToken => "INVALID_TOKEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
        }
    }
}

/// HTTP status for a domain error
#[must_use]
pub fn domain_status_code(err: &DomainError) -> u16 {
    if err.is_conflict() {
        409
    } else if err.is_transient() {
        503
    } else {
        500
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::InvalidToken.status_code(), 401);
        assert_eq!(AppError::TokenExpired.status_code(), 401);
        assert_eq!(AppError::Database("test".to_string()).status_code(), 500);
        assert_eq!(AppError::Config("test".to_string()).status_code(), 500);
    }

    #[test]
    fn test_domain_status_codes() {
        assert_eq!(domain_status_code(&DomainError::VoteConflict), 503);
        assert_eq!(domain_status_code(&DomainError::VoteAlreadyExists), 409);
        assert_eq!(
            domain_status_code(&DomainError::DatabaseError("x".to_string())),
            500
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::TokenExpired.error_code(), "TOKEN_EXPIRED");
        assert_eq!(
            AppError::Internal(anyhow::anyhow!("boom")).error_code(),
            "INTERNAL_ERROR"
        );
    }
}
