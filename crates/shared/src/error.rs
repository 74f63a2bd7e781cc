//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error taxonomy.
///
/// Every fallible operation in the system surfaces one of these variants
/// to the caller. Only `Conflict` (a lost concurrent-write race) is meant
/// to be retried, by re-reading and resubmitting.
#[derive(Debug, Error)]
pub enum AppError {
    /// Authentication failed or no actor present.
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// Actor lacks the role or ownership for this operation.
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// Entity, template, declaration, or artifact absent.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The operation's status precondition is not met.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Payload fails a domain rule.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Concurrent-write race (version mismatch) or duplicate entry.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Declaration lookup or artifact rendering failed.
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Unauthorized(_) => 401,
            Self::Forbidden(_) => 403,
            Self::NotFound(_) => 404,
            Self::InvalidState(_) | Self::InvalidInput(_) => 400,
            Self::Conflict(_) => 409,
            Self::ExternalService(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::NotFound(_) => "NOT_FOUND",
            Self::InvalidState(_) => "INVALID_STATE",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::Conflict(_) => "CONFLICT",
            Self::ExternalService(_) => "EXTERNAL_SERVICE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}
