//! Document workflow error types.

use thiserror::Error;
use uuid::Uuid;

use douane_shared::AppError;

use crate::actor::UserRole;
use crate::document::types::DocumentStatus;

/// Errors that can occur during document workflow operations.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Document not found.
    #[error("document {0} not found")]
    NotFound(Uuid),

    /// Referenced template not found.
    #[error("template {0} not found")]
    TemplateNotFound(Uuid),

    /// Document type code does not resolve in the registry.
    #[error("unknown document type code {0}")]
    UnknownType(String),

    /// The actor's role may not perform the operation.
    #[error("role {role} may not {action}")]
    RoleNotAllowed {
        /// The actor's role.
        role: UserRole,
        /// The attempted action.
        action: &'static str,
    },

    /// Only the creating drafting agent may perform the operation.
    #[error("only the creator may {action} this document")]
    NotCreator {
        /// The attempted action.
        action: &'static str,
    },

    /// A drafting agent may no longer touch a document past Draft.
    #[error("document left draft status and is locked for its drafting agent")]
    DraftLocked,

    /// Attempted an invalid status transition.
    #[error("invalid status transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: DocumentStatus,
        /// The attempted target status.
        to: DocumentStatus,
    },
}

impl From<DocumentError> for AppError {
    fn from(err: DocumentError) -> Self {
        match err {
            DocumentError::NotFound(_) | DocumentError::TemplateNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            DocumentError::UnknownType(_) => Self::InvalidInput(err.to_string()),
            DocumentError::RoleNotAllowed { .. }
            | DocumentError::NotCreator { .. }
            | DocumentError::DraftLocked => Self::Forbidden(err.to_string()),
            DocumentError::InvalidTransition { .. } => Self::InvalidState(err.to_string()),
        }
    }
}
