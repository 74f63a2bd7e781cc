//! Control workflow error types.

use thiserror::Error;
use uuid::Uuid;

use douane_shared::AppError;

use crate::actor::UserRole;
use crate::control::types::ControlStatus;

/// Errors that can occur during control workflow operations.
#[derive(Debug, Error)]
pub enum ControlError {
    /// Control not found.
    #[error("control {0} not found")]
    NotFound(Uuid),

    /// Referenced declaration snapshot not found.
    #[error("declaration {0} not found")]
    DeclarationNotFound(String),

    /// The actor's role may not perform the operation.
    #[error("role {role} may not {action}")]
    RoleNotAllowed {
        /// The actor's role.
        role: UserRole,
        /// The attempted action.
        action: &'static str,
    },

    /// The operation's status precondition is not met.
    #[error("operation {operation} is not valid while the control is {status}")]
    InvalidState {
        /// The attempted operation.
        operation: &'static str,
        /// The control's current status.
        status: ControlStatus,
    },

    /// The declarant must acknowledge before a decision is recorded.
    #[error("declarant must acknowledge the certificate")]
    AcknowledgementRequired,

    /// Unknown fine decision tag.
    #[error("invalid fine decision {0:?}, expected \"pass_over\" or \"customs_fine\"")]
    InvalidFineDecision(String),

    /// A fine was requested but no non-compliance was recorded.
    #[error("control has no recorded fiscal impact to size a fine")]
    MissingFiscalImpact,
}

impl From<ControlError> for AppError {
    fn from(err: ControlError) -> Self {
        match err {
            ControlError::NotFound(_) | ControlError::DeclarationNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            ControlError::RoleNotAllowed { .. } => Self::Forbidden(err.to_string()),
            ControlError::InvalidState { .. } | ControlError::MissingFiscalImpact => {
                Self::InvalidState(err.to_string())
            }
            ControlError::AcknowledgementRequired | ControlError::InvalidFineDecision(_) => {
                Self::InvalidInput(err.to_string())
            }
        }
    }
}
