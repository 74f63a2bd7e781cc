//! Capability table mapping (role, operation) to allow/deny.
//!
//! Authorization is consulted once per operation, up front, instead of
//! re-deriving role checks inline in each workflow step. Ownership rules
//! (creator-only, owning-officer-only) stay with the workflows; this
//! table only answers whether a role may invoke an operation at all.

use std::fmt;

use douane_shared::{AppError, AppResult};

use crate::actor::UserRole;

/// A guarded operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Create a new document draft.
    CreateDocument,
    /// Update document fields.
    UpdateDocument,
    /// Submit a draft for control.
    SubmitDocument,
    /// View a single document (ownership applied separately).
    ViewDocument,
    /// List documents (visibility scoping applied separately).
    ListDocuments,
    /// Render a document artifact on demand.
    RenderDocument,
    /// Initiate a control on a declaration.
    CreateControl,
    /// View a single control (ownership applied separately).
    ViewControl,
    /// List controls (visibility scoping applied separately).
    ListControls,
    /// Replace the compliance checklist of a control.
    UpdateCompliance,
    /// Record non-compliance findings and generate the certificate.
    RecordNonCompliance,
    /// Record declarant acknowledgement and the fine decision.
    ValidateDeclarant,
    /// Create, update, or delete document templates.
    ManageTemplates,
    /// Create, update, or delete document type registry entries.
    ManageDocumentTypes,
    /// Read templates, document types, and regulations.
    ViewReferenceData,
}

impl Operation {
    /// Returns a short human-readable label used in error messages.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateDocument => "create documents",
            Self::UpdateDocument => "update documents",
            Self::SubmitDocument => "submit documents",
            Self::ViewDocument => "view documents",
            Self::ListDocuments => "list documents",
            Self::RenderDocument => "render documents",
            Self::CreateControl => "initiate controls",
            Self::ViewControl => "view controls",
            Self::ListControls => "list controls",
            Self::UpdateCompliance => "update compliance checks",
            Self::RecordNonCompliance => "record non-compliance",
            Self::ValidateDeclarant => "validate declarant acknowledgement",
            Self::ManageTemplates => "manage templates",
            Self::ManageDocumentTypes => "manage document types",
            Self::ViewReferenceData => "view reference data",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Returns whether `role` may invoke `operation`.
#[must_use]
pub fn is_allowed(role: UserRole, operation: Operation) -> bool {
    use Operation as Op;
    use UserRole as R;

    match operation {
        Op::CreateDocument | Op::SubmitDocument => matches!(role, R::DraftingAgent),

        Op::UpdateDocument
        | Op::ViewDocument
        | Op::ListDocuments
        | Op::RenderDocument
        | Op::ViewControl
        | Op::ListControls
        | Op::ViewReferenceData => true,

        Op::CreateControl
        | Op::UpdateCompliance
        | Op::RecordNonCompliance
        | Op::ValidateDeclarant => matches!(role, R::ControlOfficer | R::ValidationOfficer),

        Op::ManageTemplates => matches!(role, R::ValidationOfficer | R::Moa),

        Op::ManageDocumentTypes => matches!(role, R::Moa),
    }
}

/// Checks the capability table, failing with `Forbidden` on deny.
pub fn require(role: UserRole, operation: Operation) -> AppResult<()> {
    if is_allowed(role, operation) {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!(
            "role {role} may not {operation}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drafting_agent_capabilities() {
        let role = UserRole::DraftingAgent;
        assert!(is_allowed(role, Operation::CreateDocument));
        assert!(is_allowed(role, Operation::SubmitDocument));
        assert!(is_allowed(role, Operation::UpdateDocument));
        assert!(!is_allowed(role, Operation::CreateControl));
        assert!(!is_allowed(role, Operation::UpdateCompliance));
        assert!(!is_allowed(role, Operation::ManageTemplates));
        assert!(!is_allowed(role, Operation::ManageDocumentTypes));
    }

    #[test]
    fn test_control_officer_capabilities() {
        let role = UserRole::ControlOfficer;
        assert!(is_allowed(role, Operation::CreateControl));
        assert!(is_allowed(role, Operation::UpdateCompliance));
        assert!(is_allowed(role, Operation::RecordNonCompliance));
        assert!(is_allowed(role, Operation::ValidateDeclarant));
        assert!(!is_allowed(role, Operation::CreateDocument));
        assert!(!is_allowed(role, Operation::ManageTemplates));
    }

    #[test]
    fn test_validation_officer_capabilities() {
        let role = UserRole::ValidationOfficer;
        assert!(is_allowed(role, Operation::CreateControl));
        assert!(is_allowed(role, Operation::ValidateDeclarant));
        assert!(is_allowed(role, Operation::ManageTemplates));
        assert!(!is_allowed(role, Operation::CreateDocument));
        assert!(!is_allowed(role, Operation::ManageDocumentTypes));
    }

    #[test]
    fn test_moa_capabilities() {
        let role = UserRole::Moa;
        assert!(is_allowed(role, Operation::ManageTemplates));
        assert!(is_allowed(role, Operation::ManageDocumentTypes));
        assert!(is_allowed(role, Operation::ListDocuments));
        assert!(!is_allowed(role, Operation::CreateDocument));
        assert!(!is_allowed(role, Operation::CreateControl));
    }

    #[test]
    fn test_everyone_views_reference_data() {
        for role in [
            UserRole::DraftingAgent,
            UserRole::ControlOfficer,
            UserRole::ValidationOfficer,
            UserRole::Moa,
        ] {
            assert!(is_allowed(role, Operation::ViewReferenceData));
        }
    }

    #[test]
    fn test_require_deny_is_forbidden() {
        let err = require(UserRole::DraftingAgent, Operation::CreateControl).unwrap_err();
        assert_eq!(err.status_code(), 403);
    }
}
