//! Document state transition logic and visibility rules.

use chrono::Utc;
use serde_json::{Map, Value, json};
use uuid::Uuid;

use crate::actor::{Actor, UserRole};
use crate::audit::AuditEntry;
use crate::authz::{self, Operation};
use crate::document::error::DocumentError;
use crate::document::types::{Document, DocumentStatus, DocumentType};

/// Input for creating a new document draft.
#[derive(Debug, Clone)]
pub struct CreateDocumentInput {
    /// Document title.
    pub title: String,
    /// Document type (already validated against the registry).
    pub document_type: DocumentType,
    /// Referenced template ID (already resolved).
    pub template_id: Uuid,
    /// Initial content keyed by template field name.
    pub content: Map<String, Value>,
}

/// Resolved assignee for a document update.
#[derive(Debug, Clone)]
pub struct Assignee {
    /// Assigned user ID.
    pub id: Uuid,
    /// Assigned user display name.
    pub name: String,
}

/// Partial update payload; only set fields are applied.
#[derive(Debug, Clone, Default)]
pub struct DocumentUpdate {
    /// New title.
    pub title: Option<String>,
    /// Replacement content map.
    pub content: Option<Map<String, Value>>,
    /// Requested status (must be a single forward step).
    pub status: Option<DocumentStatus>,
    /// New assignee.
    pub assigned_to: Option<Assignee>,
}

/// Stateless service for document workflow transitions.
///
/// All methods validate the transition against the current snapshot,
/// mutate it, and append exactly one audit entry; persistence is the
/// caller's concern.
pub struct DocumentWorkflow;

impl DocumentWorkflow {
    /// Creates a new document in Draft with an initial "created" entry.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::RoleNotAllowed` unless the actor is a
    /// drafting agent.
    pub fn create(input: CreateDocumentInput, actor: &Actor) -> Result<Document, DocumentError> {
        if !authz::is_allowed(actor.role, Operation::CreateDocument) {
            return Err(DocumentError::RoleNotAllowed {
                role: actor.role,
                action: "create documents",
            });
        }

        let now = Utc::now();
        let entry = AuditEntry::new("created", actor)
            .with_details(json!({ "document_type": input.document_type.code() }));

        Ok(Document {
            id: Uuid::new_v4(),
            title: input.title,
            document_type: input.document_type,
            status: DocumentStatus::Draft,
            template_id: input.template_id,
            content: input.content,
            sydonia_data: None,
            created_by: actor.id,
            created_by_name: actor.name.clone(),
            assigned_to: None,
            assigned_to_name: None,
            created_at: now,
            updated_at: now,
            history: vec![entry],
        })
    }

    /// Applies a partial update and appends an "updated" audit entry
    /// listing the changed fields.
    ///
    /// A drafting agent may only update documents they created, and only
    /// while still in Draft. Requested status changes must follow the
    /// chain one step at a time.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::NotCreator` or `DocumentError::DraftLocked`
    /// when a drafting agent fails the ownership rule, and
    /// `DocumentError::InvalidTransition` for a status skip.
    pub fn apply_update(
        document: &mut Document,
        update: DocumentUpdate,
        actor: &Actor,
    ) -> Result<Vec<&'static str>, DocumentError> {
        if actor.role == UserRole::DraftingAgent {
            if document.created_by != actor.id {
                return Err(DocumentError::NotCreator { action: "update" });
            }
            if document.status != DocumentStatus::Draft {
                return Err(DocumentError::DraftLocked);
            }
        }

        // Validate the status step before mutating anything.
        if let Some(new_status) = update.status
            && !document.status.can_advance_to(new_status)
        {
            return Err(DocumentError::InvalidTransition {
                from: document.status,
                to: new_status,
            });
        }

        let mut changed = Vec::new();
        if let Some(title) = update.title {
            document.title = title;
            changed.push("title");
        }
        if let Some(content) = update.content {
            document.content = content;
            changed.push("content");
        }
        if let Some(status) = update.status {
            document.status = status;
            changed.push("status");
        }
        if let Some(assignee) = update.assigned_to {
            document.assigned_to = Some(assignee.id);
            document.assigned_to_name = Some(assignee.name);
            changed.push("assigned_to");
        }

        document.updated_at = Utc::now();
        document
            .history
            .push(AuditEntry::new("updated", actor).with_details(json!({ "changed": changed })));

        Ok(changed)
    }

    /// Submits a draft for control.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::RoleNotAllowed` for non-drafting roles,
    /// `DocumentError::NotCreator` for a foreign drafting agent, and
    /// `DocumentError::InvalidTransition` unless the document is in Draft.
    pub fn submit(document: &mut Document, actor: &Actor) -> Result<(), DocumentError> {
        if !authz::is_allowed(actor.role, Operation::SubmitDocument) {
            return Err(DocumentError::RoleNotAllowed {
                role: actor.role,
                action: "submit documents",
            });
        }
        if document.created_by != actor.id {
            return Err(DocumentError::NotCreator { action: "submit" });
        }
        if document.status != DocumentStatus::Draft {
            return Err(DocumentError::InvalidTransition {
                from: document.status,
                to: DocumentStatus::UnderControl,
            });
        }

        document.status = DocumentStatus::UnderControl;
        document.updated_at = Utc::now();
        document
            .history
            .push(AuditEntry::new("submitted_for_control", actor));

        Ok(())
    }

    /// Returns whether the actor may view this document.
    ///
    /// Drafting agents only see their own documents; review roles see
    /// everything their list scope exposes.
    #[must_use]
    pub fn can_view(document: &Document, actor: &Actor) -> bool {
        match actor.role {
            UserRole::DraftingAgent => document.created_by == actor.id,
            _ => true,
        }
    }

    /// Returns whether this document appears in the actor's list.
    ///
    /// - Drafting agents: only documents they created.
    /// - Control officers: documents under control, or assigned to them.
    /// - Validation officers and MOA: everything.
    #[must_use]
    pub fn is_listed(document: &Document, actor: &Actor) -> bool {
        match actor.role {
            UserRole::DraftingAgent => document.created_by == actor.id,
            UserRole::ControlOfficer => {
                document.status == DocumentStatus::UnderControl
                    || document.assigned_to == Some(actor.id)
            }
            UserRole::ValidationOfficer | UserRole::Moa => true,
        }
    }
}
