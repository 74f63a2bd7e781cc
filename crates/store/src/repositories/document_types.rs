//! Document type registry repository.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use douane_core::actor::Actor;
use douane_core::authz::{self, Operation};
use douane_core::document::types::DocumentType;
use douane_shared::{AppError, AppResult};

use crate::MemoryStore;
use crate::entities::DocumentTypeEntry;

/// Input for registering or renaming a document type.
#[derive(Debug, Clone)]
pub struct DocumentTypeInput {
    /// Display name.
    pub name: String,
    /// Description of the type.
    pub description: String,
    /// Unique wire code.
    pub code: String,
}

/// Repository for the document type registry.
#[derive(Debug, Clone)]
pub struct DocumentTypeRepository {
    store: Arc<MemoryStore>,
}

impl DocumentTypeRepository {
    /// Creates a new document type repository.
    #[must_use]
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    /// Lists all registry entries, ordered by code.
    pub async fn list(&self) -> AppResult<Vec<DocumentTypeEntry>> {
        let mut entries = self.store.document_types.query(|_| true);
        entries.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(entries)
    }

    /// Registers a new document type; codes must be unique.
    pub async fn create(
        &self,
        input: DocumentTypeInput,
        actor: &Actor,
    ) -> AppResult<DocumentTypeEntry> {
        authz::require(actor.role, Operation::ManageDocumentTypes)?;

        if self.store.document_types.count(|t| t.code == input.code) > 0 {
            return Err(AppError::Conflict(format!(
                "document type code {} already exists",
                input.code
            )));
        }

        let entry = DocumentTypeEntry {
            id: Uuid::new_v4(),
            name: input.name,
            description: input.description,
            code: input.code,
            created_by: actor.id,
            created_at: Utc::now(),
        };
        self.store.document_types.insert(entry.id, entry.clone())?;
        Ok(entry)
    }

    /// Replaces the mutable fields of a registry entry.
    pub async fn update(
        &self,
        id: Uuid,
        input: DocumentTypeInput,
        actor: &Actor,
    ) -> AppResult<DocumentTypeEntry> {
        authz::require(actor.role, Operation::ManageDocumentTypes)?;

        let existing = self
            .store
            .document_types
            .get(id)
            .ok_or_else(|| AppError::NotFound(format!("document type {id} not found")))?;

        let mut entry = existing.value;
        entry.name = input.name;
        entry.description = input.description;
        entry.code = input.code;
        self.store
            .document_types
            .put(id, entry.clone(), existing.version)?;
        Ok(entry)
    }

    /// Deletes a registry entry.
    ///
    /// Rejected while any document or template still carries the code
    /// (referential-integrity rule).
    pub async fn delete(&self, id: Uuid, actor: &Actor) -> AppResult<()> {
        authz::require(actor.role, Operation::ManageDocumentTypes)?;

        let existing = self
            .store
            .document_types
            .get(id)
            .ok_or_else(|| AppError::NotFound(format!("document type {id} not found")))?;
        let code = existing.value.code;

        let documents = self
            .store
            .documents
            .count(|d| d.document_type.code() == code);
        let templates = self
            .store
            .templates
            .count(|t| t.document_type.code() == code);
        if documents > 0 || templates > 0 {
            return Err(AppError::Conflict(format!(
                "cannot delete document type: {documents} document(s) and {templates} template(s) are using this type"
            )));
        }

        let _ = self.store.document_types.remove(id);
        Ok(())
    }

    /// Returns whether a document type resolves: built-in codes always
    /// do, custom codes must exist in the registry.
    pub async fn resolves(&self, doc_type: &DocumentType) -> AppResult<bool> {
        if doc_type.is_builtin() {
            return Ok(true);
        }
        let code = doc_type.code().to_string();
        Ok(self.store.document_types.count(|t| t.code == code) > 0)
    }
}
