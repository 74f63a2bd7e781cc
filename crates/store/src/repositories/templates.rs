//! Document template repository.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use douane_core::actor::Actor;
use douane_core::authz::{self, Operation};
use douane_core::document::types::{DocumentTemplate, DocumentType, TemplateField};
use douane_shared::{AppError, AppResult};

use crate::MemoryStore;
use crate::repositories::document_types::DocumentTypeRepository;

/// Input for creating or replacing a template.
#[derive(Debug, Clone)]
pub struct TemplateInput {
    /// Template name.
    pub name: String,
    /// Document type the template produces.
    pub document_type: DocumentType,
    /// Ordered field descriptors.
    pub fields: Vec<TemplateField>,
    /// Ordered checklist of verification items.
    pub checklist: Vec<String>,
}

/// Repository for document templates.
#[derive(Debug, Clone)]
pub struct TemplateRepository {
    store: Arc<MemoryStore>,
}

impl TemplateRepository {
    /// Creates a new template repository.
    #[must_use]
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    /// Lists all templates, ordered by name.
    pub async fn list(&self) -> AppResult<Vec<DocumentTemplate>> {
        let mut templates = self.store.templates.query(|_| true);
        templates.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(templates)
    }

    /// Finds a template by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<DocumentTemplate>> {
        Ok(self.store.templates.get(id).map(|v| v.value))
    }

    /// Creates a new template.
    pub async fn create(&self, input: TemplateInput, actor: &Actor) -> AppResult<DocumentTemplate> {
        authz::require(actor.role, Operation::ManageTemplates)?;
        self.check_type_resolves(&input.document_type).await?;

        let template = DocumentTemplate {
            id: Uuid::new_v4(),
            name: input.name,
            document_type: input.document_type,
            fields: input.fields,
            checklist: input.checklist,
            created_at: Utc::now(),
        };
        self.store.templates.insert(template.id, template.clone())?;
        Ok(template)
    }

    /// Replaces a template's content.
    pub async fn update(
        &self,
        id: Uuid,
        input: TemplateInput,
        actor: &Actor,
    ) -> AppResult<DocumentTemplate> {
        authz::require(actor.role, Operation::ManageTemplates)?;
        self.check_type_resolves(&input.document_type).await?;

        let existing = self
            .store
            .templates
            .get(id)
            .ok_or_else(|| AppError::NotFound(format!("template {id} not found")))?;

        let mut template = existing.value;
        template.name = input.name;
        template.document_type = input.document_type;
        template.fields = input.fields;
        template.checklist = input.checklist;
        self.store
            .templates
            .put(id, template.clone(), existing.version)?;
        Ok(template)
    }

    /// Deletes a template.
    ///
    /// Rejected while any document references it (referential-integrity
    /// rule).
    pub async fn delete(&self, id: Uuid, actor: &Actor) -> AppResult<()> {
        authz::require(actor.role, Operation::ManageTemplates)?;

        if self.store.templates.get(id).is_none() {
            return Err(AppError::NotFound(format!("template {id} not found")));
        }

        let in_use = self.store.documents.count(|d| d.template_id == id);
        if in_use > 0 {
            return Err(AppError::Conflict(format!(
                "cannot delete template: {in_use} document(s) are using this template"
            )));
        }

        let _ = self.store.templates.remove(id);
        Ok(())
    }

    async fn check_type_resolves(&self, doc_type: &DocumentType) -> AppResult<()> {
        let registry = DocumentTypeRepository::new(Arc::clone(&self.store));
        if registry.resolves(doc_type).await? {
            Ok(())
        } else {
            Err(AppError::InvalidInput(format!(
                "unknown document type code {}",
                doc_type.code()
            )))
        }
    }
}
