//! Document repository and workflow orchestration.
//!
//! Each mutating operation reads the current snapshot, validates and
//! mutates it through the core state machine, and writes back
//! conditionally; a concurrent writer surfaces as a version conflict
//! for the caller to retry.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::info;
use uuid::Uuid;

use douane_core::actor::Actor;
use douane_core::artifact::{ArtifactRef, ArtifactRenderer, RenderRequest};
use douane_core::document::error::DocumentError;
use douane_core::document::types::{Document, DocumentStatus, DocumentType};
use douane_core::document::workflow::{
    Assignee, CreateDocumentInput, DocumentUpdate, DocumentWorkflow,
};
use douane_shared::{AppError, AppResult};

use crate::MemoryStore;
use crate::repositories::document_types::DocumentTypeRepository;

/// Input for creating a document.
#[derive(Debug, Clone)]
pub struct NewDocument {
    /// Document title.
    pub title: String,
    /// Document type code.
    pub document_type: DocumentType,
    /// Referenced template ID.
    pub template_id: Uuid,
    /// Initial content keyed by template field name.
    pub content: Map<String, Value>,
}

/// Partial update payload for a document.
#[derive(Debug, Clone, Default)]
pub struct DocumentPatch {
    /// New title.
    pub title: Option<String>,
    /// Replacement content map.
    pub content: Option<Map<String, Value>>,
    /// Requested status (single forward step only).
    pub status: Option<DocumentStatus>,
    /// New assignee user ID; the display name is resolved here.
    pub assigned_to: Option<Uuid>,
}

/// Document repository orchestrating the drafting workflow.
#[derive(Clone)]
pub struct DocumentRepository {
    store: Arc<MemoryStore>,
    renderer: Arc<dyn ArtifactRenderer>,
}

impl DocumentRepository {
    /// Creates a new document repository.
    #[must_use]
    pub fn new(store: Arc<MemoryStore>, renderer: Arc<dyn ArtifactRenderer>) -> Self {
        Self { store, renderer }
    }

    /// Creates a document draft.
    ///
    /// The template must resolve, and a custom document type code must
    /// exist in the registry.
    pub async fn create(&self, input: NewDocument, actor: &Actor) -> AppResult<Document> {
        let registry = DocumentTypeRepository::new(Arc::clone(&self.store));
        if !registry.resolves(&input.document_type).await? {
            return Err(DocumentError::UnknownType(input.document_type.code().to_string()).into());
        }
        if self.store.templates.get(input.template_id).is_none() {
            return Err(DocumentError::TemplateNotFound(input.template_id).into());
        }

        let document = DocumentWorkflow::create(
            CreateDocumentInput {
                title: input.title,
                document_type: input.document_type,
                template_id: input.template_id,
                content: input.content,
            },
            actor,
        )?;

        self.store.documents.insert(document.id, document.clone())?;
        info!(document_id = %document.id, created_by = %actor.id, "Document created");
        Ok(document)
    }

    /// Lists the documents visible to the actor.
    pub async fn list(&self, actor: &Actor) -> AppResult<Vec<Document>> {
        let mut documents = self
            .store
            .documents
            .query(|d| DocumentWorkflow::is_listed(d, actor));
        documents.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(documents)
    }

    /// Reads a document the actor may view.
    pub async fn get(&self, id: Uuid, actor: &Actor) -> AppResult<Document> {
        let document = self
            .store
            .documents
            .get(id)
            .ok_or(DocumentError::NotFound(id))
            .map_err(AppError::from)?
            .value;

        if !DocumentWorkflow::can_view(&document, actor) {
            return Err(AppError::Forbidden(
                "not authorized to view this document".to_string(),
            ));
        }
        Ok(document)
    }

    /// Applies a partial update.
    pub async fn update(&self, id: Uuid, patch: DocumentPatch, actor: &Actor) -> AppResult<Document> {
        let versioned = self
            .store
            .documents
            .get(id)
            .ok_or(DocumentError::NotFound(id))
            .map_err(AppError::from)?;

        let assigned_to = match patch.assigned_to {
            Some(user_id) => {
                let user = self
                    .store
                    .users
                    .get(user_id)
                    .ok_or_else(|| AppError::NotFound(format!("user {user_id} not found")))?
                    .value;
                Some(Assignee {
                    id: user.id,
                    name: user.full_name,
                })
            }
            None => None,
        };

        let mut document = versioned.value;
        let changed = DocumentWorkflow::apply_update(
            &mut document,
            DocumentUpdate {
                title: patch.title,
                content: patch.content,
                status: patch.status,
                assigned_to,
            },
            actor,
        )?;

        self.store
            .documents
            .put(id, document.clone(), versioned.version)?;
        info!(document_id = %id, ?changed, "Document updated");
        Ok(document)
    }

    /// Submits a draft for control.
    pub async fn submit(&self, id: Uuid, actor: &Actor) -> AppResult<Document> {
        let versioned = self
            .store
            .documents
            .get(id)
            .ok_or(DocumentError::NotFound(id))
            .map_err(AppError::from)?;

        let mut document = versioned.value;
        DocumentWorkflow::submit(&mut document, actor)?;

        self.store
            .documents
            .put(id, document.clone(), versioned.version)?;
        info!(document_id = %id, "Document submitted for control");
        Ok(document)
    }

    /// Renders the filled document on demand.
    ///
    /// Guarded like a view; resolves the template and hands both
    /// snapshots to the renderer.
    pub async fn render(&self, id: Uuid, actor: &Actor) -> AppResult<ArtifactRef> {
        let document = self.get(id, actor).await?;

        let template = self
            .store
            .templates
            .get(document.template_id)
            .ok_or(DocumentError::TemplateNotFound(document.template_id))
            .map_err(AppError::from)?
            .value;

        let reference = self
            .renderer
            .render(RenderRequest::Document {
                document: &document,
                template: &template,
            })
            .await?;
        Ok(reference)
    }
}
