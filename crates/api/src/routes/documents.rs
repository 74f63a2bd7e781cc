//! Document workflow routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    response::Response,
    routing::{get, post, put},
};
use serde::Deserialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiResult;
use crate::middleware::CurrentActor;
use crate::routes::artifact_response;
use douane_core::document::types::{Document, DocumentStatus, DocumentType};
use douane_shared::AppError;
use douane_store::repositories::documents::{DocumentPatch, NewDocument};

/// Creates the document routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/documents", get(list_documents))
        .route("/documents", post(create_document))
        .route("/documents/{document_id}", get(get_document))
        .route("/documents/{document_id}", put(update_document))
        .route("/documents/{document_id}/submit", post(submit_document))
        .route("/documents/{document_id}/artifact", get(download_document))
}

/// Request body for creating a document.
#[derive(Debug, Deserialize)]
pub struct CreateDocumentRequest {
    /// Document title.
    pub title: String,
    /// Document type code.
    pub document_type: DocumentType,
    /// Referenced template ID.
    pub template_id: Uuid,
    /// Initial content keyed by template field name.
    #[serde(default)]
    pub content: Map<String, Value>,
}

/// Request body for updating a document.
#[derive(Debug, Deserialize)]
pub struct UpdateDocumentRequest {
    /// New title.
    pub title: Option<String>,
    /// Replacement content map.
    pub content: Option<Map<String, Value>>,
    /// Requested status (single forward step only).
    pub status: Option<DocumentStatus>,
    /// New assignee user ID.
    pub assigned_to: Option<Uuid>,
}

/// GET /documents - List documents visible to the caller.
async fn list_documents(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
) -> ApiResult<Json<Vec<Document>>> {
    let documents = state.document_repo().list(&actor).await?;
    Ok(Json(documents))
}

/// POST /documents - Create a document draft.
async fn create_document(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Json(payload): Json<CreateDocumentRequest>,
) -> ApiResult<Json<Document>> {
    let document = state
        .document_repo()
        .create(
            NewDocument {
                title: payload.title,
                document_type: payload.document_type,
                template_id: payload.template_id,
                content: payload.content,
            },
            &actor,
        )
        .await?;
    Ok(Json(document))
}

/// GET /documents/{document_id} - Read a single document.
async fn get_document(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(document_id): Path<Uuid>,
) -> ApiResult<Json<Document>> {
    let document = state.document_repo().get(document_id, &actor).await?;
    Ok(Json(document))
}

/// PUT /documents/{document_id} - Apply a partial update.
async fn update_document(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(document_id): Path<Uuid>,
    Json(payload): Json<UpdateDocumentRequest>,
) -> ApiResult<Json<Document>> {
    let document = state
        .document_repo()
        .update(
            document_id,
            DocumentPatch {
                title: payload.title,
                content: payload.content,
                status: payload.status,
                assigned_to: payload.assigned_to,
            },
            &actor,
        )
        .await?;
    Ok(Json(document))
}

/// POST /documents/{document_id}/submit - Submit a draft for control.
async fn submit_document(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(document_id): Path<Uuid>,
) -> ApiResult<Json<Document>> {
    let document = state.document_repo().submit(document_id, &actor).await?;
    Ok(Json(document))
}

/// GET /documents/{document_id}/artifact - Render and download the
/// filled document.
async fn download_document(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(document_id): Path<Uuid>,
) -> ApiResult<Response> {
    let reference = state.document_repo().render(document_id, &actor).await?;
    let content = state
        .renderer
        .fetch(reference.id)
        .await
        .map_err(AppError::from)?;
    Ok(artifact_response(content))
}
