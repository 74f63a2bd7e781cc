//! Document type registry routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get, post, put},
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiResult;
use crate::middleware::CurrentActor;
use douane_store::entities::DocumentTypeEntry;
use douane_store::repositories::document_types::DocumentTypeInput;

/// Creates the document type routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/document-types", get(list_document_types))
        .route("/document-types", post(create_document_type))
        .route("/document-types/{type_id}", put(update_document_type))
        .route("/document-types/{type_id}", delete(delete_document_type))
}

/// Request body for registering or renaming a document type.
#[derive(Debug, Deserialize)]
pub struct DocumentTypeRequest {
    /// Display name.
    pub name: String,
    /// Description of the type.
    pub description: String,
    /// Unique wire code.
    pub code: String,
}

impl From<DocumentTypeRequest> for DocumentTypeInput {
    fn from(request: DocumentTypeRequest) -> Self {
        Self {
            name: request.name,
            description: request.description,
            code: request.code,
        }
    }
}

/// GET /document-types - List registry entries.
async fn list_document_types(
    State(state): State<AppState>,
    CurrentActor(_actor): CurrentActor,
) -> ApiResult<Json<Vec<DocumentTypeEntry>>> {
    let entries = state.document_type_repo().list().await?;
    Ok(Json(entries))
}

/// POST /document-types - Register a document type.
async fn create_document_type(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Json(payload): Json<DocumentTypeRequest>,
) -> ApiResult<Json<DocumentTypeEntry>> {
    let entry = state
        .document_type_repo()
        .create(payload.into(), &actor)
        .await?;
    Ok(Json(entry))
}

/// PUT /document-types/{type_id} - Update a registry entry.
async fn update_document_type(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(type_id): Path<Uuid>,
    Json(payload): Json<DocumentTypeRequest>,
) -> ApiResult<Json<DocumentTypeEntry>> {
    let entry = state
        .document_type_repo()
        .update(type_id, payload.into(), &actor)
        .await?;
    Ok(Json(entry))
}

/// DELETE /document-types/{type_id} - Delete an unused registry entry.
async fn delete_document_type(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(type_id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    state.document_type_repo().delete(type_id, &actor).await?;
    Ok(Json(json!({ "message": "Document type deleted successfully" })))
}
