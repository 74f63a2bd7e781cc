//! Document template routes.

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
use douane_core::document::types::{DocumentTemplate, DocumentType, TemplateField};
use douane_store::repositories::templates::TemplateInput;

/// Creates the template routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/templates", get(list_templates))
        .route("/templates", post(create_template))
        .route("/templates/{template_id}", put(update_template))
        .route("/templates/{template_id}", delete(delete_template))
}

/// Request body for creating or replacing a template.
#[derive(Debug, Deserialize)]
pub struct TemplateRequest {
    /// Template name.
    pub name: String,
    /// Document type the template produces.
    pub document_type: DocumentType,
    /// Ordered field descriptors.
    #[serde(default)]
    pub fields: Vec<TemplateField>,
    /// Ordered checklist of verification items.
    #[serde(default)]
    pub checklist: Vec<String>,
}

impl From<TemplateRequest> for TemplateInput {
    fn from(request: TemplateRequest) -> Self {
        Self {
            name: request.name,
            document_type: request.document_type,
            fields: request.fields,
            checklist: request.checklist,
        }
    }
}

/// GET /templates - List all templates.
async fn list_templates(
    State(state): State<AppState>,
    CurrentActor(_actor): CurrentActor,
) -> ApiResult<Json<Vec<DocumentTemplate>>> {
    let templates = state.template_repo().list().await?;
    Ok(Json(templates))
}

/// POST /templates - Create a template.
async fn create_template(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Json(payload): Json<TemplateRequest>,
) -> ApiResult<Json<DocumentTemplate>> {
    let template = state
        .template_repo()
        .create(payload.into(), &actor)
        .await?;
    Ok(Json(template))
}

/// PUT /templates/{template_id} - Replace a template's content.
async fn update_template(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(template_id): Path<Uuid>,
    Json(payload): Json<TemplateRequest>,
) -> ApiResult<Json<DocumentTemplate>> {
    let template = state
        .template_repo()
        .update(template_id, payload.into(), &actor)
        .await?;
    Ok(Json(template))
}

/// DELETE /templates/{template_id} - Delete an unused template.
async fn delete_template(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(template_id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    state.template_repo().delete(template_id, &actor).await?;
    Ok(Json(json!({ "message": "Template deleted successfully" })))
}
