//! Declaration lookup routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use serde_json::json;

use crate::AppState;
use crate::error::ApiResult;
use crate::middleware::CurrentActor;
use douane_shared::AppError;

/// Creates the declaration lookup routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/sydonia/declaration/{declaration_id}", get(lookup))
}

/// GET /sydonia/declaration/{declaration_id} - Look up declaration data
/// from the external source.
async fn lookup(
    State(state): State<AppState>,
    CurrentActor(_actor): CurrentActor,
    Path(declaration_id): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    let declaration = state
        .declarations
        .fetch(&declaration_id)
        .await
        .map_err(AppError::from)?;

    Ok(Json(json!({ "data": declaration, "status": "success" })))
}
