//! Regulation reference-data routes.

use axum::{Json, Router, extract::State, routing::get};

use crate::AppState;
use crate::error::ApiResult;
use crate::middleware::CurrentActor;
use douane_core::control::types::Regulation;

/// Creates the regulation routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/regulations", get(list_regulations))
}

/// GET /regulations - List customs regulations.
async fn list_regulations(
    State(state): State<AppState>,
    CurrentActor(_actor): CurrentActor,
) -> ApiResult<Json<Vec<Regulation>>> {
    let regulations = state.regulation_repo().list().await?;
    Ok(Json(regulations))
}
