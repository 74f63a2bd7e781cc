//! Customs fine routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    response::Response,
    routing::get,
};
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiResult;
use crate::middleware::CurrentActor;
use crate::routes::artifact_response;
use douane_core::control::types::CustomsFine;
use douane_shared::AppError;

/// Creates the fine routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/fines", get(list_fines))
        .route("/fines/{fine_id}", get(get_fine))
        .route("/fines/{fine_id}/payment-notice", get(download_payment_notice))
}

/// GET /fines - List fines visible to the caller.
async fn list_fines(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
) -> ApiResult<Json<Vec<CustomsFine>>> {
    let fines = state.fine_repo().list(&actor).await?;
    Ok(Json(fines))
}

/// GET /fines/{fine_id} - Read a single fine.
async fn get_fine(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(fine_id): Path<Uuid>,
) -> ApiResult<Json<CustomsFine>> {
    let fine = state.fine_repo().get(fine_id, &actor).await?;
    Ok(Json(fine))
}

/// GET /fines/{fine_id}/payment-notice - Download the payment notice.
async fn download_payment_notice(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(fine_id): Path<Uuid>,
) -> ApiResult<Response> {
    let fine = state.fine_repo().get(fine_id, &actor).await?;
    let reference = fine
        .payment_notice
        .ok_or_else(|| AppError::NotFound("payment notice not generated yet".to_string()))?;

    let content = state
        .renderer
        .fetch(reference.id)
        .await
        .map_err(AppError::from)?;
    Ok(artifact_response(content))
}
