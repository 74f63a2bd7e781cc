//! Control workflow routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    response::Response,
    routing::{get, post, put},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiResult;
use crate::middleware::CurrentActor;
use crate::routes::artifact_response;
use douane_core::control::error::ControlError;
use douane_core::control::types::{
    ComplianceCheckItem, Control, CustomsFine, FineDecision, NonComplianceInput, NonComplianceType,
};
use douane_shared::AppError;

/// Creates the control routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/controls", get(list_controls))
        .route("/controls", post(create_control))
        .route("/controls/{control_id}", get(get_control))
        .route("/controls/{control_id}/compliance", put(update_compliance))
        .route(
            "/controls/{control_id}/non-compliance",
            put(record_non_compliance),
        )
        .route(
            "/controls/{control_id}/declarant-validation",
            post(declarant_validation),
        )
        .route(
            "/controls/{control_id}/certificate",
            get(download_certificate),
        )
}

/// Request body for initiating a control.
#[derive(Debug, Deserialize)]
pub struct CreateControlRequest {
    /// External declaration number to inspect.
    pub declaration_id: String,
}

/// Request body for replacing the compliance checklist.
#[derive(Debug, Deserialize)]
pub struct ComplianceUpdateRequest {
    /// Full replacement checklist.
    pub compliance_checks: Vec<ComplianceCheckItem>,
}

/// Request body for recording non-compliance findings.
#[derive(Debug, Deserialize)]
pub struct NonComplianceRequest {
    /// Classification of the non-compliance.
    pub non_compliance_type: NonComplianceType,
    /// Findings in free text.
    pub non_compliance_details: String,
    /// Duties and taxes at stake.
    pub fiscal_impact: Decimal,
    /// Applicable regulation code.
    pub applicable_regulation: String,
}

/// Request body for the declarant validation step.
#[derive(Debug, Deserialize)]
pub struct DeclarantValidationRequest {
    /// Whether the declarant acknowledged the certificate.
    pub acknowledged: bool,
    /// Decision tag: "pass_over" or "customs_fine".
    pub fine_decision: String,
}

/// Response for the declarant validation step.
#[derive(Debug, Serialize)]
pub struct DeclarantValidationResponse {
    /// The control after the transition.
    pub control: Control,
    /// The fine, when the customs-fine branch was taken.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fine: Option<CustomsFine>,
}

/// GET /controls - List controls visible to the caller.
async fn list_controls(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
) -> ApiResult<Json<Vec<Control>>> {
    let controls = state.control_repo().list(&actor).await?;
    Ok(Json(controls))
}

/// POST /controls - Initiate a control on a declaration.
async fn create_control(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Json(payload): Json<CreateControlRequest>,
) -> ApiResult<Json<Control>> {
    let control = state
        .control_repo()
        .create(&payload.declaration_id, &actor)
        .await?;
    Ok(Json(control))
}

/// GET /controls/{control_id} - Read a single control.
async fn get_control(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(control_id): Path<Uuid>,
) -> ApiResult<Json<Control>> {
    let control = state.control_repo().get(control_id, &actor).await?;
    Ok(Json(control))
}

/// PUT /controls/{control_id}/compliance - Replace the checklist.
async fn update_compliance(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(control_id): Path<Uuid>,
    Json(payload): Json<ComplianceUpdateRequest>,
) -> ApiResult<Json<Control>> {
    let control = state
        .control_repo()
        .update_compliance(control_id, payload.compliance_checks, &actor)
        .await?;
    Ok(Json(control))
}

/// PUT /controls/{control_id}/non-compliance - Record findings and
/// generate the certificate of visit.
async fn record_non_compliance(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(control_id): Path<Uuid>,
    Json(payload): Json<NonComplianceRequest>,
) -> ApiResult<Json<Control>> {
    let control = state
        .control_repo()
        .record_non_compliance(
            control_id,
            NonComplianceInput {
                non_compliance_type: payload.non_compliance_type,
                details: payload.non_compliance_details,
                fiscal_impact: payload.fiscal_impact,
                applicable_regulation: payload.applicable_regulation,
            },
            &actor,
        )
        .await?;
    Ok(Json(control))
}

/// POST /controls/{control_id}/declarant-validation - Record the
/// declarant's acknowledgement and the fine decision.
async fn declarant_validation(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(control_id): Path<Uuid>,
    Json(payload): Json<DeclarantValidationRequest>,
) -> ApiResult<Json<DeclarantValidationResponse>> {
    // Unknown decision tags are rejected before any state is touched.
    let decision = FineDecision::parse(&payload.fine_decision)
        .ok_or(ControlError::InvalidFineDecision(payload.fine_decision.clone()))
        .map_err(AppError::from)?;

    let (control, fine) = state
        .control_repo()
        .validate_declarant(control_id, payload.acknowledged, decision, &actor)
        .await?;
    Ok(Json(DeclarantValidationResponse { control, fine }))
}

/// GET /controls/{control_id}/certificate - Download the certificate of
/// visit.
async fn download_certificate(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(control_id): Path<Uuid>,
) -> ApiResult<Response> {
    let control = state.control_repo().get(control_id, &actor).await?;
    let reference = control
        .certificate
        .ok_or_else(|| AppError::NotFound("certificate not generated yet".to_string()))?;

    let content = state
        .renderer
        .fetch(reference.id)
        .await
        .map_err(AppError::from)?;
    Ok(artifact_response(content))
}
