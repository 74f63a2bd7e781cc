//! End-to-end HTTP tests against the full router.
//!
//! Each test builds the real application (in-memory store, seeded
//! reference data, stub declaration source, HTML renderer) and drives
//! it through the public API with bearer tokens.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use douane_api::{AppState, create_router, sydonia::SydoniaStub};
use douane_render::HtmlRenderer;
use douane_shared::{JwtService, jwt::JwtConfig};
use douane_store::{MemoryStore, seed::seed_defaults};

fn test_app() -> Router {
    let store = Arc::new(MemoryStore::new());
    seed_defaults(&store).unwrap();

    let state = AppState {
        store,
        jwt_service: Arc::new(JwtService::new(JwtConfig {
            secret: "test-secret-key-for-testing".to_string(),
            access_token_expires_minutes: 30,
        })),
        renderer: Arc::new(HtmlRenderer::new()),
        declarations: Arc::new(SydoniaStub::new()),
    };
    create_router(state)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(path: &str, token: Option<&str>) -> Request<Body> {
    let builder = Request::builder().method("GET").uri(path);
    let builder = match token {
        Some(token) => builder.header(header::AUTHORIZATION, format!("Bearer {token}")),
        None => builder,
    };
    builder.body(Body::empty()).unwrap()
}

fn json_request(method: &str, path: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json");
    let builder = match token {
        Some(token) => builder.header(header::AUTHORIZATION, format!("Bearer {token}")),
        None => builder,
    };
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Registers a user with the given role and returns an access token.
async fn login_as(app: &Router, username: &str, role: &str) -> String {
    let (status, _) = send(
        app,
        json_request(
            "POST",
            "/api/auth/register",
            None,
            &json!({
                "username": username,
                "email": format!("{username}@douane.nc"),
                "password": "s3cret-passphrase",
                "full_name": format!("Agent {username}"),
                "role": role,
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        app,
        json_request(
            "POST",
            "/api/auth/login",
            None,
            &json!({ "username": username, "password": "s3cret-passphrase" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["access_token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health_is_public() {
    let app = test_app();
    let (status, body) = send(&app, get("/api/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = test_app();
    let (status, body) = send(&app, get("/api/controls", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "missing_token");
}

#[tokio::test]
async fn test_register_login_me() {
    let app = test_app();
    let token = login_as(&app, "cleroy", "control_officer").await;

    let (status, body) = send(&app, get("/api/auth/me", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "cleroy");
    assert_eq!(body["role"], "control_officer");

    // Duplicate usernames are rejected
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/auth/register",
            None,
            &json!({
                "username": "cleroy",
                "email": "other@douane.nc",
                "password": "another-passphrase",
                "full_name": "Someone Else",
                "role": "control_officer",
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "CONFLICT");
}

#[tokio::test]
async fn test_control_lifecycle_over_http() {
    let app = test_app();
    let token = login_as(&app, "cleroy", "control_officer").await;

    let (status, control) = send(
        &app,
        json_request(
            "POST",
            "/api/controls",
            Some(&token),
            &json!({ "declaration_id": "IM-2024-0042" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(control["status"], "in_progress");
    let control_id = control["id"].as_str().unwrap().to_string();

    // One non-compliant checklist item
    let mut checks = control["compliance_checks"].as_array().unwrap().clone();
    for check in &mut checks {
        check["status"] = json!("compliant");
    }
    checks[0]["status"] = json!("non_compliant");
    checks[0]["notes"] = json!("Valeur sous-déclarée");

    let (status, control) = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/controls/{control_id}/compliance"),
            Some(&token),
            &json!({ "compliance_checks": checks }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(control["status"], "non_compliant");

    let (status, control) = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/controls/{control_id}/non-compliance"),
            Some(&token),
            &json!({
                "non_compliance_type": "value",
                "non_compliance_details": "Valeur déclarée inférieure à la valeur transactionnelle",
                "fiscal_impact": "50000",
                "applicable_regulation": "CD-230",
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(control["status"], "certificate_generated");
    assert!(control["certificate"].is_object());

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            &format!("/api/controls/{control_id}/declarant-validation"),
            Some(&token),
            &json!({ "acknowledged": true, "fine_decision": "customs_fine" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["control"]["status"], "fine_issued");
    assert_eq!(body["fine"]["amount"], "50000");
    assert!(body["fine"]["payment_notice"].is_object());

    let (status, fines) = send(&app, get("/api/fines", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fines.as_array().unwrap().len(), 1);

    // Certificate download carries the rendered bytes
    let response = app
        .clone()
        .oneshot(get(
            &format!("/api/controls/{control_id}/certificate"),
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("Certificat_Visite"));
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(String::from_utf8_lossy(&bytes).contains("CERTIFICAT DE VISITE"));
}

#[tokio::test]
async fn test_unknown_fine_decision_is_rejected() {
    let app = test_app();
    let token = login_as(&app, "cleroy", "control_officer").await;

    let (_, control) = send(
        &app,
        json_request(
            "POST",
            "/api/controls",
            Some(&token),
            &json!({ "declaration_id": "IM-2024-0042" }),
        ),
    )
    .await;
    let control_id = control["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            &format!("/api/controls/{control_id}/declarant-validation"),
            Some(&token),
            &json!({ "acknowledged": true, "fine_decision": "warning" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_drafting_agent_cannot_initiate_control() {
    let app = test_app();
    let token = login_as(&app, "adupont", "drafting_agent").await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/controls",
            Some(&token),
            &json!({ "declaration_id": "IM-2024-0042" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "FORBIDDEN");
}

#[tokio::test]
async fn test_document_lifecycle_over_http() {
    let app = test_app();
    let token = login_as(&app, "adupont", "drafting_agent").await;

    let (status, templates) = send(&app, get("/api/templates", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    let template_id = templates
        .as_array()
        .unwrap()
        .iter()
        .find(|t| t["document_type"] == "customs_report")
        .unwrap()["id"]
        .as_str()
        .unwrap()
        .to_string();

    let (status, document) = send(
        &app,
        json_request(
            "POST",
            "/api/documents",
            Some(&token),
            &json!({
                "title": "Rapport de contrôle mars",
                "document_type": "customs_report",
                "template_id": template_id,
                "content": { "declaration_id": "IM-2024-0042" },
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(document["status"], "draft");
    let document_id = document["id"].as_str().unwrap().to_string();

    let (status, document) = send(
        &app,
        json_request(
            "POST",
            &format!("/api/documents/{document_id}/submit"),
            Some(&token),
            &json!({}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(document["status"], "under_control");

    let response = app
        .clone()
        .oneshot(get(
            &format!("/api/documents/{document_id}/artifact"),
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(String::from_utf8_lossy(&bytes).contains("Rapport de contrôle mars"));
}
