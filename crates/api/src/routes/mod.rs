//! API route definitions.

use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::{Router, middleware};

use douane_core::artifact::ArtifactContent;

use crate::{AppState, middleware::auth::auth_middleware};

pub mod auth;
pub mod controls;
pub mod declarations;
pub mod document_types;
pub mod documents;
pub mod fines;
pub mod health;
pub mod regulations;
pub mod templates;

/// Creates the API router with protected routes that need state for middleware.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    // Protected routes that require authentication
    let protected_routes = Router::new()
        .merge(auth::protected_routes())
        .merge(documents::routes())
        .merge(controls::routes())
        .merge(fines::routes())
        .merge(templates::routes())
        .merge(document_types::routes())
        .merge(regulations::routes())
        .merge(declarations::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Combine public and protected routes
    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(protected_routes)
}

/// Builds a download response for rendered artifact bytes.
pub(crate) fn artifact_response(content: ArtifactContent) -> Response {
    (
        [
            (header::CONTENT_TYPE, content.content_type),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", content.filename),
            ),
        ],
        content.bytes,
    )
        .into_response()
}
