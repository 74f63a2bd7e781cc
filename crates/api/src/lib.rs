//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes for the document and control workflows
//! - Authentication middleware (bearer JWT → `Actor`)
//! - The stub Sydonia declaration source
//! - Error mapping to JSON responses

pub mod error;
pub mod middleware;
pub mod routes;
pub mod sydonia;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use douane_core::artifact::ArtifactRenderer;
use douane_core::declaration::DeclarationSource;
use douane_shared::JwtService;
use douane_store::{
    ControlRepository, DocumentRepository, DocumentTypeRepository, FineRepository, MemoryStore,
    RegulationRepository, TemplateRepository, UserRepository,
};

/// Application state shared across handlers.
///
/// The store handle and the collaborator ports are constructed once at
/// startup and injected here; repositories are built per request from
/// these handles.
#[derive(Clone)]
pub struct AppState {
    /// Document store handle.
    pub store: Arc<MemoryStore>,
    /// JWT service for token operations.
    pub jwt_service: Arc<JwtService>,
    /// Artifact renderer collaborator.
    pub renderer: Arc<dyn ArtifactRenderer>,
    /// Declaration source collaborator.
    pub declarations: Arc<dyn DeclarationSource>,
}

impl AppState {
    /// Builds a user repository.
    #[must_use]
    pub fn user_repo(&self) -> UserRepository {
        UserRepository::new(Arc::clone(&self.store))
    }

    /// Builds a document repository with its collaborators.
    #[must_use]
    pub fn document_repo(&self) -> DocumentRepository {
        DocumentRepository::new(Arc::clone(&self.store), Arc::clone(&self.renderer))
    }

    /// Builds a control repository with its collaborators.
    #[must_use]
    pub fn control_repo(&self) -> ControlRepository {
        ControlRepository::new(
            Arc::clone(&self.store),
            Arc::clone(&self.declarations),
            Arc::clone(&self.renderer),
        )
    }

    /// Builds a fine repository.
    #[must_use]
    pub fn fine_repo(&self) -> FineRepository {
        FineRepository::new(Arc::clone(&self.store))
    }

    /// Builds a template repository.
    #[must_use]
    pub fn template_repo(&self) -> TemplateRepository {
        TemplateRepository::new(Arc::clone(&self.store))
    }

    /// Builds a document type registry repository.
    #[must_use]
    pub fn document_type_repo(&self) -> DocumentTypeRepository {
        DocumentTypeRepository::new(Arc::clone(&self.store))
    }

    /// Builds a regulation repository.
    #[must_use]
    pub fn regulation_repo(&self) -> RegulationRepository {
        RegulationRepository::new(Arc::clone(&self.store))
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api", routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
