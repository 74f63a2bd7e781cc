//! Shared fixtures for the integration suites: actors and collaborator
//! doubles plugged into the repositories in place of the production
//! declaration source and renderer.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use tokio::sync::Notify;
use uuid::Uuid;

use douane_core::actor::{Actor, UserRole};
use douane_core::artifact::{
    ArtifactContent, ArtifactRef, ArtifactRenderer, RenderError, RenderRequest,
};
use douane_core::declaration::{Declaration, DeclarationError, DeclarationSource};
use douane_render::HtmlRenderer;
use douane_store::{ControlRepository, DocumentRepository, MemoryStore};

pub fn officer(name: &str) -> Actor {
    Actor::new(Uuid::new_v4(), name, UserRole::ControlOfficer)
}

pub fn validator(name: &str) -> Actor {
    Actor::new(Uuid::new_v4(), name, UserRole::ValidationOfficer)
}

pub fn agent(name: &str) -> Actor {
    Actor::new(Uuid::new_v4(), name, UserRole::DraftingAgent)
}

pub fn moa(name: &str) -> Actor {
    Actor::new(Uuid::new_v4(), name, UserRole::Moa)
}

/// Declaration source double returning canned data for any number.
pub struct CannedDeclarations;

#[async_trait]
impl DeclarationSource for CannedDeclarations {
    async fn fetch(&self, declaration_id: &str) -> Result<Declaration, DeclarationError> {
        Ok(Declaration {
            id: Uuid::new_v4(),
            declaration_id: declaration_id.to_string(),
            importer_name: "Société Pacifique Import".to_string(),
            importer_address: "14 Avenue du Port, Nouméa".to_string(),
            goods_description: "Pièces détachées automobiles".to_string(),
            origin_country: "Japon".to_string(),
            value_cfr: Decimal::new(120_000, 0),
            customs_regime: "Importation définitive".to_string(),
            declaration_date: "2024-02-20".to_string(),
            customs_office: "Nouméa-Port".to_string(),
            tariff_code: Some("8708.29.00".to_string()),
            weight: Some(Decimal::new(8_400, 1)),
            quantity: Some(64),
            created_at: Utc::now(),
        })
    }
}

/// Renderer double that always fails, for the all-or-nothing checks.
pub struct FailingRenderer;

#[async_trait]
impl ArtifactRenderer for FailingRenderer {
    async fn render(&self, _request: RenderRequest<'_>) -> Result<ArtifactRef, RenderError> {
        Err(RenderError::Failed("rendering service unavailable".to_string()))
    }

    async fn fetch(&self, artifact_id: Uuid) -> Result<ArtifactContent, RenderError> {
        Err(RenderError::NotFound(artifact_id))
    }
}

/// Renderer double that parks the first `render` call until released.
///
/// Pins a transition between its snapshot read and its conditional
/// write, so a second writer can be committed in between and the
/// version conflict observed deterministically. Later calls pass
/// through.
pub struct GatedRenderer {
    entered: Notify,
    release: Notify,
    gated: AtomicBool,
}

impl GatedRenderer {
    pub fn new() -> Self {
        Self {
            entered: Notify::new(),
            release: Notify::new(),
            gated: AtomicBool::new(true),
        }
    }

    /// Waits until a render call has parked inside the gate.
    pub async fn wait_entered(&self) {
        self.entered.notified().await;
    }

    /// Lets the parked render call complete.
    pub fn release(&self) {
        self.release.notify_one();
    }
}

#[async_trait]
impl ArtifactRenderer for GatedRenderer {
    async fn render(&self, _request: RenderRequest<'_>) -> Result<ArtifactRef, RenderError> {
        if self.gated.swap(false, Ordering::SeqCst) {
            self.entered.notify_one();
            self.release.notified().await;
        }
        Ok(ArtifactRef {
            id: Uuid::new_v4(),
            filename: "artifact.html".to_string(),
            content_type: "text/html; charset=utf-8".to_string(),
        })
    }

    async fn fetch(&self, artifact_id: Uuid) -> Result<ArtifactContent, RenderError> {
        Err(RenderError::NotFound(artifact_id))
    }
}

/// Control repository wired with the canned source and a real renderer.
pub fn control_repo(store: &Arc<MemoryStore>) -> ControlRepository {
    control_repo_with_renderer(store, Arc::new(HtmlRenderer::new()))
}

/// Control repository wired with the canned source and a custom renderer.
pub fn control_repo_with_renderer(
    store: &Arc<MemoryStore>,
    renderer: Arc<dyn ArtifactRenderer>,
) -> ControlRepository {
    ControlRepository::new(Arc::clone(store), Arc::new(CannedDeclarations), renderer)
}

/// Document repository wired with a real renderer.
pub fn document_repo(store: &Arc<MemoryStore>) -> (DocumentRepository, Arc<HtmlRenderer>) {
    let renderer = Arc::new(HtmlRenderer::new());
    let repo = DocumentRepository::new(Arc::clone(store), renderer.clone());
    (repo, renderer)
}
