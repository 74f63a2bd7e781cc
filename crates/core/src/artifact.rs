//! Artifact references and the rendering port.
//!
//! The workflows decide *when* an artifact must be produced (certificate
//! of visit, payment notice, filled document) and record the returned
//! reference on the entity; producing and serving the bytes is the
//! renderer's concern.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::control::types::{Control, CustomsFine};
use crate::declaration::Declaration;
use crate::document::types::{Document, DocumentTemplate};

/// Kind of artifact a transition can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    /// A filled administrative document.
    Document,
    /// A certificate of visit for a non-compliant control.
    Certificate,
    /// A payment notice for a customs fine.
    PaymentNotice,
}

impl ArtifactKind {
    /// Returns the string representation of the kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Certificate => "certificate",
            Self::PaymentNotice => "payment_notice",
        }
    }
}

/// Durable reference to a rendered artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactRef {
    /// Renderer-assigned artifact ID.
    pub id: Uuid,
    /// Suggested filename for downloads.
    pub filename: String,
    /// MIME type of the rendered bytes.
    pub content_type: String,
}

/// Rendered artifact bytes with their metadata, as served on retrieval.
#[derive(Debug, Clone)]
pub struct ArtifactContent {
    /// Suggested filename for downloads.
    pub filename: String,
    /// MIME type of the bytes.
    pub content_type: String,
    /// The rendered artifact.
    pub bytes: Vec<u8>,
}

/// Entity snapshots handed to the renderer.
#[derive(Debug)]
pub enum RenderRequest<'a> {
    /// Render a filled document against its template.
    Document {
        /// The document to render.
        document: &'a Document,
        /// Its resolved template.
        template: &'a DocumentTemplate,
    },
    /// Render a certificate of visit.
    Certificate {
        /// The non-compliant control.
        control: &'a Control,
        /// The declaration snapshot the control is based on.
        declaration: &'a Declaration,
    },
    /// Render a payment notice.
    PaymentNotice {
        /// The customs fine being notified.
        fine: &'a CustomsFine,
        /// The declaration snapshot the fine relates to.
        declaration: &'a Declaration,
    },
}

impl RenderRequest<'_> {
    /// Returns the artifact kind this request produces.
    #[must_use]
    pub fn kind(&self) -> ArtifactKind {
        match self {
            Self::Document { .. } => ArtifactKind::Document,
            Self::Certificate { .. } => ArtifactKind::Certificate,
            Self::PaymentNotice { .. } => ArtifactKind::PaymentNotice,
        }
    }
}

/// Errors surfaced by the artifact renderer.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Rendering failed; the requesting transition must not commit.
    #[error("artifact rendering failed: {0}")]
    Failed(String),

    /// No artifact stored under this reference.
    #[error("artifact {0} not found")]
    NotFound(Uuid),
}

impl From<RenderError> for douane_shared::AppError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::Failed(_) => Self::ExternalService(err.to_string()),
            RenderError::NotFound(_) => Self::NotFound(err.to_string()),
        }
    }
}

/// External artifact renderer.
///
/// `render` must either durably produce the artifact and return its
/// reference, or fail; a transition that requested rendering treats a
/// failure as its own failure and persists nothing.
#[async_trait]
pub trait ArtifactRenderer: Send + Sync {
    /// Renders the requested artifact and returns its durable reference.
    async fn render(&self, request: RenderRequest<'_>) -> Result<ArtifactRef, RenderError>;

    /// Retrieves previously rendered bytes by reference.
    async fn fetch(&self, artifact_id: Uuid) -> Result<ArtifactContent, RenderError>;
}
