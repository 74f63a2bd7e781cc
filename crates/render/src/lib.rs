//! HTML artifact renderer.
//!
//! Implements the core `ArtifactRenderer` port: turns entity snapshots
//! into standalone HTML documents (certificate of visit, payment notice,
//! filled document), keeps the rendered bytes addressable by reference,
//! and serves them back for download.

mod templates;

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use douane_core::artifact::{
    ArtifactContent, ArtifactRef, ArtifactRenderer, RenderError, RenderRequest,
};

const CONTENT_TYPE_HTML: &str = "text/html; charset=utf-8";

#[derive(Debug, Clone)]
struct StoredArtifact {
    filename: String,
    content_type: String,
    bytes: Vec<u8>,
}

/// Renderer producing standalone HTML artifacts, kept in memory and
/// addressable by reference.
#[derive(Debug, Default)]
pub struct HtmlRenderer {
    artifacts: DashMap<Uuid, StoredArtifact>,
}

impl HtmlRenderer {
    /// Creates an empty renderer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ArtifactRenderer for HtmlRenderer {
    async fn render(&self, request: RenderRequest<'_>) -> Result<ArtifactRef, RenderError> {
        let (filename, html) = match request {
            RenderRequest::Document { document, template } => {
                let stem: String = document
                    .title
                    .chars()
                    .map(|c| if c == ' ' { '_' } else { c })
                    .collect();
                let short = &document.id.simple().to_string()[..8];
                (
                    format!("{stem}_{short}.html"),
                    templates::document_html(document, template),
                )
            }
            RenderRequest::Certificate {
                control,
                declaration,
            } => (
                format!("Certificat_Visite_{}.html", declaration.declaration_id),
                templates::certificate_html(control, declaration)?,
            ),
            RenderRequest::PaymentNotice { fine, declaration } => (
                format!(
                    "Avis_Paiement_{}.html",
                    fine.lo_number.as_deref().unwrap_or("en_attente")
                ),
                templates::payment_notice_html(fine, declaration),
            ),
        };

        let id = Uuid::new_v4();
        self.artifacts.insert(
            id,
            StoredArtifact {
                filename: filename.clone(),
                content_type: CONTENT_TYPE_HTML.to_string(),
                bytes: html.into_bytes(),
            },
        );

        Ok(ArtifactRef {
            id,
            filename,
            content_type: CONTENT_TYPE_HTML.to_string(),
        })
    }

    async fn fetch(&self, artifact_id: Uuid) -> Result<ArtifactContent, RenderError> {
        self.artifacts
            .get(&artifact_id)
            .map(|stored| ArtifactContent {
                filename: stored.filename.clone(),
                content_type: stored.content_type.clone(),
                bytes: stored.bytes.clone(),
            })
            .ok_or(RenderError::NotFound(artifact_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    use douane_core::actor::{Actor, UserRole};
    use douane_core::control::types::{FineDecision, NonComplianceInput, NonComplianceType};
    use douane_core::control::workflow::{ControlWorkflow, DeclarantOutcome};
    use douane_core::control::types::{ComplianceStatus, Control};
    use douane_core::declaration::Declaration;

    fn declaration() -> Declaration {
        Declaration {
            id: Uuid::new_v4(),
            declaration_id: "IM-2024-0042".to_string(),
            importer_name: "SARL Import Export NC".to_string(),
            importer_address: "123 Rue de la Paix, Nouméa".to_string(),
            goods_description: "Matériel informatique".to_string(),
            origin_country: "France".to_string(),
            value_cfr: dec!(45000),
            customs_regime: "Importation définitive".to_string(),
            declaration_date: "2024-01-15".to_string(),
            customs_office: "Nouméa-Port".to_string(),
            tariff_code: Some("8471.30.00".to_string()),
            weight: Some(dec!(250.5)),
            quantity: Some(10),
            created_at: Utc::now(),
        }
    }

    fn certified_control(actor: &Actor) -> Control {
        let mut control = ControlWorkflow::initiate("IM-2024-0042", actor).unwrap();
        let mut checks = control.compliance_checks.clone();
        for check in &mut checks {
            check.status = ComplianceStatus::Compliant;
        }
        checks[0].status = ComplianceStatus::NonCompliant;
        ControlWorkflow::apply_compliance_update(&mut control, checks, actor).unwrap();
        ControlWorkflow::record_non_compliance(
            &mut control,
            NonComplianceInput {
                non_compliance_type: NonComplianceType::Value,
                details: "Valeur sous-déclarée".to_string(),
                fiscal_impact: dec!(50000),
                applicable_regulation: "CD-230".to_string(),
            },
            actor,
        )
        .unwrap();
        control
    }

    #[tokio::test]
    async fn test_certificate_render_and_fetch() {
        let renderer = HtmlRenderer::new();
        let actor = Actor::new(Uuid::new_v4(), "C. Leroy", UserRole::ControlOfficer);
        let control = certified_control(&actor);
        let declaration = declaration();

        let reference = renderer
            .render(RenderRequest::Certificate {
                control: &control,
                declaration: &declaration,
            })
            .await
            .unwrap();

        assert_eq!(reference.filename, "Certificat_Visite_IM-2024-0042.html");

        let content = renderer.fetch(reference.id).await.unwrap();
        let html = String::from_utf8(content.bytes).unwrap();
        assert!(html.contains("CERTIFICAT DE VISITE"));
        assert!(html.contains("SARL Import Export NC"));
        assert!(html.contains("50000"));
        assert!(html.contains("CD-230"));
    }

    #[tokio::test]
    async fn test_payment_notice_render() {
        let renderer = HtmlRenderer::new();
        let actor = Actor::new(Uuid::new_v4(), "C. Leroy", UserRole::ControlOfficer);
        let mut control = certified_control(&actor);
        let outcome = ControlWorkflow::validate_declarant(
            &mut control,
            true,
            FineDecision::CustomsFine,
            &actor,
        )
        .unwrap();
        let DeclarantOutcome::FineInitiated(fine) = outcome else {
            panic!("expected a fine");
        };

        let reference = renderer
            .render(RenderRequest::PaymentNotice {
                fine: &fine,
                declaration: &declaration(),
            })
            .await
            .unwrap();

        let content = renderer.fetch(reference.id).await.unwrap();
        let html = String::from_utf8(content.bytes).unwrap();
        assert!(html.contains("AVIS DE PAIEMENT"));
        assert!(html.contains(fine.lo_number.as_deref().unwrap()));
    }

    #[tokio::test]
    async fn test_fetch_unknown_reference() {
        let renderer = HtmlRenderer::new();
        let result = renderer.fetch(Uuid::new_v4()).await;
        assert!(matches!(result, Err(RenderError::NotFound(_))));
    }
}
