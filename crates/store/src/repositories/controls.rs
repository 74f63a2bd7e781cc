//! Control repository and workflow orchestration.
//!
//! The control workflow is the one place with unconditional external
//! side effects: the certificate of visit and the payment notice are
//! rendered synchronously inside the transition, before the conditional
//! write, so a rendering failure aborts the whole transition and nothing
//! is persisted.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use douane_core::actor::Actor;
use douane_core::artifact::{ArtifactRenderer, RenderRequest};
use douane_core::control::error::ControlError;
use douane_core::control::types::{
    ComplianceCheckItem, Control, CustomsFine, FineDecision, NonComplianceInput,
};
use douane_core::control::workflow::{ControlWorkflow, DeclarantOutcome};
use douane_core::declaration::{Declaration, DeclarationSource};
use douane_shared::{AppError, AppResult};

use crate::MemoryStore;

/// Control repository orchestrating the inspection workflow.
#[derive(Clone)]
pub struct ControlRepository {
    store: Arc<MemoryStore>,
    declarations: Arc<dyn DeclarationSource>,
    renderer: Arc<dyn ArtifactRenderer>,
}

impl ControlRepository {
    /// Creates a new control repository with its collaborators.
    #[must_use]
    pub fn new(
        store: Arc<MemoryStore>,
        declarations: Arc<dyn DeclarationSource>,
        renderer: Arc<dyn ArtifactRenderer>,
    ) -> Self {
        Self {
            store,
            declarations,
            renderer,
        }
    }

    /// Initiates a control for a declaration.
    ///
    /// Resolves the declaration via the external source and persists the
    /// immutable snapshot alongside the new control.
    pub async fn create(&self, declaration_id: &str, actor: &Actor) -> AppResult<Control> {
        let control = ControlWorkflow::initiate(declaration_id, actor)?;

        let declaration = self.declarations.fetch(declaration_id).await?;
        self.store
            .declarations
            .insert(declaration.id, declaration)?;

        self.store.controls.insert(control.id, control.clone())?;
        info!(control_id = %control.id, declaration_id, "Control initiated");
        Ok(control)
    }

    /// Lists the controls visible to the actor.
    pub async fn list(&self, actor: &Actor) -> AppResult<Vec<Control>> {
        let mut controls = self
            .store
            .controls
            .query(|c| ControlWorkflow::is_listed(c, actor));
        controls.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(controls)
    }

    /// Reads a control the actor may view.
    pub async fn get(&self, id: Uuid, actor: &Actor) -> AppResult<Control> {
        let control = self
            .store
            .controls
            .get(id)
            .ok_or(ControlError::NotFound(id))
            .map_err(AppError::from)?
            .value;

        if !ControlWorkflow::can_view(&control, actor) {
            return Err(AppError::Forbidden(
                "not authorized to view this control".to_string(),
            ));
        }
        Ok(control)
    }

    /// Replaces the compliance checklist and re-derives the status.
    pub async fn update_compliance(
        &self,
        id: Uuid,
        items: Vec<ComplianceCheckItem>,
        actor: &Actor,
    ) -> AppResult<Control> {
        let versioned = self
            .store
            .controls
            .get(id)
            .ok_or(ControlError::NotFound(id))
            .map_err(AppError::from)?;

        let mut control = versioned.value;
        let non_compliant =
            ControlWorkflow::apply_compliance_update(&mut control, items, actor)?;

        self.store
            .controls
            .put(id, control.clone(), versioned.version)?;
        info!(control_id = %id, non_compliant, status = %control.status, "Compliance checks updated");
        Ok(control)
    }

    /// Records non-compliance findings and generates the certificate of
    /// visit.
    ///
    /// All-or-nothing: the certificate is rendered before the write, and
    /// a rendering failure surfaces as `ExternalService` with the control
    /// left untouched.
    pub async fn record_non_compliance(
        &self,
        id: Uuid,
        input: NonComplianceInput,
        actor: &Actor,
    ) -> AppResult<Control> {
        let versioned = self
            .store
            .controls
            .get(id)
            .ok_or(ControlError::NotFound(id))
            .map_err(AppError::from)?;
        let declaration = self
            .snapshot_for(&versioned.value.declaration_id)
            .await?;

        let mut control = versioned.value;
        ControlWorkflow::record_non_compliance(&mut control, input, actor)?;

        let certificate = self
            .renderer
            .render(RenderRequest::Certificate {
                control: &control,
                declaration: &declaration,
            })
            .await?;
        control.certificate = Some(certificate);

        self.store
            .controls
            .put(id, control.clone(), versioned.version)?;
        info!(control_id = %id, "Certificate of visit generated");
        Ok(control)
    }

    /// Records the declarant's acknowledgement and the fine decision.
    ///
    /// On the customs-fine branch, renders the payment notice and
    /// persists exactly one fine as its own entity.
    pub async fn validate_declarant(
        &self,
        id: Uuid,
        acknowledged: bool,
        decision: FineDecision,
        actor: &Actor,
    ) -> AppResult<(Control, Option<CustomsFine>)> {
        let versioned = self
            .store
            .controls
            .get(id)
            .ok_or(ControlError::NotFound(id))
            .map_err(AppError::from)?;

        let mut control = versioned.value;
        let outcome =
            ControlWorkflow::validate_declarant(&mut control, acknowledged, decision, actor)?;

        match outcome {
            DeclarantOutcome::Completed => {
                self.store
                    .controls
                    .put(id, control.clone(), versioned.version)?;
                info!(control_id = %id, "Control completed (pass over)");
                Ok((control, None))
            }
            DeclarantOutcome::FineInitiated(mut fine) => {
                let declaration = self.snapshot_for(&control.declaration_id).await?;
                let notice = self
                    .renderer
                    .render(RenderRequest::PaymentNotice {
                        fine: &fine,
                        declaration: &declaration,
                    })
                    .await?;
                fine.payment_notice = Some(notice);

                self.store
                    .controls
                    .put(id, control.clone(), versioned.version)?;
                self.store.fines.insert(fine.id, fine.clone())?;
                info!(control_id = %id, fine_id = %fine.id, amount = %fine.amount, "Customs fine initiated");
                Ok((control, Some(fine)))
            }
        }
    }

    async fn snapshot_for(&self, declaration_id: &str) -> AppResult<Declaration> {
        self.store
            .declarations
            .query(|d| d.declaration_id == declaration_id)
            .into_iter()
            .next()
            .ok_or_else(|| {
                AppError::from(ControlError::DeclarationNotFound(declaration_id.to_string()))
            })
    }
}
