//! Control state transition logic and visibility rules.

use chrono::{NaiveDate, Utc};
use serde_json::json;
use uuid::Uuid;

use crate::actor::{Actor, UserRole};
use crate::audit::AuditEntry;
use crate::authz::{self, Operation};
use crate::control::error::ControlError;
use crate::control::types::{
    ComplianceCheckItem, ComplianceStatus, Control, ControlStatus, CustomsFine, DEFAULT_CHECKLIST,
    FineDecision, FineStatus, NonComplianceInput,
};

/// Outcome of a declarant validation.
#[derive(Debug)]
pub enum DeclarantOutcome {
    /// The control was passed over and completed without a fine.
    Completed,
    /// A customs fine was initiated; the caller renders the payment
    /// notice, attaches the reference, and persists the fine.
    FineInitiated(CustomsFine),
}

/// Stateless service for control workflow transitions.
///
/// All methods validate the transition against the current snapshot,
/// mutate it, and append exactly one audit entry; persistence and
/// collaborator calls (declaration lookup, artifact rendering) are the
/// caller's concern and must complete before the transition commits.
pub struct ControlWorkflow;

impl ControlWorkflow {
    /// Creates a control for a declaration, seeded with the fixed
    /// checklist, in InProgress with a "control_initiated" entry.
    ///
    /// The declaration snapshot must already have been fetched and is
    /// persisted by the caller alongside the control.
    ///
    /// # Errors
    ///
    /// Returns `ControlError::RoleNotAllowed` unless the actor is a
    /// control or validation officer.
    pub fn initiate(declaration_id: &str, actor: &Actor) -> Result<Control, ControlError> {
        if !authz::is_allowed(actor.role, Operation::CreateControl) {
            return Err(ControlError::RoleNotAllowed {
                role: actor.role,
                action: "initiate controls",
            });
        }

        let now = Utc::now();
        let entry = AuditEntry::new("control_initiated", actor)
            .with_details(json!({ "declaration_id": declaration_id }));

        Ok(Control {
            id: Uuid::new_v4(),
            declaration_id: declaration_id.to_string(),
            control_officer_id: actor.id,
            control_officer_name: actor.name.clone(),
            status: ControlStatus::InProgress,
            compliance_checks: DEFAULT_CHECKLIST
                .iter()
                .copied()
                .map(ComplianceCheckItem::pending)
                .collect(),
            non_compliance_type: None,
            non_compliance_details: None,
            fiscal_impact: None,
            applicable_regulation: None,
            declarant_acknowledged: false,
            certificate: None,
            pv_generated: false,
            fine_decision: None,
            created_at: now,
            updated_at: now,
            history: vec![entry],
        })
    }

    /// Replaces the compliance checklist and re-derives the status.
    ///
    /// Every submitted item that is no longer Pending is stamped with the
    /// caller and the current time. If any item is NonCompliant the
    /// control becomes NonCompliant, otherwise ComplianceCheck. Returns
    /// the number of non-compliant items.
    ///
    /// # Errors
    ///
    /// Returns `ControlError::RoleNotAllowed` for other roles, and
    /// `ControlError::InvalidState` once the control moved past the
    /// checklist phase.
    pub fn apply_compliance_update(
        control: &mut Control,
        items: Vec<ComplianceCheckItem>,
        actor: &Actor,
    ) -> Result<usize, ControlError> {
        if !authz::is_allowed(actor.role, Operation::UpdateCompliance) {
            return Err(ControlError::RoleNotAllowed {
                role: actor.role,
                action: "update compliance checks",
            });
        }
        if !matches!(
            control.status,
            ControlStatus::InProgress
                | ControlStatus::ComplianceCheck
                | ControlStatus::NonCompliant
        ) {
            return Err(ControlError::InvalidState {
                operation: "update compliance checks",
                status: control.status,
            });
        }

        let now = Utc::now();
        let mut checks = items;
        for check in &mut checks {
            if check.status != ComplianceStatus::Pending {
                check.checked_by = Some(actor.name.clone());
                check.checked_at = Some(now);
            }
        }

        let non_compliant_count = checks
            .iter()
            .filter(|c| c.status == ComplianceStatus::NonCompliant)
            .count();

        control.compliance_checks = checks;
        control.status = if non_compliant_count > 0 {
            ControlStatus::NonCompliant
        } else {
            ControlStatus::ComplianceCheck
        };
        control.updated_at = now;
        control.history.push(
            AuditEntry::new("compliance_check_updated", actor)
                .with_details(json!({ "non_compliant_count": non_compliant_count })),
        );

        Ok(non_compliant_count)
    }

    /// Records non-compliance findings and moves the control to
    /// CertificateGenerated.
    ///
    /// The caller must render the certificate of visit between this call
    /// and persisting: if rendering fails nothing is persisted, so the
    /// transition never commits without its artifact.
    ///
    /// # Errors
    ///
    /// Returns `ControlError::RoleNotAllowed` for other roles, and
    /// `ControlError::InvalidState` unless the control is NonCompliant.
    pub fn record_non_compliance(
        control: &mut Control,
        input: NonComplianceInput,
        actor: &Actor,
    ) -> Result<(), ControlError> {
        if !authz::is_allowed(actor.role, Operation::RecordNonCompliance) {
            return Err(ControlError::RoleNotAllowed {
                role: actor.role,
                action: "record non-compliance",
            });
        }
        if control.status != ControlStatus::NonCompliant {
            return Err(ControlError::InvalidState {
                operation: "record non-compliance",
                status: control.status,
            });
        }

        control.non_compliance_type = Some(input.non_compliance_type);
        control.non_compliance_details = Some(input.details);
        control.fiscal_impact = Some(input.fiscal_impact);
        control.applicable_regulation = Some(input.applicable_regulation);
        control.status = ControlStatus::CertificateGenerated;
        control.updated_at = Utc::now();
        control.history.push(
            AuditEntry::new("certificate_generated", actor).with_details(
                json!({ "non_compliance_type": input.non_compliance_type.as_str() }),
            ),
        );

        Ok(())
    }

    /// Records the declarant's acknowledgement and the fine decision.
    ///
    /// `pass_over` completes the control; `customs_fine` closes it as
    /// FineIssued and returns the prepared fine (amount = the control's
    /// fiscal impact, deterministic LO number). The caller renders the
    /// payment notice and persists the fine as its own entity.
    ///
    /// # Errors
    ///
    /// Returns `ControlError::AcknowledgementRequired` when the flag is
    /// false (rejected before any mutation), `ControlError::InvalidState`
    /// unless the certificate has been generated, and
    /// `ControlError::MissingFiscalImpact` if no non-compliance amount
    /// was recorded.
    pub fn validate_declarant(
        control: &mut Control,
        acknowledged: bool,
        decision: FineDecision,
        actor: &Actor,
    ) -> Result<DeclarantOutcome, ControlError> {
        if !authz::is_allowed(actor.role, Operation::ValidateDeclarant) {
            return Err(ControlError::RoleNotAllowed {
                role: actor.role,
                action: "validate declarant acknowledgement",
            });
        }
        if control.status != ControlStatus::CertificateGenerated {
            return Err(ControlError::InvalidState {
                operation: "validate declarant acknowledgement",
                status: control.status,
            });
        }
        if !acknowledged {
            return Err(ControlError::AcknowledgementRequired);
        }

        let now = Utc::now();
        match decision {
            FineDecision::PassOver => {
                control.declarant_acknowledged = true;
                control.pv_generated = true;
                control.fine_decision = Some(decision);
                control.status = ControlStatus::Completed;
                control.updated_at = now;
                control.history.push(
                    AuditEntry::new("control_completed_pass_over", actor)
                        .with_details(json!({ "decision": decision.as_str() })),
                );
                Ok(DeclarantOutcome::Completed)
            }
            FineDecision::CustomsFine => {
                // Guard before mutating: the fine is sized from the
                // recorded fiscal impact.
                let amount = control
                    .fiscal_impact
                    .ok_or(ControlError::MissingFiscalImpact)?;
                let regulation_code = control
                    .applicable_regulation
                    .clone()
                    .ok_or(ControlError::MissingFiscalImpact)?;

                control.declarant_acknowledged = true;
                control.pv_generated = true;
                control.fine_decision = Some(decision);
                control.status = ControlStatus::FineIssued;
                control.updated_at = now;
                control.history.push(
                    AuditEntry::new("customs_fine_initiated", actor)
                        .with_details(json!({ "decision": decision.as_str() })),
                );

                let fine = CustomsFine {
                    id: Uuid::new_v4(),
                    control_id: control.id,
                    declaration_id: control.declaration_id.clone(),
                    amount,
                    regulation_code,
                    status: FineStatus::Pending,
                    lo_number: Some(Self::lo_number(now.date_naive(), control.id)),
                    payment_notice: None,
                    created_at: now,
                };
                Ok(DeclarantOutcome::FineInitiated(fine))
            }
        }
    }

    /// Derives the external-looking LO number for a fine.
    ///
    /// Deterministic for a given date and control id:
    /// `LO{YYYYMMDD}{first 6 hex digits of the control id, uppercase}`.
    #[must_use]
    pub fn lo_number(date: NaiveDate, control_id: Uuid) -> String {
        let hex = control_id.simple().to_string();
        format!(
            "LO{}{}",
            date.format("%Y%m%d"),
            hex[..6].to_uppercase()
        )
    }

    /// Returns whether the actor may view this control.
    ///
    /// Control officers only see controls they own; validation officers
    /// and MOA see all.
    #[must_use]
    pub fn can_view(control: &Control, actor: &Actor) -> bool {
        match actor.role {
            UserRole::ControlOfficer => control.control_officer_id == actor.id,
            _ => true,
        }
    }

    /// Returns whether this control appears in the actor's list.
    #[must_use]
    pub fn is_listed(control: &Control, actor: &Actor) -> bool {
        Self::can_view(control, actor)
    }
}
