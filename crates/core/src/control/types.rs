//! Control domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::artifact::ArtifactRef;
use crate::audit::AuditEntry;

/// Control status in the inspection workflow.
///
/// Controls progress through these states from initiation to closure.
/// The valid transitions are:
/// - Initiated → InProgress (immediately on creation)
/// - InProgress → ComplianceCheck | NonCompliant (checklist decision)
/// - NonCompliant → CertificateGenerated (non-compliance recorded)
/// - CertificateGenerated → Completed (pass over)
/// - CertificateGenerated → FineIssued (customs fine)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlStatus {
    /// Control record created; transient, immediately advanced.
    Initiated,
    /// Inspection under way.
    InProgress,
    /// Checklist completed with no non-compliant item.
    ComplianceCheck,
    /// At least one checklist item is non-compliant.
    NonCompliant,
    /// Certificate of visit generated for the non-compliance.
    CertificateGenerated,
    /// Awaiting declarant acknowledgement.
    DeclarantValidation,
    /// Control closed without a fine (terminal).
    Completed,
    /// Control closed with a customs fine (terminal).
    FineIssued,
}

impl ControlStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Initiated => "initiated",
            Self::InProgress => "in_progress",
            Self::ComplianceCheck => "compliance_check",
            Self::NonCompliant => "non_compliant",
            Self::CertificateGenerated => "certificate_generated",
            Self::DeclarantValidation => "declarant_validation",
            Self::Completed => "completed",
            Self::FineIssued => "fine_issued",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "initiated" => Some(Self::Initiated),
            "in_progress" => Some(Self::InProgress),
            "compliance_check" => Some(Self::ComplianceCheck),
            "non_compliant" => Some(Self::NonCompliant),
            "certificate_generated" => Some(Self::CertificateGenerated),
            "declarant_validation" => Some(Self::DeclarantValidation),
            "completed" => Some(Self::Completed),
            "fine_issued" => Some(Self::FineIssued),
            _ => None,
        }
    }

    /// Returns true if the control reached a terminal state.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::FineIssued)
    }
}

impl fmt::Display for ControlStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status of a single compliance checklist item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    /// Not yet checked.
    Pending,
    /// Checked and found compliant.
    Compliant,
    /// Checked and found non-compliant.
    NonCompliant,
}

/// A single item in a control's compliance checklist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceCheckItem {
    /// Item ID.
    pub id: Uuid,
    /// Item label.
    pub item: String,
    /// Check outcome.
    pub status: ComplianceStatus,
    /// Free-form notes from the checking officer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Display name of the officer who checked the item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked_by: Option<String>,
    /// When the item was checked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked_at: Option<DateTime<Utc>>,
}

impl ComplianceCheckItem {
    /// Creates a pending item with the given label.
    #[must_use]
    pub fn pending(item: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            item: item.into(),
            status: ComplianceStatus::Pending,
            notes: None,
            checked_by: None,
            checked_at: None,
        }
    }
}

/// The fixed checklist every control starts from.
pub const DEFAULT_CHECKLIST: [&str; 7] = [
    "Vérification identité importateur",
    "Contrôle cohérence déclaration/marchandises",
    "Vérification origine marchandises",
    "Contrôle valeur déclarée",
    "Vérification classement tarifaire",
    "Contrôle des documents d'accompagnement",
    "Vérification du régime douanier",
];

/// Classification of a recorded non-compliance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NonComplianceType {
    /// Wrong species declaration.
    Species,
    /// Wrong origin declaration.
    Origin,
    /// Under- or over-valuation.
    Value,
    /// Wrong tariff classification.
    Classification,
    /// Missing or inconsistent documentation.
    Documentation,
}

impl NonComplianceType {
    /// Returns the string representation of the type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Species => "species",
            Self::Origin => "origin",
            Self::Value => "value",
            Self::Classification => "classification",
            Self::Documentation => "documentation",
        }
    }
}

impl fmt::Display for NonComplianceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Non-compliance findings recorded on a control.
///
/// The four fields travel together: a control either has all of them or
/// none of them.
#[derive(Debug, Clone)]
pub struct NonComplianceInput {
    /// Classification of the non-compliance.
    pub non_compliance_type: NonComplianceType,
    /// Findings in free text.
    pub details: String,
    /// Duties and taxes at stake.
    pub fiscal_impact: Decimal,
    /// Applicable regulation code.
    pub applicable_regulation: String,
}

/// Decision taken after declarant acknowledgement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FineDecision {
    /// Close the control without a fine.
    PassOver,
    /// Issue a customs fine.
    CustomsFine,
}

impl FineDecision {
    /// Parses a decision from its wire tag. Anything other than the two
    /// known tags is invalid input, rejected before any mutation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pass_over" => Some(Self::PassOver),
            "customs_fine" => Some(Self::CustomsFine),
            _ => None,
        }
    }

    /// Returns the string representation of the decision.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PassOver => "pass_over",
            Self::CustomsFine => "customs_fine",
        }
    }
}

impl fmt::Display for FineDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A customs control (aggregate root).
///
/// Owns its checklist and audit history exclusively; references its
/// declaration snapshot by external number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Control {
    /// Control ID.
    pub id: Uuid,
    /// External declaration number the control inspects.
    pub declaration_id: String,
    /// Owning control officer ID.
    pub control_officer_id: Uuid,
    /// Owning control officer display name.
    pub control_officer_name: String,
    /// Current workflow status.
    pub status: ControlStatus,
    /// Ordered compliance checklist.
    pub compliance_checks: Vec<ComplianceCheckItem>,
    /// Classification of the recorded non-compliance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub non_compliance_type: Option<NonComplianceType>,
    /// Non-compliance findings in free text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub non_compliance_details: Option<String>,
    /// Duties and taxes at stake.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiscal_impact: Option<Decimal>,
    /// Applicable regulation code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applicable_regulation: Option<String>,
    /// Whether the declarant acknowledged the findings.
    pub declarant_acknowledged: bool,
    /// Certificate of visit artifact, once generated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate: Option<ArtifactRef>,
    /// Whether the procès-verbal has been generated.
    pub pv_generated: bool,
    /// Decision taken after declarant acknowledgement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fine_decision: Option<FineDecision>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
    /// Append-only action history.
    #[serde(default)]
    pub history: Vec<AuditEntry>,
}

/// Status of a customs fine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FineStatus {
    /// Created, not yet issued to the declarant.
    Pending,
    /// Issued to the declarant.
    Issued,
    /// Paid in full.
    Paid,
    /// Cancelled.
    Cancelled,
}

/// A customs fine, created once when a control reaches the fine branch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomsFine {
    /// Fine ID.
    pub id: Uuid,
    /// Control the fine originates from.
    pub control_id: Uuid,
    /// External declaration number the fine relates to.
    pub declaration_id: String,
    /// Fine amount (equals the control's fiscal impact at validation).
    pub amount: Decimal,
    /// Applicable regulation code.
    pub regulation_code: String,
    /// Fine status.
    pub status: FineStatus,
    /// External-looking LO number, derived deterministically.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lo_number: Option<String>,
    /// Payment notice artifact, once rendered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_notice: Option<ArtifactRef>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A customs regulation (reference data).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Regulation {
    /// Regulation ID.
    pub id: Uuid,
    /// Regulation code (e.g. "CD-230").
    pub code: String,
    /// Short title.
    pub title: String,
    /// Description of the infringement.
    pub description: String,
    /// Category label.
    pub category: String,
    /// Fine rate applied to the fiscal impact.
    pub fine_rate: Decimal,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_as_str() {
        assert_eq!(ControlStatus::Initiated.as_str(), "initiated");
        assert_eq!(ControlStatus::InProgress.as_str(), "in_progress");
        assert_eq!(ControlStatus::ComplianceCheck.as_str(), "compliance_check");
        assert_eq!(ControlStatus::NonCompliant.as_str(), "non_compliant");
        assert_eq!(
            ControlStatus::CertificateGenerated.as_str(),
            "certificate_generated"
        );
        assert_eq!(ControlStatus::Completed.as_str(), "completed");
        assert_eq!(ControlStatus::FineIssued.as_str(), "fine_issued");
    }

    #[test]
    fn test_status_parse_roundtrip() {
        for status in [
            ControlStatus::Initiated,
            ControlStatus::InProgress,
            ControlStatus::ComplianceCheck,
            ControlStatus::NonCompliant,
            ControlStatus::CertificateGenerated,
            ControlStatus::DeclarantValidation,
            ControlStatus::Completed,
            ControlStatus::FineIssued,
        ] {
            assert_eq!(ControlStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ControlStatus::parse("bogus"), None);
    }

    #[test]
    fn test_status_terminal() {
        assert!(ControlStatus::Completed.is_terminal());
        assert!(ControlStatus::FineIssued.is_terminal());
        assert!(!ControlStatus::InProgress.is_terminal());
        assert!(!ControlStatus::CertificateGenerated.is_terminal());
    }

    #[test]
    fn test_default_checklist_has_seven_items() {
        assert_eq!(DEFAULT_CHECKLIST.len(), 7);
    }

    #[test]
    fn test_pending_item() {
        let item = ComplianceCheckItem::pending("Contrôle valeur déclarée");
        assert_eq!(item.status, ComplianceStatus::Pending);
        assert!(item.checked_by.is_none());
        assert!(item.checked_at.is_none());
    }

    #[test]
    fn test_fine_decision_parse() {
        assert_eq!(FineDecision::parse("pass_over"), Some(FineDecision::PassOver));
        assert_eq!(
            FineDecision::parse("customs_fine"),
            Some(FineDecision::CustomsFine)
        );
        assert_eq!(FineDecision::parse("warning"), None);
        assert_eq!(FineDecision::parse("PASS_OVER"), None);
    }
}
