//! Document domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use uuid::Uuid;

use crate::audit::AuditEntry;

/// Document status in the drafting workflow.
///
/// Documents progress through these states from drafting to validation.
/// The valid transitions are:
/// - Draft → UnderControl (submit)
/// - UnderControl → UnderValidation
/// - UnderValidation → Validated
/// - UnderValidation → Rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    /// Document is being drafted and can be modified.
    Draft,
    /// Document has been submitted and awaits control.
    UnderControl,
    /// Document passed control and awaits validation.
    UnderValidation,
    /// Document has been validated (terminal).
    Validated,
    /// Document has been rejected (terminal).
    Rejected,
}

impl DocumentStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::UnderControl => "under_control",
            Self::UnderValidation => "under_validation",
            Self::Validated => "validated",
            Self::Rejected => "rejected",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(Self::Draft),
            "under_control" => Some(Self::UnderControl),
            "under_validation" => Some(Self::UnderValidation),
            "validated" => Some(Self::Validated),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Returns true if the document reached a terminal state.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Validated | Self::Rejected)
    }

    /// Returns true if `to` is a single forward step from this status.
    ///
    /// Skipping a step (e.g. Draft → Validated) is never valid.
    #[must_use]
    pub fn can_advance_to(&self, to: Self) -> bool {
        matches!(
            (self, to),
            (Self::Draft, Self::UnderControl)
                | (Self::UnderControl, Self::UnderValidation)
                | (Self::UnderValidation, Self::Validated | Self::Rejected)
        )
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Document type: a validated reference into the type registry.
///
/// The three built-in codes always resolve; any other code must match a
/// registry entry at document-creation time. On the wire a type is the
/// bare code string either way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DocumentType {
    /// Customs control report.
    CustomsReport,
    /// Administrative act (e.g. seizure).
    AdministrativeAct,
    /// Violation report.
    ViolationReport,
    /// Registry-defined type, validated against the registry.
    Custom(String),
}

impl DocumentType {
    /// Returns the wire code of the type.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::CustomsReport => "customs_report",
            Self::AdministrativeAct => "administrative_act",
            Self::ViolationReport => "violation_report",
            Self::Custom(code) => code,
        }
    }

    /// Returns true for the three built-in codes.
    #[must_use]
    pub fn is_builtin(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }
}

impl From<String> for DocumentType {
    fn from(code: String) -> Self {
        match code.as_str() {
            "customs_report" => Self::CustomsReport,
            "administrative_act" => Self::AdministrativeAct,
            "violation_report" => Self::ViolationReport,
            _ => Self::Custom(code),
        }
    }
}

impl From<DocumentType> for String {
    fn from(doc_type: DocumentType) -> Self {
        doc_type.code().to_string()
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Kind of a template field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Single-line text.
    Text,
    /// Multi-line text.
    Textarea,
    /// Numeric value.
    Number,
    /// Calendar date.
    Date,
    /// One of a fixed set of options.
    Select,
}

/// A field descriptor in a document template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateField {
    /// Field name; keys the document content map.
    pub name: String,
    /// Field kind.
    #[serde(rename = "type")]
    pub kind: FieldKind,
    /// Whether the field must be filled.
    pub required: bool,
    /// Human-readable label.
    pub label: String,
    /// Choice options for `Select` fields.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

/// A document template: ordered field descriptors plus a checklist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentTemplate {
    /// Template ID.
    pub id: Uuid,
    /// Template name.
    pub name: String,
    /// Document type the template produces.
    pub document_type: DocumentType,
    /// Ordered field descriptors.
    pub fields: Vec<TemplateField>,
    /// Ordered checklist of verification items.
    pub checklist: Vec<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// An administrative document (aggregate root).
///
/// Owns its audit history exclusively; references its template by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Document ID.
    pub id: Uuid,
    /// Document title.
    pub title: String,
    /// Document type.
    pub document_type: DocumentType,
    /// Current workflow status.
    pub status: DocumentStatus,
    /// Referenced template ID.
    pub template_id: Uuid,
    /// Free-form content keyed by template field name.
    #[serde(default)]
    pub content: Map<String, Value>,
    /// Declaration-derived data snapshot, when attached.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sydonia_data: Option<Value>,
    /// Creator user ID.
    pub created_by: Uuid,
    /// Creator display name.
    pub created_by_name: String,
    /// Assigned user ID, when assigned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<Uuid>,
    /// Assigned user display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to_name: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
    /// Append-only action history.
    #[serde(default)]
    pub history: Vec<AuditEntry>,
}
