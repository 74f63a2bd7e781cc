//! Authenticated principals and the closed role set.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Role of an authenticated user.
///
/// The set is closed: every actor carries exactly one of these for the
/// lifetime of a request, and all transition guards key off it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Drafts administrative documents and submits them for control.
    DraftingAgent,
    /// Runs compliance controls on import declarations.
    ControlOfficer,
    /// Validates documents and controls; sees everything.
    ValidationOfficer,
    /// Management/operations administrator; manages reference data.
    Moa,
}

impl UserRole {
    /// Parses a role from its wire tag.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "drafting_agent" => Some(Self::DraftingAgent),
            "control_officer" => Some(Self::ControlOfficer),
            "validation_officer" => Some(Self::ValidationOfficer),
            "moa" => Some(Self::Moa),
            _ => None,
        }
    }

    /// Returns the string representation of the role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DraftingAgent => "drafting_agent",
            Self::ControlOfficer => "control_officer",
            Self::ValidationOfficer => "validation_officer",
            Self::Moa => "moa",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An authenticated principal driving a single request.
///
/// Immutable once constructed; every workflow operation receives the
/// acting principal and records its id and display name in the audit
/// trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// User ID.
    pub id: Uuid,
    /// Display name, recorded verbatim in audit entries.
    pub name: String,
    /// The actor's role.
    pub role: UserRole,
}

impl Actor {
    /// Creates a new actor.
    #[must_use]
    pub fn new(id: Uuid, name: impl Into<String>, role: UserRole) -> Self {
        Self {
            id,
            name: name.into(),
            role,
        }
    }
}
