//! Append-only action history entries.
//!
//! Each aggregate owns an insertion-ordered sequence of `AuditEntry`.
//! Entries are appended by exactly one per successful mutating operation,
//! as part of the same store write as the entity mutation, and are never
//! edited or removed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::actor::Actor;

/// A single entry in an entity's action history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Unique identifier of the entry.
    pub id: Uuid,
    /// Action tag (open vocabulary, e.g. "created", "control_initiated").
    pub action: String,
    /// ID of the actor who performed the action.
    pub actor_id: Uuid,
    /// Display name of the actor at the time of the action.
    pub actor_name: String,
    /// When the action happened (UTC).
    pub timestamp: DateTime<Utc>,
    /// Optional structured detail map.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl AuditEntry {
    /// Creates a new entry stamped with the current time.
    #[must_use]
    pub fn new(action: impl Into<String>, actor: &Actor) -> Self {
        Self {
            id: Uuid::new_v4(),
            action: action.into(),
            actor_id: actor.id,
            actor_name: actor.name.clone(),
            timestamp: Utc::now(),
            details: None,
        }
    }

    /// Attaches a structured detail map to the entry.
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}
