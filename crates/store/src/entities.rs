//! Entities owned by the storage layer.
//!
//! Aggregates governed by the workflows live in `douane-core`; the types
//! here are plain records with no transition logic of their own.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use douane_core::actor::UserRole;
use douane_shared::auth::UserInfo;

/// A registered user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// User ID.
    pub id: Uuid,
    /// Unique username (login identifier).
    pub username: String,
    /// Unique email address.
    pub email: String,
    /// Full display name.
    pub full_name: String,
    /// Assigned role.
    pub role: UserRole,
    /// Whether the account may log in.
    pub is_active: bool,
    /// Argon2id password hash (PHC string format).
    pub password_hash: String,
    /// Account creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Returns the public view of the account (no password hash).
    #[must_use]
    pub fn info(&self) -> UserInfo {
        UserInfo {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            full_name: self.full_name.clone(),
            role: self.role.as_str().to_string(),
            is_active: self.is_active,
            created_at: self.created_at,
        }
    }
}

/// A document type registry entry.
///
/// Custom document type codes must resolve here before a document or
/// template can carry them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentTypeEntry {
    /// Entry ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Description of the type.
    pub description: String,
    /// Unique wire code.
    pub code: String,
    /// User who registered the type.
    pub created_by: Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
