//! User repository.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use douane_core::actor::UserRole;
use douane_core::auth::hash_password;
use douane_shared::{AppError, AppResult};

use crate::MemoryStore;
use crate::entities::User;

/// Input for registering a new user.
#[derive(Debug, Clone)]
pub struct CreateUserInput {
    /// Unique username.
    pub username: String,
    /// Unique email address.
    pub email: String,
    /// Plaintext password, hashed before storage.
    pub password: String,
    /// Full display name.
    pub full_name: String,
    /// Assigned role.
    pub role: UserRole,
}

/// User repository for account operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    store: Arc<MemoryStore>,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    /// Registers a new user, rejecting duplicate usernames or emails.
    pub async fn create(&self, input: CreateUserInput) -> AppResult<User> {
        let duplicate = self.store.users.count(|u| {
            u.username == input.username || u.email == input.email
        });
        if duplicate > 0 {
            return Err(AppError::Conflict(
                "username or email already registered".to_string(),
            ));
        }

        let password_hash = hash_password(&input.password)
            .map_err(|e| AppError::Internal(e.to_string()))?;

        let user = User {
            id: Uuid::new_v4(),
            username: input.username,
            email: input.email,
            full_name: input.full_name,
            role: input.role,
            is_active: true,
            password_hash,
            created_at: Utc::now(),
        };
        self.store.users.insert(user.id, user.clone())?;
        Ok(user)
    }

    /// Finds a user by username.
    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(self
            .store
            .users
            .query(|u| u.username == username)
            .into_iter()
            .next())
    }

    /// Finds a user by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.store.users.get(id).map(|v| v.value))
    }
}
