//! Declaration snapshot repository.

use std::sync::Arc;

use douane_core::declaration::Declaration;
use douane_shared::AppResult;

use crate::MemoryStore;

/// Repository for persisted declaration snapshots.
///
/// Snapshots are written once at control creation and never re-synced.
#[derive(Debug, Clone)]
pub struct DeclarationRepository {
    store: Arc<MemoryStore>,
}

impl DeclarationRepository {
    /// Creates a new declaration repository.
    #[must_use]
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    /// Persists a snapshot.
    pub async fn insert(&self, declaration: Declaration) -> AppResult<()> {
        self.store
            .declarations
            .insert(declaration.id, declaration)?;
        Ok(())
    }

    /// Finds the snapshot for an external declaration number.
    pub async fn find_by_declaration_id(
        &self,
        declaration_id: &str,
    ) -> AppResult<Option<Declaration>> {
        Ok(self
            .store
            .declarations
            .query(|d| d.declaration_id == declaration_id)
            .into_iter()
            .next())
    }
}
