//! Regulation reference-data repository.

use std::sync::Arc;

use douane_core::control::types::Regulation;
use douane_shared::AppResult;

use crate::MemoryStore;

/// Repository for customs regulations (reference data).
#[derive(Debug, Clone)]
pub struct RegulationRepository {
    store: Arc<MemoryStore>,
}

impl RegulationRepository {
    /// Creates a new regulation repository.
    #[must_use]
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    /// Lists all regulations, ordered by code.
    pub async fn list(&self) -> AppResult<Vec<Regulation>> {
        let mut regulations = self.store.regulations.query(|_| true);
        regulations.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(regulations)
    }

    /// Inserts a regulation.
    pub async fn insert(&self, regulation: Regulation) -> AppResult<()> {
        self.store.regulations.insert(regulation.id, regulation)?;
        Ok(())
    }

    /// Returns true if any regulation exists.
    pub async fn any(&self) -> AppResult<bool> {
        Ok(!self.store.regulations.is_empty())
    }
}
