//! Customs fine repository.

use std::sync::Arc;

use uuid::Uuid;

use douane_core::actor::{Actor, UserRole};
use douane_core::control::types::CustomsFine;
use douane_shared::{AppError, AppResult};

use crate::MemoryStore;

/// Repository for customs fines.
///
/// Fines are only ever created by the control workflow; this repository
/// reads them back with the same visibility scoping as controls.
#[derive(Debug, Clone)]
pub struct FineRepository {
    store: Arc<MemoryStore>,
}

impl FineRepository {
    /// Creates a new fine repository.
    #[must_use]
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    /// Lists the fines visible to the actor.
    ///
    /// Control officers only see fines from controls they own.
    pub async fn list(&self, actor: &Actor) -> AppResult<Vec<CustomsFine>> {
        let mut fines = self.store.fines.query(|_| true);
        if actor.role == UserRole::ControlOfficer {
            fines.retain(|fine| self.owns_control(fine, actor));
        }
        fines.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(fines)
    }

    /// Reads a fine the actor may view.
    pub async fn get(&self, id: Uuid, actor: &Actor) -> AppResult<CustomsFine> {
        let fine = self
            .store
            .fines
            .get(id)
            .ok_or_else(|| AppError::NotFound(format!("fine {id} not found")))?
            .value;

        if actor.role == UserRole::ControlOfficer && !self.owns_control(&fine, actor) {
            return Err(AppError::Forbidden(
                "not authorized to view this fine".to_string(),
            ));
        }
        Ok(fine)
    }

    /// Finds the fine created for a control, if any.
    pub async fn find_by_control(&self, control_id: Uuid) -> AppResult<Option<CustomsFine>> {
        Ok(self
            .store
            .fines
            .query(|f| f.control_id == control_id)
            .into_iter()
            .next())
    }

    fn owns_control(&self, fine: &CustomsFine, actor: &Actor) -> bool {
        self.store
            .controls
            .get(fine.control_id)
            .is_some_and(|c| c.value.control_officer_id == actor.id)
    }
}
