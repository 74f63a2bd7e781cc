//! Store error types.

use thiserror::Error;

use douane_shared::AppError;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No entity with this id in the collection.
    #[error("{entity} {id} not found")]
    NotFound {
        /// Collection name.
        entity: &'static str,
        /// Entity id.
        id: String,
    },

    /// Conditional write lost a concurrent race.
    ///
    /// The caller is expected to re-read the entity and resubmit.
    #[error("{entity} {id} was modified concurrently (expected version {expected}, found {actual})")]
    VersionConflict {
        /// Collection name.
        entity: &'static str,
        /// Entity id.
        id: String,
        /// The version the writer read.
        expected: u64,
        /// The version actually stored.
        actual: u64,
    },

    /// An entity with this id already exists.
    #[error("{entity} {id} already exists")]
    AlreadyExists {
        /// Collection name.
        entity: &'static str,
        /// Entity id.
        id: String,
    },
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => Self::NotFound(err.to_string()),
            StoreError::VersionConflict { .. } | StoreError::AlreadyExists { .. } => {
                Self::Conflict(err.to_string())
            }
        }
    }
}
