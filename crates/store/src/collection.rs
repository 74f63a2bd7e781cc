//! Versioned entity collections.
//!
//! Each collection is a document-oriented map keyed by entity id. The
//! store tracks a version counter per entry, outside the entity body;
//! writes are conditional on the version the writer read, so a lost
//! update surfaces as `StoreError::VersionConflict` instead of silently
//! discarding one writer's change.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use uuid::Uuid;

use crate::error::StoreError;

/// An entity snapshot together with the version it was read at.
#[derive(Debug, Clone)]
pub struct Versioned<T> {
    /// The entity snapshot.
    pub value: T,
    /// The version to pass back on the next conditional write.
    pub version: u64,
}

#[derive(Debug, Clone)]
struct Entry_<T> {
    version: u64,
    value: T,
}

/// A versioned, concurrency-safe collection of one entity kind.
#[derive(Debug)]
pub struct Collection<T> {
    name: &'static str,
    items: DashMap<Uuid, Entry_<T>>,
}

impl<T: Clone> Collection<T> {
    /// Creates an empty collection.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            items: DashMap::new(),
        }
    }

    /// Returns the collection name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Reads an entity snapshot with its current version.
    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<Versioned<T>> {
        self.items.get(&id).map(|entry| Versioned {
            value: entry.value.clone(),
            version: entry.version,
        })
    }

    /// Inserts a new entity at version 1.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::AlreadyExists` if the id is taken.
    pub fn insert(&self, id: Uuid, value: T) -> Result<(), StoreError> {
        match self.items.entry(id) {
            Entry::Occupied(_) => Err(StoreError::AlreadyExists {
                entity: self.name,
                id: id.to_string(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(Entry_ { version: 1, value });
                Ok(())
            }
        }
    }

    /// Conditionally replaces an entity (compare-and-swap on version).
    ///
    /// Returns the new version on success.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the id is absent and
    /// `StoreError::VersionConflict` if the stored version moved past
    /// `expected_version`.
    pub fn put(&self, id: Uuid, value: T, expected_version: u64) -> Result<u64, StoreError> {
        match self.items.entry(id) {
            Entry::Occupied(mut slot) => {
                let actual = slot.get().version;
                if actual != expected_version {
                    return Err(StoreError::VersionConflict {
                        entity: self.name,
                        id: id.to_string(),
                        expected: expected_version,
                        actual,
                    });
                }
                let version = actual + 1;
                slot.insert(Entry_ { version, value });
                Ok(version)
            }
            Entry::Vacant(_) => Err(StoreError::NotFound {
                entity: self.name,
                id: id.to_string(),
            }),
        }
    }

    /// Returns all entities matching the predicate (insertion order is
    /// not guaranteed; callers sort as needed).
    #[must_use]
    pub fn query(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.items
            .iter()
            .filter(|entry| predicate(&entry.value))
            .map(|entry| entry.value.clone())
            .collect()
    }

    /// Counts entities matching the predicate.
    #[must_use]
    pub fn count(&self, predicate: impl Fn(&T) -> bool) -> usize {
        self.items
            .iter()
            .filter(|entry| predicate(&entry.value))
            .count()
    }

    /// Removes an entity, returning it if present.
    #[must_use]
    pub fn remove(&self, id: Uuid) -> Option<T> {
        self.items.remove(&id).map(|(_, entry)| entry.value)
    }

    /// Returns true if the collection holds no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
