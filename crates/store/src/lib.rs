//! Versioned in-memory document store and repositories.
//!
//! This crate provides:
//! - A document-oriented store keyed by entity id, one collection per
//!   aggregate, with compare-and-swap writes
//! - Repository abstractions for data access; the workflow repositories
//!   orchestrate fetch → validate (core) → mutate → conditional write
//! - Seeding of default templates and regulations

pub mod collection;
pub mod entities;
pub mod error;
pub mod repositories;
pub mod seed;

pub use collection::{Collection, Versioned};
pub use error::StoreError;
pub use repositories::{
    ControlRepository, DeclarationRepository, DocumentRepository, DocumentTypeRepository,
    FineRepository, RegulationRepository, TemplateRepository, UserRepository,
};

use douane_core::control::types::{Control, CustomsFine, Regulation};
use douane_core::declaration::Declaration;
use douane_core::document::types::{Document, DocumentTemplate};

use crate::entities::{DocumentTypeEntry, User};

/// The in-process document store.
///
/// Constructed once per process lifetime and handed to the repositories
/// at construction time. All collections are safe for concurrent use;
/// single-entity races are resolved by the conditional writes.
#[derive(Debug)]
pub struct MemoryStore {
    pub(crate) users: Collection<User>,
    pub(crate) documents: Collection<Document>,
    pub(crate) templates: Collection<DocumentTemplate>,
    pub(crate) document_types: Collection<DocumentTypeEntry>,
    pub(crate) regulations: Collection<Regulation>,
    pub(crate) declarations: Collection<Declaration>,
    pub(crate) controls: Collection<Control>,
    pub(crate) fines: Collection<CustomsFine>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            users: Collection::new("users"),
            documents: Collection::new("documents"),
            templates: Collection::new("templates"),
            document_types: Collection::new("document_types"),
            regulations: Collection::new("regulations"),
            declarations: Collection::new("declarations"),
            controls: Collection::new("controls"),
            fines: Collection::new("fines"),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}
