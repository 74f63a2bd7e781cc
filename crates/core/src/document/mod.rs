//! Administrative document lifecycle.
//!
//! A document is drafted by a drafting agent against a template, then
//! moves through control and validation. The state machine, its guards,
//! and the audit entries each transition produces live here.
//!
//! # Modules
//!
//! - `types` - Document domain types (statuses, templates, the aggregate)
//! - `error` - Document-specific error types
//! - `workflow` - State transition logic and visibility rules

pub mod error;
pub mod types;
pub mod workflow;

pub use error::DocumentError;
pub use types::{
    Document, DocumentStatus, DocumentTemplate, DocumentType, FieldKind, TemplateField,
};
pub use workflow::{Assignee, CreateDocumentInput, DocumentUpdate, DocumentWorkflow};
