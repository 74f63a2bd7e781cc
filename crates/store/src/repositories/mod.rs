//! Repository abstractions for data access.
//!
//! One repository per aggregate. `DocumentRepository` and
//! `ControlRepository` additionally orchestrate their workflows: read the
//! current snapshot, validate and mutate through the core state machine,
//! call the collaborators, and write back conditionally.

pub mod controls;
pub mod declarations;
pub mod document_types;
pub mod documents;
pub mod fines;
pub mod regulations;
pub mod templates;
pub mod users;

pub use controls::ControlRepository;
pub use declarations::DeclarationRepository;
pub use document_types::DocumentTypeRepository;
pub use documents::DocumentRepository;
pub use fines::FineRepository;
pub use regulations::RegulationRepository;
pub use templates::TemplateRepository;
pub use users::UserRepository;
