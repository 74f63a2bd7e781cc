//! Customs control lifecycle.
//!
//! A control is a compliance inspection of an import declaration: a
//! checklist is worked through, non-compliance is certified, the
//! declarant acknowledges, and the control ends either passed over or
//! with a customs fine.
//!
//! # Modules
//!
//! - `types` - Control domain types (statuses, checklist, fines)
//! - `error` - Control-specific error types
//! - `workflow` - State transition logic and visibility rules

pub mod error;
pub mod types;
pub mod workflow;

pub use error::ControlError;
pub use types::{
    ComplianceCheckItem, ComplianceStatus, Control, ControlStatus, CustomsFine, FineDecision,
    FineStatus, NonComplianceInput, NonComplianceType, Regulation,
};
pub use workflow::{ControlWorkflow, DeclarantOutcome};
