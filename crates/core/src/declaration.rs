//! Import declaration snapshots and the external lookup port.
//!
//! A `Declaration` is the factual basis of a control: it is fetched once
//! from the external declaration source (Sydonia) when the control is
//! created, persisted verbatim, and never re-synced afterwards.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Immutable snapshot of an import declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Declaration {
    /// Internal snapshot ID.
    pub id: Uuid,
    /// External declaration number (unique in the source system).
    pub declaration_id: String,
    /// Importer company name.
    pub importer_name: String,
    /// Importer postal address.
    pub importer_address: String,
    /// Description of the declared goods.
    pub goods_description: String,
    /// Declared country of origin.
    pub origin_country: String,
    /// Declared CFR value.
    pub value_cfr: Decimal,
    /// Customs regime under which the goods enter.
    pub customs_regime: String,
    /// Declaration date as recorded by the source (YYYY-MM-DD).
    pub declaration_date: String,
    /// Customs office handling the declaration.
    pub customs_office: String,
    /// Tariff classification code, when provided.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tariff_code: Option<String>,
    /// Declared gross weight in kilograms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<Decimal>,
    /// Declared quantity of units.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    /// When the snapshot was taken.
    pub created_at: DateTime<Utc>,
}

/// Errors surfaced by the declaration source.
#[derive(Debug, Error)]
pub enum DeclarationError {
    /// No declaration with this number exists in the source.
    #[error("declaration {0} not found")]
    NotFound(String),

    /// The lookup itself failed.
    #[error("declaration lookup failed: {0}")]
    Lookup(String),
}

impl From<DeclarationError> for douane_shared::AppError {
    fn from(err: DeclarationError) -> Self {
        match err {
            DeclarationError::NotFound(_) => Self::NotFound(err.to_string()),
            DeclarationError::Lookup(_) => Self::ExternalService(err.to_string()),
        }
    }
}

/// External declaration source.
///
/// The production implementation is a stub returning canned data (the
/// original integration was mocked); tests plug in their own doubles.
#[async_trait]
pub trait DeclarationSource: Send + Sync {
    /// Fetches declaration data by its external number.
    async fn fetch(&self, declaration_id: &str) -> Result<Declaration, DeclarationError>;
}
