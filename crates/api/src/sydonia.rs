//! Stub Sydonia declaration source.
//!
//! The real customs declaration system is not reachable from this
//! backend; as in the original integration, lookups return canned data
//! for any declaration number. The workflow only ever talks to the
//! `DeclarationSource` trait, so swapping in a live client later is a
//! wiring change.

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use douane_core::declaration::{Declaration, DeclarationError, DeclarationSource};

/// Canned declaration source standing in for Sydonia.
#[derive(Debug, Clone, Default)]
pub struct SydoniaStub;

impl SydoniaStub {
    /// Creates a new stub.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DeclarationSource for SydoniaStub {
    async fn fetch(&self, declaration_id: &str) -> Result<Declaration, DeclarationError> {
        Ok(Declaration {
            id: Uuid::new_v4(),
            declaration_id: declaration_id.to_string(),
            importer_name: "SARL Import Export NC".to_string(),
            importer_address: "123 Rue de la Paix, Nouméa".to_string(),
            goods_description: "Matériel informatique".to_string(),
            origin_country: "France".to_string(),
            value_cfr: Decimal::new(45_000, 0),
            customs_regime: "Importation définitive".to_string(),
            declaration_date: "2024-01-15".to_string(),
            customs_office: "Nouméa-Port".to_string(),
            tariff_code: Some("8471.30.00".to_string()),
            weight: Some(Decimal::new(2505, 1)),
            quantity: Some(10),
            created_at: Utc::now(),
        })
    }
}
