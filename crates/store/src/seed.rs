//! Default reference data seeding.
//!
//! Inserts the default document templates and customs regulations on an
//! empty store. Idempotent: collections that already hold data are left
//! alone.

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use douane_core::control::types::Regulation;
use douane_core::document::types::{
    DocumentTemplate, DocumentType, FieldKind, TemplateField,
};
use douane_shared::AppResult;

use crate::MemoryStore;

/// Seeds default templates and regulations if missing.
pub fn seed_defaults(store: &MemoryStore) -> AppResult<()> {
    if store.templates.is_empty() {
        for template in default_templates() {
            store.templates.insert(template.id, template)?;
        }
        info!("Seeded default document templates");
    }
    if store.regulations.is_empty() {
        for regulation in default_regulations() {
            store.regulations.insert(regulation.id, regulation)?;
        }
        info!("Seeded default regulations");
    }
    Ok(())
}

fn text(name: &str, label: &str) -> TemplateField {
    TemplateField {
        name: name.to_string(),
        kind: FieldKind::Text,
        required: true,
        label: label.to_string(),
        options: Vec::new(),
    }
}

fn field(name: &str, kind: FieldKind, label: &str) -> TemplateField {
    TemplateField {
        name: name.to_string(),
        kind,
        required: true,
        label: label.to_string(),
        options: Vec::new(),
    }
}

fn default_templates() -> Vec<DocumentTemplate> {
    let now = Utc::now();
    vec![
        DocumentTemplate {
            id: Uuid::new_v4(),
            name: "Rapport de contrôle douanier".to_string(),
            document_type: DocumentType::CustomsReport,
            fields: vec![
                text("declaration_id", "N° Déclaration"),
                text("importer_name", "Nom importateur"),
                field("control_date", FieldKind::Date, "Date contrôle"),
                field("findings", FieldKind::Textarea, "Constatations"),
                TemplateField {
                    name: "decision".to_string(),
                    kind: FieldKind::Select,
                    required: true,
                    label: "Décision".to_string(),
                    options: vec![
                        "Conforme".to_string(),
                        "Non-conforme".to_string(),
                        "Complément d'enquête".to_string(),
                    ],
                },
            ],
            checklist: vec![
                "Vérification identité importateur".to_string(),
                "Contrôle cohérence déclaration/marchandises".to_string(),
                "Vérification origine marchandises".to_string(),
                "Contrôle valeur déclarée".to_string(),
                "Vérification classement tarifaire".to_string(),
            ],
            created_at: now,
        },
        DocumentTemplate {
            id: Uuid::new_v4(),
            name: "Acte administratif de saisie".to_string(),
            document_type: DocumentType::AdministrativeAct,
            fields: vec![
                field("seizure_date", FieldKind::Date, "Date saisie"),
                text("location", "Lieu"),
                field(
                    "goods_description",
                    FieldKind::Textarea,
                    "Description marchandises",
                ),
                text("legal_basis", "Base légale"),
                field("estimated_value", FieldKind::Number, "Valeur estimée"),
            ],
            checklist: vec![
                "Présence témoin".to_string(),
                "Inventaire détaillé marchandises".to_string(),
                "Photos prises".to_string(),
                "Notification intéressé".to_string(),
                "Mise sous séquestre".to_string(),
            ],
            created_at: now,
        },
    ]
}

fn default_regulations() -> Vec<Regulation> {
    let now = Utc::now();
    vec![
        Regulation {
            id: Uuid::new_v4(),
            code: "CD-215".to_string(),
            title: "Fausse déclaration d'origine".to_string(),
            description: "Déclaration erronée du pays d'origine des marchandises".to_string(),
            category: "Origin".to_string(),
            fine_rate: Decimal::new(15, 2),
            created_at: now,
        },
        Regulation {
            id: Uuid::new_v4(),
            code: "CD-230".to_string(),
            title: "Sous-évaluation".to_string(),
            description: "Déclaration d'une valeur inférieure à la valeur réelle".to_string(),
            category: "Value".to_string(),
            fine_rate: Decimal::new(25, 2),
            created_at: now,
        },
        Regulation {
            id: Uuid::new_v4(),
            code: "CD-182".to_string(),
            title: "Fausse déclaration d'espèce".to_string(),
            description: "Classification tarifaire incorrecte des marchandises".to_string(),
            category: "Classification".to_string(),
            fine_rate: Decimal::new(20, 2),
            created_at: now,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_populates_empty_store() {
        let store = MemoryStore::new();
        seed_defaults(&store).unwrap();

        assert_eq!(store.templates.count(|_| true), 2);
        assert_eq!(store.regulations.count(|_| true), 3);
    }

    #[test]
    fn test_seed_is_idempotent() {
        let store = MemoryStore::new();
        seed_defaults(&store).unwrap();
        seed_defaults(&store).unwrap();

        assert_eq!(store.templates.count(|_| true), 2);
        assert_eq!(store.regulations.count(|_| true), 3);
    }
}
