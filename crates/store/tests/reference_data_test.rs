//! Integration tests for templates and the document type registry.
//!
//! Covers the management role guards and the referential-integrity
//! rules: a template or registry entry still referenced by documents
//! cannot be deleted.

mod support;

use std::sync::Arc;

use serde_json::Map;
use uuid::Uuid;

use douane_core::document::types::{DocumentType, FieldKind, TemplateField};
use douane_store::repositories::document_types::DocumentTypeInput;
use douane_store::repositories::documents::NewDocument;
use douane_store::repositories::templates::TemplateInput;
use douane_store::{DocumentTypeRepository, MemoryStore, TemplateRepository, seed::seed_defaults};

use support::{agent, document_repo, moa, officer, validator};

fn transit_permit_entry() -> DocumentTypeInput {
    DocumentTypeInput {
        name: "Permis de transit".to_string(),
        description: "Autorisation de transit sous douane".to_string(),
        code: "transit_permit".to_string(),
    }
}

fn minimal_template(document_type: DocumentType) -> TemplateInput {
    TemplateInput {
        name: "Modèle de test".to_string(),
        document_type,
        fields: vec![TemplateField {
            name: "reference".to_string(),
            kind: FieldKind::Text,
            required: true,
            label: "Référence".to_string(),
            options: Vec::new(),
        }],
        checklist: vec!["Référence vérifiée".to_string()],
    }
}

fn document_on(template_id: Uuid, document_type: DocumentType) -> NewDocument {
    NewDocument {
        title: "Acte de test".to_string(),
        document_type,
        template_id,
        content: Map::new(),
    }
}

#[tokio::test]
async fn test_template_in_use_cannot_be_deleted() {
    let store = Arc::new(MemoryStore::new());
    seed_defaults(&store).unwrap();
    let templates = TemplateRepository::new(Arc::clone(&store));
    let (documents, _) = document_repo(&store);
    let manager = validator("V. Morel");

    let seeded = templates.list().await.unwrap();
    let in_use = seeded[0].id;
    let unused = seeded[1].id;

    documents
        .create(
            document_on(in_use, seeded[0].document_type.clone()),
            &agent("A. Dupont"),
        )
        .await
        .unwrap();

    let err = templates.delete(in_use, &manager).await.unwrap_err();
    assert_eq!(err.error_code(), "CONFLICT");
    assert!(templates.find_by_id(in_use).await.unwrap().is_some());

    templates.delete(unused, &manager).await.unwrap();
    assert_eq!(templates.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_template_management_requires_role() {
    let store = Arc::new(MemoryStore::new());
    let templates = TemplateRepository::new(Arc::clone(&store));

    let err = templates
        .create(
            minimal_template(DocumentType::CustomsReport),
            &agent("A. Dupont"),
        )
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "FORBIDDEN");

    let err = templates
        .create(
            minimal_template(DocumentType::CustomsReport),
            &officer("C. Leroy"),
        )
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "FORBIDDEN");

    templates
        .create(
            minimal_template(DocumentType::CustomsReport),
            &validator("V. Morel"),
        )
        .await
        .unwrap();
    templates
        .create(minimal_template(DocumentType::CustomsReport), &moa("M. Admin"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_registry_codes_are_unique() {
    let store = Arc::new(MemoryStore::new());
    let registry = DocumentTypeRepository::new(Arc::clone(&store));
    let admin = moa("M. Admin");

    registry.create(transit_permit_entry(), &admin).await.unwrap();
    let err = registry
        .create(transit_permit_entry(), &admin)
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "CONFLICT");
}

#[tokio::test]
async fn test_registry_management_is_moa_only() {
    let store = Arc::new(MemoryStore::new());
    let registry = DocumentTypeRepository::new(Arc::clone(&store));

    for actor in [
        agent("A. Dupont"),
        officer("C. Leroy"),
        validator("V. Morel"),
    ] {
        let err = registry
            .create(transit_permit_entry(), &actor)
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "FORBIDDEN");
    }
}

#[tokio::test]
async fn test_registry_entry_in_use_cannot_be_deleted() {
    let store = Arc::new(MemoryStore::new());
    seed_defaults(&store).unwrap();
    let registry = DocumentTypeRepository::new(Arc::clone(&store));
    let templates = TemplateRepository::new(Arc::clone(&store));
    let (documents, _) = document_repo(&store);
    let admin = moa("M. Admin");

    let entry = registry.create(transit_permit_entry(), &admin).await.unwrap();
    let custom = DocumentType::Custom("transit_permit".to_string());

    // A registered code is usable for templates and documents
    let template = templates
        .create(minimal_template(custom.clone()), &validator("V. Morel"))
        .await
        .unwrap();
    documents
        .create(
            document_on(template.id, custom.clone()),
            &agent("A. Dupont"),
        )
        .await
        .unwrap();

    let err = registry.delete(entry.id, &admin).await.unwrap_err();
    assert_eq!(err.error_code(), "CONFLICT");

    // An unused entry deletes cleanly
    let unused = registry
        .create(
            DocumentTypeInput {
                name: "Main levée".to_string(),
                description: "Levée de retenue de marchandises".to_string(),
                code: "release_order".to_string(),
            },
            &admin,
        )
        .await
        .unwrap();
    registry.delete(unused.id, &admin).await.unwrap();
}

#[tokio::test]
async fn test_unregistered_code_rejected_for_templates() {
    let store = Arc::new(MemoryStore::new());
    let templates = TemplateRepository::new(Arc::clone(&store));

    let err = templates
        .create(
            minimal_template(DocumentType::Custom("transit_permit".to_string())),
            &validator("V. Morel"),
        )
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "INVALID_INPUT");
}
