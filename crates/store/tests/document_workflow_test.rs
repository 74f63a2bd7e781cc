//! Integration tests for the document repository.
//!
//! Walks the drafting lifecycle against the in-memory store: creation
//! from a seeded template, partial updates, submission, the review
//! chain, list scoping per role, and on-demand rendering.

mod support;

use std::sync::Arc;

use serde_json::{Map, Value, json};
use uuid::Uuid;

use douane_core::artifact::ArtifactRenderer;
use douane_core::document::types::{DocumentStatus, DocumentType};
use douane_store::repositories::documents::{DocumentPatch, NewDocument};
use douane_store::{MemoryStore, TemplateRepository, seed::seed_defaults};

use support::{agent, document_repo, officer, validator};

async fn report_template_id(store: &Arc<MemoryStore>) -> Uuid {
    seed_defaults(store).unwrap();
    TemplateRepository::new(Arc::clone(store))
        .list()
        .await
        .unwrap()
        .into_iter()
        .find(|t| t.document_type == DocumentType::CustomsReport)
        .unwrap()
        .id
}

fn new_report(template_id: Uuid) -> NewDocument {
    let mut content = Map::new();
    content.insert("declaration_id".to_string(), json!("IM-2024-0042"));
    content.insert("importer_name".to_string(), json!("Société Pacifique Import"));
    NewDocument {
        title: "Rapport de contrôle mars".to_string(),
        document_type: DocumentType::CustomsReport,
        template_id,
        content,
    }
}

#[tokio::test]
async fn test_drafting_to_validated_chain() {
    let store = Arc::new(MemoryStore::new());
    let template_id = report_template_id(&store).await;
    let (repo, _) = document_repo(&store);
    let creator = agent("A. Dupont");
    let reviewer = validator("V. Morel");

    let doc = repo.create(new_report(template_id), &creator).await.unwrap();
    assert_eq!(doc.status, DocumentStatus::Draft);
    assert_eq!(doc.history.len(), 1);

    let doc = repo
        .update(
            doc.id,
            DocumentPatch {
                title: Some("Rapport de contrôle mars (révisé)".to_string()),
                ..DocumentPatch::default()
            },
            &creator,
        )
        .await
        .unwrap();
    assert_eq!(doc.title, "Rapport de contrôle mars (révisé)");
    assert_eq!(doc.history.len(), 2);

    let doc = repo.submit(doc.id, &creator).await.unwrap();
    assert_eq!(doc.status, DocumentStatus::UnderControl);
    assert_eq!(doc.history.last().unwrap().action, "submitted_for_control");

    // Review roles walk the chain one step at a time
    let doc = repo
        .update(
            doc.id,
            DocumentPatch {
                status: Some(DocumentStatus::UnderValidation),
                ..DocumentPatch::default()
            },
            &reviewer,
        )
        .await
        .unwrap();
    let doc = repo
        .update(
            doc.id,
            DocumentPatch {
                status: Some(DocumentStatus::Validated),
                ..DocumentPatch::default()
            },
            &reviewer,
        )
        .await
        .unwrap();

    assert_eq!(doc.status, DocumentStatus::Validated);
    assert_eq!(doc.history.len(), 5);
}

#[tokio::test]
async fn test_status_skip_is_rejected() {
    let store = Arc::new(MemoryStore::new());
    let template_id = report_template_id(&store).await;
    let (repo, _) = document_repo(&store);
    let creator = agent("A. Dupont");

    let doc = repo.create(new_report(template_id), &creator).await.unwrap();

    for target in [DocumentStatus::UnderValidation, DocumentStatus::Validated] {
        let err = repo
            .update(
                doc.id,
                DocumentPatch {
                    status: Some(target),
                    ..DocumentPatch::default()
                },
                &creator,
            )
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_STATE");
    }

    let unchanged = repo.get(doc.id, &creator).await.unwrap();
    assert_eq!(unchanged.status, DocumentStatus::Draft);
    assert_eq!(unchanged.history.len(), 1);
}

#[tokio::test]
async fn test_create_requires_resolvable_template() {
    let store = Arc::new(MemoryStore::new());
    seed_defaults(&store).unwrap();
    let (repo, _) = document_repo(&store);

    let err = repo
        .create(new_report(Uuid::new_v4()), &agent("A. Dupont"))
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "NOT_FOUND");
}

#[tokio::test]
async fn test_custom_type_must_resolve_in_registry() {
    let store = Arc::new(MemoryStore::new());
    let template_id = report_template_id(&store).await;
    let (repo, _) = document_repo(&store);

    let mut input = new_report(template_id);
    input.document_type = DocumentType::Custom("transit_permit".to_string());

    let err = repo.create(input, &agent("A. Dupont")).await.unwrap_err();
    assert_eq!(err.error_code(), "INVALID_INPUT");
}

#[tokio::test]
async fn test_agent_locked_out_after_submit() {
    let store = Arc::new(MemoryStore::new());
    let template_id = report_template_id(&store).await;
    let (repo, _) = document_repo(&store);
    let creator = agent("A. Dupont");

    let doc = repo.create(new_report(template_id), &creator).await.unwrap();
    repo.submit(doc.id, &creator).await.unwrap();

    let err = repo
        .update(
            doc.id,
            DocumentPatch {
                title: Some("Trop tard".to_string()),
                ..DocumentPatch::default()
            },
            &creator,
        )
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "FORBIDDEN");
}

#[tokio::test]
async fn test_list_scoping_per_role() {
    let store = Arc::new(MemoryStore::new());
    let template_id = report_template_id(&store).await;
    let (repo, _) = document_repo(&store);
    let dupont = agent("A. Dupont");
    let perrin = agent("B. Perrin");
    let reviewer = officer("C. Leroy");

    let d1 = repo.create(new_report(template_id), &dupont).await.unwrap();
    repo.create(new_report(template_id), &perrin).await.unwrap();

    // Drafting agents only list their own documents
    let listed = repo.list(&dupont).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, d1.id);

    // Drafts are invisible to control officers
    assert!(repo.list(&reviewer).await.unwrap().is_empty());

    // Once under control they appear in the officer's list
    repo.submit(d1.id, &dupont).await.unwrap();
    let listed = repo.list(&reviewer).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, d1.id);

    // Validation officers see everything
    assert_eq!(repo.list(&validator("V. Morel")).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_foreign_agent_cannot_view() {
    let store = Arc::new(MemoryStore::new());
    let template_id = report_template_id(&store).await;
    let (repo, _) = document_repo(&store);

    let doc = repo
        .create(new_report(template_id), &agent("A. Dupont"))
        .await
        .unwrap();

    let err = repo.get(doc.id, &agent("B. Perrin")).await.unwrap_err();
    assert_eq!(err.error_code(), "FORBIDDEN");
}

#[tokio::test]
async fn test_on_demand_rendering() {
    let store = Arc::new(MemoryStore::new());
    let template_id = report_template_id(&store).await;
    let (repo, renderer) = document_repo(&store);
    let creator = agent("A. Dupont");

    let doc = repo.create(new_report(template_id), &creator).await.unwrap();

    let reference = repo.render(doc.id, &creator).await.unwrap();
    let content = renderer.fetch(reference.id).await.unwrap();
    let html = String::from_utf8(content.bytes).unwrap();
    assert!(html.contains("Rapport de contrôle mars"));
    assert!(html.contains("IM-2024-0042"));

    // Rendering is guarded like a view
    let err = repo.render(doc.id, &agent("B. Perrin")).await.unwrap_err();
    assert_eq!(err.error_code(), "FORBIDDEN");
}

#[tokio::test]
async fn test_update_applies_only_set_fields() {
    let store = Arc::new(MemoryStore::new());
    let template_id = report_template_id(&store).await;
    let (repo, _) = document_repo(&store);
    let creator = agent("A. Dupont");

    let doc = repo.create(new_report(template_id), &creator).await.unwrap();
    let original_title = doc.title.clone();

    let mut content = Map::new();
    content.insert("findings".to_string(), Value::String("RAS".to_string()));
    let doc = repo
        .update(
            doc.id,
            DocumentPatch {
                content: Some(content),
                ..DocumentPatch::default()
            },
            &creator,
        )
        .await
        .unwrap();

    assert_eq!(doc.title, original_title);
    assert_eq!(doc.content.get("findings"), Some(&json!("RAS")));
    assert_eq!(
        doc.history.last().unwrap().details,
        Some(json!({ "changed": ["content"] }))
    );
}
