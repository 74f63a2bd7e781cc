//! Concurrent-write tests for the versioned store.
//!
//! A transition reads a snapshot, validates, and writes back
//! conditionally on the version it read. These tests pin one writer
//! between its read and its write (by parking it inside the renderer
//! collaborator) while a second writer commits, and assert that the
//! race surfaces as an explicit conflict the caller can retry.

mod support;

use std::sync::Arc;

use rust_decimal_macros::dec;

use douane_core::control::types::{
    ComplianceCheckItem, ComplianceStatus, Control, ControlStatus, NonComplianceInput,
    NonComplianceType,
};
use douane_store::MemoryStore;

use support::{GatedRenderer, control_repo_with_renderer, officer};

fn findings() -> NonComplianceInput {
    NonComplianceInput {
        non_compliance_type: NonComplianceType::Origin,
        details: "Origine déclarée non justifiée".to_string(),
        fiscal_impact: dec!(12000),
        applicable_regulation: "CD-215".to_string(),
    }
}

fn one_non_compliant(control: &Control) -> Vec<ComplianceCheckItem> {
    let mut checks = control.compliance_checks.clone();
    for check in &mut checks {
        check.status = ComplianceStatus::Compliant;
    }
    checks[2].status = ComplianceStatus::NonCompliant;
    checks
}

#[tokio::test]
async fn test_lost_update_fails_explicitly_and_retry_succeeds() {
    let store = Arc::new(MemoryStore::new());
    let gate = Arc::new(GatedRenderer::new());
    let repo = control_repo_with_renderer(&store, gate.clone());
    let actor = officer("C. Leroy");

    let control = repo.create("IM-2024-0042", &actor).await.unwrap();
    let control = repo
        .update_compliance(control.id, one_non_compliant(&control), &actor)
        .await
        .unwrap();
    let control_id = control.id;

    // First writer reads the snapshot, then parks inside the renderer
    let first = tokio::spawn({
        let repo = repo.clone();
        let actor = actor.clone();
        async move { repo.record_non_compliance(control_id, findings(), &actor).await }
    });
    gate.wait_entered().await;

    // Second writer commits in between, bumping the stored version
    repo.update_compliance(control_id, one_non_compliant(&control), &actor)
        .await
        .unwrap();

    // The parked writer's conditional write now loses, explicitly
    gate.release();
    let err = first.await.unwrap().unwrap_err();
    assert_eq!(err.error_code(), "CONFLICT");

    // The loser's changes were not persisted
    let current = repo.get(control_id, &actor).await.unwrap();
    assert_eq!(current.status, ControlStatus::NonCompliant);
    assert!(current.fiscal_impact.is_none());
    assert!(current.certificate.is_none());

    // Retrying against the fresh snapshot goes through
    let retried = repo
        .record_non_compliance(control_id, findings(), &actor)
        .await
        .unwrap();
    assert_eq!(retried.status, ControlStatus::CertificateGenerated);
    assert!(retried.certificate.is_some());
}

#[tokio::test]
async fn test_independent_controls_do_not_contend() {
    let store = Arc::new(MemoryStore::new());
    let gate = Arc::new(GatedRenderer::new());
    let repo = control_repo_with_renderer(&store, gate.clone());
    let actor = officer("C. Leroy");

    let a = repo.create("IM-2024-0001", &actor).await.unwrap();
    let b = repo.create("IM-2024-0002", &actor).await.unwrap();
    let a = repo
        .update_compliance(a.id, one_non_compliant(&a), &actor)
        .await
        .unwrap();

    // One control is mid-transition; the other is free to move
    let first = tokio::spawn({
        let repo = repo.clone();
        let actor = actor.clone();
        let id = a.id;
        async move { repo.record_non_compliance(id, findings(), &actor).await }
    });
    gate.wait_entered().await;

    let b = repo
        .update_compliance(b.id, one_non_compliant(&b), &actor)
        .await
        .unwrap();
    assert_eq!(b.status, ControlStatus::NonCompliant);

    gate.release();
    let a = first.await.unwrap().unwrap();
    assert_eq!(a.status, ControlStatus::CertificateGenerated);
}
