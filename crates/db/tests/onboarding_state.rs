//! Integration tests for the onboarding repository, in particular the
//! version-guarded checklist writes.

use sqlx::PgPool;

use fibreops_db::models::contractor::{CreateContractor, CONTRACTOR_STATUS_ACTIVE};
use fibreops_db::repositories::{ContractorRepo, OnboardingRepo};

fn contractor_input(name: &str, registration: &str) -> CreateContractor {
    CreateContractor {
        company_name: name.to_string(),
        registration_number: registration.to_string(),
        years_in_business: None,
        payment_history_score: None,
        credit_rating_score: None,
        insurance_verified: None,
        bonding_capacity: None,
        equipment_rating: None,
        communication_rating: None,
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn get_or_create_is_idempotent(pool: PgPool) {
    let contractor = ContractorRepo::create(&pool, &contractor_input("Fibre One", "2019/000001/07"))
        .await
        .unwrap();

    let first = OnboardingRepo::get_or_create(&pool, contractor.id).await.unwrap();
    let second = OnboardingRepo::get_or_create(&pool, contractor.id).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(first.version, 0);
    assert!(first.checklist_map().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn checklist_write_with_matching_version_succeeds(pool: PgPool) {
    let contractor = ContractorRepo::create(&pool, &contractor_input("Fibre One", "2019/000001/07"))
        .await
        .unwrap();
    let record = OnboardingRepo::get_or_create(&pool, contractor.id).await.unwrap();

    let updated = OnboardingRepo::set_checklist_item(
        &pool,
        contractor.id,
        record.version,
        "upload_tax_clearance",
        true,
    )
    .await
    .unwrap()
    .expect("matching version should win");

    assert_eq!(updated.version, record.version + 1);
    assert_eq!(updated.checklist_map().get("upload_tax_clearance"), Some(&true));
}

#[sqlx::test(migrations = "./migrations")]
async fn checklist_write_with_stale_version_returns_none(pool: PgPool) {
    let contractor = ContractorRepo::create(&pool, &contractor_input("Fibre One", "2019/000001/07"))
        .await
        .unwrap();
    let record = OnboardingRepo::get_or_create(&pool, contractor.id).await.unwrap();

    // First writer wins.
    OnboardingRepo::set_checklist_item(&pool, contractor.id, record.version, "a", true)
        .await
        .unwrap()
        .unwrap();

    // Second writer holds the stale version and must observe the conflict.
    let stale = OnboardingRepo::set_checklist_item(&pool, contractor.id, record.version, "b", true)
        .await
        .unwrap();
    assert!(stale.is_none());

    // Retrying against the fresh version succeeds and sees the first write.
    let fresh = OnboardingRepo::find_by_contractor(&pool, contractor.id)
        .await
        .unwrap()
        .unwrap();
    let updated = OnboardingRepo::set_checklist_item(&pool, contractor.id, fresh.version, "b", true)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.checklist_map().get("a"), Some(&true));
    assert_eq!(updated.checklist_map().get("b"), Some(&true));
}

#[sqlx::test(migrations = "./migrations")]
async fn approval_marks_clear_rejection_marks(pool: PgPool) {
    let contractor = ContractorRepo::create(&pool, &contractor_input("Fibre One", "2019/000001/07"))
        .await
        .unwrap();
    OnboardingRepo::get_or_create(&pool, contractor.id).await.unwrap();

    let rejected =
        OnboardingRepo::mark_rejected(&pool, contractor.id, "pm@example.com", "missing docs")
            .await
            .unwrap();
    assert_eq!(rejected.rejection_reason.as_deref(), Some("missing docs"));

    let approved = OnboardingRepo::mark_approved(&pool, contractor.id, "ops@example.com")
        .await
        .unwrap();
    assert_eq!(approved.approved_by.as_deref(), Some("ops@example.com"));
    assert!(approved.rejected_by.is_none());
    assert!(approved.rejection_reason.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn reset_replaces_checklist_and_clears_marks(pool: PgPool) {
    let contractor = ContractorRepo::create(&pool, &contractor_input("Fibre One", "2019/000001/07"))
        .await
        .unwrap();
    let record = OnboardingRepo::get_or_create(&pool, contractor.id).await.unwrap();
    OnboardingRepo::set_checklist_item(&pool, contractor.id, record.version, "a", true)
        .await
        .unwrap()
        .unwrap();
    OnboardingRepo::mark_rejected(&pool, contractor.id, "pm@example.com", "incomplete")
        .await
        .unwrap();

    let preserved = serde_json::json!({ "upload_tax_clearance": true });
    let reset = OnboardingRepo::reset(&pool, contractor.id, &preserved).await.unwrap();

    assert!(reset.rejected_by.is_none());
    assert!(reset.submitted_at.is_none());
    let map = reset.checklist_map();
    assert_eq!(map.len(), 1);
    assert_eq!(map.get("upload_tax_clearance"), Some(&true));
}

#[sqlx::test(migrations = "./migrations")]
async fn activation_write_keeps_status_and_flag_consistent(pool: PgPool) {
    let contractor = ContractorRepo::create(&pool, &contractor_input("Fibre One", "2019/000001/07"))
        .await
        .unwrap();
    assert!(!contractor.is_active);

    let activated =
        ContractorRepo::set_activation(&pool, contractor.id, CONTRACTOR_STATUS_ACTIVE, true)
            .await
            .unwrap()
            .unwrap();
    assert_eq!(activated.status, CONTRACTOR_STATUS_ACTIVE);
    assert!(activated.is_active);
}
