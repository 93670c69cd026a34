//! Database fixtures for integration tests. Fixtures go straight through
//! the repository layer; the HTTP surface under test is driven separately.
#![allow(dead_code)]

use axum::http::StatusCode;
use axum::Router;
use chrono::{Duration, NaiveDate, Utc};
use sqlx::PgPool;

use fibreops_core::stages::STAGE_CATALOG;
use fibreops_core::types::DbId;
use fibreops_db::models::assignment::CreateAssignment;
use fibreops_db::models::compliance::CreateBbbeeCertificate;
use fibreops_db::models::contractor::{Contractor, CreateContractor};
use fibreops_db::models::document::CreateDocument;
use fibreops_db::models::insurance::CreateInsurancePolicy;
use fibreops_db::models::safety::CreateSafetyCertification;
use fibreops_db::models::team::CreateTeam;
use fibreops_db::repositories::{
    AssignmentRepo, ComplianceRepo, ContractorRepo, DocumentRepo, InsuranceRepo, SafetyRepo,
    TeamRepo,
};

use super::put_json;

/// A date `days` from today (negative for the past).
pub fn days_from_now(days: i64) -> NaiveDate {
    Utc::now().date_naive() + Duration::days(days)
}

/// Register a contractor with default scoring attributes.
pub async fn register_contractor(pool: &PgPool, name: &str, registration: &str) -> Contractor {
    ContractorRepo::create(
        pool,
        &CreateContractor {
            company_name: name.to_string(),
            registration_number: registration.to_string(),
            years_in_business: None,
            payment_history_score: None,
            credit_rating_score: None,
            insurance_verified: None,
            bonding_capacity: None,
            equipment_rating: None,
            communication_rating: None,
        },
    )
    .await
    .unwrap()
}

/// Register a contractor with strong scoring attributes and deep history.
pub async fn register_strong_contractor(
    pool: &PgPool,
    name: &str,
    registration: &str,
) -> Contractor {
    let contractor = ContractorRepo::create(
        pool,
        &CreateContractor {
            company_name: name.to_string(),
            registration_number: registration.to_string(),
            years_in_business: Some(15),
            payment_history_score: Some(95.0),
            credit_rating_score: Some(90.0),
            insurance_verified: Some(true),
            bonding_capacity: Some(true),
            equipment_rating: Some(92.0),
            communication_rating: Some(90.0),
        },
    )
    .await
    .unwrap();

    for i in 0..30 {
        AssignmentRepo::create(
            pool,
            contractor.id,
            &CreateAssignment {
                project_id: i + 1,
                status: Some("completed".to_string()),
                quality_score: Some(95.0),
                timeliness_score: Some(92.0),
                performance_rating: Some(94.0),
                contract_value: Some(2_500_000.0),
            },
        )
        .await
        .unwrap();
    }

    for (team_type, skill, years) in [
        ("splicing", "expert", 6.0),
        ("civils", "senior", 8.0),
        ("planning", "senior", 5.0),
        ("maintenance", "expert", 4.0),
    ] {
        TeamRepo::create(
            pool,
            contractor.id,
            &CreateTeam {
                name: format!("{team_type} crew"),
                team_type: team_type.to_string(),
                skill_level: skill.to_string(),
                member_count: Some(6),
                years_active: Some(years),
            },
        )
        .await
        .unwrap();
    }

    for i in 0..6 {
        SafetyRepo::create_certification(
            pool,
            contractor.id,
            &CreateSafetyCertification {
                name: format!("Safety cert {i}"),
                expiry_date: days_from_now(400),
            },
        )
        .await
        .unwrap();
    }

    contractor
}

/// Upload a document and optionally move it past `pending`.
pub async fn upload_document(
    pool: &PgPool,
    contractor_id: DbId,
    document_type: &str,
    verification_status: &str,
    expiry: Option<NaiveDate>,
) {
    let doc = DocumentRepo::create(
        pool,
        contractor_id,
        &CreateDocument {
            document_type: document_type.to_string(),
            file_name: format!("{document_type}.pdf"),
            expiry_date: expiry,
        },
    )
    .await
    .unwrap();

    if verification_status != "pending" {
        DocumentRepo::set_verification(pool, doc.id, verification_status)
            .await
            .unwrap()
            .unwrap();
    }
}

/// Upload a verified, long-dated document for every required type except
/// those listed in `except`.
pub async fn seed_verified_documents(pool: &PgPool, contractor_id: DbId, except: &[&str]) {
    for doc_type in fibreops_core::stages::all_required_document_types() {
        if except.contains(&doc_type) {
            continue;
        }
        upload_document(pool, contractor_id, doc_type, "verified", Some(days_from_now(365)))
            .await;
    }
}

/// Record a verified insurance policy.
pub async fn add_policy(pool: &PgPool, contractor_id: DbId, policy_type: &str, expiry: NaiveDate) {
    InsuranceRepo::create(
        pool,
        contractor_id,
        &CreateInsurancePolicy {
            policy_type: policy_type.to_string(),
            provider: "Santam".to_string(),
            policy_number: format!("POL-{policy_type}"),
            expiry_date: expiry,
            verified: Some(true),
        },
    )
    .await
    .unwrap();
}

/// Record a BBBEE certificate.
pub async fn add_bbbee(pool: &PgPool, contractor_id: DbId, expiry: NaiveDate) {
    ComplianceRepo::upsert_bbbee(
        pool,
        contractor_id,
        &CreateBbbeeCertificate {
            level: 2,
            issued_on: days_from_now(-300),
            expiry_date: expiry,
        },
    )
    .await
    .unwrap();
}

/// Record a safety certification.
pub async fn add_safety_cert(pool: &PgPool, contractor_id: DbId, name: &str, expiry: NaiveDate) {
    SafetyRepo::create_certification(
        pool,
        contractor_id,
        &CreateSafetyCertification {
            name: name.to_string(),
            expiry_date: expiry,
        },
    )
    .await
    .unwrap();
}

/// Complete every required checklist item through the HTTP surface.
pub async fn complete_required_items(app: &Router, contractor_id: DbId) {
    for stage in STAGE_CATALOG {
        for item in stage.checklist.iter().filter(|i| i.required) {
            let response = put_json(
                app.clone(),
                &format!(
                    "/api/v1/contractors/{contractor_id}/onboarding/stages/{}/items/{}",
                    stage.id, item.id
                ),
                serde_json::json!({ "completed": true }),
            )
            .await;
            assert_eq!(
                response.status(),
                StatusCode::OK,
                "failed to complete item '{}'",
                item.id
            );
        }
    }
}
