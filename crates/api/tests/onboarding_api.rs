//! End-to-end tests for the onboarding workflow: checklist progression,
//! submission gating, approval/rejection, and post-rejection reset.

mod common;

use axum::http::StatusCode;
use sqlx::PgPool;

use common::fixtures::{
    complete_required_items, register_contractor, seed_verified_documents, upload_document,
};
use common::{body_json, expect_status, get, post_json, put_json};

// ---------------------------------------------------------------------------
// Progress basics
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn initialize_creates_empty_progress(pool: PgPool) {
    let contractor = register_contractor(&pool, "Fibre One", "2019/000001/07").await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app.clone(),
        &format!("/api/v1/contractors/{}/onboarding/initialize", contractor.id),
        serde_json::json!({}),
    )
    .await;
    let json = expect_status(response, StatusCode::OK).await;

    let data = &json["data"];
    assert_eq!(data["contractor_id"], contractor.id);
    assert_eq!(data["completion_pct"], 0);
    assert_eq!(data["status"], "not_started");
    assert_eq!(data["current_stage"], 0);
    assert_eq!(data["total_stages"], 5);
    assert!(data["next_action"].is_string());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn progress_for_unknown_contractor_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/contractors/999999/onboarding").await;
    let json = expect_status(response, StatusCode::NOT_FOUND).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_with_unknown_stage_or_item_returns_404(pool: PgPool) {
    let contractor = register_contractor(&pool, "Fibre One", "2019/000001/07").await;
    let app = common::build_test_app(pool);

    let response = put_json(
        app.clone(),
        &format!(
            "/api/v1/contractors/{}/onboarding/stages/no_such_stage/items/upload_tax_clearance",
            contractor.id
        ),
        serde_json::json!({ "completed": true }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Item exists globally but belongs to a different stage.
    let response = put_json(
        app,
        &format!(
            "/api/v1/contractors/{}/onboarding/stages/company_registration/items/upload_safety_file",
            contractor.id
        ),
        serde_json::json!({ "completed": true }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn completing_items_advances_progress_monotonically(pool: PgPool) {
    let contractor = register_contractor(&pool, "Fibre One", "2019/000001/07").await;
    let app = common::build_test_app(pool);

    let mut last_pct = 0i64;
    for stage in fibreops_core::stages::STAGE_CATALOG {
        for item in stage.checklist.iter().filter(|i| i.required) {
            let response = put_json(
                app.clone(),
                &format!(
                    "/api/v1/contractors/{}/onboarding/stages/{}/items/{}",
                    contractor.id, stage.id, item.id
                ),
                serde_json::json!({ "completed": true }),
            )
            .await;
            let json = expect_status(response, StatusCode::OK).await;
            let pct = json["data"]["completion_pct"].as_i64().unwrap();
            assert!(pct >= last_pct, "completion went backwards: {last_pct} -> {pct}");
            last_pct = pct;
        }
    }

    assert_eq!(last_pct, 100);

    let response = get(
        app,
        &format!("/api/v1/contractors/{}/onboarding", contractor.id),
    )
    .await;
    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"]["status"], "completed");
    assert!(json["data"]["next_action"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn first_stage_completion_is_twenty_pct(pool: PgPool) {
    let contractor = register_contractor(&pool, "Fibre One", "2019/000001/07").await;
    let app = common::build_test_app(pool);

    for item in [
        "upload_registration_certificate",
        "upload_tax_clearance",
        "upload_director_ids",
    ] {
        put_json(
            app.clone(),
            &format!(
                "/api/v1/contractors/{}/onboarding/stages/company_registration/items/{item}",
                contractor.id
            ),
            serde_json::json!({ "completed": true }),
        )
        .await;
    }

    let response = get(
        app,
        &format!("/api/v1/contractors/{}/onboarding", contractor.id),
    )
    .await;
    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"]["completion_pct"], 20);
    assert_eq!(json["data"]["current_stage"], 1);
    assert_eq!(json["data"]["status"], "in_progress");
}

// ---------------------------------------------------------------------------
// Submission gating
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn submit_blocked_lists_pending_document_as_unverified(pool: PgPool) {
    let contractor = register_contractor(&pool, "Fibre One", "2019/000001/07").await;
    // Everything verified except the tax clearance, which stays pending.
    seed_verified_documents(&pool, contractor.id, &["tax_clearance_certificate"]).await;
    upload_document(&pool, contractor.id, "tax_clearance_certificate", "pending", None).await;

    let app = common::build_test_app(pool);
    complete_required_items(&app, contractor.id).await;

    let response = post_json(
        app,
        &format!("/api/v1/contractors/{}/onboarding/submit", contractor.id),
        serde_json::json!({}),
    )
    .await;
    let json = expect_status(response, StatusCode::BAD_REQUEST).await;

    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["completion_pct"], 100);
    assert_eq!(
        json["unverified_documents"],
        serde_json::json!(["tax_clearance_certificate"])
    );
    assert_eq!(json["missing_documents"], serde_json::json!([]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn submit_blocked_when_incomplete_lists_missing_documents(pool: PgPool) {
    let contractor = register_contractor(&pool, "Fibre One", "2019/000001/07").await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        &format!("/api/v1/contractors/{}/onboarding/submit", contractor.id),
        serde_json::json!({}),
    )
    .await;
    let json = expect_status(response, StatusCode::BAD_REQUEST).await;

    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["completion_pct"], 0);
    let missing = json["missing_documents"].as_array().unwrap();
    assert!(!missing.is_empty());
    assert!(json["unverified_documents"].as_array().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Approval
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn submit_then_approve_activates_contractor(pool: PgPool) {
    let contractor = register_contractor(&pool, "Fibre One", "2019/000001/07").await;
    seed_verified_documents(&pool, contractor.id, &[]).await;

    let app = common::build_test_app(pool);
    complete_required_items(&app, contractor.id).await;

    let response = post_json(
        app.clone(),
        &format!("/api/v1/contractors/{}/onboarding/submit", contractor.id),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_json(
        app.clone(),
        &format!("/api/v1/contractors/{}/onboarding/approve", contractor.id),
        serde_json::json!({ "approved_by": "ops@fibreops.example" }),
    )
    .await;
    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"]["status"], "approved");
    assert_eq!(json["data"]["approved_by"], "ops@fibreops.example");

    let response = get(app, &format!("/api/v1/contractors/{}", contractor.id)).await;
    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"]["status"], "active");
    assert_eq!(json["data"]["is_active"], true);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn approve_incomplete_fails_and_leaves_contractor_inactive(pool: PgPool) {
    let contractor = register_contractor(&pool, "Fibre One", "2019/000001/07").await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app.clone(),
        &format!("/api/v1/contractors/{}/onboarding/approve", contractor.id),
        serde_json::json!({ "approved_by": "ops@fibreops.example" }),
    )
    .await;
    let json = expect_status(response, StatusCode::CONFLICT).await;
    assert_eq!(json["code"], "PRECONDITION_FAILED");

    let response = get(app, &format!("/api/v1/contractors/{}", contractor.id)).await;
    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"]["is_active"], false);
}

// ---------------------------------------------------------------------------
// Rejection and reset
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn reject_requires_a_reason(pool: PgPool) {
    let contractor = register_contractor(&pool, "Fibre One", "2019/000001/07").await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        &format!("/api/v1/contractors/{}/onboarding/reject", contractor.id),
        serde_json::json!({ "rejected_by": "pm@fibreops.example", "reason": "  " }),
    )
    .await;
    let json = expect_status(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn reject_then_reset_preserves_valid_document_backed_items(pool: PgPool) {
    let contractor = register_contractor(&pool, "Fibre One", "2019/000001/07").await;
    // Only the three insurance documents are verified; everything else has
    // no backing document on file.
    for doc_type in [
        "public_liability_policy",
        "professional_indemnity_policy",
        "workers_compensation_policy",
    ] {
        upload_document(
            &pool,
            contractor.id,
            doc_type,
            "verified",
            Some(common::fixtures::days_from_now(365)),
        )
        .await;
    }

    let app = common::build_test_app(pool);
    complete_required_items(&app, contractor.id).await;

    let response = post_json(
        app.clone(),
        &format!("/api/v1/contractors/{}/onboarding/reject", contractor.id),
        serde_json::json!({ "rejected_by": "pm@fibreops.example", "reason": "References did not check out" }),
    )
    .await;
    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"]["status"], "rejected");
    assert_eq!(json["data"]["rejection_reason"], "References did not check out");

    let response = post_json(
        app.clone(),
        &format!("/api/v1/contractors/{}/onboarding/reset", contractor.id),
        serde_json::json!({}),
    )
    .await;
    let json = expect_status(response, StatusCode::OK).await;
    let data = &json["data"];
    assert_eq!(data["status"], "in_progress");

    // Collect per-item completion from the returned stages.
    let mut completed = std::collections::HashMap::new();
    for stage in data["stages"].as_array().unwrap() {
        for item in stage["checklist"].as_array().unwrap() {
            completed.insert(
                item["id"].as_str().unwrap().to_string(),
                item["completed"].as_bool().unwrap(),
            );
        }
    }

    // Insurance items keep their still-valid documents.
    assert_eq!(completed["upload_public_liability"], true);
    assert_eq!(completed["upload_professional_indemnity"], true);
    assert_eq!(completed["upload_workers_compensation"], true);
    // Items without a valid backing document revert.
    assert_eq!(completed["upload_registration_certificate"], false);
    assert_eq!(completed["upload_safety_file"], false);

    let response = get(app, &format!("/api/v1/contractors/{}", contractor.id)).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "onboarding");
    assert_eq!(json["data"]["is_active"], false);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn checklist_is_frozen_after_rejection(pool: PgPool) {
    let contractor = register_contractor(&pool, "Fibre One", "2019/000001/07").await;
    let app = common::build_test_app(pool);

    post_json(
        app.clone(),
        &format!("/api/v1/contractors/{}/onboarding/reject", contractor.id),
        serde_json::json!({ "rejected_by": "pm@fibreops.example", "reason": "Duplicate registration" }),
    )
    .await;

    let response = put_json(
        app,
        &format!(
            "/api/v1/contractors/{}/onboarding/stages/company_registration/items/upload_tax_clearance",
            contractor.id
        ),
        serde_json::json!({ "completed": true }),
    )
    .await;
    let json = expect_status(response, StatusCode::CONFLICT).await;
    assert_eq!(json["code"], "PRECONDITION_FAILED");
}

// ---------------------------------------------------------------------------
// Bulk progress
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn bulk_progress_skips_failed_contractors(pool: PgPool) {
    let a = register_contractor(&pool, "Fibre One", "2019/000001/07").await;
    let b = register_contractor(&pool, "Fibre Two", "2020/000002/07").await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/onboarding/bulk-progress",
        serde_json::json!({ "contractor_ids": [a.id, 999999, b.id] }),
    )
    .await;
    let json = expect_status(response, StatusCode::OK).await;

    let views = json["data"].as_array().unwrap();
    assert_eq!(views.len(), 2, "unknown contractor must be skipped, not fatal");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn bulk_progress_rejects_empty_id_list(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/onboarding/bulk-progress",
        serde_json::json!({ "contractor_ids": [] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
