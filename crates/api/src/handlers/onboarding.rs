//! Handlers for the onboarding workflow (PRD-31, PRD-32).
//!
//! The progress view is recomputed on every request; only checklist flags
//! and terminal approval/rejection marks are durable.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use fibreops_core::types::DbId;

use crate::engine::{approval, progress};
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

/// Body for checklist item updates.
#[derive(Debug, serde::Deserialize)]
pub struct UpdateItemBody {
    pub completed: bool,
}

/// Body for approval.
#[derive(Debug, serde::Deserialize)]
pub struct ApproveBody {
    pub approved_by: String,
}

/// Body for rejection.
#[derive(Debug, serde::Deserialize)]
pub struct RejectBody {
    pub rejected_by: String,
    pub reason: String,
}

/// Body for bulk progress retrieval.
#[derive(Debug, serde::Deserialize)]
pub struct BulkProgressBody {
    pub contractor_ids: Vec<DbId>,
}

// ---------------------------------------------------------------------------
// POST /contractors/{id}/onboarding/initialize
// ---------------------------------------------------------------------------

/// Initialize onboarding for a contractor (idempotent).
pub async fn initialize(
    State(state): State<AppState>,
    Path(contractor_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let view = progress::initialize_onboarding(&state.pool, contractor_id).await?;
    Ok(Json(DataResponse { data: view }))
}

// ---------------------------------------------------------------------------
// GET /contractors/{id}/onboarding
// ---------------------------------------------------------------------------

/// Get the current onboarding progress view.
pub async fn get_progress(
    State(state): State<AppState>,
    Path(contractor_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let view = progress::get_progress(&state.pool, contractor_id).await?;
    Ok(Json(DataResponse { data: view }))
}

// ---------------------------------------------------------------------------
// PUT /contractors/{id}/onboarding/stages/{stage_id}/items/{item_id}
// ---------------------------------------------------------------------------

/// Set one checklist item's completion flag.
pub async fn update_item(
    State(state): State<AppState>,
    Path((contractor_id, stage_id, item_id)): Path<(DbId, String, String)>,
    Json(body): Json<UpdateItemBody>,
) -> AppResult<impl IntoResponse> {
    let view = progress::update_stage_completion(
        &state.pool,
        contractor_id,
        &stage_id,
        &item_id,
        body.completed,
    )
    .await?;
    Ok(Json(DataResponse { data: view }))
}

// ---------------------------------------------------------------------------
// POST /contractors/{id}/onboarding/submit
// ---------------------------------------------------------------------------

/// Submit onboarding for approval. Fails with itemized missing/unverified
/// document lists when the gate is not met.
pub async fn submit(
    State(state): State<AppState>,
    Path(contractor_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let view = approval::submit_for_approval(&state.pool, contractor_id).await?;
    Ok(Json(DataResponse { data: view }))
}

// ---------------------------------------------------------------------------
// POST /contractors/{id}/onboarding/approve
// ---------------------------------------------------------------------------

/// Approve a completed onboarding and activate the contractor.
pub async fn approve(
    State(state): State<AppState>,
    Path(contractor_id): Path<DbId>,
    Json(body): Json<ApproveBody>,
) -> AppResult<impl IntoResponse> {
    let view =
        approval::approve_contractor(&state.pool, contractor_id, &body.approved_by).await?;
    Ok(Json(DataResponse { data: view }))
}

// ---------------------------------------------------------------------------
// POST /contractors/{id}/onboarding/reject
// ---------------------------------------------------------------------------

/// Reject onboarding with a mandatory reason and disable the contractor.
pub async fn reject(
    State(state): State<AppState>,
    Path(contractor_id): Path<DbId>,
    Json(body): Json<RejectBody>,
) -> AppResult<impl IntoResponse> {
    let view =
        approval::reject_contractor(&state.pool, contractor_id, &body.rejected_by, &body.reason)
            .await?;
    Ok(Json(DataResponse { data: view }))
}

// ---------------------------------------------------------------------------
// POST /contractors/{id}/onboarding/reset
// ---------------------------------------------------------------------------

/// Re-open a rejected onboarding, preserving still-valid document-backed
/// checklist items.
pub async fn reset(
    State(state): State<AppState>,
    Path(contractor_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let view = approval::reset_onboarding(&state.pool, contractor_id).await?;
    Ok(Json(DataResponse { data: view }))
}

// ---------------------------------------------------------------------------
// POST /onboarding/bulk-progress
// ---------------------------------------------------------------------------

/// Get progress views for many contractors. Failed ids are logged and
/// excluded; the response is a partial result, not a total failure.
pub async fn bulk_progress(
    State(state): State<AppState>,
    Json(body): Json<BulkProgressBody>,
) -> AppResult<impl IntoResponse> {
    let views = progress::get_bulk_progress(&state.pool, &body.contractor_ids).await?;

    tracing::debug!(
        requested = body.contractor_ids.len(),
        returned = views.len(),
        "Bulk progress computed"
    );

    Ok(Json(DataResponse { data: views }))
}
