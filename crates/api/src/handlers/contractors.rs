//! Handlers for contractor registration and lookup.
//!
//! Contractor CRUD beyond these two endpoints (document upload, teams,
//! assignments) belongs to the surrounding application; the engine only
//! needs contractors to exist before onboarding starts.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use fibreops_core::types::DbId;
use fibreops_db::models::contractor::CreateContractor;
use fibreops_db::repositories::ContractorRepo;

use crate::engine::require_contractor;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /contractors
// ---------------------------------------------------------------------------

/// Register a new contractor.
pub async fn create_contractor(
    State(state): State<AppState>,
    Json(input): Json<CreateContractor>,
) -> AppResult<impl IntoResponse> {
    if input.company_name.trim().is_empty() {
        return Err(AppError::BadRequest(
            "company_name must not be empty".to_string(),
        ));
    }
    if input.registration_number.trim().is_empty() {
        return Err(AppError::BadRequest(
            "registration_number must not be empty".to_string(),
        ));
    }

    let contractor = ContractorRepo::create(&state.pool, &input).await?;

    tracing::info!(contractor_id = contractor.id, "Contractor registered");

    Ok(Json(DataResponse { data: contractor }))
}

// ---------------------------------------------------------------------------
// GET /contractors/{id}
// ---------------------------------------------------------------------------

/// Get a contractor by id.
pub async fn get_contractor(
    State(state): State<AppState>,
    Path(contractor_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let contractor = require_contractor(&state.pool, contractor_id).await?;
    Ok(Json(DataResponse { data: contractor }))
}
