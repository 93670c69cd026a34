//! Handlers for compliance status queries (PRD-44).

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;

use fibreops_core::types::DbId;

use crate::engine::compliance;
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for compliance status.
#[derive(Debug, serde::Deserialize)]
pub struct ComplianceParams {
    pub project_id: Option<DbId>,
}

// ---------------------------------------------------------------------------
// GET /contractors/{id}/compliance
// ---------------------------------------------------------------------------

/// Compute the contractor's compliance status, optionally including a
/// project's configured requirements.
pub async fn get_compliance(
    State(state): State<AppState>,
    Path(contractor_id): Path<DbId>,
    Query(params): Query<ComplianceParams>,
) -> AppResult<impl IntoResponse> {
    let status =
        compliance::get_compliance_status(&state.pool, contractor_id, params.project_id).await?;
    Ok(Json(DataResponse { data: status }))
}
