//! Handlers for onboarding analytics (PRD-52).

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::engine::analytics;
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET /analytics/onboarding
// ---------------------------------------------------------------------------

/// Aggregate statistics across all contractors: onboarding status counts,
/// risk-tier and compliance distributions, and the monthly approval trend.
pub async fn onboarding_report(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let report = analytics::get_onboarding_report(&state.pool).await?;
    Ok(Json(DataResponse { data: report }))
}
