//! Handlers for RAG risk scoring (PRD-47).

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;

use fibreops_core::types::DbId;

use crate::engine::rag;
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Default number of entries in the ranked listing.
pub const DEFAULT_RANKING_LIMIT: usize = 20;

/// Query parameters for the ranked listing.
#[derive(Debug, serde::Deserialize)]
pub struct RankedParams {
    pub limit: Option<usize>,
}

/// Body for batch score requests.
#[derive(Debug, serde::Deserialize)]
pub struct BatchScoresBody {
    pub contractor_ids: Vec<DbId>,
}

// ---------------------------------------------------------------------------
// GET /contractors/{id}/rag-score
// ---------------------------------------------------------------------------

/// Compute the RAG score for one contractor.
pub async fn get_rag_score(
    State(state): State<AppState>,
    Path(contractor_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let score = rag::calculate_rag_score(&state.pool, contractor_id).await?;
    Ok(Json(DataResponse { data: score }))
}

// ---------------------------------------------------------------------------
// POST /contractors/rag-scores
// ---------------------------------------------------------------------------

/// Compute RAG scores for a batch of contractors. Failed ids are logged
/// and excluded from the result.
pub async fn batch_scores(
    State(state): State<AppState>,
    Json(body): Json<BatchScoresBody>,
) -> AppResult<impl IntoResponse> {
    let scores = rag::get_contractor_rag_scores(&state.pool, &body.contractor_ids).await?;

    tracing::debug!(
        requested = body.contractor_ids.len(),
        returned = scores.len(),
        "Batch RAG scores computed"
    );

    Ok(Json(DataResponse { data: scores }))
}

// ---------------------------------------------------------------------------
// GET /contractors/ranked
// ---------------------------------------------------------------------------

/// Rank contractors by overall RAG score, descending.
pub async fn ranked(
    State(state): State<AppState>,
    Query(params): Query<RankedParams>,
) -> AppResult<impl IntoResponse> {
    let limit = params.limit.unwrap_or(DEFAULT_RANKING_LIMIT);
    let ranking = rag::get_ranked_contractors(&state.pool, limit).await?;
    Ok(Json(DataResponse { data: ranking }))
}
