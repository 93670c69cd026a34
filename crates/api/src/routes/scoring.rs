//! Route definitions for RAG risk scoring (PRD-47).

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::scoring;
use crate::state::AppState;

/// Scoring routes.
///
/// `/contractors/ranked` and `/contractors/rag-scores` are registered
/// before the `{id}` routes purely for readability; axum matches static
/// segments ahead of captures either way.
///
/// ```text
/// GET    /contractors/ranked               -> ranked (?limit=)
/// POST   /contractors/rag-scores           -> batch_scores
/// GET    /contractors/{id}/rag-score       -> get_rag_score
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/contractors/ranked", get(scoring::ranked))
        .route("/contractors/rag-scores", post(scoring::batch_scores))
        .route("/contractors/{id}/rag-score", get(scoring::get_rag_score))
}
