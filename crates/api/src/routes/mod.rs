pub mod analytics;
pub mod compliance;
pub mod contractors;
pub mod health;
pub mod onboarding;
pub mod scoring;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /contractors                                                register (POST)
/// /contractors/{id}                                           get
/// /contractors/{id}/onboarding                                progress view (GET)
/// /contractors/{id}/onboarding/initialize                     initialize (POST)
/// /contractors/{id}/onboarding/stages/{stage_id}/items/{item_id}  set item (PUT)
/// /contractors/{id}/onboarding/submit                         submit for approval (POST)
/// /contractors/{id}/onboarding/approve                        approve (POST)
/// /contractors/{id}/onboarding/reject                         reject (POST)
/// /contractors/{id}/onboarding/reset                          reset after rejection (POST)
/// /onboarding/bulk-progress                                   bulk views (POST)
///
/// /contractors/{id}/compliance                                compliance status (GET)
///
/// /contractors/{id}/rag-score                                 RAG score (GET)
/// /contractors/rag-scores                                     batch scores (POST)
/// /contractors/ranked                                         ranking (GET)
///
/// /analytics/onboarding                                       aggregate report (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(contractors::router())
        .merge(onboarding::router())
        .merge(compliance::router())
        .merge(scoring::router())
        .merge(analytics::router())
}
