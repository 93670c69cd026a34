//! Route definitions for the onboarding workflow (PRD-31, PRD-32).

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::onboarding;
use crate::state::AppState;

/// Onboarding routes.
///
/// ```text
/// GET    /contractors/{id}/onboarding                                  -> get_progress
/// POST   /contractors/{id}/onboarding/initialize                       -> initialize
/// PUT    /contractors/{id}/onboarding/stages/{stage_id}/items/{item_id} -> update_item
/// POST   /contractors/{id}/onboarding/submit                           -> submit
/// POST   /contractors/{id}/onboarding/approve                          -> approve
/// POST   /contractors/{id}/onboarding/reject                           -> reject
/// POST   /contractors/{id}/onboarding/reset                            -> reset
/// POST   /onboarding/bulk-progress                                     -> bulk_progress
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/contractors/{id}/onboarding", get(onboarding::get_progress))
        .route(
            "/contractors/{id}/onboarding/initialize",
            post(onboarding::initialize),
        )
        .route(
            "/contractors/{id}/onboarding/stages/{stage_id}/items/{item_id}",
            put(onboarding::update_item),
        )
        .route(
            "/contractors/{id}/onboarding/submit",
            post(onboarding::submit),
        )
        .route(
            "/contractors/{id}/onboarding/approve",
            post(onboarding::approve),
        )
        .route(
            "/contractors/{id}/onboarding/reject",
            post(onboarding::reject),
        )
        .route(
            "/contractors/{id}/onboarding/reset",
            post(onboarding::reset),
        )
        .route("/onboarding/bulk-progress", post(onboarding::bulk_progress))
}
