//! Route definitions for onboarding analytics (PRD-52).

use axum::routing::get;
use axum::Router;

use crate::handlers::analytics;
use crate::state::AppState;

/// Analytics routes.
///
/// ```text
/// GET    /analytics/onboarding     -> onboarding_report
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/analytics/onboarding", get(analytics::onboarding_report))
}
