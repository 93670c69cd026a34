//! Route definitions for compliance status (PRD-44).

use axum::routing::get;
use axum::Router;

use crate::handlers::compliance;
use crate::state::AppState;

/// Compliance routes.
///
/// ```text
/// GET    /contractors/{id}/compliance      -> get_compliance (?project_id=)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/contractors/{id}/compliance",
        get(compliance::get_compliance),
    )
}
