//! Route definitions for contractor registration and lookup.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::contractors;
use crate::state::AppState;

/// Contractor routes.
///
/// ```text
/// POST   /contractors          -> create_contractor
/// GET    /contractors/{id}     -> get_contractor
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/contractors", post(contractors::create_contractor))
        .route("/contractors/{id}", get(contractors::get_contractor))
}
