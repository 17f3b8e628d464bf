//! Route definitions for `/recycling-requests`.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::recycling;
use crate::state::AppState;

/// Routes mounted at `/recycling-requests`. Creation lives at the singular
/// `/recycling-request` path in [`super::api_routes`].
///
/// ```text
/// GET    /              -> list_requests (staff)
/// GET    /{id}          -> get_request (staff)
/// PATCH  /{id}/status   -> update_request_status (staff)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(recycling::list_requests))
        .route("/{id}", get(recycling::get_request))
        .route("/{id}/status", patch(recycling::update_request_status))
}
