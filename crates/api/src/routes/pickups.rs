//! Route definitions for the `/pickups` resource.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::pickups;
use crate::state::AppState;

/// Routes mounted at `/pickups`.
///
/// ```text
/// POST   /              -> create_pickup (public)
/// GET    /              -> list_pickups (staff)
/// GET    /mine          -> list_my_pickups
/// GET    /{id}          -> get_pickup
/// PUT    /{id}          -> update_pickup (staff)
/// DELETE /{id}          -> delete_pickup (admin)
/// PATCH  /{id}/status   -> update_pickup_status (staff)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(pickups::list_pickups).post(pickups::create_pickup),
        )
        .route("/mine", get(pickups::list_my_pickups))
        .route(
            "/{id}",
            get(pickups::get_pickup)
                .put(pickups::update_pickup)
                .delete(pickups::delete_pickup),
        )
        .route("/{id}/status", patch(pickups::update_pickup_status))
}
