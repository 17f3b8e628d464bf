use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::subscriptions;
use crate::state::AppState;

/// Admin routes mounted at `/subscriptions`. The public `POST /subscribe`
/// is mounted at the root by [`crate::router::build_app_router`].
///
/// ```text
/// GET    /       -> list_subscriptions
/// DELETE /{id}   -> unsubscribe
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(subscriptions::list_subscriptions))
        .route("/{id}", delete(subscriptions::unsubscribe))
}
