use axum::routing::{get, post};
use axum::Router;

use crate::handlers::payments;
use crate::state::AppState;

/// Routes mounted at `/payments`.
///
/// ```text
/// GET  /          -> list_payments (admin)
/// POST /webhook   -> webhook (signature-checked)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(payments::list_payments))
        .route("/webhook", post(payments::webhook))
}
