use axum::routing::get;
use axum::Router;

use crate::handlers::logs;
use crate::state::AppState;

/// Routes mounted at `/logs`.
///
/// ```text
/// POST /   -> write_log (authenticated)
/// GET  /   -> query_logs (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(logs::query_logs).post(logs::write_log))
}
