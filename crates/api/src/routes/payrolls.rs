use axum::routing::{get, post};
use axum::Router;

use crate::handlers::payrolls;
use crate::state::AppState;

/// Routes mounted at `/payrolls`. All admin-only.
///
/// ```text
/// GET  /           -> list_payrolls
/// POST /           -> generate_payroll
/// GET  /{id}       -> get_payroll
/// POST /{id}/pay   -> mark_paid
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(payrolls::list_payrolls).post(payrolls::generate_payroll),
        )
        .route("/{id}", get(payrolls::get_payroll))
        .route("/{id}/pay", post(payrolls::mark_paid))
}
