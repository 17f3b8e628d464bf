use axum::routing::get;
use axum::Router;

use crate::handlers::salary_packages;
use crate::state::AppState;

/// Routes mounted at `/salary-packages`. All admin-only.
///
/// ```text
/// GET    /       -> list_packages
/// POST   /       -> create_package
/// GET    /{id}   -> get_package
/// PUT    /{id}   -> update_package
/// DELETE /{id}   -> delete_package
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(salary_packages::list_packages).post(salary_packages::create_package),
        )
        .route(
            "/{id}",
            get(salary_packages::get_package)
                .put(salary_packages::update_package)
                .delete(salary_packages::delete_package),
        )
}
