use axum::routing::get;
use axum::Router;

use crate::handlers::waste_materials;
use crate::state::AppState;

/// Routes mounted at `/waste-materials`.
///
/// ```text
/// GET    /       -> list_materials (public)
/// POST   /       -> create_material (staff)
/// GET    /{id}   -> get_material (public)
/// PUT    /{id}   -> update_material (staff)
/// DELETE /{id}   -> delete_material (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(waste_materials::list_materials).post(waste_materials::create_material),
        )
        .route(
            "/{id}",
            get(waste_materials::get_material)
                .put(waste_materials::update_material)
                .delete(waste_materials::delete_material),
        )
}
