//! Handlers for the waste material catalog.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use wastewise_core::error::CoreError;
use wastewise_core::types::DbId;
use wastewise_core::validation::{require_text, MAX_TEXT_LEN};
use wastewise_core::waste::validate_waste_type;
use wastewise_db::models::waste_material::{
    CreateWasteMaterial, UpdateWasteMaterial, WasteMaterial,
};
use wastewise_db::repositories::WasteMaterialRepo;

use crate::error::{validate_input, AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireStaff};
use crate::query::CategoryFilter;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/waste-materials?category=
pub async fn list_materials(
    State(state): State<AppState>,
    Query(filter): Query<CategoryFilter>,
) -> AppResult<Json<DataResponse<Vec<WasteMaterial>>>> {
    if let Some(category) = filter.category.as_deref() {
        validate_waste_type(category)?;
    }
    let materials = WasteMaterialRepo::list(&state.pool, filter.category.as_deref()).await?;
    Ok(Json(DataResponse { data: materials }))
}

/// GET /api/waste-materials/{id}
pub async fn get_material(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<WasteMaterial>>> {
    let material = WasteMaterialRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(not_found(id))?;
    Ok(Json(DataResponse { data: material }))
}

/// POST /api/waste-materials
pub async fn create_material(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    Json(mut input): Json<CreateWasteMaterial>,
) -> AppResult<(StatusCode, Json<DataResponse<WasteMaterial>>)> {
    validate_input(&input)?;
    require_text("name", &input.name, MAX_TEXT_LEN)?;
    validate_waste_type(&input.category)?;
    input.name = input.name.trim().to_string();

    let material = WasteMaterialRepo::create(&state.pool, &input).await?;

    tracing::info!(
        material_id = material.id,
        user_id = staff.user_id,
        name = %material.name,
        "Waste material created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: material })))
}

/// PUT /api/waste-materials/{id}
pub async fn update_material(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateWasteMaterial>,
) -> AppResult<Json<DataResponse<WasteMaterial>>> {
    validate_input(&input)?;
    if let Some(name) = &input.name {
        require_text("name", name, MAX_TEXT_LEN)?;
    }
    if let Some(category) = &input.category {
        validate_waste_type(category)?;
    }
    input.name = input.name.map(|n| n.trim().to_string());

    let material = WasteMaterialRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(not_found(id))?;

    tracing::info!(material_id = id, user_id = staff.user_id, "Waste material updated");

    Ok(Json(DataResponse { data: material }))
}

/// DELETE /api/waste-materials/{id}
pub async fn delete_material(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if WasteMaterialRepo::delete(&state.pool, id).await? {
        tracing::info!(material_id = id, user_id = admin.user_id, "Waste material deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "WasteMaterial",
        id,
    })
}
