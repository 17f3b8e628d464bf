//! Handlers for salary packages. All routes are admin-only.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use wastewise_core::error::CoreError;
use wastewise_core::money::normalize_currency;
use wastewise_core::types::DbId;
use wastewise_db::models::salary_package::{
    CreateSalaryPackage, SalaryPackage, UpdateSalaryPackage,
};
use wastewise_db::repositories::SalaryPackageRepo;

use crate::error::{is_foreign_key_violation, validate_input, AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/salary-packages
pub async fn create_package(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(mut input): Json<CreateSalaryPackage>,
) -> AppResult<(StatusCode, Json<DataResponse<SalaryPackage>>)> {
    validate_input(&input)?;
    input.currency = input.currency.as_deref().map(normalize_currency).transpose()?;
    input.name = input.name.trim().to_string();

    let package = SalaryPackageRepo::create(&state.pool, &input).await?;

    tracing::info!(
        salary_package_id = package.id,
        user_id = admin.user_id,
        name = %package.name,
        "Salary package created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: package })))
}

/// GET /api/salary-packages
pub async fn list_packages(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<SalaryPackage>>>> {
    let packages = SalaryPackageRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: packages }))
}

/// GET /api/salary-packages/{id}
pub async fn get_package(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<SalaryPackage>>> {
    let package = SalaryPackageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(not_found(id))?;
    Ok(Json(DataResponse { data: package }))
}

/// PUT /api/salary-packages/{id}
///
/// Changes apply to payrolls generated afterwards; existing payrolls keep
/// their computed amounts.
pub async fn update_package(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateSalaryPackage>,
) -> AppResult<Json<DataResponse<SalaryPackage>>> {
    validate_input(&input)?;
    input.currency = input.currency.as_deref().map(normalize_currency).transpose()?;

    let package = SalaryPackageRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(not_found(id))?;

    tracing::info!(salary_package_id = id, user_id = admin.user_id, "Salary package updated");

    Ok(Json(DataResponse { data: package }))
}

/// DELETE /api/salary-packages/{id}
///
/// A package referenced by any payroll cannot be deleted (409).
pub async fn delete_package(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = match SalaryPackageRepo::delete(&state.pool, id).await {
        Ok(deleted) => deleted,
        Err(e) if is_foreign_key_violation(&e) => {
            return Err(AppError::Core(CoreError::Conflict(format!(
                "Salary package {id} is referenced by existing payrolls"
            ))));
        }
        Err(e) => return Err(e.into()),
    };

    if deleted {
        tracing::info!(salary_package_id = id, user_id = admin.user_id, "Salary package deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "SalaryPackage",
        id,
    })
}
