//! Handlers for the `/admin` resource (user management).
//!
//! All handlers require the `admin` role via [`RequireAdmin`].

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use validator::Validate;
use wastewise_core::error::CoreError;
use wastewise_core::logs::LEVEL_INFO;
use wastewise_core::roles::VALID_ROLES;
use wastewise_core::types::DbId;
use wastewise_core::validation::{normalize_email, validate_phone};
use wastewise_db::models::system_log::CreateSystemLog;
use wastewise_db::models::page::Page;
use wastewise_db::models::user::{CreateUser, UpdateUser, UserQuery, UserResponse};
use wastewise_db::repositories::{RoleRepo, SessionRepo, UserRepo};

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{validate_input, AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::system_log;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/users`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,
    pub password: String,
    pub role_id: DbId,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/admin/users
///
/// Create a user with any role. This is how staff accounts are provisioned.
pub async fn create_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<UserResponse>>)> {
    validate_input(&input)?;
    if let Some(phone) = &input.phone {
        validate_phone(phone)?;
    }
    validate_password_strength(&input.password, state.config.password_min_length)?;
    ensure_role_exists(&state, input.role_id).await?;

    let hashed = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            name: input.name.trim().to_string(),
            email: normalize_email(&input.email),
            phone: input.phone,
            password_hash: hashed,
            role_id: input.role_id,
        },
    )
    .await?;

    tracing::info!(admin_id = admin.user_id, user_id = user.id, "User created by admin");
    system_log::record(
        &state.pool,
        CreateSystemLog::new(LEVEL_INFO, format!("User {} created", user.id))
            .with_user(Some(admin.user_id)),
    )
    .await;

    let response = find_response(&state, user.id).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: response })))
}

/// GET /api/admin/users?role=&active=&search=&limit=&offset=
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<UserQuery>,
) -> AppResult<Json<DataResponse<Page<UserResponse>>>> {
    if let Some(role) = params.role.as_deref() {
        if !VALID_ROLES.contains(&role) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Invalid role '{role}'. Must be one of: {}",
                VALID_ROLES.join(", ")
            ))));
        }
    }

    let page = UserRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: page }))
}

/// GET /api/admin/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = find_response(&state, id).await?;
    Ok(Json(DataResponse { data: user }))
}

/// PUT /api/admin/users/{id}
///
/// Update a user's name, phone, role or active flag.
///
/// Admins cannot deactivate themselves or change their own role here.
/// Setting `is_active` to `false` ends the user's sessions like
/// [`deactivate_user`] does.
pub async fn update_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUser>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    validate_input(&input)?;
    if let Some(phone) = &input.phone {
        validate_phone(phone)?;
    }
    if let Some(role_id) = input.role_id {
        ensure_role_exists(&state, role_id).await?;
    }

    let existing = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    if id == admin.user_id {
        if input.is_active == Some(false) {
            return Err(AppError::BadRequest(
                "Administrators cannot deactivate their own account".into(),
            ));
        }
        if input.role_id.is_some_and(|role_id| role_id != existing.role_id) {
            return Err(AppError::BadRequest(
                "Administrators cannot change their own role".into(),
            ));
        }
    }

    UserRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    if input.is_active == Some(false) {
        let revoked = SessionRepo::revoke_all_for_user(&state.pool, id).await?;
        tracing::info!(admin_id = admin.user_id, user_id = id, revoked, "User deactivated");
    } else {
        tracing::info!(admin_id = admin.user_id, user_id = id, "User updated by admin");
    }

    let response = find_response(&state, id).await?;
    Ok(Json(DataResponse { data: response }))
}

/// DELETE /api/admin/users/{id}
///
/// Soft-deactivate a user and end their sessions. Returns 204 No Content.
pub async fn deactivate_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if id == admin.user_id {
        return Err(AppError::BadRequest(
            "Administrators cannot deactivate their own account".into(),
        ));
    }

    if UserRepo::deactivate(&state.pool, id).await? {
        let revoked = SessionRepo::revoke_all_for_user(&state.pool, id).await?;
        tracing::info!(admin_id = admin.user_id, user_id = id, revoked, "User deactivated");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "User", id }))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_response(state: &AppState, id: DbId) -> AppResult<UserResponse> {
    UserRepo::find_response_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))
}

async fn ensure_role_exists(state: &AppState, role_id: DbId) -> AppResult<()> {
    RoleRepo::find_by_id(&state.pool, role_id)
        .await?
        .map(|_| ())
        .ok_or_else(|| AppError::BadRequest(format!("Unknown role_id {role_id}")))
}
