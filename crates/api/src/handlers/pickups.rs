//! Handlers for the `/pickups` resource.
//!
//! Anyone may request a pickup; a bearer token, when sent, attaches the
//! request to that user. Staff manage the queue.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use wastewise_core::error::CoreError;
use wastewise_core::logs::LEVEL_INFO;
use wastewise_core::pickup::{validate_preferred_date, RequestStatus};
use wastewise_core::types::DbId;
use wastewise_core::validation::{
    normalize_email, optional_text, require_text, validate_location, validate_phone,
    MAX_NOTES_LEN, MAX_TEXT_LEN,
};
use wastewise_core::waste::{validate_service_type, validate_waste_types};
use wastewise_db::models::page::Page;
use wastewise_db::models::pickup::{CreatePickup, Pickup, PickupQuery, UpdatePickup};
use wastewise_db::models::system_log::CreateSystemLog;
use wastewise_db::repositories::PickupRepo;

use crate::error::{validate_input, AppError, AppResult};
use crate::middleware::auth::{AuthUser, OptionalAuthUser};
use crate::middleware::rbac::{RequireAdmin, RequireStaff};
use crate::response::DataResponse;
use crate::state::AppState;
use crate::system_log;

/// Body of `PATCH /pickups/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}

/// Query string for `GET /pickups/mine`.
#[derive(Debug, Deserialize)]
pub struct MinePickupParams {
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/pickups
pub async fn create_pickup(
    State(state): State<AppState>,
    OptionalAuthUser(caller): OptionalAuthUser,
    Json(mut input): Json<CreatePickup>,
) -> AppResult<(StatusCode, Json<DataResponse<Pickup>>)> {
    validate_input(&input)?;
    require_text("full_name", &input.full_name, MAX_TEXT_LEN)?;
    require_text("address", &input.address, MAX_TEXT_LEN)?;
    validate_phone(&input.phone)?;
    validate_waste_types("waste_types", &input.waste_types)?;
    validate_service_type(&input.service_type)?;
    validate_location(input.latitude, input.longitude)?;
    validate_preferred_date(input.preferred_date, Utc::now().date_naive())?;
    optional_text("notes", input.notes.as_deref(), MAX_NOTES_LEN)?;

    input.email = normalize_email(&input.email);
    input.full_name = input.full_name.trim().to_string();
    input.address = input.address.trim().to_string();

    let user_id = caller.map(|u| u.user_id);
    let pickup = PickupRepo::create(&state.pool, user_id, &input).await?;

    tracing::info!(
        pickup_id = pickup.id,
        user_id = ?user_id,
        service_type = %pickup.service_type,
        "Pickup requested"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: pickup })))
}

/// GET /api/pickups?status=&service_type=&from=&to=&search=&limit=&offset=
pub async fn list_pickups(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Query(params): Query<PickupQuery>,
) -> AppResult<Json<DataResponse<Page<Pickup>>>> {
    if let Some(status) = params.status.as_deref() {
        status.parse::<RequestStatus>()?;
    }
    if let Some(service_type) = params.service_type.as_deref() {
        validate_service_type(service_type)?;
    }

    let page = PickupRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: page }))
}

/// GET /api/pickups/mine
///
/// Pickups attached to the caller.
pub async fn list_my_pickups(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<MinePickupParams>,
) -> AppResult<Json<DataResponse<Page<Pickup>>>> {
    if let Some(status) = params.status.as_deref() {
        status.parse::<RequestStatus>()?;
    }

    let query = PickupQuery {
        status: params.status,
        user_id: Some(auth.user_id),
        limit: params.limit,
        offset: params.offset,
        ..Default::default()
    };
    let page = PickupRepo::list(&state.pool, &query).await?;
    Ok(Json(DataResponse { data: page }))
}

/// GET /api/pickups/{id}
///
/// Staff see every pickup; other users only their own.
pub async fn get_pickup(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Pickup>>> {
    let pickup = find_pickup(&state, id).await?;

    if !auth.can_view(pickup.user_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You can only view your own pickups".into(),
        )));
    }

    Ok(Json(DataResponse { data: pickup }))
}

/// PUT /api/pickups/{id}
///
/// Partial update. Status changes go through the status endpoint.
pub async fn update_pickup(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdatePickup>,
) -> AppResult<Json<DataResponse<Pickup>>> {
    validate_input(&input)?;
    if let Some(name) = &input.full_name {
        require_text("full_name", name, MAX_TEXT_LEN)?;
    }
    if let Some(address) = &input.address {
        require_text("address", address, MAX_TEXT_LEN)?;
    }
    if let Some(phone) = &input.phone {
        validate_phone(phone)?;
    }
    if let Some(types) = &input.waste_types {
        validate_waste_types("waste_types", types)?;
    }
    if let Some(service_type) = &input.service_type {
        validate_service_type(service_type)?;
    }
    if input.latitude.is_some() || input.longitude.is_some() {
        validate_location(input.latitude, input.longitude)?;
    }
    if let Some(date) = input.preferred_date {
        validate_preferred_date(date, Utc::now().date_naive())?;
    }

    input.email = input.email.as_deref().map(normalize_email);

    let pickup = PickupRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Pickup",
            id,
        }))?;

    tracing::info!(pickup_id = id, user_id = staff.user_id, "Pickup updated");

    Ok(Json(DataResponse { data: pickup }))
}

/// PATCH /api/pickups/{id}/status
///
/// Any status may follow any other; only the value itself is checked.
pub async fn update_pickup_status(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<StatusUpdate>,
) -> AppResult<Json<DataResponse<Pickup>>> {
    let status: RequestStatus = input.status.parse()?;

    let pickup = PickupRepo::update_status(&state.pool, id, status.as_str())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Pickup",
            id,
        }))?;

    tracing::info!(
        pickup_id = id,
        user_id = staff.user_id,
        status = %status,
        "Pickup status changed"
    );
    system_log::record(
        &state.pool,
        CreateSystemLog::new(LEVEL_INFO, format!("Pickup {id} status set to {status}"))
            .with_user(Some(staff.user_id))
            .with_context(json!({ "pickup_id": id, "status": status.as_str() })),
    )
    .await;

    Ok(Json(DataResponse { data: pickup }))
}

/// DELETE /api/pickups/{id}
pub async fn delete_pickup(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if PickupRepo::delete(&state.pool, id).await? {
        tracing::info!(pickup_id = id, user_id = admin.user_id, "Pickup deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Pickup",
            id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_pickup(state: &AppState, id: DbId) -> AppResult<Pickup> {
    PickupRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Pickup",
            id,
        }))
}
