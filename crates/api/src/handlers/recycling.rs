//! Handlers for recycling drop-off/collection requests.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde_json::json;
use wastewise_core::error::CoreError;
use wastewise_core::logs::LEVEL_INFO;
use wastewise_core::pickup::{validate_preferred_date, RequestStatus};
use wastewise_core::types::DbId;
use wastewise_core::validation::{
    normalize_email, optional_text, require_text, validate_phone, MAX_NOTES_LEN, MAX_TEXT_LEN,
};
use wastewise_core::waste::{validate_estimated_weight, validate_waste_types};
use wastewise_db::models::page::Page;
use wastewise_db::models::recycling::{
    CreateRecyclingRequest, RecyclingRequest, RecyclingRequestQuery,
};
use wastewise_db::models::system_log::CreateSystemLog;
use wastewise_db::repositories::RecyclingRequestRepo;

use crate::error::{validate_input, AppError, AppResult};
use crate::handlers::pickups::StatusUpdate;
use crate::middleware::auth::OptionalAuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::system_log;

/// POST /api/recycling-request
pub async fn create_request(
    State(state): State<AppState>,
    OptionalAuthUser(caller): OptionalAuthUser,
    Json(mut input): Json<CreateRecyclingRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<RecyclingRequest>>)> {
    validate_input(&input)?;
    require_text("full_name", &input.full_name, MAX_TEXT_LEN)?;
    require_text("address", &input.address, MAX_TEXT_LEN)?;
    validate_phone(&input.phone)?;
    validate_waste_types("materials", &input.materials)?;
    validate_estimated_weight(input.estimated_weight_kg)?;
    validate_preferred_date(input.preferred_date, Utc::now().date_naive())?;
    optional_text("notes", input.notes.as_deref(), MAX_NOTES_LEN)?;

    input.email = normalize_email(&input.email);
    input.full_name = input.full_name.trim().to_string();
    input.address = input.address.trim().to_string();

    let user_id = caller.map(|u| u.user_id);
    let request = RecyclingRequestRepo::create(&state.pool, user_id, &input).await?;

    tracing::info!(
        recycling_request_id = request.id,
        user_id = ?user_id,
        weight_kg = request.estimated_weight_kg,
        "Recycling request submitted"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: request })))
}

/// GET /api/recycling-requests?status=&search=&limit=&offset=
pub async fn list_requests(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Query(params): Query<RecyclingRequestQuery>,
) -> AppResult<Json<DataResponse<Page<RecyclingRequest>>>> {
    if let Some(status) = params.status.as_deref() {
        status.parse::<RequestStatus>()?;
    }

    let page = RecyclingRequestRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: page }))
}

/// GET /api/recycling-requests/{id}
pub async fn get_request(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<RecyclingRequest>>> {
    let request = RecyclingRequestRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "RecyclingRequest",
            id,
        }))?;
    Ok(Json(DataResponse { data: request }))
}

/// PATCH /api/recycling-requests/{id}/status
pub async fn update_request_status(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<StatusUpdate>,
) -> AppResult<Json<DataResponse<RecyclingRequest>>> {
    let status: RequestStatus = input.status.parse()?;

    let request = RecyclingRequestRepo::update_status(&state.pool, id, status.as_str())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "RecyclingRequest",
            id,
        }))?;

    tracing::info!(
        recycling_request_id = id,
        user_id = staff.user_id,
        status = %status,
        "Recycling request status changed"
    );
    system_log::record(
        &state.pool,
        CreateSystemLog::new(
            LEVEL_INFO,
            format!("Recycling request {id} status set to {status}"),
        )
        .with_user(Some(staff.user_id))
        .with_context(json!({ "recycling_request_id": id, "status": status.as_str() })),
    )
    .await;

    Ok(Json(DataResponse { data: request }))
}
