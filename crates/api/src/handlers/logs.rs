//! Handlers for the system log.
//!
//! Entries are append-only. Clients may report their own events; only
//! admins can read the log back.

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Deserialize;
use wastewise_core::error::CoreError;
use wastewise_core::logs::{validate_entry, validate_level};
use wastewise_db::models::page::Page;
use wastewise_db::models::system_log::{CreateSystemLog, SystemLog, SystemLogQuery};
use wastewise_db::repositories::SystemLogRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::LogQueryParams;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::system_log::client_ip;

/// Body of `POST /logs`.
#[derive(Debug, Deserialize)]
pub struct WriteLogRequest {
    pub level: String,
    pub message: String,
    pub context: Option<serde_json::Value>,
}

/// POST /api/logs
///
/// Record a client-reported entry against the caller.
pub async fn write_log(
    State(state): State<AppState>,
    auth: AuthUser,
    headers: HeaderMap,
    Json(input): Json<WriteLogRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<SystemLog>>)> {
    let level = input.level.trim().to_lowercase();
    validate_entry(&level, &input.message, input.context.as_ref())?;

    let mut entry =
        CreateSystemLog::new(&level, input.message.trim()).with_user(Some(auth.user_id));
    entry.ip_address = client_ip(&headers);
    entry.context = input.context;

    let log = SystemLogRepo::create(&state.pool, &entry).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: log })))
}

/// GET /api/logs?level=&user_id=&from=&to=&search=&limit=&offset=
///
/// Newest entries first.
pub async fn query_logs(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<LogQueryParams>,
) -> AppResult<Json<DataResponse<Page<SystemLog>>>> {
    let level = params.level.map(|l| l.trim().to_lowercase());
    if let Some(level) = level.as_deref() {
        validate_level(level)?;
    }
    if let (Some(from), Some(to)) = (params.from, params.to) {
        if from > to {
            return Err(AppError::Core(CoreError::Validation(
                "'from' must not be after 'to'".into(),
            )));
        }
    }

    let query = SystemLogQuery {
        level,
        user_id: params.user_id,
        from: params.from,
        to: params.to,
        search: params.search,
        limit: params.limit,
        offset: params.offset,
    };
    let page = SystemLogRepo::query(&state.pool, &query).await?;
    Ok(Json(DataResponse { data: page }))
}
