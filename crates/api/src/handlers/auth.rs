//! Handlers for the `/auth` resource.

use axum::extract::State;
use axum::http::header::USER_AGENT;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;
use wastewise_core::error::CoreError;
use wastewise_core::logs::{LEVEL_INFO, LEVEL_WARN};
use wastewise_core::roles::CITIZEN_ROLE_ID;
use wastewise_core::tokens::{generate_refresh_token, generate_reset_token, hash_token};
use wastewise_core::types::DbId;
use wastewise_core::validation::{normalize_email, validate_phone};
use wastewise_db::models::session::CreateSession;
use wastewise_db::models::system_log::CreateSystemLog;
use wastewise_db::models::user::{CreateUser, UserResponse};
use wastewise_db::repositories::{PasswordResetRepo, SessionRepo, UserRepo};
use wastewise_mail::templates;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{validate_input, AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::notify;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;
use crate::system_log;

/// Consecutive failed logins before the account is locked.
const MAX_FAILED_ATTEMPTS: i32 = 5;

/// Lock duration after too many failed logins.
const LOCK_DURATION_MINS: i64 = 15;

/// Longest `User-Agent` kept on a session row.
const MAX_USER_AGENT_LEN: usize = 255;

/// Same reply for every forgot-password request.
const FORGOT_PASSWORD_MESSAGE: &str =
    "If an account exists for that email, a password reset link has been sent.";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Body of `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,
    pub password: String,
}

/// Body of `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Body of `POST /auth/forgot-password`.
#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Body of `POST /auth/reset-password`.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub password: String,
}

/// Returned by register, login and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/register
///
/// Self-service sign-up. Always creates a citizen account.
pub async fn register(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    validate_input(&input)?;
    if let Some(phone) = &input.phone {
        validate_phone(phone)?;
    }
    validate_password_strength(&input.password, state.config.password_min_length)?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            name: input.name.trim().to_string(),
            email: normalize_email(&input.email),
            phone: input.phone,
            password_hash,
            role_id: CITIZEN_ROLE_ID,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "User registered");

    let response = issue_tokens(&state, user.id, &headers, None).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/auth/login
///
/// Authenticate with email + password.
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let invalid = || {
        AppError::Core(CoreError::Unauthorized(
            "Invalid email or password".into(),
        ))
    };

    let user = UserRepo::find_by_email(&state.pool, &normalize_email(&input.email))
        .await?
        .ok_or_else(invalid)?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    if let Some(locked_until) = user.locked_until {
        if locked_until > Utc::now() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Account is temporarily locked. Try again later.".into(),
            )));
        }
    }

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        let lock_until = Utc::now() + Duration::minutes(LOCK_DURATION_MINS);
        let locked =
            UserRepo::record_failed_login(&state.pool, user.id, MAX_FAILED_ATTEMPTS, lock_until)
                .await?;
        if locked {
            tracing::warn!(user_id = user.id, %lock_until, "Account locked after failed logins");
            system_log::record(
                &state.pool,
                CreateSystemLog::new(LEVEL_WARN, "Account locked after repeated failed logins")
                    .with_user(Some(user.id)),
            )
            .await;
        }
        return Err(invalid());
    }

    UserRepo::record_successful_login(&state.pool, user.id).await?;
    system_log::record(
        &state.pool,
        CreateSystemLog::new(LEVEL_INFO, "User logged in").with_user(Some(user.id)),
    )
    .await;

    let response = issue_tokens(&state, user.id, &headers, None).await?;
    Ok(Json(response))
}

/// POST /api/auth/refresh
///
/// Exchange a refresh token for a new token pair. The old token is revoked.
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    let token_hash = hash_token(input.refresh_token.trim());

    let session = SessionRepo::find_active(&state.pool, &token_hash)
        .await?
        .ok_or_else(invalid_refresh_token)?;

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let response = issue_tokens(&state, user.id, &headers, Some(session.id)).await?;
    Ok(Json(response))
}

/// POST /api/auth/logout
///
/// Revoke every session of the caller.
pub async fn logout(State(state): State<AppState>, auth_user: AuthUser) -> AppResult<StatusCode> {
    let revoked = SessionRepo::revoke_all_for_user(&state.pool, auth_user.user_id).await?;
    tracing::info!(user_id = auth_user.user_id, revoked, "User logged out");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::find_response_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth_user.user_id,
        }))?;
    Ok(Json(DataResponse { data: user }))
}

/// POST /api/auth/forgot-password
///
/// Always answers 200 with the same message, whether or not the account exists.
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(input): Json<ForgotPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    let email = normalize_email(&input.email);

    if let Some(user) = UserRepo::find_by_email(&state.pool, &email).await? {
        if user.is_active {
            let token = generate_reset_token();
            let expires_at = Utc::now() + Duration::minutes(state.config.reset_token_expiry_mins);
            PasswordResetRepo::create(&state.pool, user.id, &token.hash, expires_at).await?;

            let link = format!(
                "{}/reset-password/{}",
                state.config.frontend_url, token.plaintext
            );
            let message =
                templates::password_reset(&user.name, &link, state.config.reset_token_expiry_mins);
            notify::send_in_background(&state, &user.email, message, "password_reset");

            system_log::record(
                &state.pool,
                CreateSystemLog::new(LEVEL_INFO, "Password reset requested")
                    .with_user(Some(user.id)),
            )
            .await;
        }
    }

    Ok(Json(MessageResponse {
        message: FORGOT_PASSWORD_MESSAGE,
    }))
}

/// POST /api/auth/reset-password
///
/// Consume a reset token and set a new password. All sessions are revoked.
pub async fn reset_password(
    State(state): State<AppState>,
    Json(input): Json<ResetPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    // Checked before consuming so a weak password does not burn the token.
    validate_password_strength(&input.password, state.config.password_min_length)?;

    let token = PasswordResetRepo::consume(&state.pool, &hash_token(input.token.trim()))
        .await?
        .ok_or_else(|| AppError::BadRequest("Invalid or expired reset token".into()))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    UserRepo::update_password(&state.pool, token.user_id, &password_hash).await?;
    SessionRepo::revoke_all_for_user(&state.pool, token.user_id).await?;

    tracing::info!(user_id = token.user_id, "Password reset completed");
    system_log::record(
        &state.pool,
        CreateSystemLog::new(LEVEL_INFO, "Password reset completed")
            .with_user(Some(token.user_id)),
    )
    .await;

    Ok(Json(MessageResponse {
        message: "Password has been reset. Please log in again.",
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn invalid_refresh_token() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "Invalid or expired refresh token".into(),
    ))
}

/// Issue an access token and a refresh session for `user_id`.
///
/// With `replacing`, the new session is stored only if that session is
/// still live, so a refresh token works exactly once.
async fn issue_tokens(
    state: &AppState,
    user_id: DbId,
    headers: &HeaderMap,
    replacing: Option<DbId>,
) -> AppResult<AuthResponse> {
    let user = UserRepo::find_response_by_id(&state.pool, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }))?;

    let access_token = generate_access_token(user.id, &user.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let refresh = generate_refresh_token();
    let session = CreateSession {
        user_id: user.id,
        refresh_token_hash: refresh.hash,
        expires_at: Utc::now() + Duration::days(state.config.jwt.refresh_token_expiry_days),
        user_agent: headers
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(|ua| ua.chars().take(MAX_USER_AGENT_LEN).collect()),
        ip_address: system_log::client_ip(headers),
    };

    match replacing {
        None => {
            SessionRepo::create(&state.pool, &session).await?;
        }
        Some(old_id) => {
            SessionRepo::rotate(&state.pool, old_id, &session)
                .await?
                .ok_or_else(invalid_refresh_token)?;
        }
    }

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh.plaintext,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        user,
    })
}
