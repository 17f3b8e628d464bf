//! Role gates for handler signatures.
//!
//! `RequireAdmin` guards user management, salary packages, payroll, the
//! system log and the payments ledger. `RequireStaff` guards the pickup and
//! recycling work queues and the material catalog; admins pass it too.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use wastewise_core::error::CoreError;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticate, then reject with 403 unless `allowed` holds for the caller.
async fn gate(
    parts: &mut Parts,
    state: &AppState,
    allowed: fn(&AuthUser) -> bool,
    denial: &'static str,
) -> Result<AuthUser, AppError> {
    let user = AuthUser::from_request_parts(parts, state).await?;
    if !allowed(&user) {
        tracing::debug!(user_id = user.user_id, role = %user.role, denial, "Access denied");
        return Err(AppError::Core(CoreError::Forbidden(denial.into())));
    }
    Ok(user)
}

/// The caller holds the `admin` role.
///
/// ```ignore
/// async fn list_payrolls(RequireAdmin(admin): RequireAdmin) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        gate(parts, state, AuthUser::is_admin, "Admin role required")
            .await
            .map(RequireAdmin)
    }
}

/// The caller holds `staff` or `admin`.
pub struct RequireStaff(pub AuthUser);

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        gate(parts, state, AuthUser::is_staff, "Staff or admin role required")
            .await
            .map(RequireStaff)
    }
}
