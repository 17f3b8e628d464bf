//! Handlers for payroll generation and settlement. All routes are admin-only.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;
use wastewise_core::error::CoreError;
use wastewise_core::logs::LEVEL_INFO;
use wastewise_core::payroll::{compute_amounts, validate_period, validate_status, PackageFigures};
use wastewise_core::roles::is_staff_or_admin;
use wastewise_core::types::DbId;
use wastewise_db::models::page::Page;
use wastewise_db::models::payroll::{CreatePayroll, GeneratePayroll, Payroll, PayrollQuery};
use wastewise_db::models::system_log::CreateSystemLog;
use wastewise_db::repositories::{PayrollRepo, RoleRepo, SalaryPackageRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::system_log;

/// POST /api/payrolls
///
/// Compute and store one pay period for a staff member from a salary
/// package. A second payroll for the same staff member and period is a 409.
pub async fn generate_payroll(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<GeneratePayroll>,
) -> AppResult<(StatusCode, Json<DataResponse<Payroll>>)> {
    validate_period(input.period_start, input.period_end)?;

    let staff = UserRepo::find_by_id(&state.pool, input.staff_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: input.staff_id,
        }))?;
    if !staff.is_active {
        return Err(AppError::Core(CoreError::Validation(format!(
            "User {} is deactivated",
            staff.id
        ))));
    }
    let role = RoleRepo::resolve_name(&state.pool, staff.role_id).await?;
    if !is_staff_or_admin(&role) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "User {} is not a staff member",
            staff.id
        ))));
    }

    let package = SalaryPackageRepo::find_by_id(&state.pool, input.salary_package_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "SalaryPackage",
            id: input.salary_package_id,
        }))?;

    let amounts = compute_amounts(
        PackageFigures {
            base_salary_cents: package.base_salary_cents,
            allowance_cents: package.allowance_cents,
            deduction_cents: package.deduction_cents,
        },
        input.bonus_cents,
    )?;

    let payroll = PayrollRepo::create(
        &state.pool,
        &CreatePayroll {
            staff_id: staff.id,
            salary_package_id: package.id,
            period_start: input.period_start,
            period_end: input.period_end,
            amounts,
            currency: package.currency.clone(),
        },
    )
    .await?;

    tracing::info!(
        payroll_id = payroll.id,
        staff_id = staff.id,
        net_cents = payroll.net_cents,
        "Payroll generated"
    );
    system_log::record(
        &state.pool,
        CreateSystemLog::new(
            LEVEL_INFO,
            format!("Payroll {} generated for user {}", payroll.id, staff.id),
        )
        .with_user(Some(admin.user_id))
        .with_context(json!({
            "payroll_id": payroll.id,
            "staff_id": staff.id,
            "period_start": payroll.period_start,
            "period_end": payroll.period_end,
            "net_cents": payroll.net_cents,
        })),
    )
    .await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: payroll })))
}

/// GET /api/payrolls?staff_id=&status=&limit=&offset=
pub async fn list_payrolls(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<PayrollQuery>,
) -> AppResult<Json<DataResponse<Page<Payroll>>>> {
    if let Some(status) = params.status.as_deref() {
        validate_status(status)?;
    }
    let page = PayrollRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: page }))
}

/// GET /api/payrolls/{id}
pub async fn get_payroll(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Payroll>>> {
    let payroll = find_payroll(&state, id).await?;
    Ok(Json(DataResponse { data: payroll }))
}

/// POST /api/payrolls/{id}/pay
///
/// `generated -> paid`. Paying twice is a 409.
pub async fn mark_paid(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Payroll>>> {
    let Some(payroll) = PayrollRepo::mark_paid(&state.pool, id).await? else {
        let existing = find_payroll(&state, id).await?;
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Payroll {id} is already {}",
            existing.status
        ))));
    };

    tracing::info!(payroll_id = id, user_id = admin.user_id, "Payroll marked paid");
    system_log::record(
        &state.pool,
        CreateSystemLog::new(LEVEL_INFO, format!("Payroll {id} marked paid"))
            .with_user(Some(admin.user_id))
            .with_context(json!({ "payroll_id": id, "net_cents": payroll.net_cents })),
    )
    .await;

    Ok(Json(DataResponse { data: payroll }))
}

async fn find_payroll(state: &AppState, id: DbId) -> AppResult<Payroll> {
    PayrollRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Payroll",
            id,
        }))
}
