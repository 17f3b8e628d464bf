//! Repository for the `payrolls` table.

use sqlx::PgPool;
use wastewise_core::pagination::page_bounds;
use wastewise_core::payroll::{STATUS_GENERATED, STATUS_PAID};
use wastewise_core::types::DbId;

use crate::filter::{fetch_page, BindValue, Filter};
use crate::models::page::Page;
use crate::models::payroll::{CreatePayroll, Payroll, PayrollQuery};

const COLUMNS: &str = "id, staff_id, salary_package_id, period_start, period_end, \
                        gross_cents, deduction_cents, bonus_cents, net_cents, currency, \
                        status, paid_at, created_at, updated_at";

/// Provides persistence for generated payroll records.
pub struct PayrollRepo;

impl PayrollRepo {
    /// Insert a computed payroll. A second record for the same staff member
    /// and period violates `uq_payrolls_staff_period`.
    pub async fn create(pool: &PgPool, input: &CreatePayroll) -> Result<Payroll, sqlx::Error> {
        let query = format!(
            "INSERT INTO payrolls
                (staff_id, salary_package_id, period_start, period_end, gross_cents,
                 deduction_cents, bonus_cents, net_cents, currency)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Payroll>(&query)
            .bind(input.staff_id)
            .bind(input.salary_package_id)
            .bind(input.period_start)
            .bind(input.period_end)
            .bind(input.amounts.gross_cents)
            .bind(input.amounts.deduction_cents)
            .bind(input.amounts.bonus_cents)
            .bind(input.amounts.net_cents)
            .bind(&input.currency)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Payroll>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM payrolls WHERE id = $1");
        sqlx::query_as::<_, Payroll>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List payrolls, most recent period first.
    pub async fn list(pool: &PgPool, params: &PayrollQuery) -> Result<Page<Payroll>, sqlx::Error> {
        let (limit, offset) = page_bounds(params.limit, params.offset);

        let mut filter = Filter::new();
        filter
            .eq_opt("staff_id", params.staff_id.map(BindValue::BigInt))
            .eq_opt("status", params.status.clone().map(BindValue::Text));

        fetch_page(
            pool,
            "payrolls",
            COLUMNS,
            "period_start DESC, id DESC",
            &filter,
            limit,
            offset,
        )
        .await
    }

    /// Mark a generated payroll as paid. Returns `None` if the record does
    /// not exist or was already paid.
    pub async fn mark_paid(pool: &PgPool, id: DbId) -> Result<Option<Payroll>, sqlx::Error> {
        let query = format!(
            "UPDATE payrolls SET status = $2, paid_at = NOW()
             WHERE id = $1 AND status = $3
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Payroll>(&query)
            .bind(id)
            .bind(STATUS_PAID)
            .bind(STATUS_GENERATED)
            .fetch_optional(pool)
            .await
    }
}
