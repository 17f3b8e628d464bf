//! Payroll record model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use wastewise_core::payroll::PayrollAmounts;
use wastewise_core::types::{Date, DbId, Timestamp};

/// A row from the `payrolls` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Payroll {
    pub id: DbId,
    pub staff_id: DbId,
    pub salary_package_id: DbId,
    pub period_start: Date,
    pub period_end: Date,
    pub gross_cents: i64,
    pub deduction_cents: i64,
    pub bonus_cents: i64,
    pub net_cents: i64,
    pub currency: String,
    /// `generated` or `paid`.
    pub status: String,
    pub paid_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Body of `POST /payrolls`.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratePayroll {
    pub staff_id: DbId,
    pub salary_package_id: DbId,
    pub period_start: Date,
    pub period_end: Date,
    #[serde(default)]
    pub bonus_cents: i64,
}

/// Fully computed payroll row ready for insert.
#[derive(Debug, Clone)]
pub struct CreatePayroll {
    pub staff_id: DbId,
    pub salary_package_id: DbId,
    pub period_start: Date,
    pub period_end: Date,
    pub amounts: PayrollAmounts,
    pub currency: String,
}

/// Filters for listing payroll records.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PayrollQuery {
    pub staff_id: Option<DbId>,
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
