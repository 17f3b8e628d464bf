//! Salary package model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use wastewise_core::types::{DbId, Timestamp};

/// A row from the `salary_packages` table. Amounts are per pay period.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SalaryPackage {
    pub id: DbId,
    pub name: String,
    pub position: String,
    pub base_salary_cents: i64,
    pub allowance_cents: i64,
    pub deduction_cents: i64,
    pub currency: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Body of `POST /salary-packages`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSalaryPackage {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 255))]
    pub position: String,
    #[validate(range(min = 1))]
    pub base_salary_cents: i64,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub allowance_cents: i64,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub deduction_cents: i64,
    pub currency: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
}

/// Body of `PUT /salary-packages/{id}`. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateSalaryPackage {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub position: Option<String>,
    #[validate(range(min = 1))]
    pub base_salary_cents: Option<i64>,
    #[validate(range(min = 0))]
    pub allowance_cents: Option<i64>,
    #[validate(range(min = 0))]
    pub deduction_cents: Option<i64>,
    pub currency: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
}
