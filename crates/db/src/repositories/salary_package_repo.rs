//! Repository for the `salary_packages` table.

use sqlx::PgPool;
use wastewise_core::money::DEFAULT_CURRENCY;
use wastewise_core::types::DbId;

use crate::models::salary_package::{CreateSalaryPackage, SalaryPackage, UpdateSalaryPackage};

const COLUMNS: &str = "id, name, position, base_salary_cents, allowance_cents, \
                        deduction_cents, currency, description, created_at, updated_at";

/// Provides CRUD operations for salary packages.
pub struct SalaryPackageRepo;

impl SalaryPackageRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateSalaryPackage,
    ) -> Result<SalaryPackage, sqlx::Error> {
        let query = format!(
            "INSERT INTO salary_packages
                (name, position, base_salary_cents, allowance_cents, deduction_cents,
                 currency, description)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SalaryPackage>(&query)
            .bind(&input.name)
            .bind(&input.position)
            .bind(input.base_salary_cents)
            .bind(input.allowance_cents)
            .bind(input.deduction_cents)
            .bind(input.currency.as_deref().unwrap_or(DEFAULT_CURRENCY))
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<SalaryPackage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM salary_packages WHERE id = $1");
        sqlx::query_as::<_, SalaryPackage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<SalaryPackage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM salary_packages ORDER BY name");
        sqlx::query_as::<_, SalaryPackage>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSalaryPackage,
    ) -> Result<Option<SalaryPackage>, sqlx::Error> {
        let query = format!(
            "UPDATE salary_packages SET
                name = COALESCE($2, name),
                position = COALESCE($3, position),
                base_salary_cents = COALESCE($4, base_salary_cents),
                allowance_cents = COALESCE($5, allowance_cents),
                deduction_cents = COALESCE($6, deduction_cents),
                currency = COALESCE($7, currency),
                description = COALESCE($8, description)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SalaryPackage>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.position)
            .bind(input.base_salary_cents)
            .bind(input.allowance_cents)
            .bind(input.deduction_cents)
            .bind(&input.currency)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Delete a package. Fails with a foreign-key violation while payrolls
    /// still reference it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM salary_packages WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
