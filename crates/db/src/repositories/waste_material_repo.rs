//! Repository for the `waste_materials` catalog.

use sqlx::PgPool;
use wastewise_core::types::DbId;

use crate::models::waste_material::{CreateWasteMaterial, UpdateWasteMaterial, WasteMaterial};

const COLUMNS: &str = "id, name, category, description, price_per_kg_cents, is_recyclable, \
                        created_at, updated_at";

/// Provides CRUD operations for waste materials.
pub struct WasteMaterialRepo;

impl WasteMaterialRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateWasteMaterial,
    ) -> Result<WasteMaterial, sqlx::Error> {
        let query = format!(
            "INSERT INTO waste_materials
                (name, category, description, price_per_kg_cents, is_recyclable)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WasteMaterial>(&query)
            .bind(&input.name)
            .bind(&input.category)
            .bind(&input.description)
            .bind(input.price_per_kg_cents)
            .bind(input.is_recyclable)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<WasteMaterial>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM waste_materials WHERE id = $1");
        sqlx::query_as::<_, WasteMaterial>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the catalog ordered by name, optionally restricted to one category.
    pub async fn list(
        pool: &PgPool,
        category: Option<&str>,
    ) -> Result<Vec<WasteMaterial>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM waste_materials
             WHERE $1::TEXT IS NULL OR category = $1
             ORDER BY name"
        );
        sqlx::query_as::<_, WasteMaterial>(&query)
            .bind(category)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateWasteMaterial,
    ) -> Result<Option<WasteMaterial>, sqlx::Error> {
        let query = format!(
            "UPDATE waste_materials SET
                name = COALESCE($2, name),
                category = COALESCE($3, category),
                description = COALESCE($4, description),
                price_per_kg_cents = COALESCE($5, price_per_kg_cents),
                is_recyclable = COALESCE($6, is_recyclable)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WasteMaterial>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.category)
            .bind(&input.description)
            .bind(input.price_per_kg_cents)
            .bind(input.is_recyclable)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM waste_materials WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
