//! Repository for the `pickups` table.

use sqlx::PgPool;
use wastewise_core::pagination::page_bounds;
use wastewise_core::types::DbId;

use crate::filter::{fetch_page, BindValue, Filter};
use crate::models::page::Page;
use crate::models::pickup::{CreatePickup, Pickup, PickupQuery, UpdatePickup};

const COLUMNS: &str = "id, user_id, full_name, email, phone, waste_types, address, \
                        preferred_date, service_type, latitude, longitude, amount_cents, \
                        status, notes, created_at, updated_at";

/// Provides CRUD operations for pickup requests.
pub struct PickupRepo;

impl PickupRepo {
    /// Insert a new pickup in `Pending` status.
    pub async fn create(
        pool: &PgPool,
        user_id: Option<DbId>,
        input: &CreatePickup,
    ) -> Result<Pickup, sqlx::Error> {
        let query = format!(
            "INSERT INTO pickups
                (user_id, full_name, email, phone, waste_types, address, preferred_date,
                 service_type, latitude, longitude, amount_cents, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Pickup>(&query)
            .bind(user_id)
            .bind(&input.full_name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.waste_types)
            .bind(&input.address)
            .bind(input.preferred_date)
            .bind(&input.service_type)
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(input.amount_cents)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find a pickup by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Pickup>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pickups WHERE id = $1");
        sqlx::query_as::<_, Pickup>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List pickups matching `params`, newest first.
    pub async fn list(pool: &PgPool, params: &PickupQuery) -> Result<Page<Pickup>, sqlx::Error> {
        let (limit, offset) = page_bounds(params.limit, params.offset);

        let mut filter = Filter::new();
        filter
            .eq_opt("status", params.status.clone().map(BindValue::Text))
            .eq_opt("service_type", params.service_type.clone().map(BindValue::Text))
            .eq_opt("user_id", params.user_id.map(BindValue::BigInt));
        if let Some(from) = params.from {
            filter.push("preferred_date >= {}", BindValue::Date(from));
        }
        if let Some(to) = params.to {
            filter.push("preferred_date <= {}", BindValue::Date(to));
        }
        filter.search_opt(&["full_name", "email", "address"], params.search.as_deref());

        fetch_page(
            pool,
            "pickups",
            COLUMNS,
            "created_at DESC, id DESC",
            &filter,
            limit,
            offset,
        )
        .await
    }

    /// Apply a partial update. Returns `None` if the pickup does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePickup,
    ) -> Result<Option<Pickup>, sqlx::Error> {
        let query = format!(
            "UPDATE pickups SET
                full_name = COALESCE($2, full_name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone),
                waste_types = COALESCE($5, waste_types),
                address = COALESCE($6, address),
                preferred_date = COALESCE($7, preferred_date),
                service_type = COALESCE($8, service_type),
                latitude = COALESCE($9, latitude),
                longitude = COALESCE($10, longitude),
                amount_cents = COALESCE($11, amount_cents),
                notes = COALESCE($12, notes)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Pickup>(&query)
            .bind(id)
            .bind(&input.full_name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.waste_types)
            .bind(&input.address)
            .bind(input.preferred_date)
            .bind(&input.service_type)
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(input.amount_cents)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Set the status. Any status may follow any other.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<Pickup>, sqlx::Error> {
        let query = format!("UPDATE pickups SET status = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Pickup>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Move a pickup from `from` to `to` only if it is currently in `from`.
    ///
    /// Returns `true` if the row changed.
    pub async fn transition_if(
        pool: &PgPool,
        id: DbId,
        from: &str,
        to: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE pickups SET status = $3 WHERE id = $1 AND status = $2")
            .bind(id)
            .bind(from)
            .bind(to)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently delete a pickup. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM pickups WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
