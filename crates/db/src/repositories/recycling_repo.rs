//! Repository for the `recycling_requests` table.

use sqlx::PgPool;
use wastewise_core::pagination::page_bounds;
use wastewise_core::types::DbId;

use crate::filter::{fetch_page, BindValue, Filter};
use crate::models::page::Page;
use crate::models::recycling::{
    CreateRecyclingRequest, RecyclingRequest, RecyclingRequestQuery,
};

const COLUMNS: &str = "id, user_id, full_name, email, phone, address, materials, \
                        estimated_weight_kg, preferred_date, status, notes, \
                        created_at, updated_at";

/// Provides CRUD operations for recycling requests.
pub struct RecyclingRequestRepo;

impl RecyclingRequestRepo {
    /// Insert a new request in `Pending` status.
    pub async fn create(
        pool: &PgPool,
        user_id: Option<DbId>,
        input: &CreateRecyclingRequest,
    ) -> Result<RecyclingRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO recycling_requests
                (user_id, full_name, email, phone, address, materials,
                 estimated_weight_kg, preferred_date, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RecyclingRequest>(&query)
            .bind(user_id)
            .bind(&input.full_name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.address)
            .bind(&input.materials)
            .bind(input.estimated_weight_kg)
            .bind(input.preferred_date)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find a request by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<RecyclingRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM recycling_requests WHERE id = $1");
        sqlx::query_as::<_, RecyclingRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List requests matching `params`, newest first.
    pub async fn list(
        pool: &PgPool,
        params: &RecyclingRequestQuery,
    ) -> Result<Page<RecyclingRequest>, sqlx::Error> {
        let (limit, offset) = page_bounds(params.limit, params.offset);

        let mut filter = Filter::new();
        filter
            .eq_opt("status", params.status.clone().map(BindValue::Text))
            .search_opt(&["full_name", "email", "address"], params.search.as_deref());

        fetch_page(
            pool,
            "recycling_requests",
            COLUMNS,
            "created_at DESC, id DESC",
            &filter,
            limit,
            offset,
        )
        .await
    }

    /// Set the status. Returns `None` if the request does not exist.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<RecyclingRequest>, sqlx::Error> {
        let query = format!(
            "UPDATE recycling_requests SET status = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RecyclingRequest>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }
}
