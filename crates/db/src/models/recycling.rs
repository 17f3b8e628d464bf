//! Recycling request model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use wastewise_core::types::{Date, DbId, Timestamp};

/// A row from the `recycling_requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RecyclingRequest {
    pub id: DbId,
    pub user_id: Option<DbId>,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub materials: Vec<String>,
    pub estimated_weight_kg: f64,
    pub preferred_date: Date,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Body of `POST /recycling-request`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRecyclingRequest {
    #[validate(length(min = 1, max = 255))]
    pub full_name: String,
    #[validate(email)]
    pub email: String,
    pub phone: String,
    #[validate(length(min = 1, max = 255))]
    pub address: String,
    pub materials: Vec<String>,
    pub estimated_weight_kg: f64,
    pub preferred_date: Date,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

/// Filters for listing recycling requests.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecyclingRequestQuery {
    pub status: Option<String>,
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
