//! Pickup request model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use wastewise_core::types::{Date, DbId, Timestamp};

/// A row from the `pickups` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Pickup {
    pub id: DbId,
    pub user_id: Option<DbId>,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub waste_types: Vec<String>,
    pub address: String,
    pub preferred_date: Date,
    pub service_type: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub amount_cents: i64,
    /// One of `Pending`, `Scheduled`, `Completed`, `Cancelled`.
    pub status: String,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Body of `POST /pickups`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePickup {
    #[validate(length(min = 1, max = 255))]
    pub full_name: String,
    #[validate(email)]
    pub email: String,
    pub phone: String,
    pub waste_types: Vec<String>,
    #[validate(length(min = 1, max = 255))]
    pub address: String,
    pub preferred_date: Date,
    pub service_type: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub amount_cents: i64,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

/// Body of `PUT /pickups/{id}`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdatePickup {
    #[validate(length(min = 1, max = 255))]
    pub full_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub waste_types: Option<Vec<String>>,
    #[validate(length(min = 1, max = 255))]
    pub address: Option<String>,
    pub preferred_date: Option<Date>,
    pub service_type: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[validate(range(min = 0))]
    pub amount_cents: Option<i64>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

/// Filters for listing pickups.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PickupQuery {
    pub status: Option<String>,
    pub service_type: Option<String>,
    pub user_id: Option<DbId>,
    /// Earliest preferred date (inclusive).
    pub from: Option<Date>,
    /// Latest preferred date (inclusive).
    pub to: Option<Date>,
    /// Substring of name, email or address.
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
