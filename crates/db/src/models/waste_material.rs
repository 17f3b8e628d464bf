//! Waste material catalog model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use wastewise_core::types::{DbId, Timestamp};

/// A row from the `waste_materials` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WasteMaterial {
    pub id: DbId,
    pub name: String,
    pub category: String,
    pub description: Option<String>,
    pub price_per_kg_cents: i64,
    pub is_recyclable: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a catalog entry.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateWasteMaterial {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub category: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub price_per_kg_cents: i64,
    #[serde(default = "default_recyclable")]
    pub is_recyclable: bool,
}

fn default_recyclable() -> bool {
    true
}

/// DTO for updating a catalog entry. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateWasteMaterial {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub category: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(range(min = 0))]
    pub price_per_kg_cents: Option<i64>,
    pub is_recyclable: Option<bool>,
}
