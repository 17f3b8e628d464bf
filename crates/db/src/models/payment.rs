//! Card payment model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use wastewise_core::types::{DbId, Timestamp};

/// Settled payment intent.
pub const STATUS_SUCCEEDED: &str = "succeeded";

/// Payment intent whose last charge attempt failed.
pub const STATUS_FAILED: &str = "failed";

/// A row from the `payments` table, mirroring one Stripe payment intent.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Payment {
    pub id: DbId,
    pub payment_intent_id: String,
    pub pickup_id: Option<DbId>,
    pub user_id: Option<DbId>,
    pub amount_cents: i64,
    pub currency: String,
    pub status: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording a newly created payment intent.
#[derive(Debug, Clone)]
pub struct CreatePayment {
    pub payment_intent_id: String,
    pub pickup_id: Option<DbId>,
    pub user_id: Option<DbId>,
    pub amount_cents: i64,
    pub currency: String,
    pub status: String,
    pub description: Option<String>,
}

/// Filters for listing payments.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentQuery {
    pub pickup_id: Option<DbId>,
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
