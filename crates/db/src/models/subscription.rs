//! Newsletter/service subscription model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use wastewise_core::types::{DbId, Timestamp};

/// A row from the `subscriptions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Subscription {
    pub id: DbId,
    pub email: String,
    pub name: Option<String>,
    pub plan: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Body of `POST /subscribe`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSubscription {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub plan: String,
}

/// Filters for listing subscriptions.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubscriptionQuery {
    pub plan: Option<String>,
    pub active: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
