//! Repository for the `payments` table.

use sqlx::PgPool;
use wastewise_core::pagination::page_bounds;

use crate::filter::{fetch_page, BindValue, Filter};
use crate::models::page::Page;
use crate::models::payment::{CreatePayment, Payment, PaymentQuery};

const COLUMNS: &str = "id, payment_intent_id, pickup_id, user_id, amount_cents, currency, \
                        status, description, created_at, updated_at";

/// Tracks payment intents created through the gateway.
pub struct PaymentRepo;

impl PaymentRepo {
    pub async fn create(pool: &PgPool, input: &CreatePayment) -> Result<Payment, sqlx::Error> {
        let query = format!(
            "INSERT INTO payments
                (payment_intent_id, pickup_id, user_id, amount_cents, currency, status,
                 description)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Payment>(&query)
            .bind(&input.payment_intent_id)
            .bind(input.pickup_id)
            .bind(input.user_id)
            .bind(input.amount_cents)
            .bind(&input.currency)
            .bind(&input.status)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_intent_id(
        pool: &PgPool,
        payment_intent_id: &str,
    ) -> Result<Option<Payment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM payments WHERE payment_intent_id = $1");
        sqlx::query_as::<_, Payment>(&query)
            .bind(payment_intent_id)
            .fetch_optional(pool)
            .await
    }

    /// Record the latest gateway status for an intent. Returns `None` for
    /// intents this service never created.
    pub async fn update_status(
        pool: &PgPool,
        payment_intent_id: &str,
        status: &str,
    ) -> Result<Option<Payment>, sqlx::Error> {
        let query = format!(
            "UPDATE payments SET status = $2 WHERE payment_intent_id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Payment>(&query)
            .bind(payment_intent_id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool, params: &PaymentQuery) -> Result<Page<Payment>, sqlx::Error> {
        let (limit, offset) = page_bounds(params.limit, params.offset);

        let mut filter = Filter::new();
        filter
            .eq_opt("pickup_id", params.pickup_id.map(BindValue::BigInt))
            .eq_opt("status", params.status.clone().map(BindValue::Text));

        fetch_page(
            pool,
            "payments",
            COLUMNS,
            "created_at DESC, id DESC",
            &filter,
            limit,
            offset,
        )
        .await
    }
}
