//! Repository for the `subscriptions` table.

use sqlx::PgPool;
use wastewise_core::pagination::page_bounds;
use wastewise_core::types::DbId;

use crate::filter::{fetch_page, BindValue, Filter};
use crate::models::page::Page;
use crate::models::subscription::{CreateSubscription, Subscription, SubscriptionQuery};

const COLUMNS: &str = "id, email, name, plan, is_active, created_at, updated_at";

/// Whether [`SubscriptionRepo::upsert`] inserted a row or refreshed an existing one.
#[derive(Debug, Clone)]
pub enum SubscribeOutcome {
    Created(Subscription),
    Updated(Subscription),
}

impl SubscribeOutcome {
    pub fn subscription(&self) -> &Subscription {
        match self {
            Self::Created(s) | Self::Updated(s) => s,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}

#[derive(sqlx::FromRow)]
struct UpsertRow {
    #[sqlx(flatten)]
    subscription: Subscription,
    inserted: bool,
}

/// Provides subscription persistence keyed by email.
pub struct SubscriptionRepo;

impl SubscriptionRepo {
    /// Insert a subscription, or update plan/name and reactivate it if the
    /// email is already subscribed. `input.email` must already be normalized.
    pub async fn upsert(
        pool: &PgPool,
        input: &CreateSubscription,
    ) -> Result<SubscribeOutcome, sqlx::Error> {
        // xmax is zero only for a freshly inserted tuple.
        let query = format!(
            "INSERT INTO subscriptions (email, name, plan)
             VALUES ($1, $2, $3)
             ON CONFLICT ON CONSTRAINT uq_subscriptions_email DO UPDATE SET
                name = COALESCE(EXCLUDED.name, subscriptions.name),
                plan = EXCLUDED.plan,
                is_active = TRUE
             RETURNING {COLUMNS}, (xmax = 0) AS inserted"
        );
        let row = sqlx::query_as::<_, UpsertRow>(&query)
            .bind(&input.email)
            .bind(&input.name)
            .bind(&input.plan)
            .fetch_one(pool)
            .await?;

        Ok(if row.inserted {
            SubscribeOutcome::Created(row.subscription)
        } else {
            SubscribeOutcome::Updated(row.subscription)
        })
    }

    pub async fn list(
        pool: &PgPool,
        params: &SubscriptionQuery,
    ) -> Result<Page<Subscription>, sqlx::Error> {
        let (limit, offset) = page_bounds(params.limit, params.offset);

        let mut filter = Filter::new();
        filter
            .eq_opt("plan", params.plan.clone().map(BindValue::Text))
            .eq_opt("is_active", params.active.map(BindValue::Bool));

        fetch_page(
            pool,
            "subscriptions",
            COLUMNS,
            "created_at DESC, id DESC",
            &filter,
            limit,
            offset,
        )
        .await
    }

    /// Mark a subscription inactive. Returns `true` if the row existed.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE subscriptions SET is_active = FALSE WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
