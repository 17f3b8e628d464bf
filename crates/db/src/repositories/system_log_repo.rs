//! Repository for the append-only `system_logs` table.

use sqlx::PgPool;
use wastewise_core::pagination::page_bounds;

use crate::filter::{fetch_page, BindValue, Filter};
use crate::models::page::Page;
use crate::models::system_log::{CreateSystemLog, SystemLog, SystemLogQuery};

const COLUMNS: &str = "id, level, message, user_id, ip_address, context, created_at";

/// Writes and queries system log entries. There is no update or delete.
pub struct SystemLogRepo;

impl SystemLogRepo {
    pub async fn create(pool: &PgPool, input: &CreateSystemLog) -> Result<SystemLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO system_logs (level, message, user_id, ip_address, context)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SystemLog>(&query)
            .bind(&input.level)
            .bind(&input.message)
            .bind(input.user_id)
            .bind(&input.ip_address)
            .bind(&input.context)
            .fetch_one(pool)
            .await
    }

    /// Query entries newest first.
    pub async fn query(
        pool: &PgPool,
        params: &SystemLogQuery,
    ) -> Result<Page<SystemLog>, sqlx::Error> {
        let (limit, offset) = page_bounds(params.limit, params.offset);

        let mut filter = Filter::new();
        filter
            .eq_opt("level", params.level.clone().map(BindValue::Text))
            .eq_opt("user_id", params.user_id.map(BindValue::BigInt));
        if let Some(from) = params.from {
            filter.push("created_at >= {}", BindValue::Timestamp(from));
        }
        if let Some(to) = params.to {
            filter.push("created_at <= {}", BindValue::Timestamp(to));
        }
        filter.search_opt(&["message"], params.search.as_deref());

        fetch_page(
            pool,
            "system_logs",
            COLUMNS,
            "created_at DESC, id DESC",
            &filter,
            limit,
            offset,
        )
        .await
    }
}
