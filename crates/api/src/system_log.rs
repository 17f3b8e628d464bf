//! Persisting business events to the `system_logs` table.
//!
//! Writes here are best-effort: a failed insert is reported through
//! `tracing` and never fails the request that triggered it.

use axum::http::HeaderMap;
use wastewise_core::logs::client_ip_from_forwarded;
use wastewise_db::models::system_log::CreateSystemLog;
use wastewise_db::repositories::SystemLogRepo;
use wastewise_db::DbPool;

/// Store `entry`, logging (not returning) any database error.
pub async fn record(pool: &DbPool, entry: CreateSystemLog) {
    if let Err(e) = SystemLogRepo::create(pool, &entry).await {
        tracing::warn!(
            error = %e,
            level = %entry.level,
            message = %entry.message,
            "Failed to persist system log entry"
        );
    }
}

/// Originating client address from `x-forwarded-for`, if present.
pub fn client_ip(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(client_ip_from_forwarded)
}
