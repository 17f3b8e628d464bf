//! System log models. Entries are immutable once written.

use serde::Serialize;
use sqlx::FromRow;
use wastewise_core::types::{DbId, Timestamp};

/// A row from the `system_logs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SystemLog {
    pub id: DbId,
    pub level: String,
    pub message: String,
    pub user_id: Option<DbId>,
    pub ip_address: Option<String>,
    pub context: Option<serde_json::Value>,
    pub created_at: Timestamp,
}

/// DTO for writing a log entry.
#[derive(Debug, Clone)]
pub struct CreateSystemLog {
    pub level: String,
    pub message: String,
    pub user_id: Option<DbId>,
    pub ip_address: Option<String>,
    pub context: Option<serde_json::Value>,
}

impl CreateSystemLog {
    /// An entry with no user, address or context attached.
    pub fn new(level: &str, message: impl Into<String>) -> Self {
        Self {
            level: level.to_string(),
            message: message.into(),
            user_id: None,
            ip_address: None,
            context: None,
        }
    }

    pub fn with_user(mut self, user_id: Option<DbId>) -> Self {
        self.user_id = user_id;
        self
    }

    pub fn with_context(mut self, context: serde_json::Value) -> Self {
        self.context = Some(context);
        self
    }
}

/// Filters for querying the system log.
#[derive(Debug, Clone, Default)]
pub struct SystemLogQuery {
    pub level: Option<String>,
    pub user_id: Option<DbId>,
    pub from: Option<Timestamp>,
    pub to: Option<Timestamp>,
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
