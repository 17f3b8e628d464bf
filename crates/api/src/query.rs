//! Query parameter types shared across handler modules.

use serde::Deserialize;
use wastewise_core::types::{DbId, Timestamp};

/// `?category=` filter for the waste material catalog.
#[derive(Debug, Deserialize)]
pub struct CategoryFilter {
    pub category: Option<String>,
}

/// Query string for `GET /logs`. Timestamps are RFC 3339.
#[derive(Debug, Deserialize)]
pub struct LogQueryParams {
    pub level: Option<String>,
    pub user_id: Option<DbId>,
    pub from: Option<Timestamp>,
    pub to: Option<Timestamp>,
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
