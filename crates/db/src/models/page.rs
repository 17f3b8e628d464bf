//! Paginated list envelope.

use serde::Serialize;

/// One page of a filtered list plus the total matching row count.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T: Serialize> {
    pub items: Vec<T>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}
