//! Refresh sessions.
//!
//! One row per issued refresh token. Rotation revokes the old row and
//! inserts its replacement; logout and password reset revoke them all.

use sqlx::FromRow;
use wastewise_core::types::{DbId, Timestamp};

/// A row from the `user_sessions` table.
#[derive(Debug, Clone, FromRow)]
pub struct UserSession {
    pub id: DbId,
    pub user_id: DbId,
    /// SHA-256 hex digest of the refresh token.
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub is_revoked: bool,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A session about to be issued.
#[derive(Debug, Clone)]
pub struct CreateSession {
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    /// Client `User-Agent`, truncated by the caller.
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
}
