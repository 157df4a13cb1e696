//! Refresh-token sessions.

use ens_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A live refresh session. The token itself is never stored, only its hash.
#[derive(Debug, Clone, FromRow)]
pub struct RefreshSession {
    pub id: DbId,
    pub user_id: DbId,
    pub expires_at: Timestamp,
}

pub struct NewRefreshSession {
    pub user_id: DbId,
    pub token_hash: String,
    pub expires_at: Timestamp,
}
