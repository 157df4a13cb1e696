//! Repository for the `notification_batches` table.

use ens_core::types::{new_id, DbId};
use sqlx::PgPool;

use crate::models::notification::NotificationBatch;

const COLUMNS: &str = "id, master_id, sent, created_at, sent_at";

/// Provides operations for notification batches. Batches are never deleted.
pub struct BatchRepo;

impl BatchRepo {
    /// Insert a new, unsent batch.
    pub async fn create(pool: &PgPool, master_id: DbId) -> Result<NotificationBatch, sqlx::Error> {
        let query = format!(
            "INSERT INTO notification_batches (id, master_id) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, NotificationBatch>(&query)
            .bind(new_id())
            .bind(master_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        master_id: DbId,
        id: DbId,
    ) -> Result<Option<NotificationBatch>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM notification_batches WHERE master_id = $1 AND id = $2");
        sqlx::query_as::<_, NotificationBatch>(&query)
            .bind(master_id)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Flip `sent` from `false` to `true`.
    ///
    /// Returns `true` only for the single caller whose update took effect;
    /// a missing batch, another tenant's batch and an already-sent batch all
    /// return `false`. This is the only gate against dispatching twice.
    pub async fn mark_sent(pool: &PgPool, master_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notification_batches SET sent = true, sent_at = NOW() \
             WHERE id = $1 AND master_id = $2 AND sent = false",
        )
        .bind(id)
        .bind(master_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
