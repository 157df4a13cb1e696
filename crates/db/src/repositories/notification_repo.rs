//! Repository for the `notifications` table.
//!
//! Every read and delete joins through `notification_batches` so a tenant
//! can only ever see or touch notifications of its own batches.

use ens_core::types::{new_id, DbId};
use sqlx::PgPool;

use crate::models::notification::{CreateNotification, Notification};

/// Columns selected from `notifications n`, aliased to the model's field names.
const COLUMNS: &str = "n.id, n.batch_id, n.recipient_id, n.group_id, n.channel_type, \
     n.creation_timestamp AS created_at, n.completion_timestamp AS completed_at";

/// Provides operations for fanned-out notifications.
pub struct NotificationRepo;

impl NotificationRepo {
    /// Insert one notification. Runs as its own statement so each row is
    /// committed independently of the rest of the fan-out.
    pub async fn create(
        pool: &PgPool,
        input: &CreateNotification,
    ) -> Result<Notification, sqlx::Error> {
        let query = format!(
            "INSERT INTO notifications AS n (id, batch_id, recipient_id, group_id, channel_type) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(new_id())
            .bind(input.batch_id)
            .bind(input.recipient_id)
            .bind(input.group_id)
            .bind(input.channel_type.as_str())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        master_id: DbId,
        id: DbId,
    ) -> Result<Option<Notification>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notifications n \
             JOIN notification_batches b ON b.id = n.batch_id \
             WHERE b.master_id = $1 AND n.id = $2"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(master_id)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the tenant's notifications, oldest first. With `pending_only`,
    /// completed notifications are left out.
    pub async fn list(
        pool: &PgPool,
        master_id: DbId,
        pending_only: bool,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notifications n \
             JOIN notification_batches b ON b.id = n.batch_id \
             WHERE b.master_id = $1 \
               AND ($2 = false OR n.completion_timestamp IS NULL) \
             ORDER BY n.id"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(master_id)
            .bind(pending_only)
            .fetch_all(pool)
            .await
    }

    /// Delete a pending notification.
    ///
    /// Returns `false` when the notification does not exist, belongs to
    /// another tenant, or has already completed.
    pub async fn cancel(pool: &PgPool, master_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM notifications n \
             USING notification_batches b \
             WHERE b.id = n.batch_id \
               AND b.master_id = $1 \
               AND n.id = $2 \
               AND n.completion_timestamp IS NULL",
        )
        .bind(master_id)
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
