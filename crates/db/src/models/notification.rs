//! Notification batch and notification models.

use ens_core::channels::ChannelType;
use ens_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `notification_batches` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NotificationBatch {
    pub id: DbId,
    pub master_id: DbId,
    pub sent: bool,
    pub created_at: Timestamp,
    pub sent_at: Option<Timestamp>,
}

/// A row from the `notifications` table.
///
/// Ownership is never stored on the row; every query reaches the tenant
/// through `batch_id`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub batch_id: DbId,
    pub recipient_id: DbId,
    pub group_id: DbId,
    #[sqlx(try_from = "String")]
    pub channel_type: ChannelType,
    pub created_at: Timestamp,
    /// `None` while the notification is pending and may still be cancelled.
    pub completed_at: Option<Timestamp>,
}

/// DTO for inserting one fanned-out notification.
#[derive(Debug, Clone)]
pub struct CreateNotification {
    pub batch_id: DbId,
    pub recipient_id: DbId,
    pub group_id: DbId,
    pub channel_type: ChannelType,
}
