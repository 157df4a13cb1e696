//! Group-specific queries on top of the shared draft lifecycle, and the
//! `recipient_group_members` join table.

use ens_core::types::DbId;
use sqlx::PgPool;

use crate::lifecycle::DraftLifecycle;
use crate::models::group::{GroupFields, RecipientGroup};
use crate::models::recipient::Recipient;

pub type GroupRepo = DraftLifecycle<GroupFields>;

impl DraftLifecycle<GroupFields> {
    /// List the tenant's groups that currently take part in dispatch.
    pub async fn list_active(
        pool: &PgPool,
        master_id: DbId,
    ) -> Result<Vec<RecipientGroup>, sqlx::Error> {
        sqlx::query_as::<_, RecipientGroup>(
            "SELECT id, master_id, name, template_id, active FROM recipient_groups \
             WHERE master_id = $1 AND active = true \
             ORDER BY id",
        )
        .bind(master_id)
        .fetch_all(pool)
        .await
    }
}

/// Provides membership operations between groups and recipients.
pub struct GroupMemberRepo;

impl GroupMemberRepo {
    /// List the recipients that belong to a group.
    pub async fn list_recipients(
        pool: &PgPool,
        master_id: DbId,
        group_id: DbId,
    ) -> Result<Vec<Recipient>, sqlx::Error> {
        sqlx::query_as::<_, Recipient>(
            "SELECT r.id, r.master_id, r.name, r.email, r.phone_number, r.telegram_id \
             FROM recipient_group_members m \
             JOIN recipients r ON r.id = m.recipient_id \
             WHERE m.master_id = $1 AND m.recipient_group_id = $2 \
             ORDER BY r.id",
        )
        .bind(master_id)
        .bind(group_id)
        .fetch_all(pool)
        .await
    }

    /// Add a recipient to a group.
    ///
    /// Adding an existing member fails with the `uq_recipient_group_members`
    /// unique violation.
    pub async fn add(
        pool: &PgPool,
        master_id: DbId,
        group_id: DbId,
        recipient_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO recipient_group_members (master_id, recipient_group_id, recipient_id) \
             VALUES ($1, $2, $3)",
        )
        .bind(master_id)
        .bind(group_id)
        .bind(recipient_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Remove a recipient from a group. Returns `false` if it was not a member.
    pub async fn remove(
        pool: &PgPool,
        master_id: DbId,
        group_id: DbId,
        recipient_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM recipient_group_members \
             WHERE master_id = $1 AND recipient_group_id = $2 AND recipient_id = $3",
        )
        .bind(master_id)
        .bind(group_id)
        .bind(recipient_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
