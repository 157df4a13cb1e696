//! Repository for the `telegram_contacts` opt-in table.

use sqlx::PgPool;

use crate::models::telegram_contact::OptInChange;

/// Provides opt-in toggles keyed by Telegram chat id.
pub struct TelegramContactRepo;

impl TelegramContactRepo {
    /// Opt a chat in, creating the contact on first contact.
    pub async fn subscribe(pool: &PgPool, chat_id: i64) -> Result<OptInChange, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO telegram_contacts (user_id, active) VALUES ($1, true) \
             ON CONFLICT (user_id) DO UPDATE SET active = true, updated_at = NOW() \
             WHERE telegram_contacts.active = false",
        )
        .bind(chat_id)
        .execute(pool)
        .await?;
        Ok(change_from(result.rows_affected()))
    }

    /// Opt a chat out. Unknown chats are reported as [`OptInChange::Unchanged`].
    pub async fn unsubscribe(pool: &PgPool, chat_id: i64) -> Result<OptInChange, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE telegram_contacts SET active = false, updated_at = NOW() \
             WHERE user_id = $1 AND active = true",
        )
        .bind(chat_id)
        .execute(pool)
        .await?;
        Ok(change_from(result.rows_affected()))
    }
}

fn change_from(rows_affected: u64) -> OptInChange {
    if rows_affected > 0 {
        OptInChange::Changed
    } else {
        OptInChange::Unchanged
    }
}
