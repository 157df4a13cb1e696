//! Rows produced when resolving who a batch is sent to.

use ens_core::types::DbId;
use sqlx::FromRow;

/// One (group, recipient) pair reachable from an active, templated group.
///
/// `opted_in` is `None` when the recipient has no Telegram id or the chat
/// never contacted the bot.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DispatchTarget {
    pub group_id: DbId,
    pub recipient_id: DbId,
    pub telegram_id: Option<i64>,
    pub message_text: Option<String>,
    pub opted_in: Option<bool>,
}
