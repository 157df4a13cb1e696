//! Telegram opt-in bot.
//!
//! [`OptInBot`] long-polls the Bot API and lets a chat switch notification
//! delivery on (`/send_notifications`) or off (`/stop_notifications`). The
//! chat id is the channel identity; it is what recipients store as
//! `telegram_id`.

use std::time::Duration;

use ens_db::models::telegram_contact::OptInChange;
use ens_db::repositories::TelegramContactRepo;
use ens_db::DbPool;
use tokio_util::sync::CancellationToken;

use crate::telegram::{TelegramClient, Update};

/// Pause after a failed poll before trying again.
const POLL_ERROR_BACKOFF: Duration = Duration::from_secs(5);

pub const HELP_MESSAGE: &str = "This is a notifier bot for the emergency notification system. \
     Use /send_notifications or /stop_notifications to accept or reject notifications \
     from other users";
pub const SUBSCRIBED_MESSAGE: &str =
    "Success! Now you will receive notifications from other users";
pub const ALREADY_SUBSCRIBED_MESSAGE: &str =
    "You are already subscribed to notifications receiving";
pub const UNSUBSCRIBED_MESSAGE: &str = "Stopped notifications receiving";
pub const NOT_SUBSCRIBED_MESSAGE: &str = "You aren't subscribed to notifications receiving";

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotCommand {
    Start,
    Help,
    SendNotifications,
    StopNotifications,
}

impl BotCommand {
    /// Parse a message text. Accepts the `/command@bot_name` form Telegram
    /// uses in group chats. Anything else is `None`.
    pub fn parse(text: &str) -> Option<Self> {
        let command = text.trim();
        let command = command.split('@').next().unwrap_or(command);
        match command {
            "/start" => Some(BotCommand::Start),
            "/help" => Some(BotCommand::Help),
            "/send_notifications" => Some(BotCommand::SendNotifications),
            "/stop_notifications" => Some(BotCommand::StopNotifications),
            _ => None,
        }
    }
}

/// Apply a chat message and return the reply to send back.
///
/// Unknown text gets the help message.
pub async fn reply_to(pool: &DbPool, chat_id: i64, text: &str) -> Result<&'static str, sqlx::Error> {
    let reply = match BotCommand::parse(text) {
        None | Some(BotCommand::Start) | Some(BotCommand::Help) => HELP_MESSAGE,
        Some(BotCommand::SendNotifications) => {
            match TelegramContactRepo::subscribe(pool, chat_id).await? {
                OptInChange::Changed => {
                    tracing::info!(chat_id, "Chat opted in to notifications");
                    SUBSCRIBED_MESSAGE
                }
                OptInChange::Unchanged => ALREADY_SUBSCRIBED_MESSAGE,
            }
        }
        Some(BotCommand::StopNotifications) => {
            match TelegramContactRepo::unsubscribe(pool, chat_id).await? {
                OptInChange::Changed => {
                    tracing::info!(chat_id, "Chat opted out of notifications");
                    UNSUBSCRIBED_MESSAGE
                }
                OptInChange::Unchanged => NOT_SUBSCRIBED_MESSAGE,
            }
        }
    };
    Ok(reply)
}

// ---------------------------------------------------------------------------
// OptInBot
// ---------------------------------------------------------------------------

/// Background service answering opt-in commands.
pub struct OptInBot {
    pool: DbPool,
    client: TelegramClient,
    poll_timeout: Duration,
}

impl OptInBot {
    pub fn new(pool: DbPool, client: TelegramClient, poll_timeout: Duration) -> Self {
        Self {
            pool,
            client,
            poll_timeout,
        }
    }

    /// Run the long-poll loop until `cancel` fires.
    ///
    /// Poll failures are logged and retried after a short pause; they never
    /// stop the loop.
    pub async fn run(self, cancel: CancellationToken) {
        let mut offset: i64 = 0;
        tracing::info!("Telegram opt-in bot started");

        loop {
            let polled = tokio::select! {
                _ = cancel.cancelled() => break,
                polled = self.client.get_updates(offset, self.poll_timeout) => polled,
            };

            match polled {
                Ok(updates) => {
                    for update in updates {
                        offset = offset.max(update.update_id + 1);
                        self.handle_update(update).await;
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Telegram poll failed, backing off");
                    tokio::select! {
                        _ = cancel.cancelled() => break,
                        _ = tokio::time::sleep(POLL_ERROR_BACKOFF) => {}
                    }
                }
            }
        }

        tracing::info!("Telegram opt-in bot cancelled");
    }

    async fn handle_update(&self, update: Update) {
        let Some(message) = update.message else {
            return;
        };
        let Some(text) = message.text else {
            return;
        };
        let chat_id = message.chat.id;

        let reply = match reply_to(&self.pool, chat_id, &text).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(chat_id, error = %e, "Failed to apply bot command");
                return;
            }
        };

        if let Err(e) = self.client.send_message(chat_id, reply).await {
            tracing::warn!(chat_id, error = %e, "Failed to send bot reply");
        }
    }
}
