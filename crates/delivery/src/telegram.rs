//! Minimal Telegram Bot API client.
//!
//! Only the two methods the service needs are implemented: `sendMessage` for
//! delivering notifications and bot replies, and `getUpdates` for long
//! polling incoming chat messages.

use std::time::Duration;

use async_trait::async_trait;
use ens_core::channels::ChannelType;
use serde::{Deserialize, Serialize};

use crate::{ChannelSender, DeliveryError};

/// Slack added on top of the long-poll timeout for the HTTP request itself.
const REQUEST_TIMEOUT_MARGIN: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// Envelope every Bot API method answers with.
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: i64,
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GetUpdatesRequest {
    offset: i64,
    timeout: u64,
    allowed_updates: [&'static str; 1],
}

/// One incoming update. Only message updates are requested.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub chat: Chat,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

// ---------------------------------------------------------------------------
// TelegramClient
// ---------------------------------------------------------------------------

/// HTTP client bound to one bot token. Cheap to clone.
#[derive(Clone)]
pub struct TelegramClient {
    client: reqwest::Client,
    base_url: String,
    send_timeout: Duration,
}

impl TelegramClient {
    /// Build a client for `token` against `api_url` (normally
    /// `https://api.telegram.org`).
    ///
    /// `send_timeout` bounds each `sendMessage` request. The long-poll
    /// request made by [`get_updates`](Self::get_updates) gets its own
    /// timeout just above the poll duration.
    pub fn new(api_url: &str, token: &str, send_timeout: Duration) -> Result<Self, DeliveryError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            base_url: format!("{}/bot{token}", api_url.trim_end_matches('/')),
            send_timeout,
        })
    }

    /// Send a plain text message to a chat.
    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), DeliveryError> {
        let body = SendMessageRequest { chat_id, text };
        self.call::<serde_json::Value, _>("sendMessage", &body, self.send_timeout)
            .await
            .map(|_| ())
    }

    /// Long-poll for updates with `update_id >= offset`.
    pub async fn get_updates(
        &self,
        offset: i64,
        timeout: Duration,
    ) -> Result<Vec<Update>, DeliveryError> {
        let body = GetUpdatesRequest {
            offset,
            timeout: timeout.as_secs(),
            allowed_updates: ["message"],
        };
        self.call("getUpdates", &body, timeout + REQUEST_TIMEOUT_MARGIN)
            .await
    }

    /// POST a Bot API method and unwrap its `{ok, result}` envelope.
    async fn call<T, B>(&self, method: &str, body: &B, timeout: Duration) -> Result<T, DeliveryError>
    where
        T: serde::de::DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = format!("{}/{method}", self.base_url);
        let response: ApiResponse<T> = self
            .client
            .post(url)
            .timeout(timeout)
            .json(body)
            .send()
            .await?
            .json()
            .await?;
        if !response.ok {
            return Err(DeliveryError::Rejected(
                response
                    .description
                    .unwrap_or_else(|| format!("{method} failed")),
            ));
        }
        response
            .result
            .ok_or_else(|| DeliveryError::Rejected(format!("{method} returned no result")))
    }
}

#[async_trait]
impl ChannelSender for TelegramClient {
    fn channel(&self) -> ChannelType {
        ChannelType::Telegram
    }

    async fn send(&self, destination: i64, text: &str) -> Result<(), DeliveryError> {
        self.send_message(destination, text).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_includes_token() {
        let client = TelegramClient::new(
            "https://api.telegram.org/",
            "123:abc",
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(client.base_url, "https://api.telegram.org/bot123:abc");
        assert_eq!(client.send_timeout, Duration::from_secs(5));
        assert_eq!(client.channel(), ChannelType::Telegram);
    }

    #[test]
    fn parses_update_batch() {
        let raw = r#"{
            "ok": true,
            "result": [
                {"update_id": 10, "message": {"message_id": 1, "chat": {"id": 42, "type": "private"}, "text": "/help"}},
                {"update_id": 11, "edited_message": {"message_id": 1, "chat": {"id": 42}}}
            ]
        }"#;
        let response: ApiResponse<Vec<Update>> = serde_json::from_str(raw).unwrap();
        let updates = response.result.unwrap();

        assert_eq!(updates.len(), 2);
        let message = updates[0].message.as_ref().unwrap();
        assert_eq!(message.chat.id, 42);
        assert_eq!(message.text.as_deref(), Some("/help"));
        assert!(updates[1].message.is_none());
    }

    #[test]
    fn parses_rejection() {
        let raw = r#"{"ok": false, "error_code": 400, "description": "Bad Request: chat not found"}"#;
        let response: ApiResponse<serde_json::Value> = serde_json::from_str(raw).unwrap();
        assert!(!response.ok);
        assert_eq!(
            response.description.as_deref(),
            Some("Bad Request: chat not found")
        );
    }
}
