//! Outbound delivery channels.
//!
//! [`ChannelSender`] is the only thing the dispatch engine knows about a
//! channel: given a destination and a text, try to deliver it once. The
//! Telegram implementation lives in [`telegram`]; [`bot`] runs the Telegram
//! side that lets chats opt in and out of receiving notifications.

pub mod bot;
pub mod telegram;

use std::time::Duration;

use async_trait::async_trait;
use ens_core::channels::ChannelType;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for a single delivery attempt.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider answered but refused the request.
    #[error("Channel API rejected the request: {0}")]
    Rejected(String),

    /// The attempt did not finish within the send timeout.
    #[error("Delivery timed out after {}s", .0.as_secs_f64())]
    TimedOut(Duration),
}

// ---------------------------------------------------------------------------
// ChannelSender
// ---------------------------------------------------------------------------

/// A channel that can deliver one text message to one destination.
///
/// Implementations make a single attempt and never retry.
#[async_trait]
pub trait ChannelSender: Send + Sync {
    /// The channel recorded on notifications delivered through this sender.
    fn channel(&self) -> ChannelType;

    /// Deliver `text` to the channel-specific `destination`.
    async fn send(&self, destination: i64, text: &str) -> Result<(), DeliveryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delivery_error_display_rejected() {
        let err = DeliveryError::Rejected("Bad Request: chat not found".into());
        assert_eq!(
            err.to_string(),
            "Channel API rejected the request: Bad Request: chat not found"
        );
    }

    #[test]
    fn delivery_error_display_timed_out() {
        let err = DeliveryError::TimedOut(Duration::from_millis(1500));
        assert_eq!(err.to_string(), "Delivery timed out after 1.5s");
    }
}
