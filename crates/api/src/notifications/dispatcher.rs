//! Batch creation and fan-out.
//!
//! Sending a batch first flips its `sent` flag with a conditional update, so
//! only one caller ever fans a batch out. Every notification row is then
//! committed on its own before its delivery is attempted; an interrupted
//! fan-out leaves the rows created so far in place. Each delivery attempt is
//! bounded by the send timeout; an attempt that runs out of time is reported
//! as undelivered.

use std::sync::Arc;
use std::time::Duration;

use ens_core::channels::ChannelType;
use ens_core::error::CoreError;
use ens_core::types::DbId;
use ens_db::models::dispatch::DispatchTarget;
use ens_db::models::notification::CreateNotification;
use ens_db::repositories::{BatchRepo, DispatchRepo, NotificationRepo};
use ens_db::DbPool;
use ens_delivery::{ChannelSender, DeliveryError};
use serde::Serialize;

use crate::error::AppResult;

/// Result of one fanned-out notification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DispatchOutcome {
    pub notification_id: DbId,
    pub delivered: bool,
    /// Delivery error message when `delivered` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Creates batches and dispatches them through a [`ChannelSender`].
pub struct BatchDispatcher {
    pool: DbPool,
    sender: Arc<dyn ChannelSender>,
    send_timeout: Duration,
}

impl BatchDispatcher {
    pub fn new(pool: DbPool, sender: Arc<dyn ChannelSender>, send_timeout: Duration) -> Self {
        Self {
            pool,
            sender,
            send_timeout,
        }
    }

    /// Create an unsent batch for the tenant and return its id.
    pub async fn create_batch(&self, master_id: DbId) -> AppResult<DbId> {
        let batch = BatchRepo::create(&self.pool, master_id).await?;
        tracing::info!(%master_id, batch_id = %batch.id, "Notification batch created");
        Ok(batch.id)
    }

    /// Send a batch to every eligible recipient.
    ///
    /// Fails with not-found when the batch does not exist, belongs to another
    /// tenant, or was already sent. Delivery failures do not fail the call;
    /// they are reported per notification and the rows are kept.
    pub async fn send_batch(
        &self,
        master_id: DbId,
        batch_id: DbId,
    ) -> AppResult<Vec<DispatchOutcome>> {
        if !BatchRepo::mark_sent(&self.pool, master_id, batch_id).await? {
            return Err(CoreError::not_found("batch", batch_id).into());
        }

        let targets = DispatchRepo::resolve_targets(&self.pool, master_id).await?;
        let channel = self.sender.channel();
        let mut outcomes = Vec::new();

        for target in &targets {
            let Some((destination, text)) = eligible(target) else {
                continue;
            };
            outcomes.push(
                self.dispatch_one(batch_id, channel, target, destination, text)
                    .await?,
            );
        }

        let failed = outcomes.iter().filter(|o| !o.delivered).count();
        tracing::info!(
            %master_id,
            %batch_id,
            targets = targets.len(),
            notifications = outcomes.len(),
            failed,
            "Batch dispatched"
        );

        Ok(outcomes)
    }

    async fn dispatch_one(
        &self,
        batch_id: DbId,
        channel: ChannelType,
        target: &DispatchTarget,
        destination: i64,
        text: &str,
    ) -> AppResult<DispatchOutcome> {
        let notification = NotificationRepo::create(
            &self.pool,
            &CreateNotification {
                batch_id,
                recipient_id: target.recipient_id,
                group_id: target.group_id,
                channel_type: channel,
            },
        )
        .await?;

        let attempt = tokio::time::timeout(self.send_timeout, self.sender.send(destination, text))
            .await
            .unwrap_or(Err(DeliveryError::TimedOut(self.send_timeout)));

        let outcome = match attempt {
            Ok(()) => DispatchOutcome {
                notification_id: notification.id,
                delivered: true,
                error: None,
            },
            Err(e) => {
                tracing::warn!(
                    notification_id = %notification.id,
                    recipient_id = %target.recipient_id,
                    %channel,
                    error = %e,
                    "Notification delivery failed"
                );
                DispatchOutcome {
                    notification_id: notification.id,
                    delivered: false,
                    error: Some(e.to_string()),
                }
            }
        };
        Ok(outcome)
    }
}

/// Destination and message text for a target, or `None` when it is skipped.
///
/// The channel opt-in is checked first, then the template text.
fn eligible(target: &DispatchTarget) -> Option<(i64, &str)> {
    if target.opted_in != Some(true) {
        return None;
    }
    let text = target.message_text.as_deref()?;
    let destination = target.telegram_id?;
    Some((destination, text))
}

#[cfg(test)]
mod tests {
    use ens_core::types::new_id;

    use super::*;

    fn target(opted_in: Option<bool>, message_text: Option<&str>) -> DispatchTarget {
        DispatchTarget {
            group_id: new_id(),
            recipient_id: new_id(),
            telegram_id: Some(42),
            message_text: message_text.map(str::to_string),
            opted_in,
        }
    }

    #[test]
    fn opted_in_target_with_text_is_eligible() {
        let t = target(Some(true), Some("hi"));
        assert_eq!(eligible(&t), Some((42, "hi")));
    }

    #[test]
    fn inactive_or_missing_opt_in_is_skipped() {
        assert_eq!(eligible(&target(Some(false), Some("hi"))), None);
        assert_eq!(eligible(&target(None, Some("hi"))), None);
    }

    #[test]
    fn template_without_text_is_skipped() {
        assert_eq!(eligible(&target(Some(true), None)), None);
    }

    #[test]
    fn recipient_without_chat_is_skipped() {
        let mut t = target(Some(true), Some("hi"));
        t.telegram_id = None;
        assert_eq!(eligible(&t), None);
    }

    #[test]
    fn failed_outcome_serializes_error() {
        let outcome = DispatchOutcome {
            notification_id: new_id(),
            delivered: false,
            error: Some("chat not found".into()),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["delivered"], false);
        assert_eq!(json["error"], "chat not found");

        let ok = DispatchOutcome {
            error: None,
            delivered: true,
            ..outcome
        };
        assert!(serde_json::to_value(&ok).unwrap().get("error").is_none());
    }
}
