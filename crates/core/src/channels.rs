//! Delivery channel names.
//!
//! These must match the values accepted by the `notifications.channel_type`
//! check constraint and the strings used on the wire.

use serde::{Deserialize, Serialize};

/// Telegram chat delivered through the Bot API.
pub const CHANNEL_TELEGRAM: &str = "telegram";

/// SMS to the recipient's phone number.
pub const CHANNEL_SMS: &str = "sms";

/// Email to the recipient's mailbox.
pub const CHANNEL_MAIL: &str = "mail";

/// Channel a single notification was (or will be) delivered over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelType {
    Telegram,
    Sms,
    Mail,
}

const CHANNELS: [(ChannelType, &str); 3] = [
    (ChannelType::Telegram, CHANNEL_TELEGRAM),
    (ChannelType::Sms, CHANNEL_SMS),
    (ChannelType::Mail, CHANNEL_MAIL),
];

impl ChannelType {
    pub fn as_str(self) -> &'static str {
        match self {
            ChannelType::Telegram => CHANNEL_TELEGRAM,
            ChannelType::Sms => CHANNEL_SMS,
            ChannelType::Mail => CHANNEL_MAIL,
        }
    }

    /// Look up a channel by its stored name.
    pub fn parse(name: &str) -> Option<Self> {
        CHANNELS
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(channel, _)| *channel)
    }
}

impl std::fmt::Display for ChannelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored or submitted channel name that is not in the table above.
#[derive(Debug, thiserror::Error)]
#[error("unknown channel type '{0}'")]
pub struct UnknownChannel(pub String);

impl TryFrom<String> for ChannelType {
    type Error = UnknownChannel;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or(UnknownChannel(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for (channel, name) in CHANNELS {
            assert_eq!(channel.as_str(), name);
            assert_eq!(ChannelType::parse(name), Some(channel));
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        assert_eq!(ChannelType::parse("pigeon"), None);
        assert!(ChannelType::try_from("TELEGRAM".to_string()).is_err());
    }

    #[test]
    fn serializes_as_lowercase_string() {
        let json = serde_json::to_string(&ChannelType::Sms).unwrap();
        assert_eq!(json, "\"sms\"");
    }
}
