//! Telegram opt-in state keyed by chat id.

/// Result of an opt-in or opt-out request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptInChange {
    /// The flag was flipped (or the contact was created).
    Changed,
    /// The flag already had the requested value.
    Unchanged,
}
