use std::fmt;

use common::EventEnvelope;
use serde_json::Value;

/// Why an event was not acted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    NoEvents,
    NoMatchingEvents,
    NoUserId,
    NotBlocked,
    /// The event claims a block but the platform reports the account active.
    AccountActive,
}

impl fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::NoEvents => "no events",
            Self::NoMatchingEvents => "no matching events",
            Self::NoUserId => "no user id",
            Self::NotBlocked => "not blocked",
            Self::AccountActive => "account is active",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Clean up the given account.
    Process(String),
    Ignore(IgnoreReason),
}

/// Decide whether an event reports that an account was blocked.
///
/// Checks run in order: tags present, a user update tag among them, a user
/// id in the payload, and a status of exactly `false`. A missing status is
/// not blocked.
pub fn filter(envelope: &EventEnvelope) -> Verdict {
    if envelope.events.is_empty() {
        return Verdict::Ignore(IgnoreReason::NoEvents);
    }

    if !envelope.events.iter().any(|tag| is_user_update(tag)) {
        return Verdict::Ignore(IgnoreReason::NoMatchingEvents);
    }

    let user_id = match envelope.data.id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => id,
        _ => return Verdict::Ignore(IgnoreReason::NoUserId),
    };

    if envelope.data.status != Some(Value::Bool(false)) {
        return Verdict::Ignore(IgnoreReason::NotBlocked);
    }

    Verdict::Process(user_id.to_string())
}

/// `users.<id>.update`, `users.*.update.status` and similar.
fn is_user_update(tag: &str) -> bool {
    let mut segments = tag.split('.');
    segments.next() == Some("users") && segments.any(|segment| segment == "update")
}
