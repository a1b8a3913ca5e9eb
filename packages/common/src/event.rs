use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Event delivered by the platform when a resource changes.
///
/// `events` holds every tag the platform attached to the change, from the
/// most specific (`users.u123.update.status`) to the wildcard forms
/// (`users.*.update`). `data` is the changed resource as it looked after the
/// change.
#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct EventEnvelope {
    #[serde(default)]
    pub events: Vec<String>,
    #[serde(default)]
    pub data: UserEventData,
}

/// The user resource attached to a `users.*` event.
#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserEventData {
    #[serde(rename = "$id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Account status at the time of the event. `false` means blocked.
    /// Kept as a raw value: only the exact boolean `false` counts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<bool>)]
    pub status: Option<Value>,
}

impl EventEnvelope {
    pub fn new(events: impl IntoIterator<Item = impl Into<String>>, data: UserEventData) -> Self {
        Self {
            events: events.into_iter().map(Into::into).collect(),
            data,
        }
    }
}
