use axum::{body::Bytes, extract::State};
use tracing::{error, instrument};
use uuid::Uuid;

use cleanup::handle_event;
use common::{EventEnvelope, Outcome};

use crate::models::envelope::{ErrorBody, SuccessBody};
use crate::reply::Reply;
use crate::state::AppState;

const PARSE_FAILED: &str = "Failed to clean up user data";

#[utoipa::path(
    post,
    path = "/api/v1/events/users",
    tag = "Events",
    operation_id = "userEvents",
    summary = "Receive user lifecycle events",
    description = "Runs the data cleanup cascade for accounts that were just blocked. The account status is confirmed with the platform first; an account still active is skipped. Irrelevant events are acknowledged with a plain-text reason. Individual step failures are listed in `failures` without failing the request.",
    request_body = EventEnvelope,
    responses(
        (
            status = 200,
            description = "Cleanup ran (JSON), or the event was skipped (plain-text reason)",
            content(
                (SuccessBody = "application/json"),
                (String = "text/plain"),
            )
        ),
        (status = 500, description = "Malformed payload or profile lookup failed", body = ErrorBody),
    ),
)]
#[instrument(skip_all, fields(invocation_id = %Uuid::new_v4()))]
pub async fn user_events(State(state): State<AppState>, body: Bytes) -> Reply {
    let envelope = if body.iter().all(u8::is_ascii_whitespace) {
        EventEnvelope::default()
    } else {
        match serde_json::from_slice::<EventEnvelope>(&body) {
            Ok(envelope) => envelope,
            Err(e) => {
                error!(error = %e, "Malformed event payload");
                return Outcome::server_error(PARSE_FAILED, e.to_string()).into();
            }
        }
    };

    handle_event(&envelope, state.cleanup.as_ref()).await.into()
}
