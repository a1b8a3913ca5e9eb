//! Maps handler outcomes onto HTTP responses.

use std::any::Any;

use axum::{
    Json,
    http::{HeaderName, StatusCode, header},
    response::{IntoResponse, Response},
};
use common::{Outcome, OutcomeKind};
use serde_json::json;

use crate::models::envelope::{ErrorBody, SuccessBody};

/// Headers stamped on every response for browser callers.
pub const CORS_HEADERS: [(HeaderName, &str); 3] = [
    (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
    (header::ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"),
    (
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        "Content-Type, Authorization, X-Appwrite-Project, X-Appwrite-Key",
    ),
];

pub enum Reply {
    /// Answer to a CORS preflight: `{}` with 200.
    Preflight,
    Outcome(Outcome),
}

impl From<Outcome> for Reply {
    fn from(outcome: Outcome) -> Self {
        Reply::Outcome(outcome)
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        let outcome = match self {
            Reply::Preflight => return (StatusCode::OK, Json(json!({}))).into_response(),
            Reply::Outcome(outcome) => outcome,
        };

        match outcome.kind {
            OutcomeKind::Success | OutcomeKind::PartialSuccess => (
                StatusCode::OK,
                Json(SuccessBody {
                    success: true,
                    message: outcome.message,
                    user_id: outcome.user_id,
                    action: outcome.action,
                    failures: outcome.failures,
                }),
            )
                .into_response(),
            OutcomeKind::Skipped => (StatusCode::OK, outcome.message).into_response(),
            OutcomeKind::ClientError => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorBody {
                    error: outcome.message,
                    details: None,
                }),
            )
                .into_response(),
            OutcomeKind::ServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: outcome.message,
                    details: outcome.details,
                }),
            )
                .into_response(),
        }
    }
}

/// Response for a handler that panicked.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    tracing::error!(%details, "Handler panicked");
    Reply::Outcome(Outcome::server_error("Unexpected error", details)).into_response()
}
