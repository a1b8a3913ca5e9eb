use axum::{Router, routing::post};

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/account", account_routes())
        .nest("/events", event_routes())
}

fn account_routes() -> Router<AppState> {
    Router::new().route(
        "/block",
        post(handlers::account::block_account).options(handlers::preflight),
    )
}

fn event_routes() -> Router<AppState> {
    Router::new().route(
        "/users",
        post(handlers::events::user_events).options(handlers::preflight),
    )
}
