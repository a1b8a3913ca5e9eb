pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod reply;
pub mod routes;
pub mod state;

use axum::{Json, Router, http::HeaderValue, routing::get};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::models::envelope::{ErrorBody, SuccessBody};
use crate::reply::CORS_HEADERS;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Account Offboarding API",
        version = "1.0.0",
        description = "Self-service account blocking and post-block data cleanup"
    ),
    paths(
        handlers::account::block_account,
        handlers::events::user_events,
    ),
    components(schemas(
        SuccessBody,
        ErrorBody,
        common::StepFailure,
        common::EventEnvelope,
        common::UserEventData,
    )),
    tags(
        (name = "Account", description = "Caller-initiated account blocking"),
        (name = "Events", description = "Platform user lifecycle events"),
    ),
    modifiers(&SecurityAddon),
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_default();
        components.add_security_scheme(
            "jwt",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

async fn health() -> &'static str {
    "ok"
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the application router.
///
/// Panics inside handlers become a 500 envelope, and every response,
/// including those, carries the CORS headers.
pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new()
        .nest("/api", routes::api_routes())
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .with_state(state)
        .layer(CatchPanicLayer::custom(reply::panic_response));

    for (name, value) in CORS_HEADERS {
        router = router.layer(SetResponseHeaderLayer::overriding(
            name,
            HeaderValue::from_static(value),
        ));
    }

    router.layer(TraceLayer::new_for_http())
}
