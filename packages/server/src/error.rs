use axum::response::{IntoResponse, Response};
use common::platform::PlatformError;
use common::{MissingSetting, Outcome};

use crate::reply::Reply;

pub const BLOCK_FAILED: &str = "Failed to block user account";

/// Errors raised while blocking an account.
#[derive(Debug)]
pub enum AppError {
    /// No `Authorization: Bearer <token>` header.
    TokenMissing,
    /// The identity service rejected the session.
    SessionInvalid,
    /// Platform settings needed by the handler are absent.
    Configuration(MissingSetting),
    /// The status update failed.
    Platform(PlatformError),
}

impl From<AppError> for Outcome {
    fn from(err: AppError) -> Self {
        match err {
            AppError::TokenMissing => {
                tracing::warn!("Missing or invalid authorization header");
                Outcome::client_error("Missing or invalid authorization header")
            }
            AppError::SessionInvalid => {
                Outcome::client_error("Invalid session or user not authenticated")
            }
            AppError::Configuration(missing) => {
                tracing::error!(%missing, "Blocking handler is not configured");
                Outcome::server_error(BLOCK_FAILED, missing.to_string())
            }
            AppError::Platform(e) => {
                tracing::error!(error = %e, "Platform error blocking user");
                Outcome::server_error(BLOCK_FAILED, e.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        Reply::from(Outcome::from(self)).into_response()
    }
}

impl From<MissingSetting> for AppError {
    fn from(missing: MissingSetting) -> Self {
        AppError::Configuration(missing)
    }
}

impl From<PlatformError> for AppError {
    fn from(err: PlatformError) -> Self {
        AppError::Platform(err)
    }
}
