use thiserror::Error;

/// Errors returned by platform collaborators.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// The addressed resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The credential was rejected.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Any other non-success response.
    #[error("platform error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The configured endpoint is not a usable base URL.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl PlatformError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, PlatformError::NotFound(_))
    }
}

/// Turns a not-found error from a delete into `Ok(false)`.
///
/// Deleting something that is already gone is a no-op, which keeps repeated
/// cascades for the same account harmless.
pub fn absent_as_false(result: Result<(), PlatformError>) -> Result<bool, PlatformError> {
    match result {
        Ok(()) => Ok(true),
        Err(e) if e.is_not_found() => Ok(false),
        Err(e) => Err(e),
    }
}
