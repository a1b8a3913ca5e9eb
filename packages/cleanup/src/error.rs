use common::platform::PlatformError;
use thiserror::Error;

/// Faults that abort a cleanup invocation.
///
/// Per-step deletion failures are not errors; they are recorded in the
/// [`crate::CleanupReport`].
#[derive(Debug, Error)]
pub enum CleanupError {
    #[error("failed to confirm status of {account_id}: {source}")]
    Confirm {
        account_id: String,
        #[source]
        source: PlatformError,
    },
    #[error("failed to look up profile for {account_id}: {source}")]
    Resolve {
        account_id: String,
        #[source]
        source: PlatformError,
    },
}

pub type Result<T> = std::result::Result<T, CleanupError>;
