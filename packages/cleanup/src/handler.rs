use std::sync::Arc;

use common::platform::{AccountAdmin, FileStore, PlatformError, ProfileStore, ServerClient};
use common::{CleanupTargets, EventEnvelope, MissingSetting, Outcome, PlatformCredentials};
use tracing::{error, info, instrument, warn};

use crate::error::{CleanupError, Result};
use crate::executor::execute;
use crate::filter::{IgnoreReason, Verdict, filter};
use crate::resolver::resolve;

pub const CONFIGURATION_ERROR: &str = "Configuration error";
const FAILURE_MESSAGE: &str = "Failed to clean up user data";

/// Collaborators the cascade needs, all acting with the elevated credential.
#[derive(Clone)]
pub struct CleanupServices {
    pub profiles: Arc<dyn ProfileStore>,
    pub files: Arc<dyn FileStore>,
    pub accounts: Arc<dyn AccountAdmin>,
}

impl CleanupServices {
    /// Build REST-backed services from checked settings.
    pub fn connect(
        creds: &PlatformCredentials,
        targets: &CleanupTargets,
    ) -> std::result::Result<Self, PlatformError> {
        let client = ServerClient::new(creds)?;
        Ok(Self {
            profiles: Arc::new(
                client.collection(&targets.database_id, &targets.profiles_collection_id),
            ),
            files: Arc::new(client.bucket(&targets.files_bucket_id)),
            accounts: Arc::new(client),
        })
    }
}

/// Handle one platform event.
///
/// Always returns an outcome: irrelevant events, missing settings and
/// accounts the platform still reports active are skips, sub-step failures
/// are reported inside a successful outcome, and a failed status or profile
/// lookup becomes a server error.
#[instrument(skip_all, fields(events = envelope.events.len()))]
pub async fn handle_event(
    envelope: &EventEnvelope,
    services: std::result::Result<&CleanupServices, &MissingSetting>,
) -> Outcome {
    let services = match services {
        Ok(services) => services,
        Err(missing) => {
            error!(%missing, "Cleanup handler is not configured");
            return Outcome::skipped(CONFIGURATION_ERROR);
        }
    };

    let account_id = match filter(envelope) {
        Verdict::Process(account_id) => account_id,
        Verdict::Ignore(reason) => {
            info!(%reason, "Ignoring event");
            return Outcome::skipped(reason.to_string());
        }
    };

    match run(services, &account_id).await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!(account_id = %account_id, error = %e, "Cleanup failed unexpectedly");
            Outcome::server_error(FAILURE_MESSAGE, e.to_string()).with_user(account_id)
        }
    }
}

async fn run(services: &CleanupServices, account_id: &str) -> Result<Outcome> {
    // The event body is caller-supplied; only the platform's own record of
    // the account decides whether the cascade may run. A missing account is
    // a redelivery after a completed cascade.
    let status = services
        .accounts
        .status(account_id)
        .await
        .map_err(|source| CleanupError::Confirm {
            account_id: account_id.to_string(),
            source,
        })?;
    if status == Some(true) {
        warn!(account_id, "Event reports a block but the account is active");
        return Ok(Outcome::skipped(IgnoreReason::AccountActive.to_string()));
    }

    info!(account_id, "Cleaning up blocked account");

    let resolution = resolve(services.profiles.as_ref(), account_id)
        .await
        .map_err(|source| CleanupError::Resolve {
            account_id: account_id.to_string(),
            source,
        })?;

    let report = execute(services, account_id, &resolution).await;
    Ok(report.into_outcome())
}
