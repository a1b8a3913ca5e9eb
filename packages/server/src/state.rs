use std::sync::Arc;

use cleanup::CleanupServices;
use common::platform::{AccountAdmin, IdentityVerifier, PlatformError, ServerClient, SessionClient};
use common::{MissingSetting, PlatformConfig, PlatformCredentials};

/// Collaborators of the blocking handler.
///
/// Session verification uses the caller's credential; the status change uses
/// the elevated one.
#[derive(Clone)]
pub struct BlockServices {
    pub identity: Arc<dyn IdentityVerifier>,
    pub accounts: Arc<dyn AccountAdmin>,
}

impl BlockServices {
    pub fn connect(creds: &PlatformCredentials) -> Result<Self, PlatformError> {
        Ok(Self {
            identity: Arc::new(SessionClient::from_credentials(creds)?),
            accounts: Arc::new(ServerClient::new(creds)?),
        })
    }
}

/// Each handler holds either its collaborators or the setting that kept
/// them from being built.
#[derive(Clone)]
pub struct AppState {
    pub block: Result<BlockServices, MissingSetting>,
    pub cleanup: Result<CleanupServices, MissingSetting>,
}

impl AppState {
    pub fn from_config(platform: &PlatformConfig) -> Result<Self, PlatformError> {
        let block = match platform.credentials() {
            Ok(creds) => Ok(BlockServices::connect(&creds)?),
            Err(missing) => Err(missing),
        };

        let cleanup = match (platform.credentials(), platform.cleanup_targets()) {
            (Ok(creds), Ok(targets)) => Ok(CleanupServices::connect(&creds, &targets)?),
            (Err(missing), _) | (_, Err(missing)) => Err(missing),
        };

        Ok(Self { block, cleanup })
    }
}
