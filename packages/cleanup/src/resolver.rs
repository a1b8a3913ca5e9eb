use common::ProfileSnapshot;
use common::platform::{PlatformError, ProfileStore};
use tracing::{info, instrument, warn};

/// Result of looking up the profile owned by an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found(ProfileSnapshot),
    /// No profile references the account. Not an error.
    NotFound,
}

impl Resolution {
    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found(_))
    }
}

/// Locate the profile owned by `account_id` and collect its file ids.
///
/// Only the first matching profile is used when the store returns several.
#[instrument(skip(profiles))]
pub async fn resolve(
    profiles: &dyn ProfileStore,
    account_id: &str,
) -> Result<Resolution, PlatformError> {
    let documents = profiles.find_by_owner(account_id).await?;

    if documents.len() > 1 {
        warn!(
            count = documents.len(),
            "Multiple profiles reference this account, processing only the first"
        );
    }

    match documents.first() {
        Some(document) => {
            let snapshot = ProfileSnapshot::from(document);
            info!(
                profile_id = %snapshot.profile_id,
                files = snapshot.file_ids.len(),
                "Resolved profile"
            );
            Ok(Resolution::Found(snapshot))
        }
        None => {
            info!("No profile found for account");
            Ok(Resolution::NotFound)
        }
    }
}
