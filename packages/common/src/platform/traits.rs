use async_trait::async_trait;
use serde::Deserialize;

use super::error::PlatformError;
use crate::profile::ProfileDocument;

/// The account behind a verified end-user session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Identity {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Verifies end-user session credentials.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Resolve the account the session token belongs to.
    async fn verify_session(&self, token: &str) -> Result<Identity, PlatformError>;
}

/// Account mutations that require the elevated server credential.
#[async_trait]
pub trait AccountAdmin: Send + Sync {
    /// Set the account status to blocked.
    async fn block(&self, account_id: &str) -> Result<(), PlatformError>;

    /// Current status flag: `Some(true)` active, `Some(false)` blocked,
    /// `None` if the account does not exist.
    async fn status(&self, account_id: &str) -> Result<Option<bool>, PlatformError>;

    /// Delete the account.
    ///
    /// Returns `true` if the account was deleted, `false` if it did not exist.
    async fn delete(&self, account_id: &str) -> Result<bool, PlatformError>;
}

/// The collection holding profile documents.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// All profiles whose owner reference equals `account_id`, in store order.
    async fn find_by_owner(&self, account_id: &str) -> Result<Vec<ProfileDocument>, PlatformError>;

    /// Delete a profile document.
    ///
    /// Returns `true` if the document was deleted, `false` if it did not exist.
    async fn delete(&self, profile_id: &str) -> Result<bool, PlatformError>;
}

/// The bucket holding profile photos.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Delete a stored file.
    ///
    /// Returns `true` if the file was deleted, `false` if it did not exist.
    async fn delete(&self, file_id: &str) -> Result<bool, PlatformError>;
}
