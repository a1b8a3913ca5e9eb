//! In-memory platform double for tests.
//!
//! Holds accounts, profile documents and files in plain collections, records
//! every call it receives and can be told to fail specific operations.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use super::error::PlatformError;
use super::traits::{AccountAdmin, FileStore, Identity, IdentityVerifier, ProfileStore};
use crate::profile::ProfileDocument;

/// A recorded call against the double.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Call {
    VerifySession(String),
    Block(String),
    AccountStatus(String),
    DeleteAccount(String),
    FindProfiles(String),
    DeleteProfile(String),
    DeleteFile(String),
}

#[derive(Debug, Default)]
struct State {
    /// account id -> active flag
    accounts: BTreeMap<String, bool>,
    /// session token -> account id
    sessions: HashMap<String, String>,
    profiles: Vec<ProfileDocument>,
    files: BTreeSet<String>,
    /// calls that should fail, keyed by the call itself
    failures: HashMap<Call, String>,
    calls: Vec<Call>,
}

/// Shared in-memory platform. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MemoryPlatform {
    state: Arc<Mutex<State>>,
}

impl MemoryPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn with_account(self, account_id: &str) -> Self {
        self.lock().accounts.insert(account_id.to_string(), true);
        self
    }

    pub fn with_blocked_account(self, account_id: &str) -> Self {
        self.lock().accounts.insert(account_id.to_string(), false);
        self
    }

    pub fn with_session(self, token: &str, account_id: &str) -> Self {
        self.lock()
            .sessions
            .insert(token.to_string(), account_id.to_string());
        self
    }

    pub fn with_profile(self, profile: ProfileDocument) -> Self {
        self.lock().profiles.push(profile);
        self
    }

    pub fn with_files<'a>(self, file_ids: impl IntoIterator<Item = &'a str>) -> Self {
        self.lock()
            .files
            .extend(file_ids.into_iter().map(str::to_string));
        self
    }

    /// Make `call` fail with a 500-style error.
    pub fn failing(self, call: Call, message: &str) -> Self {
        self.lock().failures.insert(call, message.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    /// `Some(true)` active, `Some(false)` blocked, `None` deleted or never created.
    pub fn account_status(&self, account_id: &str) -> Option<bool> {
        self.lock().accounts.get(account_id).copied()
    }

    pub fn has_profile(&self, profile_id: &str) -> bool {
        self.lock().profiles.iter().any(|p| p.id == profile_id)
    }

    pub fn has_file(&self, file_id: &str) -> bool {
        self.lock().files.contains(file_id)
    }

    /// Record `call` and return the injected failure for it, if any.
    fn enter(state: &mut State, call: Call) -> Result<(), PlatformError> {
        state.calls.push(call.clone());
        match state.failures.get(&call) {
            Some(message) => Err(PlatformError::Api {
                status: 500,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl IdentityVerifier for MemoryPlatform {
    async fn verify_session(&self, token: &str) -> Result<Identity, PlatformError> {
        let mut state = self.lock();
        Self::enter(&mut state, Call::VerifySession(token.to_string()))?;
        match state.sessions.get(token) {
            Some(id) => Ok(Identity {
                id: id.clone(),
                email: None,
            }),
            None => Err(PlatformError::Unauthorized("invalid session".into())),
        }
    }
}

#[async_trait]
impl AccountAdmin for MemoryPlatform {
    async fn block(&self, account_id: &str) -> Result<(), PlatformError> {
        let mut state = self.lock();
        Self::enter(&mut state, Call::Block(account_id.to_string()))?;
        match state.accounts.get_mut(account_id) {
            Some(active) => {
                *active = false;
                Ok(())
            }
            None => Err(PlatformError::NotFound(format!("user {account_id}"))),
        }
    }

    async fn status(&self, account_id: &str) -> Result<Option<bool>, PlatformError> {
        let mut state = self.lock();
        Self::enter(&mut state, Call::AccountStatus(account_id.to_string()))?;
        Ok(state.accounts.get(account_id).copied())
    }

    async fn delete(&self, account_id: &str) -> Result<bool, PlatformError> {
        let mut state = self.lock();
        Self::enter(&mut state, Call::DeleteAccount(account_id.to_string()))?;
        Ok(state.accounts.remove(account_id).is_some())
    }
}

#[async_trait]
impl ProfileStore for MemoryPlatform {
    async fn find_by_owner(&self, account_id: &str) -> Result<Vec<ProfileDocument>, PlatformError> {
        let mut state = self.lock();
        Self::enter(&mut state, Call::FindProfiles(account_id.to_string()))?;
        Ok(state
            .profiles
            .iter()
            .filter(|p| p.user_id.as_deref() == Some(account_id))
            .cloned()
            .collect())
    }

    async fn delete(&self, profile_id: &str) -> Result<bool, PlatformError> {
        let mut state = self.lock();
        Self::enter(&mut state, Call::DeleteProfile(profile_id.to_string()))?;
        let before = state.profiles.len();
        state.profiles.retain(|p| p.id != profile_id);
        Ok(state.profiles.len() < before)
    }
}

#[async_trait]
impl FileStore for MemoryPlatform {
    async fn delete(&self, file_id: &str) -> Result<bool, PlatformError> {
        let mut state = self.lock();
        Self::enter(&mut state, Call::DeleteFile(file_id.to_string()))?;
        Ok(state.files.remove(file_id))
    }
}
