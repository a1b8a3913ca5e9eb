mod client;
mod error;
mod traits;

#[cfg(any(test, feature = "testing"))]
pub mod memory;

pub use client::{
    DocumentCollection, PROFILE_OWNER_ATTRIBUTE, ServerClient, SessionClient, StorageBucket,
};
pub use error::{PlatformError, absent_as_false};
pub use traits::{AccountAdmin, FileStore, Identity, IdentityVerifier, ProfileStore};
