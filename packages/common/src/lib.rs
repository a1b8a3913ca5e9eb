pub mod config;
pub mod event;
pub mod outcome;
pub mod platform;
pub mod profile;

pub use config::{CleanupTargets, MissingSetting, PlatformConfig, PlatformCredentials};
pub use event::{EventEnvelope, UserEventData};
pub use outcome::{Outcome, OutcomeKind, StepFailure};
pub use profile::{PhotoRefs, ProfileDocument, ProfileSnapshot};
