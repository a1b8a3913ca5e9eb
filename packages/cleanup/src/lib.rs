//! Cascading cleanup of a blocked account.
//!
//! An update event for a blocked user flows through [`filter::filter`],
//! [`resolver::resolve`] and [`executor::execute`]; [`handler::handle_event`]
//! ties them together and reports a single [`common::Outcome`].

pub mod error;
pub mod executor;
pub mod filter;
pub mod handler;
pub mod resolver;

pub use error::CleanupError;
pub use executor::{CleanupReport, StepKind, StepReport, StepStatus, execute};
pub use filter::{IgnoreReason, Verdict, filter};
pub use handler::{CleanupServices, handle_event};
pub use resolver::{Resolution, resolve};
