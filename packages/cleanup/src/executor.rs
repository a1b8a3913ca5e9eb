use std::future::Future;

use common::platform::{AccountAdmin, FileStore, PlatformError, ProfileStore};
use common::{Outcome, StepFailure};
use futures::future::join_all;
use tracing::{info, instrument, warn};

use crate::handler::CleanupServices;
use crate::resolver::Resolution;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    DeleteFile,
    DeleteProfile,
    DeleteAccount,
}

impl StepKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StepKind::DeleteFile => "delete_file",
            StepKind::DeleteProfile => "delete_profile",
            StepKind::DeleteAccount => "delete_account",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
    Deleted,
    /// The resource was already gone; counts as done.
    AlreadyGone,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub kind: StepKind,
    pub target: String,
    pub status: StepStatus,
}

impl StepReport {
    pub fn is_failed(&self) -> bool {
        matches!(self.status, StepStatus::Failed(_))
    }
}

/// Every step attempted for one account, in execution order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupReport {
    pub account_id: String,
    pub profile_found: bool,
    pub steps: Vec<StepReport>,
}

impl CleanupReport {
    fn new(account_id: &str, profile_found: bool) -> Self {
        Self {
            account_id: account_id.to_string(),
            profile_found,
            steps: Vec::new(),
        }
    }

    pub fn failed_steps(&self) -> impl Iterator<Item = &StepReport> {
        self.steps.iter().filter(|step| step.is_failed())
    }

    /// The first failure in execution order.
    pub fn primary_failure(&self) -> Option<&StepReport> {
        self.failed_steps().next()
    }

    pub fn is_clean(&self) -> bool {
        self.primary_failure().is_none()
    }

    pub fn failures(&self) -> Vec<StepFailure> {
        self.steps
            .iter()
            .filter_map(|step| match &step.status {
                StepStatus::Failed(error) => Some(StepFailure {
                    step: step.kind.as_str(),
                    target: step.target.clone(),
                    error: error.clone(),
                }),
                _ => None,
            })
            .collect()
    }

    pub fn into_outcome(self) -> Outcome {
        let failures = self.failures();
        let message = match (failures.len(), self.profile_found) {
            (0, true) => "User data cleaned up successfully".to_string(),
            (0, false) => "User deleted, no profile found".to_string(),
            (n, _) => format!("User cleanup completed with {n} failed step(s)"),
        };
        Outcome::completed(message, self.account_id, failures)
    }
}

/// Run the cascade: files, then the profile, then the account.
///
/// A failing step is recorded and the cascade moves on. The account delete
/// is attempted whether or not a profile was found.
#[instrument(skip(services, resolution), fields(profile_found = resolution.is_found()))]
pub async fn execute(
    services: &CleanupServices,
    account_id: &str,
    resolution: &Resolution,
) -> CleanupReport {
    let mut report = CleanupReport::new(account_id, resolution.is_found());

    if let Resolution::Found(snapshot) = resolution {
        let files = snapshot
            .file_ids
            .iter()
            .map(|file_id| run_step(StepKind::DeleteFile, file_id, services.files.delete(file_id)));
        report.steps.extend(join_all(files).await);

        report.steps.push(
            run_step(
                StepKind::DeleteProfile,
                &snapshot.profile_id,
                services.profiles.delete(&snapshot.profile_id),
            )
            .await,
        );
    }

    report.steps.push(
        run_step(
            StepKind::DeleteAccount,
            account_id,
            services.accounts.delete(account_id),
        )
        .await,
    );

    match report.primary_failure() {
        None => info!(steps = report.steps.len(), "Cleanup completed"),
        Some(first) => warn!(
            steps = report.steps.len(),
            failed = report.failed_steps().count(),
            primary_step = first.kind.as_str(),
            primary_target = %first.target,
            "Cleanup completed with failures"
        ),
    }

    report
}

async fn run_step(
    kind: StepKind,
    target: &str,
    delete: impl Future<Output = Result<bool, PlatformError>>,
) -> StepReport {
    let status = match delete.await {
        Ok(true) => StepStatus::Deleted,
        Ok(false) => {
            info!(step = kind.as_str(), resource = target, "Already deleted");
            StepStatus::AlreadyGone
        }
        Err(e) => {
            warn!(step = kind.as_str(), resource = target, error = %e, "Cleanup step failed");
            StepStatus::Failed(e.to_string())
        }
    };

    StepReport {
        kind,
        target: target.to_string(),
        status,
    }
}
