use serde::Serialize;

/// Classification of a handler invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    Success,
    /// The invocation completed but one or more cascade steps failed.
    PartialSuccess,
    /// Nothing to do: irrelevant event or incomplete configuration.
    Skipped,
    ClientError,
    ServerError,
}

/// One cascade step that did not complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct StepFailure {
    /// `delete_file`, `delete_profile` or `delete_account`.
    #[schema(value_type = String)]
    pub step: &'static str,
    pub target: String,
    pub error: String,
}

/// Uniform result of either handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub kind: OutcomeKind,
    pub message: String,
    pub user_id: Option<String>,
    pub action: Option<&'static str>,
    /// Cause of a server error.
    pub details: Option<String>,
    pub failures: Vec<StepFailure>,
}

impl Outcome {
    fn new(kind: OutcomeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            user_id: None,
            action: None,
            details: None,
            failures: Vec::new(),
        }
    }

    pub fn success(message: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            ..Self::new(OutcomeKind::Success, message)
        }
    }

    /// Success when `failures` is empty, partial success otherwise.
    pub fn completed(
        message: impl Into<String>,
        user_id: impl Into<String>,
        failures: Vec<StepFailure>,
    ) -> Self {
        let kind = if failures.is_empty() {
            OutcomeKind::Success
        } else {
            OutcomeKind::PartialSuccess
        };
        Self {
            user_id: Some(user_id.into()),
            failures,
            ..Self::new(kind, message)
        }
    }

    pub fn skipped(message: impl Into<String>) -> Self {
        Self::new(OutcomeKind::Skipped, message)
    }

    pub fn client_error(message: impl Into<String>) -> Self {
        Self::new(OutcomeKind::ClientError, message)
    }

    pub fn server_error(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            details: Some(details.into()),
            ..Self::new(OutcomeKind::ServerError, message)
        }
    }

    pub fn with_action(mut self, action: &'static str) -> Self {
        self.action = Some(action);
        self
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Whether the invocation itself succeeded, regardless of sub-step failures.
    pub fn is_success(&self) -> bool {
        matches!(self.kind, OutcomeKind::Success | OutcomeKind::PartialSuccess)
    }
}
