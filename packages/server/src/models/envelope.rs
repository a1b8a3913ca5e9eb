use common::StepFailure;
use serde::Serialize;

/// Body of a successful invocation.
#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessBody {
    #[schema(example = true)]
    pub success: bool,
    #[schema(example = "User account blocked successfully")]
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "u123")]
    pub user_id: Option<String>,
    /// Present on block responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, example = "blocked")]
    pub action: Option<&'static str>,
    /// Cascade steps that failed. Omitted when every step succeeded.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<StepFailure>,
}

/// Body of a failed invocation.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    #[schema(example = "Failed to block user account")]
    pub error: String,
    /// Underlying cause. Only present on server errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
