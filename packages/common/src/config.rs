use serde::Deserialize;
use thiserror::Error;

/// A required platform setting was absent at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing configuration: platform.{0}")]
pub struct MissingSetting(pub &'static str);

/// Platform connection settings.
///
/// Every field is optional at load time so the service can start with a
/// partial configuration; handlers check what they need through
/// [`PlatformConfig::credentials`] and [`PlatformConfig::cleanup_targets`].
#[derive(Debug, Deserialize, Clone, Default)]
pub struct PlatformConfig {
    /// Base URL of the platform REST API, e.g. `https://cloud.example.com/v1`.
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    /// Server API key with permission to update and delete users.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub database_id: Option<String>,
    #[serde(default)]
    pub profiles_collection_id: Option<String>,
    #[serde(default)]
    pub files_bucket_id: Option<String>,
    /// Per-request timeout in seconds. Default: 30. Zero is rejected.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

/// Endpoint, project and elevated key, all present.
#[derive(Debug, Clone)]
pub struct PlatformCredentials {
    pub endpoint: String,
    pub project_id: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

/// Identifiers of the resources the cascade touches.
#[derive(Debug, Clone)]
pub struct CleanupTargets {
    pub database_id: String,
    pub profiles_collection_id: String,
    pub files_bucket_id: String,
}

impl PlatformConfig {
    pub fn credentials(&self) -> Result<PlatformCredentials, MissingSetting> {
        let endpoint = required(&self.endpoint, "endpoint")?;
        let project_id = required(&self.project_id, "project_id")?;
        let api_key = required(&self.api_key, "api_key")?;
        if self.timeout_secs == 0 {
            return Err(MissingSetting("timeout_secs"));
        }
        Ok(PlatformCredentials {
            endpoint,
            project_id,
            api_key,
            timeout_secs: self.timeout_secs,
        })
    }

    pub fn cleanup_targets(&self) -> Result<CleanupTargets, MissingSetting> {
        Ok(CleanupTargets {
            database_id: required(&self.database_id, "database_id")?,
            profiles_collection_id: required(
                &self.profiles_collection_id,
                "profiles_collection_id",
            )?,
            files_bucket_id: required(&self.files_bucket_id, "files_bucket_id")?,
        })
    }
}

/// Blank values count as missing.
fn required(value: &Option<String>, key: &'static str) -> Result<String, MissingSetting> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(MissingSetting(key)),
    }
}
