use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use tracing::Level;

pub use common::config::PlatformConfig;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// `trace`, `debug`, `info`, `warn` or `error`. Default: `info`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".into()
}

impl ServerConfig {
    /// Unrecognised levels fall back to `INFO`.
    pub fn max_level(&self) -> Level {
        self.log_level.parse().unwrap_or(Level::INFO)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub platform: PlatformConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("OFFBOARD_CONFIG").unwrap_or_else(|_| "config/config".to_string());

        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.log_level", "info")?
            .set_default("platform.timeout_secs", 30)?
            .add_source(File::with_name(&config_path).required(false))
            // Override from environment (e.g., OFFBOARD__PLATFORM__API_KEY)
            .add_source(Environment::with_prefix("OFFBOARD").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
