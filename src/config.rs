//! Application settings loaded from environment variables.

use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};
use strum::EnumString;

use crate::error::ServiceError;

/// Deployment environment. Names other than the three known ones are kept
/// as-is in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumString, Default)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum AppEnv {
    /// Local development.
    #[default]
    Development,
    /// Pre-production.
    Staging,
    /// Production.
    Production,
    /// Any other name, e.g. `test` or `qa`.
    #[strum(default)]
    Other(String),
}

impl AppEnv {
    /// Environment name as configured (known names lowercased).
    pub fn as_str(&self) -> &str {
        match self {
            AppEnv::Development => "development",
            AppEnv::Staging => "staging",
            AppEnv::Production => "production",
            AppEnv::Other(name) => name,
        }
    }
}

impl fmt::Display for AppEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AppEnv {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        let name = raw.trim();
        Ok(AppEnv::from_str(name).unwrap_or_else(|_| AppEnv::Other(name.to_string())))
    }
}

/// Application settings loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    // === Application ===
    /// Service name, used in logs and the root endpoint.
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// Deployment environment.
    #[serde(default)]
    pub app_env: AppEnv,

    /// Debug mode (raises this crate's log level to debug).
    #[serde(default = "default_true")]
    pub debug: bool,

    // === Server Configuration ===
    /// Bind host.
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port. Platforms typically inject `PORT`.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Directory for the production log files.
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,

    /// Number of daily log files kept before the oldest is removed.
    #[serde(default = "default_log_retention_days")]
    pub log_retention_days: usize,

    /// Allowed CORS origins, comma separated. Any origin when unset.
    #[serde(default)]
    pub cors_allowed_origins: Option<Vec<String>>,

    // === External Services ===
    /// Database URL. Not used by the in-memory store.
    #[serde(default)]
    pub database_url: Option<String>,

    /// Redis URL. Not used by the in-memory store.
    #[serde(default)]
    pub redis_url: Option<String>,
}

fn default_app_name() -> String {
    "item-service".to_string()
}

fn default_true() -> bool {
    true
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

fn default_log_retention_days() -> usize {
    30
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_name: default_app_name(),
            app_env: AppEnv::default(),
            debug: default_true(),
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            log_dir: default_log_dir(),
            log_retention_days: default_log_retention_days(),
            cors_allowed_origins: None,
            database_url: None,
            redis_url: None,
        }
    }
}

impl Settings {
    /// Load settings from environment, reading .env file first.
    pub fn load() -> Result<Self, ServiceError> {
        dotenvy::dotenv().ok();
        Ok(envy::from_env()?)
    }

    /// Resolve host and port to the address the listener binds to.
    /// Hostnames such as `localhost` are looked up; the first result wins.
    pub async fn resolve_bind_addr(&self) -> Result<SocketAddr, ServiceError> {
        let invalid = || ServiceError::InvalidBindAddress {
            host: self.host.clone(),
            port: self.port,
        };

        tokio::net::lookup_host((self.host.trim(), self.port))
            .await
            .map_err(|_| invalid())?
            .next()
            .ok_or_else(invalid)
    }

    /// Check if running in production.
    pub fn is_production(&self) -> bool {
        self.app_env.as_str().eq_ignore_ascii_case("production")
    }
}
