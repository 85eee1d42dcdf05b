use serde::Deserialize;
use service_core::config::{self as core_config, load_settings};
use service_core::error::AppError;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct ConsoleConfig {
    #[serde(default = "default_server")]
    pub server: core_config::Config,
    #[serde(default)]
    pub rbac_service: RbacServiceSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RbacServiceSettings {
    /// Base URL of the rbac-service API, including the `/api` prefix.
    #[serde(default = "default_rbac_url")]
    pub url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

const DEFAULT_PORT: u16 = 3000;

fn default_server() -> core_config::Config {
    core_config::Config {
        port: DEFAULT_PORT,
        ..Default::default()
    }
}

fn default_rbac_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for RbacServiceSettings {
    fn default() -> Self {
        Self {
            url: default_rbac_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl RbacServiceSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            rbac_service: RbacServiceSettings::default(),
        }
    }
}

impl ConsoleConfig {
    /// Load from `configuration.*` and `APP__` variables, e.g.
    /// `APP__RBAC_SERVICE__URL=http://rbac-service:5000/api`.
    pub fn load() -> Result<Self, AppError> {
        load_settings(DEFAULT_PORT)
    }
}
