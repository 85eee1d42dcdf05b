use serde::Deserialize;
use service_core::config::{self as core_config, load_settings};
use service_core::error::AppError;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct RbacConfig {
    #[serde(default = "default_server")]
    pub server: core_config::Config,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    /// Directory holding `users.json`, `roles.json`, `permissions.json` and
    /// `sequences.json`.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    File,
    Memory,
}

const DEFAULT_PORT: u16 = 5000;

fn default_server() -> core_config::Config {
    core_config::Config {
        port: DEFAULT_PORT,
        ..Default::default()
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            data_dir: default_data_dir(),
        }
    }
}

impl Default for RbacConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            storage: StorageConfig::default(),
        }
    }
}

impl RbacConfig {
    /// Load from `configuration.*` and `APP__` variables, e.g.
    /// `APP__STORAGE__DATA_DIR=/var/lib/rbac`.
    pub fn load() -> Result<Self, AppError> {
        load_settings(DEFAULT_PORT)
    }
}
