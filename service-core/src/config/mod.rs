use crate::error::AppError;
use config::builder::DefaultState;
use config::{Config as Cfg, ConfigBuilder, File};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Settings shared by every binary in the workspace, nested under `server`.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// OTLP collector endpoint; spans are only exported when set.
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            otlp_endpoint: None,
        }
    }
}

impl Config {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Layers `configuration.{yaml,toml,json}` (optional) and `APP__`-prefixed
/// environment variables over a binary's own `server.port` default.
///
/// The port default sits below every source, so a partial `server` section
/// (say, only `APP__SERVER__LOG_LEVEL`) keeps the binary's port.
pub fn settings_builder(default_port: u16) -> Result<ConfigBuilder<DefaultState>, AppError> {
    Ok(Cfg::builder()
        .set_default("server.port", i64::from(default_port))?
        .add_source(File::with_name("configuration").required(false))
        .add_source(config::Environment::with_prefix("APP").separator("__")))
}

/// Load any settings type through [`settings_builder`], reading `.env` first.
pub fn load_settings<T: DeserializeOwned>(default_port: u16) -> Result<T, AppError> {
    dotenvy::dotenv().ok();

    let config = settings_builder(default_port)?.build()?;
    Ok(config.try_deserialize()?)
}
