//! Layered configuration loading.
//!
//! Precedence, lowest to highest: struct defaults, YAML file, `APP__*`
//! environment variables. Nested fields use `__` as the separator, so
//! `APP__SERVER__BIND_ADDR` sets `server.bind_addr`.

use std::path::Path;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

const ENV_PREFIX: &str = "APP__";

/// Errors from configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid configuration: {0}")]
    Invalid(#[source] Box<figment::Error>),
}

/// HTTP listener settings shared by the services.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address the HTTP server binds to, as `ip:port`.
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8000".to_owned(),
        }
    }
}

impl ServerConfig {
    /// Replace the port while keeping the configured host.
    ///
    /// # Errors
    /// Returns an error if `bind_addr` is not a valid socket address.
    pub fn override_port(&mut self, port: u16) -> anyhow::Result<()> {
        let mut addr = crate::server::parse_bind_addr(&self.bind_addr)?;
        addr.set_port(port);
        self.bind_addr = addr.to_string();
        Ok(())
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default tracing filter; `RUST_LOG` wins when set.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
        }
    }
}

/// Load a config type by layering defaults, an optional YAML file, and
/// `APP__*` environment variables (highest precedence).
///
/// # Errors
/// Returns an error if the file is missing, or if the merged layers do not
/// deserialize into `T`.
pub fn load_config<T>(yaml_path: Option<&Path>) -> Result<T, ConfigError>
where
    T: DeserializeOwned + Serialize + Default,
{
    let mut figment = Figment::from(Serialized::defaults(T::default()));

    if let Some(path) = yaml_path {
        if !path.is_file() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }
        figment = figment.merge(Yaml::file(path));
    }

    figment
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
        .map_err(|e| ConfigError::Invalid(Box::new(e)))
}

/// Render a config as YAML, for `--print-config` and `check`.
///
/// # Errors
/// Returns an error if the value does not serialize.
pub fn to_yaml<T: Serialize>(config: &T) -> anyhow::Result<String> {
    Ok(serde_yaml::to_string(config)?)
}
