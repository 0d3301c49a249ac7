//! aux-service configuration.
//!
//! Loaded through [`svckit::load_config`]: struct defaults, then an optional
//! YAML file, then `APP__*` environment variables.

use serde::{Deserialize, Serialize};
use svckit::{LoggingConfig, ServerConfig};

/// Region used when neither the configuration nor the standard AWS
/// environment supplies one.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Top-level configuration for the facade process.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub service: ServiceConfig,
    pub aws: AwsConfig,
}

/// Identity the service reports on `/health` and `/version`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceConfig {
    /// Version string, fixed for the process lifetime.
    pub version: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            version: "dev".to_owned(),
        }
    }
}

/// AWS client settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AwsConfig {
    /// Region override. The standard AWS environment wins when unset;
    /// [`DEFAULT_REGION`] applies when nothing resolves a region.
    pub region: Option<String>,

    /// Endpoint override for localstack-style testing.
    pub endpoint_url: Option<String>,
}
