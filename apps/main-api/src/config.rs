//! main-api configuration.
//!
//! Loaded through [`svckit::load_config`]: struct defaults, then an optional
//! YAML file, then `APP__*` environment variables.

use serde::{Deserialize, Serialize};
use svckit::{LoggingConfig, ServerConfig};

/// Top-level configuration for the gateway process.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub service: ServiceConfig,
    pub aux: AuxConfig,
}

/// Identity the gateway reports in every envelope.
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

/// Downstream facade settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuxConfig {
    /// Base URL of the aux-service facade.
    pub base_url: String,

    /// Fixed per-call timeout for every outbound call, in seconds.
    pub timeout_secs: u64,
}

impl Default for AuxConfig {
    fn default() -> Self {
        Self {
            // Kubernetes DNS for the aux-service Service.
            base_url: "http://aux-service.aux-service.svc.cluster.local:8000".to_owned(),
            timeout_secs: 5,
        }
    }
}
