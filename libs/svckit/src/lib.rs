#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![warn(warnings)]

//! Shared runtime plumbing for the services.
//!
//! Both binaries in this workspace follow the same lifecycle: load layered
//! configuration, initialize logging, bind an axum server, and run until a
//! termination signal cancels the shutdown token. This crate holds that
//! shared machinery so the apps only contribute their routes and domain
//! logic.
//!
//! Configuration is layered with figment:
//! 1. struct defaults
//! 2. a YAML file (if provided)
//! 3. environment variables prefixed with `APP__`

mod config;
mod logging;
mod server;
mod signals;

pub use config::{ConfigError, LoggingConfig, ServerConfig, load_config, to_yaml};
pub use logging::init_logging;
pub use server::{apply_trace_layer, parse_bind_addr, serve, serve_on};
pub use signals::{cancel_on_shutdown, wait_for_shutdown};
