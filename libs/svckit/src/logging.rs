//! Logging initialization.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::LoggingConfig;

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level, so operators can
/// raise verbosity without touching config files. Calling this more than
/// once is a no-op, which keeps test setups simple.
///
/// # Errors
/// Returns an error if the active filter string does not parse.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.level))?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .ok();

    Ok(())
}
