use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;

use main_api::api::rest::router;
use main_api::config::AppConfig;
use main_api::domain::service::Gateway;
use svckit::LoggingConfig;
use svckit_http::HttpClient;

/// Public gateway in front of aux-service.
#[derive(Parser)]
#[command(name = "main-api", version, about = "Public aggregating gateway")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port override for the HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print effective configuration (YAML) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Validate configuration and exit
    Check,
}

fn apply_verbosity(logging: &mut LoggingConfig, verbose: u8) {
    match verbose {
        0 => {}
        1 => logging.level = "info".to_owned(),
        2 => logging.level = "debug".to_owned(),
        _ => logging.level = "trace".to_owned(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config: AppConfig = svckit::load_config(cli.config.as_deref())?;
    if let Some(port) = cli.port {
        config.server.override_port(port)?;
    }
    apply_verbosity(&mut config.logging, cli.verbose);
    svckit::init_logging(&config.logging)?;

    if cli.print_config {
        println!("Effective configuration:\n{}", svckit::to_yaml(&config)?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run(config).await,
        Commands::Check => {
            println!("Configuration is valid");
            println!("{}", svckit::to_yaml(&config)?);
            Ok(())
        }
    }
}

async fn run(config: AppConfig) -> Result<()> {
    let http = HttpClient::builder()
        .timeout(Duration::from_secs(config.aux.timeout_secs))
        .build()?;
    let gateway = Arc::new(Gateway::new(
        http,
        config.aux.base_url.clone(),
        config.service.version.clone(),
    ));
    let app = svckit::apply_trace_layer(router(gateway));

    let cancel = CancellationToken::new();
    tokio::spawn(svckit::cancel_on_shutdown(cancel.clone()));

    tracing::info!(
        version = %config.service.version,
        aux_base_url = %config.aux.base_url,
        "main-api starting"
    );
    svckit::serve(&config.server.bind_addr, app, cancel).await?;
    tracing::info!("main-api stopped");
    Ok(())
}
