//! Radar Viewer CLI application
//!
//! Command-line front end for browsing weather radar stations, caching the
//! layers of a radar composite and reporting on the event log.

use std::process;

use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt};

use radar_viewer::app::ViewerSession;
use radar_viewer::cli::{Cli, Commands, handle_config, run_session};
use radar_viewer::config::AppConfig;
use radar_viewer::constants::logging;
use radar_viewer::errors::{ConfigError, Result};

#[tokio::main]
async fn main() {
    let result = run().await;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Main application logic
async fn run() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenv::dotenv().ok();

    let cli = Cli::parse_args();

    let mut config = AppConfig::load(cli.global.config.clone()).await?;
    if let Some(cache_dir) = &cli.global.cache_dir {
        config.files.cache_dir = cache_dir.clone();
    }

    init_logging(&cli, &config)?;
    info!("Radar Viewer v{} starting", env!("CARGO_PKG_VERSION"));
    debug!("Effective configuration: {:?}", config);

    match cli.command {
        Commands::Config(args) => handle_config(args, &config).await,
        command => {
            let session = ViewerSession::from_config(&config)?;
            run_session(session, command).await
        }
    }
}

/// Initialize logging from the CLI flags, falling back to the configured level
fn init_logging(cli: &Cli, config: &AppConfig) -> Result<()> {
    let log_level = match cli.log_level() {
        Some(level) => level,
        None => config
            .logging
            .level
            .parse::<tracing::Level>()
            .map_err(|e| ConfigError::InvalidValue {
                field: "logging.level".to_string(),
                value: config.logging.level.clone(),
                reason: e.to_string(),
            })?,
    };

    let directive = format!("{}={}", logging::CRATE_TARGET, log_level)
        .parse()
        .map_err(|e| ConfigError::InvalidValue {
            field: "logging.level".to_string(),
            value: log_level.to_string(),
            reason: format!("{}", e),
        })?;
    let filter = EnvFilter::from_default_env().add_directive(directive);

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(cli.global.very_verbose)
        .init();

    if cli.global.very_verbose {
        info!("Very verbose logging enabled");
    } else if cli.global.verbose {
        info!("Verbose logging enabled");
    }
    Ok(())
}
