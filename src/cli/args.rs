//! Command-line argument parsing for Radar Viewer
//!
//! This module defines the CLI structure using clap derive macros. Each
//! subcommand maps onto one user action of a viewer session.

use std::path::PathBuf;

use chrono::NaiveDateTime;
use clap::{Args, Parser, Subcommand};

use crate::app::parse_index_timestamp;

/// Radar Viewer - Browse Bureau of Meteorology radar imagery
#[derive(Parser, Debug)]
#[command(
    name = "radar_viewer",
    version,
    about = "Browse weather radar stations and cache their image layers",
    long_about = "Lists radar stations from a local catalog, shows the scans available for a station,
downloads the layers behind a radar composite and keeps an event log that can be opened as an HTML report."
)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all subcommands
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Very verbose logging (debug level)
    #[arg(long, global = true)]
    pub very_verbose: bool,

    /// Quiet mode - suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory for index files, images and the report
    #[arg(long, global = true, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List radar stations, refreshing the index files
    Stations {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the scans available for a station
    Images {
        /// Station code, e.g. IDR012
        #[arg(value_name = "STATION_ID")]
        station_id: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fetch the layers of one radar composite
    View(ViewArgs),

    /// Write the event log report
    Report {
        /// Open the report in the system browser
        #[arg(long)]
        open: bool,
    },

    /// Add a station to the catalog, or rename an existing one
    AddStation {
        #[arg(value_name = "ID")]
        id: String,

        #[arg(value_name = "NAME")]
        name: String,
    },

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Arguments for the view command
#[derive(Args, Debug, Clone)]
pub struct ViewArgs {
    /// Station code, e.g. IDR012
    #[arg(value_name = "STATION_ID")]
    pub station_id: String,

    /// Scan time as YYYYMMDDHHmm
    #[arg(value_name = "TIMESTAMP")]
    pub timestamp: String,
}

impl ViewArgs {
    /// Parse the scan time
    pub fn scan_time(&self) -> Result<NaiveDateTime, String> {
        parse_index_timestamp(&self.timestamp).ok_or_else(|| {
            format!(
                "Invalid timestamp '{}': expected YYYYMMDDHHmm",
                self.timestamp
            )
        })
    }
}

/// Arguments for configuration management
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Write a commented default configuration file
    Init {
        /// Where to write it (defaults to the user config directory)
        #[arg(value_name = "FILE")]
        path: Option<PathBuf>,
    },

    /// Print the effective configuration
    Show,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Logging level requested on the command line, if any
    ///
    /// Without a flag the configured level applies.
    pub fn log_level(&self) -> Option<tracing::Level> {
        if self.global.quiet {
            Some(tracing::Level::ERROR)
        } else if self.global.very_verbose {
            Some(tracing::Level::DEBUG)
        } else if self.global.verbose {
            Some(tracing::Level::INFO)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn global(verbose: bool, very_verbose: bool, quiet: bool) -> GlobalArgs {
        GlobalArgs {
            verbose,
            very_verbose,
            quiet,
            config: None,
            cache_dir: None,
        }
    }

    #[test]
    fn test_log_level() {
        let report = || Commands::Report { open: false };
        let cli_quiet = Cli {
            global: global(true, false, true),
            command: report(),
        };
        let cli_verbose = Cli {
            global: global(true, false, false),
            command: report(),
        };
        let cli_default = Cli {
            global: global(false, false, false),
            command: report(),
        };

        assert_eq!(cli_quiet.log_level(), Some(tracing::Level::ERROR));
        assert_eq!(cli_verbose.log_level(), Some(tracing::Level::INFO));
        assert_eq!(cli_default.log_level(), None);
    }

    #[test]
    fn test_parse_view() {
        let cli = Cli::try_parse_from([
            "radar_viewer",
            "--cache-dir",
            "/tmp/radar",
            "view",
            "IDR012",
            "202405161124",
        ])
        .unwrap();

        assert_eq!(cli.global.cache_dir, Some(PathBuf::from("/tmp/radar")));
        match cli.command {
            Commands::View(args) => {
                assert_eq!(args.station_id, "IDR012");
                let time = args.scan_time().unwrap();
                assert_eq!(time.format("%Y-%m-%d %H:%M").to_string(), "2024-05-16 11:24");
            }
            other => panic!("Expected view command, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_scan_time() {
        let args = ViewArgs {
            station_id: "IDR012".to_string(),
            timestamp: "2024-05-16".to_string(),
        };
        assert!(args.scan_time().is_err());
    }

    #[test]
    fn test_add_station_and_config_parse() {
        let cli = Cli::try_parse_from(["radar_viewer", "add-station", "IDR012", "Sydney"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::AddStation { ref id, ref name } if id == "IDR012" && name == "Sydney"
        ));

        let cli = Cli::try_parse_from(["radar_viewer", "config", "show", "-q"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Config(ConfigArgs {
                action: ConfigAction::Show
            })
        ));
        assert!(cli.global.quiet);
    }
}
