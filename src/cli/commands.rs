//! Command handlers for Radar Viewer CLI
//!
//! This module implements the command handlers that coordinate between CLI
//! arguments and a viewer session.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::app::{Fetch, RadarIndexEntry, RadarStation, ViewerSession};
use crate::cli::{Commands, ConfigAction, ConfigArgs, ViewArgs};
use crate::config::AppConfig;
use crate::errors::{AppError, Result};

/// Run one command inside a logged session
///
/// `OpenProgram` is logged before the command and `CloseProgram` after it,
/// whether the command succeeded or not. The command's error wins over a
/// failure to log the close.
pub async fn run_session<F: Fetch>(session: ViewerSession<F>, command: Commands) -> Result<()> {
    session.start()?;

    let outcome = match command {
        Commands::Stations { json } => handle_stations(&session, json).await,
        Commands::Images { station_id, json } => handle_images(&session, &station_id, json).await,
        Commands::View(args) => handle_view(&session, args).await,
        Commands::Report { open } => handle_report(&session, open).await,
        Commands::AddStation { id, name } => handle_add_station(&session, id, name),
        Commands::Config(_) => Err(AppError::generic(
            "Configuration commands do not run in a session",
        )),
    };

    if let Err(e) = &outcome {
        warn!("{}", failure_message(e));
    }

    let closed = session.close();
    outcome?;
    closed?;
    Ok(())
}

/// Handle the stations command
pub async fn handle_stations<F: Fetch>(session: &ViewerSession<F>, json: bool) -> Result<()> {
    let stations = session.load_stations().await?;
    info!("{} stations in catalog", stations.len());

    if json {
        println!("{}", to_json(&stations)?);
        return Ok(());
    }

    if stations.is_empty() {
        println!("No radar stations in the catalog.");
        println!("   Run 'radar_viewer add-station <ID> <NAME>' to add one.");
        return Ok(());
    }

    println!("{:<8} Name", "ID");
    for station in &stations {
        println!("{:<8} {}", station.id, station.name);
    }
    Ok(())
}

/// One row of the image table
#[derive(Debug, Serialize)]
struct ImageRow<'a> {
    station_id: &'a str,
    date: String,
    time: String,
    timestamp: String,
}

impl<'a> From<&'a RadarIndexEntry> for ImageRow<'a> {
    fn from(entry: &'a RadarIndexEntry) -> Self {
        Self {
            station_id: &entry.station_id,
            date: entry.date_label(),
            time: entry.time_label(),
            timestamp: entry.compact_timestamp(),
        }
    }
}

/// Handle the images command
///
/// The station must be in the catalog; its name goes into the selection
/// event.
pub async fn handle_images<F: Fetch>(
    session: &ViewerSession<F>,
    station_id: &str,
    json: bool,
) -> Result<()> {
    let stations = session.load_stations().await?;
    let station = find_station(&stations, station_id)?;
    let entries = session.select_station(station).await?;
    let rows: Vec<ImageRow> = entries.iter().map(ImageRow::from).collect();

    if json {
        println!("{}", to_json(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("No scans listed for {} in the radar index.", station);
        return Ok(());
    }

    println!("{:<8} {:<10} {:<5} Timestamp", "Radar", "Date", "Time");
    for row in &rows {
        println!(
            "{:<8} {:<10} {:<5} {}",
            row.station_id, row.date, row.time, row.timestamp
        );
    }
    Ok(())
}

fn find_station<'a>(stations: &'a [RadarStation], station_id: &str) -> Result<&'a RadarStation> {
    stations
        .iter()
        .find(|station| station.id == station_id)
        .ok_or_else(|| {
            AppError::generic(format!(
                "Unknown station '{}'. Run 'radar_viewer add-station' first",
                station_id
            ))
        })
}

/// Handle the view command
pub async fn handle_view<F: Fetch>(session: &ViewerSession<F>, args: ViewArgs) -> Result<()> {
    let timestamp = args.scan_time().map_err(AppError::generic)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!(
        "Fetching layers for {} at {}",
        args.station_id, args.timestamp
    ));
    spinner.enable_steady_tick(Duration::from_millis(120));

    let result = session.select_image(&args.station_id, &timestamp).await;
    spinner.finish_and_clear();
    let stack = result?;

    let (width, height) = crate::app::LayerStack::canvas_size();
    println!(
        "Layers for {} at {} ({}x{}, bottom to top):",
        args.station_id,
        timestamp.format("%Y-%m-%d %H:%M"),
        width,
        height
    );
    for (position, layer) in stack.layers().iter().enumerate() {
        println!("  {}. {:<12} {}", position + 1, layer.kind, layer.path.display());
    }
    Ok(())
}

/// Handle the report command
pub async fn handle_report<F: Fetch>(session: &ViewerSession<F>, open: bool) -> Result<()> {
    let path = if open {
        session.show_report().await?
    } else {
        session.write_report().await?
    };
    println!("Report written to {}", path.display());
    Ok(())
}

/// Handle the add-station command
pub fn handle_add_station<F: Fetch>(
    session: &ViewerSession<F>,
    id: String,
    name: String,
) -> Result<()> {
    let station = RadarStation::new(id, name);
    session.add_station(&station)?;
    println!("Added {}", station);
    Ok(())
}

/// Handle configuration management
pub async fn handle_config(args: ConfigArgs, config: &AppConfig) -> Result<()> {
    match args.action {
        ConfigAction::Init { path } => {
            let path = AppConfig::initialize(path).await?;
            println!("Configuration file: {}", path.display());
        }
        ConfigAction::Show => {
            let rendered = toml::to_string_pretty(config)
                .map_err(|e| AppError::generic(format!("Failed to render configuration: {}", e)))?;
            debug!("Rendered {} bytes of configuration", rendered.len());
            print!("{}", rendered);
        }
    }
    Ok(())
}

/// One-line description of a failed command, with a retry hint when the
/// failure was on the server side
fn failure_message(error: &AppError) -> String {
    let message = format!("Command failed ({}): {}", error.category(), error);
    if error.is_recoverable() {
        format!("{}. The server may be busy; try again shortly", message)
    } else {
        message
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| AppError::generic(format!("Failed to encode JSON: {}", e)))
}
