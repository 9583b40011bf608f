//! Command-line interface components
//!
//! This module contains CLI-specific code for the Radar Viewer application:
//! argument parsing and the handlers that drive a viewer session.

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, ConfigAction, ConfigArgs, GlobalArgs, ViewArgs};
pub use commands::{
    handle_add_station, handle_config, handle_images, handle_report, handle_stations, handle_view,
    run_session,
};
