//! Prelude module for Radar Viewer Library
//!
//! Re-exports the items most integrations need, so a single
//! `use radar_viewer::prelude::*;` is enough to drive a session.

// Core result types
pub use crate::errors::{AppError, Result};

// Session and the values it hands back
pub use crate::app::{
    CatalogStore, EventLog, Fetch, LayerStack, LogEvent, RadarClient, RadarIndexEntry,
    RadarStation, ReportViewer, ViewerSession,
};

pub use crate::config::AppConfig;

// Commonly used constants
pub use crate::constants::{DEFAULT_TTL, RADAR_BASE_URL, TRANSPARENCIES_BASE_URL};

pub use std::path::{Path, PathBuf};
