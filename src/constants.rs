//! Application constants for Radar Viewer
//!
//! This module centralizes all constants used throughout the application,
//! organized by functional domain.

use std::time::Duration;

/// Environment variable names for configuration overrides
pub mod env {
    /// Path of the SQLite catalog database
    pub const DATABASE: &str = "RADAR_VIEWER_DB";

    /// Directory holding cached index, image and report files
    pub const CACHE_DIR: &str = "RADAR_VIEWER_CACHE_DIR";

    /// Base URL for radar scan images
    pub const RADAR_URL: &str = "RADAR_VIEWER_RADAR_URL";

    /// Base URL for transparency overlays
    pub const TRANSPARENCIES_URL: &str = "RADAR_VIEWER_TRANSPARENCIES_URL";
}

/// Bureau of Meteorology endpoints
pub mod remote {
    /// Radar scan images, one PNG per station and timestamp
    pub const RADAR_BASE_URL: &str = "http://www.bom.gov.au/radar/";

    /// Static per-station overlays and legends
    pub const TRANSPARENCIES_BASE_URL: &str = "http://www.bom.gov.au/products/radar_transparencies/";
}

/// HTTP client configuration constants
pub mod http {
    use super::Duration;

    /// User agent sent on the single retry after an access-denied response
    pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0";

    /// Default HTTP request timeout
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

    /// Connection establishment timeout
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection pool idle timeout
    pub const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

    /// URL schemes the client can speak
    pub const SUPPORTED_SCHEMES: &[&str] = &["http", "https"];
}

/// Local file names
pub mod files {
    /// SQLite catalog holding the station list and the event log
    pub const DATABASE_NAME: &str = "radar_app.db";

    /// Cached listing of available radar scan images
    pub const RADAR_INDEX_FILE_NAME: &str = "radar_index.txt";

    /// Cached listing of available transparency overlays
    pub const IMAGE_INDEX_FILE_NAME: &str = "image_index.txt";

    /// Generated event log report
    pub const REPORT_FILE_NAME: &str = "event_log.html";

    /// Project-local configuration file
    pub const LOCAL_CONFIG_FILE_NAME: &str = "radar-viewer.toml";

    /// Directory under the user config dir
    pub const CONFIG_DIR_NAME: &str = "radar-viewer";
}

/// Index file refresh policy
pub mod freshness {
    use super::Duration;

    /// Age after which a cached index file is downloaded again
    pub const DEFAULT_TTL: Duration = Duration::from_secs(60);
}

/// Radar index naming conventions
pub mod index {
    /// Scan image file name, e.g. `IDR012.T.202405161124.png`
    pub const IMAGE_PATTERN: &str = r"([A-Za-z]{3}\d{3})\.T\.(\d{12})\.png";

    /// Timestamp layout inside scan image names
    pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M";

    /// Date label shown in the image table
    pub const DATE_LABEL_FORMAT: &str = "%Y-%m-%d";

    /// Time label shown in the image table
    pub const TIME_LABEL_FORMAT: &str = "%H:%M";
}

/// Transparency asset names shared by every station
pub mod assets {
    /// Rainfall intensity legend
    pub const LEGEND_FILE_NAME: &str = "IDR.legend.1.png";

    /// Doppler wind legend
    pub const WIND_LEGEND_FILE_NAME: &str = "IDR.legend.2.png";
}

/// Display surface geometry
pub mod display {
    /// Canvas width in pixels
    pub const CANVAS_WIDTH: u32 = 520;

    /// Canvas height in pixels
    pub const CANVAS_HEIGHT: u32 = 560;
}

/// Event log categories and messages
pub mod events {
    pub const OPEN_PROGRAM: &str = "OpenProgram";
    pub const CLOSE_PROGRAM: &str = "CloseProgram";
    pub const SELECT_RADAR: &str = "SelectRadar";
    pub const VIEW_IMAGE: &str = "ViewImage";

    pub const OPEN_PROGRAM_DETAILS: &str = "The application has started.";
    pub const CLOSE_PROGRAM_DETAILS: &str = "The application has been closed.";

    /// Stored timestamp layout, second precision
    pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
}

/// HTML report layout
pub mod report {
    /// Page title and heading
    pub const TITLE: &str = "Weather Log Report";

    /// Table column headings
    pub const COLUMNS: [&str; 3] = ["Event Type", "Date and Time", "Details"];
}

/// Logging constants
pub mod logging {
    /// Default log level
    pub const DEFAULT_LOG_LEVEL: &str = "info";

    /// Target used in the tracing env filter
    pub const CRATE_TARGET: &str = "radar_viewer";
}

// Re-export commonly used constants for convenience
pub use files::{DATABASE_NAME, REPORT_FILE_NAME};
pub use freshness::DEFAULT_TTL;
pub use http::BROWSER_USER_AGENT;
pub use remote::{RADAR_BASE_URL, TRANSPARENCIES_BASE_URL};
