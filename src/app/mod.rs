//! Core application logic for Radar Viewer
//!
//! This module contains the radar file client, the station catalog and event
//! log, index parsing with TTL refresh, layer retrieval and the session that
//! ties them together.
//!
//! # Examples
//!
//! ```rust,no_run
//! use radar_viewer::app::{RadarStation, ViewerSession};
//! use radar_viewer::config::AppConfig;
//!
//! # async fn example() -> radar_viewer::Result<()> {
//! let config = AppConfig::load(None).await?;
//! let session = ViewerSession::from_config(&config)?;
//! session.start()?;
//!
//! let station = RadarStation::new("IDR012", "Sydney");
//! session.load_stations().await?;
//! for entry in session.select_station(&station).await? {
//!     let stack = session.select_image(&entry.station_id, &entry.timestamp).await?;
//!     println!("{} layers for {}", stack.len(), entry.compact_timestamp());
//! }
//!
//! session.close()?;
//! # Ok(())
//! # }
//! ```

pub mod assets;
pub mod catalog;
pub mod client;
pub mod event_log;
pub mod freshness;
pub mod index;
pub mod models;
pub mod session;
pub mod viewer;

// Re-export main public API
pub use assets::{AssetDescriptor, AssetKind, AssetResolver, AssetRetriever, Layer, LayerStack};
pub use catalog::CatalogStore;
pub use client::{ClientConfig, DownloadHandler, Fetch, RadarClient, TextEncoding};
pub use event_log::{EventLog, render_html};
pub use freshness::{FreshnessChecker, Refresh};
pub use index::{entries_for, load_index, parse_index};
pub use models::{LogEvent, RadarIndexEntry, RadarStation, parse_index_timestamp};
pub use session::{IndexRefresh, ViewerSession};
pub use viewer::{OpenStrategy, ReportViewer};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_structure() {
        let config = ClientConfig::default();
        assert!(config.tcp_nodelay);
        assert_eq!(AssetKind::FETCH_ORDER.len(), 6);
    }
}
