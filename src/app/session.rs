//! One user session against the radar server
//!
//! A session owns its collaborators and exposes one method per user action:
//! start, pick a station, pick an image, look at the report, close. Every
//! action runs to completion before the next one is accepted.

use std::path::PathBuf;

use chrono::NaiveDateTime;
use tracing::{debug, info};
use url::Url;

use crate::app::assets::{AssetResolver, AssetRetriever, LayerStack};
use crate::app::catalog::CatalogStore;
use crate::app::client::{Fetch, RadarClient};
use crate::app::event_log::EventLog;
use crate::app::freshness::{FreshnessChecker, Refresh};
use crate::app::index::{entries_for, load_index};
use crate::app::models::{LogEvent, RadarIndexEntry, RadarStation};
use crate::app::viewer::ReportViewer;
use crate::config::{AppConfig, FilesConfig};
use crate::constants::events;
use crate::errors::Result;

/// Outcome of refreshing both cached index files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexRefresh {
    pub radar_index: Refresh,
    pub image_index: Refresh,
}

pub struct ViewerSession<F> {
    fetcher: F,
    files: FilesConfig,
    radar_index_url: Url,
    image_index_url: Url,
    store: CatalogStore,
    event_log: EventLog,
    freshness: FreshnessChecker,
    resolver: AssetResolver,
    viewer: ReportViewer,
}

impl ViewerSession<RadarClient> {
    /// Session backed by the real HTTP client
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let client = RadarClient::with_config(&config.client.to_runtime_config())?;
        Self::new(config, client)
    }
}

impl<F: Fetch> ViewerSession<F> {
    /// Build a session and make sure the catalog tables exist
    pub fn new(config: &AppConfig, fetcher: F) -> Result<Self> {
        let store = CatalogStore::new(config.files.database.clone());
        store.initialize()?;

        let resolver = AssetResolver::new(
            config.remote.radar_base()?,
            config.remote.transparencies_base()?,
            config.files.cache_dir.clone(),
        );

        Ok(Self {
            fetcher,
            files: config.files.clone(),
            radar_index_url: config.remote.radar_index()?,
            image_index_url: config.remote.image_index()?,
            event_log: EventLog::new(store.clone()),
            store,
            freshness: FreshnessChecker::new(config.freshness.ttl),
            resolver,
            viewer: ReportViewer::default(),
        })
    }

    pub fn with_viewer(mut self, viewer: ReportViewer) -> Self {
        self.viewer = viewer;
        self
    }

    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn start(&self) -> Result<LogEvent> {
        info!("Session started");
        Ok(self
            .event_log
            .append(events::OPEN_PROGRAM, events::OPEN_PROGRAM_DETAILS)?)
    }

    /// Re-download either index file whose cached copy has gone stale
    pub async fn refresh_indexes(&self) -> Result<IndexRefresh> {
        tokio::fs::create_dir_all(&self.files.cache_dir).await?;

        let radar_index = self
            .freshness
            .ensure_fresh(&self.fetcher, &self.files.radar_index_path(), &self.radar_index_url)
            .await?;
        let image_index = self
            .freshness
            .ensure_fresh(&self.fetcher, &self.files.image_index_path(), &self.image_index_url)
            .await?;

        Ok(IndexRefresh {
            radar_index,
            image_index,
        })
    }

    /// Stations in the catalog, after bringing both index files up to date
    pub async fn load_stations(&self) -> Result<Vec<RadarStation>> {
        let stations = self.store.list_stations()?;
        let refresh = self.refresh_indexes().await?;
        debug!("Index refresh: {:?}", refresh);
        Ok(stations)
    }

    /// Log the selection and list the station's available scans
    ///
    /// Reads the cached radar index as it is; call [`Self::load_stations`] or
    /// [`Self::refresh_indexes`] first to bring it up to date.
    pub async fn select_station(&self, station: &RadarStation) -> Result<Vec<RadarIndexEntry>> {
        self.event_log.append(
            events::SELECT_RADAR,
            &format!("Selected {}:{}", station.id, station.name),
        )?;

        let entries = load_index(&self.files.radar_index_path()).await?;
        let matching = entries_for(&station.id, &entries);
        info!("{} scans available for {}", matching.len(), station.id);
        Ok(matching)
    }

    /// Make sure every asset of the selection is cached and stack the layers
    pub async fn select_image(
        &self,
        station_id: &str,
        timestamp: &NaiveDateTime,
    ) -> Result<LayerStack> {
        AssetRetriever::new(&self.resolver, &self.fetcher, &self.event_log)
            .retrieve(station_id, timestamp)
            .await
    }

    /// Seed or rename a station in the catalog
    pub fn add_station(&self, station: &RadarStation) -> Result<()> {
        self.store.upsert_station(station)?;
        info!("Stored station {}", station);
        Ok(())
    }

    /// Write the HTML report and return its path
    pub async fn write_report(&self) -> Result<PathBuf> {
        let path = self.files.report_path();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        self.event_log.write_report(&path).await?;
        Ok(path)
    }

    /// Write the report and open it with the report viewer
    pub async fn show_report(&self) -> Result<PathBuf> {
        let path = self.write_report().await?;
        self.viewer.open(&path).await?;
        Ok(path)
    }

    /// Log the end of the session
    pub fn close(self) -> Result<LogEvent> {
        let event = self
            .event_log
            .append(events::CLOSE_PROGRAM, events::CLOSE_PROGRAM_DETAILS)?;
        info!("Session closed");
        Ok(event)
    }
}
