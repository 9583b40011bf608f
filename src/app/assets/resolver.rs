//! Deterministic asset naming for a station and timestamp

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use url::Url;

use super::{AssetDescriptor, AssetKind};
use crate::app::models::is_station_id;
use crate::errors::{FetchError, FetchResult};

/// Maps a selection onto remote URLs and flat local cache paths
#[derive(Debug, Clone)]
pub struct AssetResolver {
    radar_base: Url,
    transparencies_base: Url,
    cache_dir: PathBuf,
}

impl AssetResolver {
    /// Base URLs are treated as directories whether or not they end in `/`
    pub fn new(radar_base: Url, transparencies_base: Url, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            radar_base: as_directory(radar_base),
            transparencies_base: as_directory(transparencies_base),
            cache_dir: cache_dir.into(),
        }
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// All six descriptors for a selection, in fetch order
    ///
    /// Pure: the result depends only on the arguments and the resolver's
    /// bases, never on what is already cached.
    pub fn resolve(
        &self,
        station_id: &str,
        timestamp: &NaiveDateTime,
    ) -> FetchResult<Vec<AssetDescriptor>> {
        AssetKind::FETCH_ORDER
            .iter()
            .map(|kind| self.descriptor(*kind, station_id, timestamp))
            .collect()
    }

    /// # Errors
    ///
    /// `FetchError::InvalidUrl` if `station_id` is not a station code. The
    /// id becomes part of both the URL and the cache path, so nothing else
    /// is accepted.
    pub fn descriptor(
        &self,
        kind: AssetKind,
        station_id: &str,
        timestamp: &NaiveDateTime,
    ) -> FetchResult<AssetDescriptor> {
        if !is_station_id(station_id) {
            return Err(FetchError::InvalidUrl {
                url: station_id.to_string(),
                reason: "station id must be three letters followed by three digits".to_string(),
            });
        }

        let file_name = kind.file_name(station_id, timestamp);
        let base = if kind.is_transparency() {
            &self.transparencies_base
        } else {
            &self.radar_base
        };

        let remote_url = base.join(&file_name).map_err(|e| FetchError::InvalidUrl {
            url: format!("{}{}", base, file_name),
            reason: e.to_string(),
        })?;

        Ok(AssetDescriptor {
            kind,
            remote_url,
            local_path: self.cache_dir.join(&file_name),
        })
    }
}

fn as_directory(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
