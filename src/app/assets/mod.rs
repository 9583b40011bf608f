//! Image assets behind one radar composite
//!
//! A display request needs six files: the timestamped radar scan plus five
//! transparencies. Five of them are drawn; the wind legend is downloaded and
//! cached but never stacked.
//!
//! # Module Organization
//!
//! - [`resolver`] - derives names, URLs and local paths for a selection
//! - [`retriever`] - makes sure each asset exists locally
//! - [`layers`] - the ordered layer stack handed to the display surface

use std::fmt;
use std::path::PathBuf;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::app::models::format_index_timestamp;
use crate::constants::assets;

pub mod layers;
pub mod resolver;
pub mod retriever;

pub use layers::{Layer, LayerStack};
pub use resolver::AssetResolver;
pub use retriever::AssetRetriever;

/// Kind of image asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetKind {
    RadarImage,
    Background,
    RangeMap,
    Legend,
    WindLegend,
    Locations,
}

impl AssetKind {
    /// Order in which assets are fetched
    pub const FETCH_ORDER: [AssetKind; 6] = [
        AssetKind::RadarImage,
        AssetKind::Background,
        AssetKind::RangeMap,
        AssetKind::Legend,
        AssetKind::WindLegend,
        AssetKind::Locations,
    ];

    /// Bottom-to-top drawing order on the canvas
    pub const DISPLAY_ORDER: [AssetKind; 5] = [
        AssetKind::Background,
        AssetKind::RadarImage,
        AssetKind::RangeMap,
        AssetKind::Legend,
        AssetKind::Locations,
    ];

    /// File name on the server and in the local cache
    pub fn file_name(&self, station_id: &str, timestamp: &NaiveDateTime) -> String {
        match self {
            AssetKind::RadarImage => {
                format!("{}.T.{}.png", station_id, format_index_timestamp(timestamp))
            }
            AssetKind::Background => format!("{}.background.png", station_id),
            AssetKind::RangeMap => format!("{}.range.png", station_id),
            AssetKind::Legend => assets::LEGEND_FILE_NAME.to_string(),
            AssetKind::WindLegend => assets::WIND_LEGEND_FILE_NAME.to_string(),
            AssetKind::Locations => format!("{}.locations.png", station_id),
        }
    }

    /// Whether the asset lives under the transparencies base URL
    pub fn is_transparency(&self) -> bool {
        !matches!(self, AssetKind::RadarImage)
    }

    /// Whether downloading this asset writes a `ViewImage` log event
    ///
    /// Background downloads have never been logged.
    pub fn logs_download(&self) -> bool {
        !matches!(self, AssetKind::Background)
    }

    pub fn is_displayed(&self) -> bool {
        Self::DISPLAY_ORDER.contains(self)
    }

    pub fn label(&self) -> &'static str {
        match self {
            AssetKind::RadarImage => "radar-image",
            AssetKind::Background => "background",
            AssetKind::RangeMap => "range-map",
            AssetKind::Legend => "legend",
            AssetKind::WindLegend => "wind-legend",
            AssetKind::Locations => "locations",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Where one asset comes from and where it is cached
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetDescriptor {
    pub kind: AssetKind,
    pub remote_url: Url,
    pub local_path: PathBuf,
}

impl AssetDescriptor {
    /// File name component of the local path
    pub fn file_name(&self) -> String {
        self.local_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}
