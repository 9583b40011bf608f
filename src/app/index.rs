//! Radar index parsing
//!
//! The index is whatever listing the server returns for the radar image
//! directory. Rather than depend on its layout, the parser scans the raw text
//! for scan image file names and ignores everything else.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::app::models::{parse_index_timestamp, RadarIndexEntry};
use crate::constants::index;
use crate::errors::IndexError;

fn image_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(index::IMAGE_PATTERN).expect("image pattern is valid"))
}

/// Extract every scan image entry from raw index text
///
/// Entries come back in source order with duplicates kept. A name whose
/// twelve digits are not a real calendar time is skipped.
pub fn parse_index(raw_text: &str) -> Vec<RadarIndexEntry> {
    image_pattern()
        .captures_iter(raw_text)
        .filter_map(|captures| {
            let station_id = &captures[1];
            let stamp = &captures[2];
            match parse_index_timestamp(stamp) {
                Some(timestamp) => Some(RadarIndexEntry::new(station_id, timestamp)),
                None => {
                    debug!("Skipping {}.T.{}.png: not a valid timestamp", station_id, stamp);
                    None
                }
            }
        })
        .collect()
}

/// Keep only the entries for `station_id`, preserving order
pub fn entries_for(station_id: &str, entries: &[RadarIndexEntry]) -> Vec<RadarIndexEntry> {
    entries
        .iter()
        .filter(|entry| entry.station_id == station_id)
        .cloned()
        .collect()
}

/// Read and parse a cached index file
pub async fn load_index(path: &Path) -> Result<Vec<RadarIndexEntry>, IndexError> {
    let raw_text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| IndexError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

    let entries = parse_index(&raw_text);
    debug!("Parsed {} entries from {}", entries.len(), path.display());
    Ok(entries)
}
