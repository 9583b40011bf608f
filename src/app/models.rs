//! Data models for Radar Viewer
//!
//! Stations come from the catalog store, index entries from parsing the
//! cached radar index, and log events from the event log table.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::constants::{events, index};

/// A weather radar installation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadarStation {
    /// Short code, e.g. "IDR012"
    pub id: String,
    /// Display name, e.g. "Sydney (Terrey Hills)"
    pub name: String,
}

impl RadarStation {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for RadarStation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.id, self.name)
    }
}

/// One scan image listed in the radar index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadarIndexEntry {
    pub station_id: String,
    /// Scan time, minute precision
    pub timestamp: NaiveDateTime,
}

impl RadarIndexEntry {
    pub fn new(station_id: impl Into<String>, timestamp: NaiveDateTime) -> Self {
        Self {
            station_id: station_id.into(),
            timestamp,
        }
    }

    /// Date column for the image table, e.g. "2024-05-16"
    pub fn date_label(&self) -> String {
        self.timestamp.format(index::DATE_LABEL_FORMAT).to_string()
    }

    /// Time column for the image table, e.g. "11:24"
    pub fn time_label(&self) -> String {
        self.timestamp.format(index::TIME_LABEL_FORMAT).to_string()
    }

    /// Timestamp as it appears in image file names, e.g. "202405161124"
    pub fn compact_timestamp(&self) -> String {
        format_index_timestamp(&self.timestamp)
    }
}

/// Parse a `YYYYMMDDHHmm` timestamp as used in scan image names
pub fn parse_index_timestamp(value: &str) -> Option<NaiveDateTime> {
    if value.len() != 12 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDateTime::parse_from_str(value, index::TIMESTAMP_FORMAT).ok()
}

/// Whether `value` has the shape of a station code: three letters then
/// three digits, as in `IDR012`
pub fn is_station_id(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 6
        && bytes[..3].iter().all(u8::is_ascii_alphabetic)
        && bytes[3..].iter().all(u8::is_ascii_digit)
}

/// Format a timestamp as `YYYYMMDDHHmm`
pub fn format_index_timestamp(timestamp: &NaiveDateTime) -> String {
    timestamp.format(index::TIMESTAMP_FORMAT).to_string()
}

/// One row of the event log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    /// Free-form category tag, e.g. "ViewImage"
    pub event_type: String,
    /// Local time, second precision
    pub timestamp: NaiveDateTime,
    pub details: String,
}

impl LogEvent {
    /// Timestamp in the stored `YYYY-MM-DD HH:MM:SS` form
    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.format(events::TIMESTAMP_FORMAT).to_string()
    }
}
