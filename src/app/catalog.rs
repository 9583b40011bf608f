//! SQLite catalog holding the station list and the event log
//!
//! Every call opens its own connection and closes it before returning, so no
//! handle is held between user actions.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use rusqlite::{params, Connection};

use crate::app::models::{LogEvent, RadarStation};
use crate::constants::events;
use crate::errors::{StoreError, StoreResult};

const CREATE_TABLES: &str = "
CREATE TABLE IF NOT EXISTS Radars (
    RadarId   TEXT PRIMARY KEY,
    RadarName TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS Log (
    EventType TEXT NOT NULL,
    DateTime  TEXT NOT NULL,
    Details   TEXT NOT NULL
);
";

const SELECT_STATIONS: &str = "SELECT RadarId, RadarName FROM Radars ORDER BY rowid";
const UPSERT_STATION: &str = "INSERT OR REPLACE INTO Radars (RadarId, RadarName) VALUES (?1, ?2)";
const INSERT_LOG_EVENT: &str = "INSERT INTO Log (EventType, DateTime, Details) VALUES (?1, ?2, ?3)";
const SELECT_LOG_EVENTS: &str = "SELECT EventType, DateTime, Details FROM Log ORDER BY rowid";

#[derive(Debug, Clone)]
pub struct CatalogStore {
    db_path: PathBuf,
}

impl CatalogStore {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    fn connect(&self) -> StoreResult<Connection> {
        Ok(Connection::open(&self.db_path)?)
    }

    /// Create the `Radars` and `Log` tables if they do not exist yet
    pub fn initialize(&self) -> StoreResult<()> {
        self.connect()?.execute_batch(CREATE_TABLES)?;
        Ok(())
    }

    /// All stations in catalog order
    pub fn list_stations(&self) -> StoreResult<Vec<RadarStation>> {
        let connection = self.connect()?;
        let mut statement = connection.prepare(SELECT_STATIONS)?;
        let stations = statement
            .query_map([], |row| {
                Ok(RadarStation::new(
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(stations)
    }

    /// Insert a station, replacing the name if the id already exists
    pub fn upsert_station(&self, station: &RadarStation) -> StoreResult<()> {
        self.connect()?
            .execute(UPSERT_STATION, params![station.id, station.name])?;
        Ok(())
    }

    pub fn append_log_event(
        &self,
        event_type: &str,
        timestamp: &NaiveDateTime,
        details: &str,
    ) -> StoreResult<()> {
        let date_time = timestamp.format(events::TIMESTAMP_FORMAT).to_string();
        self.connect()?
            .execute(INSERT_LOG_EVENT, params![event_type, date_time, details])?;
        Ok(())
    }

    /// All log events in insertion order
    pub fn list_log_events(&self) -> StoreResult<Vec<LogEvent>> {
        let connection = self.connect()?;
        let mut statement = connection.prepare(SELECT_LOG_EVENTS)?;
        let rows = statement
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(event_type, date_time, details)| {
                let timestamp = NaiveDateTime::parse_from_str(&date_time, events::TIMESTAMP_FORMAT)
                    .map_err(|_| StoreError::InvalidTimestamp { value: date_time })?;
                Ok(LogEvent {
                    event_type,
                    timestamp,
                    details,
                })
            })
            .collect()
    }
}
