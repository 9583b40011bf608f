//! Append-only event log and its HTML report

use std::fmt::Write as _;
use std::path::Path;

use chrono::{Local, NaiveDateTime, Timelike};
use tracing::{debug, info};

use crate::app::catalog::CatalogStore;
use crate::app::models::LogEvent;
use crate::constants::report;
use crate::errors::{Result, StoreResult};

#[derive(Debug, Clone)]
pub struct EventLog {
    store: CatalogStore,
}

impl EventLog {
    pub fn new(store: CatalogStore) -> Self {
        Self { store }
    }

    /// Record an event stamped with the current local time
    pub fn append(&self, event_type: &str, details: &str) -> StoreResult<LogEvent> {
        self.append_at(event_type, Local::now().naive_local(), details)
    }

    /// Record an event with an explicit timestamp, truncated to seconds
    pub fn append_at(
        &self,
        event_type: &str,
        timestamp: NaiveDateTime,
        details: &str,
    ) -> StoreResult<LogEvent> {
        let event = LogEvent {
            event_type: event_type.to_string(),
            timestamp: truncate_to_seconds(timestamp),
            details: details.to_string(),
        };
        self.store
            .append_log_event(&event.event_type, &event.timestamp, &event.details)?;
        debug!("Logged {}: {}", event.event_type, event.details);
        Ok(event)
    }

    pub fn list_all(&self) -> StoreResult<Vec<LogEvent>> {
        self.store.list_log_events()
    }

    pub fn render_report(&self) -> StoreResult<String> {
        Ok(render_html(&self.list_all()?))
    }

    /// Render the report and write it to `path`
    pub async fn write_report(&self, path: &Path) -> Result<()> {
        let html = self.render_report()?;
        tokio::fs::write(path, html).await?;
        info!("Event log report generated - {}", path.display());
        Ok(())
    }
}

fn truncate_to_seconds(timestamp: NaiveDateTime) -> NaiveDateTime {
    timestamp.with_nanosecond(0).unwrap_or(timestamp)
}

/// Render events as a minimal HTML page with one table row per event
pub fn render_html(events: &[LogEvent]) -> String {
    let mut html = String::new();
    html.push_str("<html>\n");
    let _ = writeln!(html, "<head><title>{}</title></head>", report::TITLE);
    html.push_str("<body>\n");
    let _ = writeln!(html, "<h1>{}</h1>", report::TITLE);
    html.push_str("<table border='1'>\n");

    html.push_str("<tr>");
    for column in report::COLUMNS {
        let _ = write!(html, "<th>{}</th>", column);
    }
    html.push_str("</tr>\n");

    for event in events {
        let _ = writeln!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape_html(&event.event_type),
            event.formatted_timestamp(),
            escape_html(&event.details)
        );
    }

    html.push_str("</table>\n");
    html.push_str("</body>\n");
    html.push_str("</html>");
    html
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn log() -> (TempDir, EventLog) {
        let temp_dir = TempDir::new().unwrap();
        let store = CatalogStore::new(temp_dir.path().join("radar_app.db"));
        store.initialize().unwrap();
        (temp_dir, EventLog::new(store))
    }

    fn at(s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, s)
            .unwrap()
    }

    #[test]
    fn test_report_round_trip() {
        let (_dir, log) = log();
        log.append_at("OpenProgram", at(0), "x").unwrap();
        log.append_at("CloseProgram", at(5), "y").unwrap();

        let html = log.render_report().unwrap();
        let rows: Vec<&str> = html.lines().filter(|l| l.starts_with("<tr><td>")).collect();

        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0],
            "<tr><td>OpenProgram</td><td>2024-01-01 00:00:00</td><td>x</td></tr>"
        );
        assert_eq!(
            rows[1],
            "<tr><td>CloseProgram</td><td>2024-01-01 00:00:05</td><td>y</td></tr>"
        );
        assert!(html.contains("<title>Weather Log Report</title>"));
        assert!(html.contains("<th>Event Type</th><th>Date and Time</th><th>Details</th>"));
    }

    #[test]
    fn test_empty_report_has_header_only() {
        let html = render_html(&[]);
        assert!(html.starts_with("<html>\n"));
        assert!(html.ends_with("</html>"));
        assert!(!html.contains("<td>"));
    }

    #[test]
    fn test_details_are_escaped() {
        let (_dir, log) = log();
        log.append_at("SelectRadar", at(1), "Selected IDR012:<Sydney & \"Hills\">")
            .unwrap();

        let html = log.render_report().unwrap();
        assert!(html.contains("Selected IDR012:&lt;Sydney &amp; &quot;Hills&quot;&gt;"));
    }

    #[test]
    fn test_append_uses_second_precision() {
        let (_dir, log) = log();
        let precise = at(7).with_nanosecond(123_456_789).unwrap();

        let event = log.append_at("ViewImage", precise, "Viewing image IDR.legend.1.png").unwrap();
        assert_eq!(event.timestamp, at(7));
        assert_eq!(log.list_all().unwrap(), vec![event]);
    }

    #[test]
    fn test_append_now() {
        let (_dir, log) = log();
        let event = log.append("OpenProgram", "The application has started.").unwrap();
        assert_eq!(event.timestamp.nanosecond(), 0);
        assert_eq!(log.list_all().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_write_report() {
        let (dir, log) = log();
        log.append_at("OpenProgram", at(0), "x").unwrap();

        let path = dir.path().join("event_log.html");
        log.write_report(&path).await.unwrap();

        let content = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(content.contains("OpenProgram"));
    }
}
