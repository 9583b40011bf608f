//! Radar Viewer Library
//!
//! Core of a weather radar image viewer for the Bureau of Meteorology radar
//! network: a SQLite station catalog, TTL-refreshed index files, cached
//! download of the image layers behind each composite, and an event log that
//! renders to an HTML report.

pub mod app;
pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod prelude;

// Re-export commonly used types for convenience
pub use errors::{AppError, Result};

#[cfg(test)]
mod tests {
    use super::*;
    use constants::*;

    #[test]
    fn test_constants_accessible() {
        assert_eq!(DEFAULT_TTL.as_secs(), 60);
        assert_eq!(DATABASE_NAME, "radar_app.db");
        assert!(RADAR_BASE_URL.ends_with('/'));
    }

    #[test]
    fn test_error_types() {
        let app_error = AppError::from(errors::FetchError::AccessDenied {
            url: "http://example.com/radar/".to_string(),
        });

        assert_eq!(app_error.category(), "fetch");
        assert!(!app_error.is_recoverable());
    }
}
