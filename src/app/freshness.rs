//! Time-to-live check for cached index files
//!
//! An index file is fresh while its modification time is no more than the
//! TTL in the past. There is no other invalidation.

use std::path::Path;
use std::time::{Duration, SystemTime};

use tracing::{debug, info};
use url::Url;

use crate::app::client::{DownloadHandler, Fetch};
use crate::constants::freshness;
use crate::errors::FetchResult;

/// What [`FreshnessChecker::ensure_fresh`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    /// Local copy was young enough, nothing fetched
    UpToDate,
    /// Local copy was missing or stale and has been replaced
    Downloaded { bytes: u64 },
}

#[derive(Debug, Clone)]
pub struct FreshnessChecker {
    ttl: Duration,
}

impl Default for FreshnessChecker {
    fn default() -> Self {
        Self::new(freshness::DEFAULT_TTL)
    }
}

impl FreshnessChecker {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Whether `path` exists and was modified within the TTL of `now`
    ///
    /// An age of exactly the TTL is still fresh. A modification time ahead
    /// of `now` counts as fresh.
    pub fn is_fresh_at(&self, path: &Path, now: SystemTime) -> bool {
        let modified = match std::fs::metadata(path).and_then(|m| m.modified()) {
            Ok(modified) => modified,
            Err(_) => return false,
        };

        match now.duration_since(modified) {
            Ok(age) => age <= self.ttl,
            Err(_) => true,
        }
    }

    pub fn is_fresh(&self, path: &Path) -> bool {
        self.is_fresh_at(path, SystemTime::now())
    }

    /// Re-download `remote_url` into `local_path` unless the local copy is
    /// still fresh
    pub async fn ensure_fresh<F: Fetch>(
        &self,
        fetcher: &F,
        local_path: &Path,
        remote_url: &Url,
    ) -> FetchResult<Refresh> {
        if self.is_fresh(local_path) {
            debug!("{} is up to date", local_path.display());
            return Ok(Refresh::UpToDate);
        }

        let bytes = DownloadHandler::new(fetcher)
            .fetch_to_file(remote_url, local_path)
            .await?;
        info!("Refreshed {} from {}", local_path.display(), remote_url);
        Ok(Refresh::Downloaded { bytes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::client::fake::FakeFetcher;
    use std::fs::File;
    use tempfile::tempdir;

    const INDEX_URL: &str = "http://example.com/radar/";

    fn base_time() -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000)
    }

    fn touch(path: &Path, modified: SystemTime) {
        let file = File::create(path).unwrap();
        file.set_modified(modified).unwrap();
    }

    #[test]
    fn test_ttl_boundary() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("radar_index.txt");
        touch(&path, base_time());

        let checker = FreshnessChecker::default();
        assert!(checker.is_fresh_at(&path, base_time()));
        assert!(checker.is_fresh_at(&path, base_time() + Duration::from_secs(60)));
        assert!(!checker.is_fresh_at(&path, base_time() + Duration::from_millis(60_001)));
    }

    #[test]
    fn test_missing_file_is_stale() {
        let temp_dir = tempdir().unwrap();
        let checker = FreshnessChecker::default();
        assert!(!checker.is_fresh_at(&temp_dir.path().join("absent.txt"), base_time()));
    }

    #[test]
    fn test_future_mtime_is_fresh() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("image_index.txt");
        touch(&path, base_time() + Duration::from_secs(3600));

        assert!(FreshnessChecker::default().is_fresh_at(&path, base_time()));
    }

    #[test]
    fn test_custom_ttl() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("radar_index.txt");
        touch(&path, base_time());

        let checker = FreshnessChecker::new(Duration::from_secs(300));
        assert!(checker.is_fresh_at(&path, base_time() + Duration::from_secs(240)));
        assert!(!checker.is_fresh_at(&path, base_time() + Duration::from_secs(301)));
    }

    #[tokio::test]
    async fn test_ensure_fresh_downloads_when_absent() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("radar_index.txt");
        let fetcher = FakeFetcher::new().with_body(INDEX_URL, "listing");

        let refresh = FreshnessChecker::default()
            .ensure_fresh(&fetcher, &path, &Url::parse(INDEX_URL).unwrap())
            .await
            .unwrap();

        assert_eq!(refresh, Refresh::Downloaded { bytes: 7 });
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "listing");
    }

    #[tokio::test]
    async fn test_ensure_fresh_skips_young_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("radar_index.txt");
        std::fs::write(&path, "cached").unwrap();
        let fetcher = FakeFetcher::new().with_body(INDEX_URL, "listing");

        let refresh = FreshnessChecker::default()
            .ensure_fresh(&fetcher, &path, &Url::parse(INDEX_URL).unwrap())
            .await
            .unwrap();

        assert_eq!(refresh, Refresh::UpToDate);
        assert!(fetcher.requests().is_empty());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "cached");
    }

    #[tokio::test]
    async fn test_ensure_fresh_replaces_stale_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("radar_index.txt");
        touch(&path, SystemTime::now() - Duration::from_secs(120));
        let fetcher = FakeFetcher::new().with_body(INDEX_URL, "new listing");

        let refresh = FreshnessChecker::default()
            .ensure_fresh(&fetcher, &path, &Url::parse(INDEX_URL).unwrap())
            .await
            .unwrap();

        assert!(matches!(refresh, Refresh::Downloaded { .. }));
        assert_eq!(fetcher.request_count(INDEX_URL), 1);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new listing");
    }
}
