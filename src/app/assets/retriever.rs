//! Local-first asset retrieval
//!
//! A file already present at the descriptor's local path is a cache hit; it
//! is never re-validated. Missing files are fetched one at a time.

use std::path::PathBuf;

use chrono::NaiveDateTime;
use tracing::debug;

use super::{AssetDescriptor, AssetResolver, LayerStack};
use crate::app::client::{DownloadHandler, Fetch};
use crate::app::event_log::EventLog;
use crate::constants::events;
use crate::errors::{AppError, AssetError, Result};

pub struct AssetRetriever<'a, F> {
    resolver: &'a AssetResolver,
    fetcher: &'a F,
    log: &'a EventLog,
}

impl<'a, F: Fetch> AssetRetriever<'a, F> {
    pub fn new(resolver: &'a AssetResolver, fetcher: &'a F, log: &'a EventLog) -> Self {
        Self {
            resolver,
            fetcher,
            log,
        }
    }

    /// Make sure the asset exists locally and return its path
    ///
    /// Logs a `ViewImage` event before each download, except for the
    /// background.
    ///
    /// # Errors
    ///
    /// `AssetError::Unavailable` if the download fails; a log store failure
    /// is returned as is.
    pub async fn ensure_local(&self, descriptor: &AssetDescriptor) -> Result<PathBuf> {
        if descriptor.local_path.exists() {
            debug!("Cache hit for {}", descriptor.local_path.display());
            return Ok(descriptor.local_path.clone());
        }

        if descriptor.kind.logs_download() {
            self.log.append(
                events::VIEW_IMAGE,
                &format!("Viewing image {}", descriptor.file_name()),
            )?;
        }

        DownloadHandler::new(self.fetcher)
            .fetch_to_file(&descriptor.remote_url, &descriptor.local_path)
            .await
            .map_err(|source| {
                AppError::Asset(AssetError::Unavailable {
                    url: descriptor.remote_url.to_string(),
                    source,
                })
            })?;

        Ok(descriptor.local_path.clone())
    }

    /// Ensure all six assets of a selection in fetch order, then stack the
    /// displayed ones
    ///
    /// Stops at the first failure; nothing is returned for a partial set.
    pub async fn retrieve(
        &self,
        station_id: &str,
        timestamp: &NaiveDateTime,
    ) -> Result<LayerStack> {
        let descriptors = self.resolver.resolve(station_id, timestamp)?;

        let mut fetched = Vec::with_capacity(descriptors.len());
        for descriptor in &descriptors {
            let path = self.ensure_local(descriptor).await?;
            fetched.push((descriptor.kind, path));
        }

        LayerStack::from_assets(fetched)
            .ok_or_else(|| AppError::generic("Selection did not resolve to a full layer set"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::assets::{AssetKind, AssetResolver};
    use crate::app::catalog::CatalogStore;
    use crate::app::client::fake::FakeFetcher;
    use crate::errors::FetchError;
    use chrono::{NaiveDate, NaiveDateTime};
    use tempfile::TempDir;
    use url::Url;

    const RADAR: &str = "http://example.com/radar/";
    const OVERLAYS: &str = "http://example.com/transparencies/";

    struct Fixture {
        dir: TempDir,
        log: EventLog,
        resolver: AssetResolver,
    }

    fn fixture() -> Fixture {
        let dir = TempDir::new().unwrap();
        let store = CatalogStore::new(dir.path().join("radar_app.db"));
        store.initialize().unwrap();
        let resolver = AssetResolver::new(
            Url::parse(RADAR).unwrap(),
            Url::parse(OVERLAYS).unwrap(),
            dir.path().join("cache"),
        );
        Fixture {
            dir,
            log: EventLog::new(store),
            resolver,
        }
    }

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 16)
            .unwrap()
            .and_hms_opt(11, 24, 0)
            .unwrap()
    }

    #[tokio::test]
    async fn test_ensure_local_is_idempotent() {
        let fx = fixture();
        let fetcher = FakeFetcher::new().with_fallback(vec![0x89, b'P', b'N', b'G']);
        let retriever = AssetRetriever::new(&fx.resolver, &fetcher, &fx.log);
        let descriptor = fx
            .resolver
            .descriptor(AssetKind::RangeMap, "IDR012", &timestamp())
            .unwrap();

        let first = retriever.ensure_local(&descriptor).await.unwrap();
        let second = retriever.ensure_local(&descriptor).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(fetcher.requests().len(), 1);
        assert_eq!(fx.log.list_all().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_existing_file_is_never_fetched() {
        let fx = fixture();
        let descriptor = fx
            .resolver
            .descriptor(AssetKind::Legend, "IDR012", &timestamp())
            .unwrap();
        std::fs::create_dir_all(fx.dir.path().join("cache")).unwrap();
        std::fs::write(&descriptor.local_path, b"").unwrap();

        let fetcher = FakeFetcher::new();
        let path = AssetRetriever::new(&fx.resolver, &fetcher, &fx.log)
            .ensure_local(&descriptor)
            .await
            .unwrap();

        assert_eq!(path, descriptor.local_path);
        assert!(fetcher.requests().is_empty());
        assert!(fx.log.list_all().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_retrieve_fetches_six_and_stacks_five() {
        let fx = fixture();
        let fetcher = FakeFetcher::new().with_fallback("png");
        let retriever = AssetRetriever::new(&fx.resolver, &fetcher, &fx.log);
        let stack = retriever.retrieve("IDR012", &timestamp()).await.unwrap();

        assert_eq!(fetcher.requests().len(), 6);
        assert_eq!(
            fetcher.requests()[4],
            format!("{}IDR.legend.2.png", OVERLAYS)
        );
        assert!(fx.dir.path().join("cache/IDR.legend.2.png").exists());

        let names: Vec<String> = stack
            .paths()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec![
                "IDR012.background.png",
                "IDR012.T.202405161124.png",
                "IDR012.range.png",
                "IDR.legend.1.png",
                "IDR012.locations.png",
            ]
        );

        let logged: Vec<String> = fx
            .log
            .list_all()
            .unwrap()
            .into_iter()
            .map(|e| {
                assert_eq!(e.event_type, "ViewImage");
                e.details
            })
            .collect();
        assert_eq!(
            logged,
            vec![
                "Viewing image IDR012.T.202405161124.png",
                "Viewing image IDR012.range.png",
                "Viewing image IDR.legend.1.png",
                "Viewing image IDR.legend.2.png",
                "Viewing image IDR012.locations.png",
            ]
        );
    }

    #[tokio::test]
    async fn test_second_timestamp_only_fetches_the_scan() {
        let fx = fixture();
        let fetcher = FakeFetcher::new().with_fallback("png");
        let retriever = AssetRetriever::new(&fx.resolver, &fetcher, &fx.log);

        retriever.retrieve("IDR012", &timestamp()).await.unwrap();

        let later = timestamp() + chrono::Duration::minutes(6);
        retriever.retrieve("IDR012", &later).await.unwrap();

        let requests = fetcher.requests();
        assert_eq!(requests.len(), 7);
        assert_eq!(requests[6], format!("{}IDR012.T.202405161130.png", RADAR));
    }

    #[tokio::test]
    async fn test_failed_fetch_is_asset_unavailable() {
        let fx = fixture();
        let scan_url = format!("{}IDR012.T.202405161124.png", RADAR);
        let fetcher = FakeFetcher::new().with_fallback("png").with_denied(&format!(
            "{}IDR012.range.png",
            OVERLAYS
        ));
        let retriever = AssetRetriever::new(&fx.resolver, &fetcher, &fx.log);
        let result = retriever.retrieve("IDR012", &timestamp()).await;

        match result {
            Err(AppError::Asset(AssetError::Unavailable { url, source })) => {
                assert!(url.ends_with("IDR012.range.png"));
                assert!(matches!(source, FetchError::AccessDenied { .. }));
            }
            other => panic!("Expected AssetError::Unavailable, got {:?}", other),
        }
        // Stops at the failing asset
        assert_eq!(fetcher.requests().len(), 3);
        assert_eq!(fetcher.request_count(&scan_url), 1);
        assert!(!fx.dir.path().join("cache/IDR012.range.png").exists());
    }
}
