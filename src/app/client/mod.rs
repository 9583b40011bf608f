//! HTTP client for the radar file server
//!
//! The module is organized into specialized components:
//! - `config`: HTTP client configuration and building
//! - `http`: request execution with the access-denied identity fallback
//! - `download`: text decoding and write-to-file helpers over any [`Fetch`]

use std::future::Future;

use url::Url;

use crate::errors::FetchResult;

pub mod config;
pub mod download;
pub mod http;

#[cfg(test)]
pub(crate) mod fake;

pub use config::ClientConfig;
pub use download::{DownloadHandler, TextEncoding};

use http::HttpHandler;

/// Byte-level retrieval by URL
///
/// The retrieval pipeline only needs this one operation, which keeps the
/// transport swappable (the test suite uses an in-memory implementation).
pub trait Fetch {
    /// Fetch the full body of `url`
    fn fetch_bytes(&self, url: &Url) -> impl Future<Output = FetchResult<Vec<u8>>> + Send;
}

/// HTTP(S) client for the radar file server
#[derive(Debug)]
pub struct RadarClient {
    http_handler: HttpHandler,
}

impl RadarClient {
    /// Creates a client with default settings
    pub fn new() -> FetchResult<Self> {
        Self::with_config(&ClientConfig::default())
    }

    /// Creates a client with custom configuration
    pub fn with_config(config: &ClientConfig) -> FetchResult<Self> {
        let client = config.build_http_client()?;
        tracing::debug!("Created radar client with {:?} timeout", config.request_timeout);

        Ok(Self {
            http_handler: HttpHandler::new(client),
        })
    }
}

impl Fetch for RadarClient {
    async fn fetch_bytes(&self, url: &Url) -> FetchResult<Vec<u8>> {
        self.http_handler.get_bytes(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        assert!(RadarClient::new().is_ok());
    }
}
