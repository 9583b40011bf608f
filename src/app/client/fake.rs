//! In-memory fetcher for unit tests

use std::collections::HashMap;
use std::sync::Mutex;

use url::Url;

use super::Fetch;
use crate::errors::{FetchError, FetchResult};

/// Canned response for one URL
#[derive(Debug, Clone)]
pub(crate) enum Canned {
    Body(Vec<u8>),
    Denied,
}

/// Serves canned responses and records every request
///
/// Unknown URLs answer `NotFound` unless a fallback body is set.
#[derive(Debug, Default)]
pub(crate) struct FakeFetcher {
    routes: HashMap<String, Canned>,
    fallback: Option<Vec<u8>>,
    requests: Mutex<Vec<String>>,
}

impl FakeFetcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_body(mut self, url: &str, body: impl Into<Vec<u8>>) -> Self {
        self.routes.insert(url.to_string(), Canned::Body(body.into()));
        self
    }

    pub(crate) fn with_denied(mut self, url: &str) -> Self {
        self.routes.insert(url.to_string(), Canned::Denied);
        self
    }

    pub(crate) fn with_fallback(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.fallback = Some(body.into());
        self
    }

    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn request_count(&self, url: &str) -> usize {
        self.requests().iter().filter(|r| r.as_str() == url).count()
    }
}

impl Fetch for FakeFetcher {
    async fn fetch_bytes(&self, url: &Url) -> FetchResult<Vec<u8>> {
        self.requests.lock().unwrap().push(url.to_string());

        match (self.routes.get(url.as_str()), &self.fallback) {
            (Some(Canned::Body(body)), _) => Ok(body.clone()),
            (Some(Canned::Denied), _) => Err(FetchError::AccessDenied {
                url: url.to_string(),
            }),
            (None, Some(body)) => Ok(body.clone()),
            (None, None) => Err(FetchError::NotFound {
                url: url.to_string(),
            }),
        }
    }
}
