//! Core HTTP operations with a single identity fallback
//!
//! Some servers refuse requests that do not look like they come from a
//! browser. Every URL is requested anonymously first; an access-denied
//! response is retried exactly once with a browser user agent. Nothing else
//! is retried.

use reqwest::header::USER_AGENT;
use reqwest::{Client, StatusCode};
use url::Url;

use crate::constants::http;
use crate::errors::{FetchError, FetchResult};

/// HTTP operations handler
#[derive(Debug)]
pub struct HttpHandler {
    client: Client,
}

impl HttpHandler {
    /// Creates a new HttpHandler with the given client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Fetches the body of `url` as bytes
    ///
    /// # Errors
    ///
    /// Returns `FetchError::AccessDenied` if the server still refuses after
    /// the browser-identity retry, `FetchError::NotFound` for a missing
    /// resource, and transport or status errors otherwise.
    pub async fn get_bytes(&self, url: &Url) -> FetchResult<Vec<u8>> {
        check_scheme(url)?;

        match self.attempt(url, None).await {
            Err(FetchError::AccessDenied { .. }) => {
                tracing::warn!(
                    "Access denied for {}. Retrying once as {}",
                    url,
                    http::BROWSER_USER_AGENT
                );
                self.attempt(url, Some(http::BROWSER_USER_AGENT)).await
            }
            other => other,
        }
    }

    async fn attempt(&self, url: &Url, user_agent: Option<&str>) -> FetchResult<Vec<u8>> {
        let mut request = self.client.get(url.clone());
        if let Some(agent) = user_agent {
            request = request.header(USER_AGENT, agent);
        }

        let response = request.send().await?;
        classify_status(url, response.status())?;

        let bytes = response.bytes().await?;
        tracing::debug!("Fetched {} bytes from {}", bytes.len(), url);
        Ok(bytes.to_vec())
    }
}

/// Rejects URL schemes the HTTP client cannot speak
pub(crate) fn check_scheme(url: &Url) -> FetchResult<()> {
    if http::SUPPORTED_SCHEMES.contains(&url.scheme()) {
        Ok(())
    } else {
        Err(FetchError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        })
    }
}

/// Maps a response status onto the fetch error kinds
pub(crate) fn classify_status(url: &Url, status: StatusCode) -> FetchResult<()> {
    if status.is_success() {
        return Ok(());
    }

    let url = url.to_string();
    Err(match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => FetchError::AccessDenied { url },
        StatusCode::NOT_FOUND | StatusCode::GONE => FetchError::NotFound { url },
        other => FetchError::ServerError {
            url,
            status: other.as_u16(),
        },
    })
}
