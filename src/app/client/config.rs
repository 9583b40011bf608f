//! HTTP client configuration and building logic

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::constants::http;
use crate::errors::{FetchError, FetchResult};

/// Configuration for the HTTP client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Request timeout
    pub request_timeout: Duration,
    /// Connect timeout
    pub connect_timeout: Duration,
    /// Connection pool idle timeout
    pub pool_idle_timeout: Option<Duration>,
    /// TCP nodelay (disable Nagle's algorithm)
    pub tcp_nodelay: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            request_timeout: http::DEFAULT_TIMEOUT,
            connect_timeout: http::CONNECT_TIMEOUT,
            pool_idle_timeout: Some(http::POOL_IDLE_TIMEOUT),
            tcp_nodelay: true,
        }
    }
}

impl ClientConfig {
    /// Builds the HTTP client with the specified configuration
    ///
    /// No default user agent is set: the first attempt at every URL is
    /// anonymous and the browser identity is only added on retry.
    pub fn build_http_client(&self) -> FetchResult<Client> {
        let mut client_builder = Client::builder()
            .timeout(self.request_timeout)
            .connect_timeout(self.connect_timeout)
            .tcp_nodelay(self.tcp_nodelay);

        if let Some(idle_timeout) = self.pool_idle_timeout {
            client_builder = client_builder.pool_idle_timeout(idle_timeout);
        }

        client_builder.build().map_err(FetchError::Http)
    }
}
