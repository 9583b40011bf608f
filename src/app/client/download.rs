//! Text and file downloads built on top of [`Fetch`]
//!
//! Files are written in place with no temp-file step. A failed write can
//! leave a partial file behind.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use tokio::io::AsyncWriteExt;
use url::Url;

use super::Fetch;
use crate::errors::{FetchError, FetchResult};

/// Character encodings understood by [`DownloadHandler::fetch_text`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    #[default]
    Utf8,
    Ascii,
    Latin1,
}

impl TextEncoding {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::Ascii => "US-ASCII",
            Self::Latin1 => "ISO-8859-1",
        }
    }

    /// Decode `bytes`, or `None` if they are not valid in this encoding
    pub fn decode(&self, bytes: Vec<u8>) -> Option<String> {
        match self {
            Self::Utf8 => String::from_utf8(bytes).ok(),
            Self::Ascii => bytes
                .is_ascii()
                .then(|| bytes.into_iter().map(char::from).collect()),
            // Latin-1 code points map one to one onto the first 256 chars
            Self::Latin1 => Some(bytes.into_iter().map(char::from).collect()),
        }
    }
}

impl FromStr for TextEncoding {
    type Err = FetchError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        match label.trim().to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(Self::Utf8),
            "us-ascii" | "ascii" => Ok(Self::Ascii),
            "iso-8859-1" | "latin1" | "latin-1" => Ok(Self::Latin1),
            _ => Err(FetchError::UnsupportedEncoding {
                label: label.to_string(),
            }),
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Download operations over any fetcher
pub struct DownloadHandler<'a, F> {
    fetcher: &'a F,
}

impl<'a, F: Fetch> DownloadHandler<'a, F> {
    pub fn new(fetcher: &'a F) -> Self {
        Self { fetcher }
    }

    /// Fetch `url` and decode the body as text
    pub async fn fetch_text(&self, url: &Url, encoding: TextEncoding) -> FetchResult<String> {
        let bytes = self.fetcher.fetch_bytes(url).await?;
        encoding.decode(bytes).ok_or_else(|| FetchError::Decode {
            url: url.to_string(),
            encoding: encoding.name(),
        })
    }

    /// Fetch `url` and write the body to `destination`, replacing any
    /// existing file
    ///
    /// Returns the number of bytes written.
    pub async fn fetch_to_file(&self, url: &Url, destination: &Path) -> FetchResult<u64> {
        let bytes = self.fetcher.fetch_bytes(url).await?;

        let write_error = |source| FetchError::Write {
            path: destination.to_path_buf(),
            source,
        };

        if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(write_error)?;
        }

        let mut file = tokio::fs::File::create(destination)
            .await
            .map_err(write_error)?;
        file.write_all(&bytes).await.map_err(write_error)?;
        file.flush().await.map_err(write_error)?;

        tracing::info!("{} bytes saved to {}", bytes.len(), destination.display());
        Ok(bytes.len() as u64)
    }
}
