//! Configuration management for Radar Viewer
//!
//! Settings are loaded from defaults, then the first config file found, then
//! environment variables. Every section is optional in the file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use crate::app::ClientConfig;
use crate::constants::{env, files, freshness, http, logging, remote};
use crate::errors::{ConfigError, ConfigResult};

/// Unified application configuration for TOML serialization
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Remote server locations
    pub remote: RemoteConfig,
    /// Local file locations
    pub files: FilesConfig,
    /// Index refresh policy
    pub freshness: FreshnessConfig,
    /// HTTP client settings
    pub client: ClientConfigToml,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Remote base URLs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RemoteConfig {
    /// Where radar scan images live
    pub radar_base_url: String,
    /// Where transparency overlays live
    pub transparencies_base_url: String,
    /// Listing cached as the radar index file
    pub radar_index_url: String,
    /// Listing cached as the image index file
    pub image_index_url: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            radar_base_url: remote::RADAR_BASE_URL.to_string(),
            transparencies_base_url: remote::TRANSPARENCIES_BASE_URL.to_string(),
            radar_index_url: remote::RADAR_BASE_URL.to_string(),
            image_index_url: remote::TRANSPARENCIES_BASE_URL.to_string(),
        }
    }
}

impl RemoteConfig {
    pub fn radar_base(&self) -> ConfigResult<Url> {
        parse_url("remote.radar_base_url", &self.radar_base_url)
    }

    pub fn transparencies_base(&self) -> ConfigResult<Url> {
        parse_url("remote.transparencies_base_url", &self.transparencies_base_url)
    }

    pub fn radar_index(&self) -> ConfigResult<Url> {
        parse_url("remote.radar_index_url", &self.radar_index_url)
    }

    pub fn image_index(&self) -> ConfigResult<Url> {
        parse_url("remote.image_index_url", &self.image_index_url)
    }
}

fn parse_url(field: &str, value: &str) -> ConfigResult<Url> {
    Url::parse(value).map_err(|e| ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: e.to_string(),
    })
}

/// Local file layout
///
/// Index, image and report files live flat in `cache_dir`. Relative file
/// names are joined onto it; absolute ones are used as given.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FilesConfig {
    pub database: PathBuf,
    pub cache_dir: PathBuf,
    pub radar_index: PathBuf,
    pub image_index: PathBuf,
    pub report: PathBuf,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            database: PathBuf::from(files::DATABASE_NAME),
            cache_dir: PathBuf::from("."),
            radar_index: PathBuf::from(files::RADAR_INDEX_FILE_NAME),
            image_index: PathBuf::from(files::IMAGE_INDEX_FILE_NAME),
            report: PathBuf::from(files::REPORT_FILE_NAME),
        }
    }
}

impl FilesConfig {
    pub fn radar_index_path(&self) -> PathBuf {
        self.cache_dir.join(&self.radar_index)
    }

    pub fn image_index_path(&self) -> PathBuf {
        self.cache_dir.join(&self.image_index)
    }

    pub fn report_path(&self) -> PathBuf {
        self.cache_dir.join(&self.report)
    }
}

/// Index refresh policy
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FreshnessConfig {
    /// Maximum age of a cached index file, e.g. "60s" or "2m"
    #[serde(with = "humantime_serde")]
    pub ttl: Duration,
}

impl Default for FreshnessConfig {
    fn default() -> Self {
        Self {
            ttl: freshness::DEFAULT_TTL,
        }
    }
}

/// TOML-friendly client configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClientConfigToml {
    /// Request timeout in seconds
    pub request_timeout_secs: u64,
    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,
    /// Connection pool idle timeout in seconds (None = no timeout)
    pub pool_idle_timeout_secs: Option<u64>,
    /// TCP nodelay setting
    pub tcp_nodelay: bool,
}

impl Default for ClientConfigToml {
    fn default() -> Self {
        Self {
            request_timeout_secs: http::DEFAULT_TIMEOUT.as_secs(),
            connect_timeout_secs: http::CONNECT_TIMEOUT.as_secs(),
            pool_idle_timeout_secs: Some(http::POOL_IDLE_TIMEOUT.as_secs()),
            tcp_nodelay: true,
        }
    }
}

impl ClientConfigToml {
    /// Convert to runtime ClientConfig
    pub fn to_runtime_config(&self) -> ClientConfig {
        ClientConfig {
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            pool_idle_timeout: self.pool_idle_timeout_secs.map(Duration::from_secs),
            tcp_nodelay: self.tcp_nodelay,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level when no CLI flag is given
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: logging::DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration with multi-source precedence:
    /// 1. Default values
    /// 2. Config file (explicit path, or first one found)
    /// 3. Environment variables
    pub async fn load(config_file_override: Option<PathBuf>) -> ConfigResult<Self> {
        let config_path = match config_file_override {
            Some(path) if !path.exists() => return Err(ConfigError::NotFound { path }),
            Some(path) => Some(path),
            None => Self::find_config_file(),
        };

        let mut config = match config_path {
            Some(path) => Self::load_from_file(&path).await?,
            None => Self::default(),
        };

        config.apply_env_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Override file settings from environment variables
    ///
    /// Takes a lookup function so tests do not have to touch the process
    /// environment.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(env::DATABASE) {
            debug!("{} overrides database path", env::DATABASE);
            self.files.database = PathBuf::from(value);
        }
        if let Some(value) = lookup(env::CACHE_DIR) {
            debug!("{} overrides cache directory", env::CACHE_DIR);
            self.files.cache_dir = PathBuf::from(value);
        }
        if let Some(value) = lookup(env::RADAR_URL) {
            debug!("{} overrides radar base URL", env::RADAR_URL);
            self.remote.radar_base_url = value;
        }
        if let Some(value) = lookup(env::TRANSPARENCIES_URL) {
            debug!("{} overrides transparencies base URL", env::TRANSPARENCIES_URL);
            self.remote.transparencies_base_url = value;
        }
    }

    /// Write a commented default config file if none exists yet
    pub async fn initialize(path: Option<PathBuf>) -> ConfigResult<PathBuf> {
        let config_path = match path {
            Some(path) => path,
            None => Self::get_default_config_path()?,
        };

        if config_path.exists() {
            debug!("Config already exists at {}", config_path.display());
            return Ok(config_path);
        }

        if let Some(parent) = config_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| ConfigError::Read {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        tokio::fs::write(&config_path, Self::generate_default_config_content())
            .await
            .map_err(|source| ConfigError::Read {
                path: config_path.clone(),
                source,
            })?;

        info!("Created default configuration file: {}", config_path.display());
        Ok(config_path)
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let mut search_paths = vec![PathBuf::from(format!("./{}", files::LOCAL_CONFIG_FILE_NAME))];
        if let Ok(path) = Self::get_default_config_path() {
            search_paths.push(path);
        }

        let found = search_paths.into_iter().find(|path| path.exists());
        match &found {
            Some(path) => debug!("Found config file: {}", path.display()),
            None => debug!("No config file found in standard locations"),
        }
        found
    }

    /// Get the default config file path for the current user
    pub fn get_default_config_path() -> ConfigResult<PathBuf> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join(files::CONFIG_DIR_NAME).join("config.toml"))
    }

    /// Load configuration from a TOML file
    async fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let config: AppConfig = toml::from_str(&content)?;
        info!("Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Generate default configuration content with comments
    pub fn generate_default_config_content() -> String {
        format!(
            r#"# Radar Viewer Configuration
# Every key is optional; missing keys fall back to the values shown here.

[remote]
radar_base_url = "{radar}"
transparencies_base_url = "{transparencies}"
# Listings cached locally and scanned for available images
radar_index_url = "{radar}"
image_index_url = "{transparencies}"

[files]
database = "{database}"
# Index files, downloaded images and the report are stored here
cache_dir = "."
radar_index = "{radar_index}"
image_index = "{image_index}"
report = "{report}"

[freshness]
# Index files older than this are downloaded again
ttl = "{ttl}s"

[client]
request_timeout_secs = {request_timeout}
connect_timeout_secs = {connect_timeout}
pool_idle_timeout_secs = {pool_idle}
tcp_nodelay = true

[logging]
level = "{level}"  # error, warn, info, debug, trace
"#,
            radar = remote::RADAR_BASE_URL,
            transparencies = remote::TRANSPARENCIES_BASE_URL,
            database = files::DATABASE_NAME,
            radar_index = files::RADAR_INDEX_FILE_NAME,
            image_index = files::IMAGE_INDEX_FILE_NAME,
            report = files::REPORT_FILE_NAME,
            ttl = freshness::DEFAULT_TTL.as_secs(),
            request_timeout = http::DEFAULT_TIMEOUT.as_secs(),
            connect_timeout = http::CONNECT_TIMEOUT.as_secs(),
            pool_idle = http::POOL_IDLE_TIMEOUT.as_secs(),
            level = logging::DEFAULT_LOG_LEVEL,
        )
    }
}
