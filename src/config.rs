use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::constants;

/// Environment variable that overrides `geocoder.api_key`.
pub const API_KEY_ENV: &str = "YANDEX_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub geocoder: GeocoderConfig,

    pub cache: CacheConfig,

    pub server: ServerConfig,

    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub database_path: String,

    pub log_level: String,

    #[serde(default)]
    pub suppress_connection_errors: bool,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,

    /// Maximum database connections (default: 5)
    pub max_db_connections: u32,

    /// Minimum database connections (default: 1)
    pub min_db_connections: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_path: "sqlite:data/geolookup.db".to_string(),
            log_level: "info".to_string(),
            suppress_connection_errors: false,
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocoderConfig {
    pub base_url: String,

    /// Usually supplied through `YANDEX_API_KEY` rather than the file.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub api_key: String,

    /// Request timeout in seconds (default: 10)
    pub request_timeout_seconds: u64,

    pub max_results: u32,

    pub station_kind: String,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://geocode-maps.yandex.ru".to_string(),
            api_key: String::new(),
            request_timeout_seconds: 10,
            max_results: constants::geocoder::MAX_RESULTS,
            station_kind: constants::geocoder::STATION_KIND.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    /// Rows in the `search_cache` table; survives restarts.
    Database,
    /// Process-local moka cache.
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub backend: CacheBackend,

    pub ttl_hours: u64,

    /// Only used by the memory backend.
    pub max_entries: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::Database,
            ttl_hours: constants::cache::RESULTS_TTL_HOURS,
            max_entries: 10_000,
        }
    }
}

impl CacheConfig {
    #[must_use]
    pub const fn ttl(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.ttl_hours.saturating_mul(3600))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,

    pub port: u16,

    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_allowed_origins: vec![
                "http://localhost:8000".to_string(),
                "http://127.0.0.1:8000".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub metrics_enabled: bool,

    pub loki_enabled: bool,

    pub loki_url: String,

    pub loki_labels: std::collections::HashMap<String, String>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        let mut labels = std::collections::HashMap::new();
        labels.insert("app".to_string(), "geolookup".to_string());

        Self {
            metrics_enabled: true,
            loki_enabled: false,
            loki_url: "http://localhost:3100".to_string(),
            loki_labels: labels,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            geocoder: GeocoderConfig::default(),
            cache: CacheConfig::default(),
            server: ServerConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl Config {
    /// Loads the first config file found and applies environment overrides.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::load_file()?;
        config.apply_env_overrides();
        Ok(config)
    }

    fn load_file() -> Result<Self> {
        let paths = Self::config_paths();

        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var(API_KEY_ENV)
            && !key.trim().is_empty()
        {
            self.geocoder.api_key = key.trim().to_string();
        }
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        paths.push(PathBuf::from("config.toml"));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("geolookup").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".geolookup").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.geocoder.api_key.trim().is_empty() {
            anyhow::bail!(
                "Geocoder API key is missing: set {API_KEY_ENV} or geocoder.api_key in config.toml"
            );
        }

        if self.geocoder.base_url.is_empty() {
            anyhow::bail!("Geocoder base URL cannot be empty");
        }

        url::Url::parse(&self.geocoder.base_url).context("Invalid geocoder base URL")?;

        if self.geocoder.max_results == 0 {
            anyhow::bail!("geocoder.max_results must be > 0");
        }

        if self.cache.ttl_hours == 0 {
            anyhow::bail!("cache.ttl_hours must be > 0");
        }

        if self.cache.ttl_hours > constants::cache::MAX_TTL_HOURS {
            anyhow::bail!(
                "cache.ttl_hours must be <= {}",
                constants::cache::MAX_TTL_HOURS
            );
        }

        Ok(())
    }
}
