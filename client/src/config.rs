//! Configuration management for the plant pairing client
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with PAIRING__ prefix

use std::path::PathBuf;
use std::time::Duration;

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main client configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Remote scoring service
    pub api: ApiConfig,

    /// Autocomplete behaviour
    pub search: SearchConfig,

    /// Ranked list cache
    pub cache: CacheConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Base URL of the prediction service, without trailing slash
    pub base_url: String,

    /// Ranking endpoint; defaults to `{base_url}/ranks`
    pub ranks_url: Option<String>,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    /// Quiet period before a search request is sent
    pub debounce_ms: u64,

    /// Queries shorter than this never reach the service
    pub min_query_len: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    /// JSON file backing the key-value store
    pub path: PathBuf,

    /// Key the ranked list is stored under
    pub key: String,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("PAIRING_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("api.base_url", "http://localhost:8000")?
            .set_default("api.timeout_secs", 30)?
            .set_default("search.debounce_ms", 300)?
            .set_default("search.min_query_len", 2)?
            .set_default("cache.path", ".pairing/storage.json")?
            .set_default("cache.key", crate::services::pair_cache::CACHE_KEY)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (PAIRING__ prefix)
            .add_source(
                Environment::with_prefix("PAIRING")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl ApiConfig {
    /// Resolved ranking endpoint
    pub fn ranks_endpoint(&self) -> String {
        match &self.ranks_url {
            Some(url) => url.clone(),
            None => format!("{}/ranks", self.base_url.trim_end_matches('/')),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            ranks_url: None,
            timeout_secs: 30,
        }
    }
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            min_query_len: shared::MIN_QUERY_LEN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranks_endpoint_defaults_to_base() {
        let api = ApiConfig {
            base_url: "http://scoring.local/".to_string(),
            ..Default::default()
        };
        assert_eq!(api.ranks_endpoint(), "http://scoring.local/ranks");

        let api = ApiConfig {
            ranks_url: Some("http://cdn.local/ranks.json".to_string()),
            ..Default::default()
        };
        assert_eq!(api.ranks_endpoint(), "http://cdn.local/ranks.json");
    }

    #[test]
    fn test_search_defaults() {
        let search = SearchConfig::default();
        assert_eq!(search.debounce(), Duration::from_millis(300));
        assert_eq!(search.min_query_len, 2);
    }
}
