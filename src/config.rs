//! # Configuration
//!
//! Settings resolve in layers: defaults → config file → env vars. The binary
//! applies CLI flags on top.
//!
//! ```toml
//! [api]
//! base_url = "https://api.themoviedb.org/3"
//! api_key = "..."
//! timeout_secs = 10
//!
//! [cache]
//! buffer_size = 32
//!
//! [logging]
//! filter = "info"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Capacity of each cache actor's request channel.
    pub buffer_size: Option<usize>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub filter: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_BUFFER_SIZE: usize = 32;
pub const DEFAULT_LOG_FILTER: &str = "info";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub base_url: String,
    /// Empty when no key is configured; TMDB then answers 401.
    pub api_key: String,
    pub timeout: Duration,
    pub buffer_size: usize,
    pub log_filter: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

// ============================================================================
// Loading
// ============================================================================

/// Loads config from `path`.
///
/// A missing file is not an error and yields `CatalogConfig::default()`.
/// A malformed file is `ConfigError::Parse`.
pub fn load_config(path: &Path) -> Result<CatalogConfig, ConfigError> {
    if !path.exists() {
        info!(path = %path.display(), "No config file found, using defaults");
        return Ok(CatalogConfig::default());
    }

    let contents = fs::read_to_string(path)?;
    let config = parse_config(&contents)?;
    info!(path = %path.display(), "Loaded config");
    debug!(?config, "Config");
    Ok(config)
}

pub fn parse_config(contents: &str) -> Result<CatalogConfig, ConfigError> {
    Ok(toml::from_str(contents)?)
}

// ============================================================================
// Resolution
// ============================================================================

/// Collapses defaults → config file → process environment.
pub fn resolve(config: &CatalogConfig) -> ResolvedConfig {
    resolve_with(config, |key| std::env::var(key).ok())
}

/// Same as [`resolve`] with an explicit env lookup.
pub fn resolve_with(config: &CatalogConfig, env: impl Fn(&str) -> Option<String>) -> ResolvedConfig {
    let base_url = env("TMDB_BASE_URL")
        .or_else(|| config.api.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let api_key = env("TMDB_API_KEY")
        .or_else(|| config.api.api_key.clone())
        .unwrap_or_default();

    let log_filter = env("MOVIE_CATALOG_LOG")
        .or_else(|| config.logging.filter.clone())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    ResolvedConfig {
        base_url,
        api_key,
        timeout: Duration::from_secs(config.api.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        buffer_size: config.cache.buffer_size.unwrap_or(DEFAULT_BUFFER_SIZE).max(1),
        log_filter,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve_with(&CatalogConfig::default(), no_env);
        assert_eq!(resolved.base_url, DEFAULT_BASE_URL);
        assert_eq!(resolved.api_key, "");
        assert_eq!(resolved.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(resolved.buffer_size, DEFAULT_BUFFER_SIZE);
        assert_eq!(resolved.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_sparse_file_overrides_defaults() {
        let config = parse_config(
            r#"
            [api]
            api_key = "from-file"
            timeout_secs = 3

            [cache]
            buffer_size = 8
            "#,
        )
        .unwrap();
        let resolved = resolve_with(&config, no_env);
        assert_eq!(resolved.api_key, "from-file");
        assert_eq!(resolved.timeout, Duration::from_secs(3));
        assert_eq!(resolved.buffer_size, 8);
        assert_eq!(resolved.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_env_wins_over_file() {
        let config = parse_config(
            r#"
            [api]
            base_url = "http://file.local"
            api_key = "from-file"

            [logging]
            filter = "warn"
            "#,
        )
        .unwrap();
        let env: HashMap<&str, &str> = [
            ("TMDB_API_KEY", "from-env"),
            ("TMDB_BASE_URL", "http://env.local"),
            ("MOVIE_CATALOG_LOG", "movie_catalog=debug"),
        ]
        .into_iter()
        .collect();

        let resolved = resolve_with(&config, |key| env.get(key).map(|v| v.to_string()));
        assert_eq!(resolved.api_key, "from-env");
        assert_eq!(resolved.base_url, "http://env.local");
        assert_eq!(resolved.log_filter, "movie_catalog=debug");
    }

    #[test]
    fn test_zero_buffer_is_clamped() {
        let config = parse_config("[cache]\nbuffer_size = 0\n").unwrap();
        assert_eq!(resolve_with(&config, no_env).buffer_size, 1);
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let result = parse_config("[api\nbase_url = 1");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = load_config(Path::new("/nonexistent/movie-catalog.toml")).unwrap();
        assert!(config.api.api_key.is_none());
    }
}
