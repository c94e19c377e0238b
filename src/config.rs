/// Catalog service configuration
///
/// Settings come from three layers, later ones winning:
/// 1. Built-in defaults
/// 2. `config.toml` in the user's config directory:
///    - Linux: ~/.config/storefront/config.toml
///    - macOS: ~/Library/Application Support/storefront/config.toml
///    - Windows: %APPDATA%\storefront\config.toml
/// 3. Environment overrides (`STOREFRONT_API_BASE`, `STOREFRONT_TIMEOUT_SECS`)

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Public catalog API used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "https://api.escuelajs.co/api/v1";

/// Request timeout used when nothing else is configured
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

const ENV_BASE_URL: &str = "STOREFRONT_API_BASE";
const ENV_TIMEOUT_SECS: &str = "STOREFRONT_TIMEOUT_SECS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Where and how to reach the catalog service
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CatalogConfig {
    /// Base URL, resource paths are appended to it
    pub base_url: String,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl CatalogConfig {
    /// Load the configuration from the user's config directory and the
    /// process environment.
    pub fn load() -> Result<Self, ConfigError> {
        let config = match Self::config_path() {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        Ok(config.with_overrides(|key| std::env::var(key).ok()))
    }

    /// Path of the config file, if the platform has a config directory
    pub fn config_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir()?;
        path.push("storefront");
        path.push("config.toml");
        Some(path)
    }

    /// Read a TOML config file. A missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        Self::from_toml(&content)
            .map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Parse a config from TOML text
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        let config: Self = toml::from_str(content)?;
        Ok(config.sanitized())
    }

    /// Apply environment-style overrides. `lookup` returns the value of a
    /// variable, unparseable values are logged and ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup(ENV_BASE_URL) {
            let base_url = base_url.trim();
            if base_url.is_empty() {
                log::warn!("Ignoring empty {}", ENV_BASE_URL);
            } else {
                self.base_url = base_url.to_string();
            }
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            match raw.trim().parse::<u64>() {
                Ok(secs) => self.request_timeout_secs = secs,
                Err(e) => log::warn!("Ignoring {}={:?}: {}", ENV_TIMEOUT_SECS, raw, e),
            }
        }

        self.sanitized()
    }

    /// Request timeout as a `Duration`
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    // A zero timeout would fail every request immediately.
    fn sanitized(mut self) -> Self {
        if self.request_timeout_secs == 0 {
            log::warn!(
                "Request timeout of 0s is not allowed, using {}s",
                DEFAULT_TIMEOUT_SECS
            );
            self.request_timeout_secs = DEFAULT_TIMEOUT_SECS;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_point_at_public_api() {
        let config = CatalogConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = CatalogConfig::from_toml("base_url = \"http://localhost:3000/api\"").unwrap();
        assert_eq!(config.base_url, "http://localhost:3000/api");
        assert_eq!(config.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(CatalogConfig::from_toml("request_timeout_secs = \"soon\"").is_err());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let path = std::env::temp_dir().join("storefront-no-such-dir").join("config.toml");
        let config = CatalogConfig::from_file(&path).unwrap();
        assert_eq!(config, CatalogConfig::default());
    }

    #[test]
    fn test_environment_overrides_win() {
        let config = CatalogConfig::default().with_overrides(lookup_from(&[
            ("STOREFRONT_API_BASE", "http://127.0.0.1:9000"),
            ("STOREFRONT_TIMEOUT_SECS", "3"),
        ]));

        assert_eq!(config.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.request_timeout_secs, 3);
    }

    #[test]
    fn test_bad_overrides_are_ignored() {
        let config = CatalogConfig::default().with_overrides(lookup_from(&[
            ("STOREFRONT_API_BASE", "   "),
            ("STOREFRONT_TIMEOUT_SECS", "ten"),
        ]));

        assert_eq!(config, CatalogConfig::default());
    }

    #[test]
    fn test_zero_timeout_falls_back_to_default() {
        let config = CatalogConfig::from_toml("request_timeout_secs = 0").unwrap();
        assert_eq!(config.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
    }
}
