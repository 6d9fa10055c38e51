//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CLEARR_STORAGE_DIR` - Directory holding persisted store state (default: `.clearr`)
//! - `CLEARR_LOCALE` - Display locale, `en` or `bn` (default: `bn`)
//! - `CLEARR_RECENT_LIMIT` - Recently viewed products to show (default: 4)

use std::path::PathBuf;

use clearr_core::Locale;
use clearr_core::recently_viewed::{DEFAULT_RECENT_LIMIT, MAX_RECENT_PRODUCTS};
use thiserror::Error;

const DEFAULT_STORAGE_DIR: &str = ".clearr";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Directory holding one JSON file per persisted store
    pub storage_dir: PathBuf,
    /// Display locale for prices
    pub locale: Locale,
    /// Number of recently viewed products to show
    pub recent_limit: usize,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            locale: Locale::default(),
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let storage_dir = lookup("CLEARR_STORAGE_DIR")
            .map_or_else(|| PathBuf::from(DEFAULT_STORAGE_DIR), PathBuf::from);

        let locale = match lookup("CLEARR_LOCALE") {
            Some(value) => value.parse::<Locale>().map_err(|e| {
                ConfigError::InvalidEnvVar("CLEARR_LOCALE".to_string(), e.to_string())
            })?,
            None => Locale::default(),
        };

        let recent_limit = match lookup("CLEARR_RECENT_LIMIT") {
            Some(value) => parse_recent_limit(&value)?,
            None => DEFAULT_RECENT_LIMIT,
        };

        Ok(Self {
            storage_dir,
            locale,
            recent_limit,
        })
    }
}

/// Parse the recently viewed limit; it cannot exceed the history bound.
fn parse_recent_limit(value: &str) -> Result<usize, ConfigError> {
    let limit = value.trim().parse::<usize>().map_err(|e| {
        ConfigError::InvalidEnvVar("CLEARR_RECENT_LIMIT".to_string(), e.to_string())
    })?;
    if limit > MAX_RECENT_PRODUCTS {
        return Err(ConfigError::InvalidEnvVar(
            "CLEARR_RECENT_LIMIT".to_string(),
            format!("must be at most {MAX_RECENT_PRODUCTS} (got {limit})"),
        ));
    }
    Ok(limit)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, StorefrontConfig::default());
        assert_eq!(config.storage_dir, PathBuf::from(".clearr"));
        assert_eq!(config.locale, Locale::Bn);
        assert_eq!(config.recent_limit, 4);
    }

    #[test]
    fn test_overrides() {
        let config = StorefrontConfig::from_lookup(lookup(&[
            ("CLEARR_STORAGE_DIR", "/var/lib/clearr"),
            ("CLEARR_LOCALE", "en"),
            ("CLEARR_RECENT_LIMIT", "10"),
        ]))
        .unwrap();
        assert_eq!(config.storage_dir, PathBuf::from("/var/lib/clearr"));
        assert_eq!(config.locale, Locale::En);
        assert_eq!(config.recent_limit, 10);
    }

    #[test]
    fn test_invalid_locale() {
        let result = StorefrontConfig::from_lookup(lookup(&[("CLEARR_LOCALE", "fr")]));
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(var, _)) if var == "CLEARR_LOCALE"));
    }

    #[test]
    fn test_recent_limit_bounds() {
        assert!(parse_recent_limit("0").is_ok());
        assert!(parse_recent_limit("eleven").is_err());
        let err = parse_recent_limit("11").unwrap_err();
        assert!(err.to_string().contains("at most 10"));
    }
}
