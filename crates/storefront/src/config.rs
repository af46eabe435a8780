//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `VITRINE_CATALOG_BASE_URL` - Catalog CDN base URL
//! - `VITRINE_VIACEP_BASE_URL` - ViaCEP-compatible lookup base URL
//!   (default: <https://viacep.com.br>)
//! - `VITRINE_CART_PATH` - Path of the JSON file store (default: cart.json)

use std::path::PathBuf;

use thiserror::Error;

const DEFAULT_CATALOG_BASE_URL: &str =
    "https://empreender.nyc3.cdn.digitaloceanspaces.com/static";
const DEFAULT_VIACEP_BASE_URL: &str = "https://viacep.com.br";
const DEFAULT_CART_PATH: &str = "cart.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Catalog CDN base URL
    pub catalog_base_url: String,
    /// ViaCEP-compatible lookup base URL
    pub viacep_base_url: String,
    /// Path of the JSON file backing the CLI's store
    pub cart_path: PathBuf,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a set variable has an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let catalog_base_url =
            get_url_or_default("VITRINE_CATALOG_BASE_URL", DEFAULT_CATALOG_BASE_URL)?;
        let viacep_base_url =
            get_url_or_default("VITRINE_VIACEP_BASE_URL", DEFAULT_VIACEP_BASE_URL)?;
        let cart_path =
            PathBuf::from(get_env_or_default("VITRINE_CART_PATH", DEFAULT_CART_PATH));

        Ok(Self {
            catalog_base_url,
            viacep_base_url,
            cart_path,
        })
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            catalog_base_url: DEFAULT_CATALOG_BASE_URL.to_string(),
            viacep_base_url: DEFAULT_VIACEP_BASE_URL.to_string(),
            cart_path: PathBuf::from(DEFAULT_CART_PATH),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get an http(s) URL variable with a default value.
fn get_url_or_default(key: &str, default: &str) -> Result<String, ConfigError> {
    let value = get_env_or_default(key, default);
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(value)
    } else {
        Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected an http(s) URL, got {value:?}"),
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::default();
        assert!(config.catalog_base_url.starts_with("https://"));
        assert_eq!(config.viacep_base_url, "https://viacep.com.br");
        assert_eq!(config.cart_path, PathBuf::from("cart.json"));
    }

    #[test]
    fn test_url_validation_rejects_non_http() {
        // Unset variable falls back to the given default, which is validated
        let result = get_url_or_default("VITRINE_TEST_UNSET_URL", "ftp://example.com");
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));

        let result = get_url_or_default("VITRINE_TEST_UNSET_URL", "https://example.com");
        assert_eq!(result.unwrap(), "https://example.com");
    }
}
