//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `TANISH_DATA_DIR` - Directory for the file-backed store (default: .tanish-arts)
//! - `TANISH_LOCATION_TIMEOUT_SECS` - Location sensor timeout in seconds (default: 10)
//! - `TANISH_CATALOG_PATH` - JSON file holding the product catalog
//! - `TANISH_PASSWORD_HASHING` - `standard` or `minimal` (default: standard)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::models::Catalog;
use crate::services::auth::PasswordHashing;

const DEFAULT_DATA_DIR: &str = ".tanish-arts";
const DEFAULT_LOCATION_TIMEOUT_SECS: u64 = 10;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Failed to read catalog {0}: {1}")]
    CatalogRead(PathBuf, #[source] std::io::Error),
    #[error("Invalid catalog {0}: {1}")]
    CatalogParse(PathBuf, #[source] serde_json::Error),
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Directory for the file-backed durable store
    pub data_dir: PathBuf,
    /// How long a live-location query may take before it fails
    pub location_timeout: Duration,
    /// Optional JSON catalog file
    pub catalog_path: Option<PathBuf>,
    /// Cost profile for new password digests
    pub password_hashing: PasswordHashing,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            location_timeout: Duration::from_secs(DEFAULT_LOCATION_TIMEOUT_SECS),
            catalog_path: None,
            password_hashing: PasswordHashing::Standard,
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
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = PathBuf::from(get_or_default(&lookup, "TANISH_DATA_DIR", DEFAULT_DATA_DIR));

        let timeout_secs = get_or_default(
            &lookup,
            "TANISH_LOCATION_TIMEOUT_SECS",
            &DEFAULT_LOCATION_TIMEOUT_SECS.to_string(),
        )
        .parse::<u64>()
        .map_err(|e| {
            ConfigError::InvalidEnvVar("TANISH_LOCATION_TIMEOUT_SECS".to_string(), e.to_string())
        })?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "TANISH_LOCATION_TIMEOUT_SECS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        let catalog_path = get_optional(&lookup, "TANISH_CATALOG_PATH").map(PathBuf::from);

        let password_hashing = get_or_default(&lookup, "TANISH_PASSWORD_HASHING", "standard")
            .parse::<PasswordHashing>()
            .map_err(|e| ConfigError::InvalidEnvVar("TANISH_PASSWORD_HASHING".to_string(), e))?;

        Ok(Self {
            data_dir,
            location_timeout: Duration::from_secs(timeout_secs),
            catalog_path,
            password_hashing,
        })
    }

    /// Load the configured catalog, or an empty one if none is configured.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the catalog file cannot be read or parsed.
    pub fn load_catalog(&self) -> Result<Catalog, ConfigError> {
        let Some(path) = &self.catalog_path else {
            return Ok(Catalog::default());
        };
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::CatalogRead(path.clone(), e))?;
        Catalog::from_json(&raw).map_err(|e| ConfigError::CatalogParse(path.clone(), e))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional variable, treating an empty value as unset.
fn get_optional<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|v| !v.trim().is_empty())
}

/// Get a variable with a default value.
fn get_or_default<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    get_optional(lookup, key).unwrap_or_else(|| default.to_string())
}
