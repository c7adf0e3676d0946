//! Configuration management for Opdeck
//!
//! This module handles loading, parsing, and validating configuration
//! from files, environment variables, and CLI overrides.

use crate::error::{Result, OpdeckError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for Opdeck
///
/// This structure holds all configuration needed by the application:
/// store location, mock timing, API defaults, and the seeded admin
/// account identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Store configuration
    #[serde(default)]
    pub store: StoreConfig,

    /// Mock responder configuration
    #[serde(default)]
    pub responder: ResponderConfig,

    /// Mock model registry configuration
    #[serde(default)]
    pub registry: RegistryConfig,

    /// API settings defaults
    #[serde(default)]
    pub api: ApiConfig,

    /// Seeded admin account
    #[serde(default)]
    pub admin: AdminConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            responder: ResponderConfig::default(),
            registry: RegistryConfig::default(),
            api: ApiConfig::default(),
            admin: AdminConfig::default(),
        }
    }
}

/// Store configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Optional explicit database path
    ///
    /// When unset, the `OPDECK_STORE_DB` environment variable is
    /// consulted, then the platform data directory.
    #[serde(default)]
    pub db_path: Option<String>,
}

/// Mock responder configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponderConfig {
    /// Artificial delay before a reply is produced (milliseconds)
    #[serde(default = "default_reply_delay_ms")]
    pub reply_delay_ms: u64,
}

fn default_reply_delay_ms() -> u64 {
    1500
}

impl Default for ResponderConfig {
    fn default() -> Self {
        Self {
            reply_delay_ms: default_reply_delay_ms(),
        }
    }
}

/// Mock model registry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Artificial delay before the fetched model list is returned (milliseconds)
    #[serde(default = "default_fetch_delay_ms")]
    pub fetch_delay_ms: u64,
}

fn default_fetch_delay_ms() -> u64 {
    1000
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            fetch_delay_ms: default_fetch_delay_ms(),
        }
    }
}

/// API settings defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Default API URL offered when none has been configured yet
    #[serde(default = "default_api_url")]
    pub default_url: String,
}

fn default_api_url() -> String {
    "https://api.yescale.io/v1".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            default_url: default_api_url(),
        }
    }
}

/// Seeded admin account configuration
///
/// The admin account is created in the user list on first store
/// initialization. Its password comes from the `OPDECK_ADMIN_PASSWORD`
/// environment variable when set, otherwise from `default_password`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    /// Admin display username
    #[serde(default = "default_admin_username")]
    pub username: String,

    /// Admin email; this account is exempt from edit/delete in the
    /// admin users view
    #[serde(default = "default_admin_email")]
    pub email: String,

    /// Fallback initial password when `OPDECK_ADMIN_PASSWORD` is unset
    #[serde(default = "default_admin_password")]
    pub default_password: String,
}

fn default_admin_username() -> String {
    "Admin".to_string()
}

fn default_admin_email() -> String {
    "admin@opdeck.local".to_string()
}

fn default_admin_password() -> String {
    "operator-dev".to_string()
}

impl AdminConfig {
    /// Resolve the initial admin password, preferring the environment
    pub fn initial_password(&self) -> String {
        std::env::var("OPDECK_ADMIN_PASSWORD").unwrap_or_else(|_| self.default_password.clone())
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: default_admin_username(),
            email: default_admin_email(),
            default_password: default_admin_password(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// A missing file is not an error: defaults are used so the binary
    /// works out of the box.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("Config file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns `OpdeckError::Config` when a field is out of range
    pub fn validate(&self) -> Result<()> {
        if self.admin.username.trim().is_empty() {
            return Err(OpdeckError::Config("admin.username must not be empty".to_string()).into());
        }
        if self.admin.email.trim().is_empty() {
            return Err(OpdeckError::Config("admin.email must not be empty".to_string()).into());
        }
        if self.admin.default_password.len() < 8 {
            return Err(OpdeckError::Config(
                "admin.default_password must be at least 8 characters".to_string(),
            )
            .into());
        }
        if self.api.default_url.trim().is_empty() {
            return Err(OpdeckError::Config("api.default_url must not be empty".to_string()).into());
        }
        Ok(())
    }
}
