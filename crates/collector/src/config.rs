//! Collector configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SHOP_URL` - Base URL of the shop (e.g., <https://shop.example.com>)
//! - `SHOP_ADMIN_USERNAME` - Admin API username
//! - `SHOP_ADMIN_PASSWORD` - Admin API password
//!
//! ## Optional
//! - `FIXTURES_DIR` - Output directory for fixture files (default: `fixtures`)

use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use thiserror::Error;
use url::Url;

use crate::admin::auth::{CLIENT_ID, GRANT_PASSWORD, SCOPES};

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Fixture collector configuration.
///
/// Implements `Debug` manually to redact the admin password.
#[derive(Clone)]
pub struct CollectorConfig {
    /// Admin API base URL (the shop URL with `/api` appended)
    pub api_url: String,
    /// Admin username for the password grant
    pub username: String,
    /// Admin password for the password grant
    pub password: SecretString,
    /// Directory fixture files are written to
    pub fixtures_dir: PathBuf,
}

impl std::fmt::Debug for CollectorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectorConfig")
            .field("api_url", &self.api_url)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("fixtures_dir", &self.fixtures_dir)
            .finish()
    }
}

impl CollectorConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required variable is missing or if
    /// `SHOP_URL` is not an absolute URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let shop_url = get_required_env("SHOP_URL")?;
        let username = get_required_env("SHOP_ADMIN_USERNAME")?;
        let password = get_required_env("SHOP_ADMIN_PASSWORD").map(SecretString::from)?;
        let fixtures_dir = PathBuf::from(get_env_or_default("FIXTURES_DIR", "fixtures"));

        Ok(Self {
            api_url: api_url_from(&shop_url)?,
            username,
            password,
            fixtures_dir,
        })
    }

    /// Build the API profile embedded by value into exported fixtures.
    #[must_use]
    pub fn api_profile(&self) -> ApiProfile {
        ApiProfile {
            base_url: self.api_url.clone(),
            credentials: CredentialBundle {
                grant_type: GRANT_PASSWORD,
                client_id: CLIENT_ID,
                scopes: SCOPES,
                username: self.username.clone(),
                password: self.password.expose_secret().to_string(),
            },
        }
    }
}

/// API connection profile exported with the sales-channel fixture.
///
/// Serialized into `sales-channel.json` so the consuming test suite can
/// reach the same admin API the fixtures were collected from.
#[derive(Debug, Clone, Serialize)]
pub struct ApiProfile {
    /// Admin API base URL
    #[serde(rename = "baseURL")]
    pub base_url: String,
    /// Password-grant credential bundle
    pub credentials: CredentialBundle,
}

/// Password-grant credentials in the shape the admin API expects.
///
/// Implements `Debug` manually to redact the password. The password is
/// still serialized in clear into the fixture file; the fixtures are for
/// disposable test shops only.
#[derive(Clone, Serialize)]
pub struct CredentialBundle {
    /// OAuth grant type (`password`)
    pub grant_type: &'static str,
    /// OAuth client id (`administration`)
    pub client_id: &'static str,
    /// Requested scope (`write`)
    pub scopes: &'static str,
    /// Admin username
    pub username: String,
    /// Admin password
    pub password: String,
}

impl std::fmt::Debug for CredentialBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialBundle")
            .field("grant_type", &self.grant_type)
            .field("client_id", &self.client_id)
            .field("scopes", &self.scopes)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Derive the admin API base URL from the configured shop URL.
fn api_url_from(shop_url: &str) -> Result<String, ConfigError> {
    let parsed = Url::parse(shop_url)
        .map_err(|e| ConfigError::InvalidEnvVar("SHOP_URL".to_string(), e.to_string()))?;
    let trimmed = parsed.as_str().trim_end_matches('/');
    Ok(format!("{trimmed}/api"))
}

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
