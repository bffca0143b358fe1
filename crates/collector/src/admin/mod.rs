//! Shopware administration API client.
//!
//! Covers the slice of the admin API the collectors need: password-grant
//! authentication and the `/search/{entity}` and `/search-ids/{entity}`
//! endpoints with field projection, filter trees, and result limits.

pub mod auth;
pub mod client;
pub mod criteria;

pub use client::AdminClient;
pub use criteria::{Criteria, Filter};

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when interacting with the admin API.
#[derive(Debug, Error)]
pub enum AdminApiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication failed (invalid username/password or refresh token).
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Access token was rejected by the API.
    #[error("Access token expired")]
    TokenExpired,

    /// The API returned structured errors.
    #[error("API errors: {}", format_api_errors(.0))]
    Api(Vec<ApiError>),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A single error entry from the admin API's `errors` list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiError {
    /// HTTP status code as a string.
    #[serde(default)]
    pub status: Option<String>,
    /// Machine-readable error code.
    #[serde(default)]
    pub code: Option<String>,
    /// Short error title.
    #[serde(default)]
    pub title: Option<String>,
    /// Human-readable detail message.
    #[serde(default)]
    pub detail: Option<String>,
}

impl ApiError {
    /// Best available human-readable message.
    #[must_use]
    pub fn message(&self) -> String {
        self.detail
            .clone()
            .or_else(|| self.title.clone())
            .or_else(|| self.code.clone())
            .unwrap_or_else(|| "Unknown error".to_string())
    }
}

fn format_api_errors(errors: &[ApiError]) -> String {
    errors
        .iter()
        .map(ApiError::message)
        .collect::<Vec<_>>()
        .join("; ")
}
