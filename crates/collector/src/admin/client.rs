//! Authenticated admin API client.
//!
//! Authenticates lazily on first use via the password grant and keeps the
//! token cached in memory, renewing it when it expires.

use std::sync::Arc;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use tracing::instrument;

use super::auth::{AdminToken, authenticate, refresh_access_token};
use super::criteria::Criteria;
use super::{AdminApiError, ApiError};
use crate::config::CollectorConfig;

/// Request timeout for admin API calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Admin API client.
///
/// Cheap to clone; all clones share the HTTP connection pool and the
/// cached token.
#[derive(Clone)]
pub struct AdminClient {
    inner: Arc<AdminClientInner>,
}

struct AdminClientInner {
    client: reqwest::Client,
    api_url: String,
    username: String,
    password: SecretString,
    /// In-memory token cache
    token: RwLock<Option<AdminToken>>,
}

impl std::fmt::Debug for AdminClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminClient")
            .field("api_url", &self.inner.api_url)
            .field("username", &self.inner.username)
            .field("password", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

/// Response envelope of `/search/{entity}`.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct SearchResponse<T> {
    #[serde(default)]
    data: Vec<T>,
}

/// Response envelope of `/search-ids/{entity}`.
#[derive(Debug, Deserialize)]
struct SearchIdsResponse {
    #[serde(default)]
    data: Vec<String>,
}

/// Error envelope returned by the admin API on non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    errors: Vec<ApiError>,
}

impl AdminClient {
    /// Create a client from the collector configuration.
    ///
    /// No request is made until the first search; authentication happens
    /// lazily.
    ///
    /// # Errors
    ///
    /// Returns `AdminApiError::Http` if the HTTP client cannot be built.
    pub fn new(config: &CollectorConfig) -> Result<Self, AdminApiError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            inner: Arc::new(AdminClientInner {
                client,
                api_url: config.api_url.clone(),
                username: config.username.clone(),
                password: config.password.clone(),
                token: RwLock::new(None),
            }),
        })
    }

    /// Search entity records.
    ///
    /// POSTs the criteria to `/search/{entity}` and returns the `data`
    /// list deserialized into `T`.
    ///
    /// # Errors
    ///
    /// Returns `AdminApiError::AuthenticationFailed` if no token can be
    /// obtained, `AdminApiError::Api` if the API rejects the query, and
    /// `AdminApiError::Http` on transport failures.
    #[instrument(skip(self, criteria), fields(entity = %entity))]
    pub async fn search<T: DeserializeOwned>(
        &self,
        entity: &str,
        criteria: &Criteria,
    ) -> Result<Vec<T>, AdminApiError> {
        let response: SearchResponse<T> = self.post(&format!("search/{entity}"), criteria).await?;
        Ok(response.data)
    }

    /// Search entity ids only.
    ///
    /// POSTs the criteria to `/search-ids/{entity}` and returns the flat
    /// id list.
    ///
    /// # Errors
    ///
    /// Same error conditions as [`AdminClient::search`].
    #[instrument(skip(self, criteria), fields(entity = %entity))]
    pub async fn search_ids(
        &self,
        entity: &str,
        criteria: &Criteria,
    ) -> Result<Vec<String>, AdminApiError> {
        let response: SearchIdsResponse = self
            .post(&format!("search-ids/{entity}"), criteria)
            .await?;
        Ok(response.data)
    }

    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        criteria: &Criteria,
    ) -> Result<T, AdminApiError> {
        let access_token = self.ensure_token().await?;

        let response = self
            .inner
            .client
            .post(format!("{}/{path}", self.inner.api_url))
            .bearer_auth(access_token.expose_secret())
            .json(criteria)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AdminApiError::TokenExpired);
        }

        if !status.is_success() {
            let errors = response
                .json::<ErrorResponse>()
                .await
                .map(|body| body.errors)
                .unwrap_or_default();

            if errors.is_empty() {
                return Err(AdminApiError::Api(vec![ApiError {
                    status: Some(status.as_u16().to_string()),
                    title: Some("Unexpected response".to_string()),
                    ..ApiError::default()
                }]));
            }
            return Err(AdminApiError::Api(errors));
        }

        Ok(response.json().await?)
    }

    /// Return a valid access token, authenticating or renewing as needed.
    async fn ensure_token(&self) -> Result<SecretString, AdminApiError> {
        if let Some(token) = self.inner.token.read().await.as_ref()
            && !token.is_expired()
        {
            return Ok(token.access_token.clone());
        }

        let mut guard = self.inner.token.write().await;

        // Re-check under the write lock; another task may have renewed.
        if let Some(token) = guard.as_ref()
            && !token.is_expired()
        {
            return Ok(token.access_token.clone());
        }

        let endpoint = format!("{}/oauth/token", self.inner.api_url);
        let refresh_token = guard
            .as_ref()
            .filter(|token| token.can_refresh())
            .and_then(|token| token.refresh_token.clone());

        let renewed = match refresh_token {
            Some(refresh_token) => {
                match refresh_access_token(&self.inner.client, &endpoint, &refresh_token).await {
                    Ok(token) => token,
                    // Refresh tokens are single-use; fall back to credentials.
                    Err(AdminApiError::AuthenticationFailed(_)) => {
                        authenticate(
                            &self.inner.client,
                            &endpoint,
                            &self.inner.username,
                            &self.inner.password,
                        )
                        .await?
                    }
                    Err(e) => return Err(e),
                }
            }
            None => {
                authenticate(
                    &self.inner.client,
                    &endpoint,
                    &self.inner.username,
                    &self.inner.password,
                )
                .await?
            }
        };

        let access_token = renewed.access_token.clone();
        *guard = Some(renewed);
        Ok(access_token)
    }
}
