//! Admin API authentication.
//!
//! Obtains OAuth access tokens from the `/oauth/token` endpoint via the
//! password grant and renews them via the refresh-token grant.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::{AdminApiError, ApiError};

/// OAuth client id of the administration.
pub const CLIENT_ID: &str = "administration";

/// Scope requested for fixture collection.
pub const SCOPES: &str = "write";

/// Grant type for username/password authentication.
pub const GRANT_PASSWORD: &str = "password";

/// Grant type for token renewal.
const GRANT_REFRESH: &str = "refresh_token";

/// Seconds before nominal expiry at which a token counts as expired.
const EXPIRY_BUFFER_SECS: i64 = 60;

/// Access token obtained from the admin API.
#[derive(Debug, Clone)]
pub struct AdminToken {
    /// Bearer token for API requests.
    pub access_token: SecretString,
    /// Optional refresh token for renewal without credentials.
    pub refresh_token: Option<SecretString>,
    /// Unix timestamp when the access token expires.
    pub expires_at: i64,
}

/// Request body for the password grant.
#[derive(Serialize)]
struct PasswordGrantRequest<'a> {
    grant_type: &'static str,
    client_id: &'static str,
    scopes: &'static str,
    username: &'a str,
    password: &'a str,
}

/// Request body for the refresh-token grant.
#[derive(Serialize)]
struct RefreshGrantRequest<'a> {
    grant_type: &'static str,
    client_id: &'static str,
    refresh_token: &'a str,
}

/// Response from the token endpoint.
#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    /// Token lifetime in seconds.
    expires_in: i64,
}

/// Error response from the token endpoint.
#[derive(Deserialize)]
struct TokenErrorResponse {
    #[serde(default)]
    errors: Vec<ApiError>,
}

/// Authenticate with the admin API using username and password.
///
/// # Errors
///
/// Returns `AdminApiError::AuthenticationFailed` if the credentials are
/// rejected and `AdminApiError::Http` on transport failures.
#[instrument(skip(client, password), fields(username = %username))]
pub async fn authenticate(
    client: &reqwest::Client,
    token_endpoint: &str,
    username: &str,
    password: &SecretString,
) -> Result<AdminToken, AdminApiError> {
    let now = chrono::Utc::now().timestamp();

    let response = client
        .post(token_endpoint)
        .json(&PasswordGrantRequest {
            grant_type: GRANT_PASSWORD,
            client_id: CLIENT_ID,
            scopes: SCOPES,
            username,
            password: password.expose_secret(),
        })
        .send()
        .await?;

    token_from_response(response, now).await
}

/// Renew an access token using a refresh token.
///
/// # Errors
///
/// Returns `AdminApiError::AuthenticationFailed` if the refresh token is
/// invalid or already consumed.
#[instrument(skip(client, refresh_token))]
pub async fn refresh_access_token(
    client: &reqwest::Client,
    token_endpoint: &str,
    refresh_token: &SecretString,
) -> Result<AdminToken, AdminApiError> {
    let now = chrono::Utc::now().timestamp();

    let response = client
        .post(token_endpoint)
        .json(&RefreshGrantRequest {
            grant_type: GRANT_REFRESH,
            client_id: CLIENT_ID,
            refresh_token: refresh_token.expose_secret(),
        })
        .send()
        .await?;

    token_from_response(response, now).await
}

async fn token_from_response(
    response: reqwest::Response,
    now: i64,
) -> Result<AdminToken, AdminApiError> {
    let status = response.status();

    if status.is_success() {
        let token: TokenResponse = response.json().await?;

        Ok(AdminToken {
            access_token: SecretString::from(token.access_token),
            refresh_token: token.refresh_token.map(SecretString::from),
            expires_at: now + token.expires_in,
        })
    } else {
        let message = response
            .json::<TokenErrorResponse>()
            .await
            .ok()
            .and_then(|body| body.errors.into_iter().next())
            .map_or_else(|| format!("HTTP {status}"), |e| e.message());

        Err(AdminApiError::AuthenticationFailed(message))
    }
}

impl AdminToken {
    /// Check if the access token has expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        let now = chrono::Utc::now().timestamp();
        // Consider expired if less than 60 seconds remaining
        now >= self.expires_at - EXPIRY_BUFFER_SECS
    }

    /// Check if a refresh token is available for renewal.
    #[must_use]
    pub const fn can_refresh(&self) -> bool {
        self.refresh_token.is_some()
    }
}
