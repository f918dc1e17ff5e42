//! Bearer-token authentication against the external auth provider.
//!
//! Tokens are opaque here. Each request's token is forwarded to the
//! provider's `/user` endpoint; a successful lookup yields the stable
//! subject id that keys the local account.

use std::env;
use std::time::Duration;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::envelope::ApiError;
use crate::state::AppState;

const DEFAULT_AUTH_TIMEOUT_SECS: u64 = 10;

/// The authenticated caller, resolved from the bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProviderUser {
    id: String,
    email: Option<String>,
}

/// Client for the external auth provider.
#[derive(Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
}

impl AuthClient {
    /// Build from `AUTH_API_URL` (required) and an optional
    /// `AUTH_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, String> {
        let base_url =
            env::var("AUTH_API_URL").map_err(|_| "AUTH_API_URL is not set".to_string())?;
        let timeout_secs = env::var("AUTH_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_AUTH_TIMEOUT_SECS);
        Ok(Self::new(base_url, timeout_secs))
    }

    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_default();
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Resolve a bearer token to its user. Any provider rejection reads as
    /// unauthorized; provider outages surface the same way rather than 500.
    pub async fn verify(&self, token: &str) -> Result<AuthUser, ApiError> {
        let url = format!("{}/user", self.base_url.trim_end_matches('/'));
        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|err| {
                warn!(error = %err, "auth provider unreachable");
                ApiError::unauthorized("authentication unavailable")
            })?;

        if !response.status().is_success() {
            return Err(ApiError::unauthorized("invalid or expired token"));
        }

        let user: ProviderUser = response
            .json()
            .await
            .map_err(|_| ApiError::unauthorized("invalid or expired token"))?;

        debug!(user_id = %user.id, "token verified");
        Ok(AuthUser {
            user_id: user.id,
            email: user.email,
        })
    }
}

/// The raw bearer token from an Authorization header value.
pub fn bearer_token(value: &str) -> Option<&str> {
    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(bearer_token)
            .ok_or_else(|| ApiError::unauthorized("missing bearer token"))?;

        state.auth.verify(token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_extraction() {
        assert_eq!(bearer_token("Bearer abc123"), Some("abc123"));
        assert_eq!(bearer_token("Bearer   "), None);
        assert_eq!(bearer_token("Basic abc123"), None);
        assert_eq!(bearer_token("abc123"), None);
    }

    #[tokio::test]
    async fn test_unreachable_provider_reads_unauthorized() {
        let client = AuthClient::new("http://127.0.0.1:1", 1);
        let err = client.verify("token").await.unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::UNAUTHORIZED);
    }
}
