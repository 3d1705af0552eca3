// SPDX-License-Identifier: MIT

//! Identity provider client (Keycloak resource-owner password flow).
//!
//! Exchanges credentials or a refresh token for the token triple and
//! performs best-effort server-side logout. Persisting the triple is the
//! session controller's responsibility, not this client's.

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::Config;
use crate::error::{AppError, AuthError};
use crate::store::TokenSet;

/// Network boundary for the identity provider, mockable in tests.
#[async_trait]
pub trait IdentityProvider {
    /// Exchange a resource-owner password grant for a token triple.
    async fn login(&self, username: &str, password: &str) -> Result<TokenSet, AppError>;

    /// Exchange a refresh-token grant for a fresh triple.
    async fn refresh(&self, refresh_token: &str) -> Result<TokenSet, AppError>;

    /// Terminate the server-side session.
    async fn logout(&self, id_token: &str) -> Result<(), AppError>;
}

/// Keycloak token-endpoint client.
#[derive(Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    token_url: String,
    logout_url: String,
    client_id: String,
    client_secret: String,
    scope: String,
}

impl AuthClient {
    pub fn new(config: &Config) -> Self {
        let base = format!(
            "{}/realms/{}/protocol/openid-connect",
            config.idp_url.trim_end_matches('/'),
            config.realm
        );
        Self {
            http: reqwest::Client::new(),
            token_url: format!("{base}/token"),
            logout_url: format!("{base}/logout"),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            scope: config.scope.clone(),
        }
    }
}

/// Token endpoint response.
#[derive(Debug, Deserialize)]
struct AuthResponse {
    access_token: String,
    refresh_token: String,
    id_token: String,
}

impl From<AuthResponse> for TokenSet {
    fn from(auth: AuthResponse) -> Self {
        Self {
            access_token: auth.access_token,
            refresh_token: auth.refresh_token,
            id_token: auth.id_token,
        }
    }
}

#[async_trait]
impl IdentityProvider for AuthClient {
    async fn login(&self, username: &str, password: &str) -> Result<TokenSet, AppError> {
        let response = self
            .http
            .post(&self.token_url)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("grant_type", "password"),
                ("username", username),
                ("password", password),
                ("scope", self.scope.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::Network(format!("login request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, body = %body, "Login rejected");
            return Err(AuthError::InvalidCredentials.into());
        }

        let auth: AuthResponse = response
            .json()
            .await
            .map_err(|e| AppError::Decode(format!("token response: {e}")))?;
        Ok(auth.into())
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenSet, AppError> {
        let response = self
            .http
            .post(&self.token_url)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
            ])
            .send()
            .await
            .map_err(|e| AppError::Network(format!("token refresh request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, body = %body, "Refresh token rejected");
            return Err(AuthError::RefreshRejected.into());
        }

        let auth: AuthResponse = response
            .json()
            .await
            .map_err(|e| AppError::Decode(format!("token response: {e}")))?;
        Ok(auth.into())
    }

    async fn logout(&self, id_token: &str) -> Result<(), AppError> {
        let response = self
            .http
            .post(&self.logout_url)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("id_token_hint", id_token),
            ])
            .send()
            .await
            .map_err(|e| AppError::Network(format!("logout request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AuthError::LogoutFailed(format!("HTTP {status}")).into());
        }

        tracing::info!("Server-side logout successful");
        Ok(())
    }
}
