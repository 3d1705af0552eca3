//! Application configuration loaded from environment variables.
//!
//! Loaded once at startup; the OAuth client secret is the only required
//! variable, everything else has a development default.

use std::env;
use std::path::PathBuf;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Setoran backend base URL
    pub base_url: String,
    /// Identity provider base URL
    pub idp_url: String,
    /// Keycloak realm
    pub realm: String,
    /// OAuth client ID (public)
    pub client_id: String,
    /// OAuth client secret
    pub client_secret: String,
    /// Scopes requested at login
    pub scope: String,
    /// Directory holding the token file and the snapshot cache
    pub data_dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            base_url: env::var("SETORAN_BASE_URL")
                .unwrap_or_else(|_| "https://api.tif.uin-suska.ac.id/setoran-dev/v1".to_string()),
            idp_url: env::var("SETORAN_IDP_URL")
                .unwrap_or_else(|_| "https://id.tif.uin-suska.ac.id".to_string()),
            realm: env::var("SETORAN_REALM").unwrap_or_else(|_| "dev".to_string()),
            client_id: env::var("SETORAN_CLIENT_ID")
                .unwrap_or_else(|_| "setoran-mobile-dev".to_string()),
            client_secret: env::var("SETORAN_CLIENT_SECRET")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("SETORAN_CLIENT_SECRET"))?,
            scope: env::var("SETORAN_SCOPE")
                .unwrap_or_else(|_| "openid profile email".to_string()),
            data_dir: env::var("SETORAN_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".setoran")),
        })
    }

    /// Path of the persisted token triple.
    pub fn token_path(&self) -> PathBuf {
        self.data_dir.join("tokens.json")
    }

    /// Path of the last student-detail snapshot.
    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir.join("last_student.json")
    }

    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            base_url: "http://localhost:8080/setoran-dev/v1".to_string(),
            idp_url: "http://localhost:8081".to_string(),
            realm: "dev".to_string(),
            client_id: "setoran-mobile-dev".to_string(),
            client_secret: "test_secret".to_string(),
            scope: "openid profile email".to_string(),
            data_dir: PathBuf::from(".setoran-test"),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
