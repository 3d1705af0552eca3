// SPDX-License-Identifier: MIT

//! Application error types shared across the auth, API, session, and store layers.

/// Top-level error type returned by every fallible operation.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Transport-level failure (DNS, connect, timeout).
    #[error("network error: {0}")]
    Network(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Api(#[from] ApiError),

    /// Response body did not match the expected shape.
    #[error("malformed response: {0}")]
    Decode(String),

    /// Local read/write failure; never surfaced to the user.
    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Errors from the identity provider and the session lifecycle.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("login rejected by the identity provider")]
    InvalidCredentials,

    /// The refresh token was rejected. The session is fully expired;
    /// callers must not retry.
    #[error("refresh token rejected; please log in again")]
    RefreshRejected,

    /// The retried call still came back 401 after a successful refresh.
    #[error("session expired; please log in again")]
    SessionExpired,

    /// Local role guard: the access token lacks a required role.
    #[error("missing required role: {0}")]
    Forbidden(String),

    /// No token triple in the store.
    #[error("not logged in")]
    NotAuthenticated,

    /// Best-effort server-side logout failed. Local tokens are cleared
    /// regardless.
    #[error("server-side logout failed: {0}")]
    LogoutFailed(String),
}

/// Errors from the setoran backend, keyed off the HTTP status.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("unauthorized (401)")]
    Unauthorized,

    #[error("access denied (403)")]
    Forbidden,

    #[error("not found (404)")]
    NotFound,

    /// A 2xx envelope with `response == false`; carries the server's
    /// message verbatim.
    #[error("{0}")]
    Rejected(String),

    #[error("server error (HTTP {status}): {body}")]
    Server { status: u16, body: String },
}

/// Local persistence errors (token store, snapshot cache).
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("cache read failed: {0}")]
    Read(String),

    #[error("cache write failed: {0}")]
    Write(String),
}

impl AppError {
    /// True for the 401 case that triggers the one-shot token refresh.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AppError::Api(ApiError::Unauthorized))
    }
}

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AppError>;
