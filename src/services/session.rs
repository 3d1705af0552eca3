// SPDX-License-Identifier: MIT

//! Session orchestration: token lifecycle, one-shot refresh-and-retry, and
//! the local role guard.
//!
//! The controller owns every write to the token store. Authenticated calls
//! go through [`SessionController::with_auth`], which tries the current
//! access token, refreshes once on a 401 (persisting the new triple before
//! the retry), and retries the original call exactly once. A 401 on the
//! retry, or a rejected refresh, ends the session: the store is cleared and
//! the caller must log in again.

use std::future::Future;
use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::RwLock;

use crate::claims::{self, Claims, ADVISOR_ROLE};
use crate::error::{AppError, AuthError};
use crate::models::{AdvisorSummary, PendingComponent, StudentDetail};
use crate::services::api::SetoranApi;
use crate::services::auth::IdentityProvider;
use crate::store::{SnapshotCache, TokenSet, TokenStore};

/// Lifecycle of one user session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    Authenticating,
    Authenticated,
    Refreshing,
    /// Terminal for this session: the store is cleared and only a fresh
    /// login leaves this state.
    Expired,
}

/// A value served either live from the backend or from the local snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched<T> {
    Live(T),
    /// Fallback copy from the snapshot cache; may be stale.
    Snapshot(T),
}

impl<T> Fetched<T> {
    pub fn is_snapshot(&self) -> bool {
        matches!(self, Fetched::Snapshot(_))
    }

    pub fn get(&self) -> &T {
        match self {
            Fetched::Live(value) | Fetched::Snapshot(value) => value,
        }
    }

    pub fn into_inner(self) -> T {
        match self {
            Fetched::Live(value) | Fetched::Snapshot(value) => value,
        }
    }
}

/// Orchestrates authenticated calls against the setoran backend.
pub struct SessionController<I, A> {
    idp: I,
    api: A,
    tokens: TokenStore,
    snapshots: SnapshotCache,
    state: Arc<RwLock<SessionState>>,
}

impl<I, A> SessionController<I, A>
where
    I: IdentityProvider,
    A: SetoranApi,
{
    /// A controller over the given collaborators. Starts `Authenticated`
    /// when a token triple is already on disk.
    pub fn new(idp: I, api: A, tokens: TokenStore, snapshots: SnapshotCache) -> Self {
        let initial = if tokens.load().is_some() {
            SessionState::Authenticated
        } else {
            SessionState::Unauthenticated
        };
        Self {
            idp,
            api,
            tokens,
            snapshots,
            state: Arc::new(RwLock::new(initial)),
        }
    }

    pub async fn state(&self) -> SessionState {
        *self.state.read().await
    }

    async fn set_state(&self, next: SessionState) {
        *self.state.write().await = next;
    }

    // ─── Authentication ──────────────────────────────────────────────────

    /// Log in with university credentials and persist the token triple.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), AppError> {
        self.set_state(SessionState::Authenticating).await;

        match self.idp.login(username, password).await {
            Ok(tokens) => {
                self.persist_tokens(&tokens);
                self.set_state(SessionState::Authenticated).await;
                tracing::info!(user = username, "Login successful");
                Ok(())
            }
            Err(e) => {
                self.set_state(SessionState::Unauthenticated).await;
                Err(e)
            }
        }
    }

    /// End the session: best-effort server-side logout, then unconditional
    /// local token clearing.
    pub async fn logout(&self) -> Result<(), AppError> {
        if let Some(id_token) = self.tokens.id_token() {
            if let Err(e) = self.idp.logout(&id_token).await {
                tracing::warn!(error = %e, "Server-side logout failed, clearing local session anyway");
            }
        }

        if let Err(e) = self.tokens.clear() {
            tracing::warn!(error = %e, "Failed to clear token store");
        }
        self.set_state(SessionState::Unauthenticated).await;
        tracing::info!("Logged out");
        Ok(())
    }

    /// Claims of the current access token.
    pub fn claims(&self) -> Result<Claims, AppError> {
        let tokens = self.tokens.load().ok_or(AuthError::NotAuthenticated)?;
        claims::extract_claims(&tokens.access_token)
    }

    /// Display name from the id token (`name`, then `preferred_username`).
    pub fn display_name(&self) -> Option<String> {
        let id_token = self.tokens.id_token()?;
        let claims = claims::extract_claims(&id_token).ok()?;
        claims.display_name().map(str::to_string)
    }

    // ─── Authenticated reads ─────────────────────────────────────────────

    /// The advisor's cohorts and student roster.
    pub async fn advisor_summary(&self) -> Result<AdvisorSummary, AppError> {
        self.with_auth(|token| async move { self.api.advisor_summary(&token).await })
            .await
    }

    /// One student's submission detail, mirrored into the snapshot cache on
    /// success and served from it when the network is unreachable.
    pub async fn student_submissions(&self, nim: &str) -> Result<Fetched<StudentDetail>, AppError> {
        let live = self
            .with_auth(|token| async move { self.api.student_submissions(&token, nim).await })
            .await;

        match live {
            Ok(detail) => {
                if let Err(e) = self.snapshots.save(&detail) {
                    tracing::warn!(error = %e, "Failed to cache student snapshot");
                }
                Ok(Fetched::Live(detail))
            }
            Err(AppError::Network(reason)) => match self.snapshots.load() {
                Some(snapshot) => {
                    if snapshot.info.nim != nim {
                        // Single-slot cache: the snapshot may belong to the
                        // previously viewed student.
                        tracing::warn!(
                            requested = %nim,
                            cached = %snapshot.info.nim,
                            "Snapshot slot holds a different student"
                        );
                    }
                    tracing::warn!(%nim, %reason, "Network unreachable, serving cached snapshot");
                    Ok(Fetched::Snapshot(snapshot))
                }
                None => Err(AppError::Network(reason)),
            },
            Err(e) => Err(e),
        }
    }

    // ─── Authenticated writes ────────────────────────────────────────────

    /// Mark the staged components as submitted, as of `date` when given.
    ///
    /// An empty batch is a local no-op; no request is issued.
    pub async fn submit_components(
        &self,
        nim: &str,
        components: &[PendingComponent],
        date: Option<NaiveDate>,
    ) -> Result<(), AppError> {
        if components.is_empty() {
            return Ok(());
        }
        self.require_advisor_role()?;

        self.with_auth(|token| async move {
            self.api
                .submit_components(&token, nim, components, date)
                .await
        })
        .await?;

        tracing::info!(%nim, count = components.len(), "Submission batch recorded");
        Ok(())
    }

    /// Reverse completion for the staged components.
    ///
    /// An empty batch is a local no-op; no request is issued.
    pub async fn withdraw_components(
        &self,
        nim: &str,
        components: &[PendingComponent],
    ) -> Result<(), AppError> {
        if components.is_empty() {
            return Ok(());
        }
        self.require_advisor_role()?;

        self.with_auth(|token| async move {
            self.api.withdraw_components(&token, nim, components).await
        })
        .await?;

        tracing::info!(%nim, count = components.len(), "Submission batch withdrawn");
        Ok(())
    }

    /// UX guard only; the backend enforces the real role check.
    fn require_advisor_role(&self) -> Result<(), AppError> {
        let claims = self.claims()?;
        if !claims.has_role(ADVISOR_ROLE) {
            return Err(AuthError::Forbidden(ADVISOR_ROLE.to_string()).into());
        }
        Ok(())
    }

    // ─── Token lifecycle ─────────────────────────────────────────────────

    /// Run `op` with the current access token; on a 401, refresh once,
    /// persist the new triple, and retry exactly once. Never refreshes
    /// twice within one logical operation.
    async fn with_auth<T, F, Fut>(&self, op: F) -> Result<T, AppError>
    where
        F: Fn(String) -> Fut,
        Fut: Future<Output = Result<T, AppError>>,
    {
        let tokens = self.tokens.load().ok_or(AuthError::NotAuthenticated)?;

        match op(tokens.access_token).await {
            Err(e) if e.is_unauthorized() => {
                let access_token = self.refresh_session(&tokens.refresh_token).await?;
                match op(access_token).await {
                    Err(e) if e.is_unauthorized() => {
                        self.expire_session().await;
                        Err(AuthError::SessionExpired.into())
                    }
                    other => other,
                }
            }
            other => other,
        }
    }

    /// Refresh the token triple, persisting it before any retry runs.
    async fn refresh_session(&self, refresh_token: &str) -> Result<String, AppError> {
        self.set_state(SessionState::Refreshing).await;
        tracing::info!("Access token expired, refreshing");

        match self.idp.refresh(refresh_token).await {
            Ok(new_tokens) => {
                self.persist_tokens(&new_tokens);
                self.set_state(SessionState::Authenticated).await;
                tracing::info!("Access token refreshed");
                Ok(new_tokens.access_token)
            }
            Err(e @ AppError::Network(_)) => {
                // Transport failure says nothing about the session itself;
                // keep the tokens and let the caller retry later.
                self.set_state(SessionState::Authenticated).await;
                Err(e)
            }
            Err(e) => {
                self.expire_session().await;
                Err(e)
            }
        }
    }

    /// Terminal transition: clear the store; only a fresh login recovers.
    async fn expire_session(&self) {
        if let Err(e) = self.tokens.clear() {
            tracing::warn!(error = %e, "Failed to clear token store");
        }
        self.set_state(SessionState::Expired).await;
        tracing::warn!("Session expired; re-login required");
    }

    fn persist_tokens(&self, tokens: &TokenSet) {
        // A failed save reads back as absent, which callers already treat
        // as "unauthenticated"; log and continue.
        if let Err(e) = self.tokens.save(tokens) {
            tracing::warn!(error = %e, "Failed to persist tokens");
        }
    }
}
