// SPDX-License-Identifier: MIT

//! Setoran-Tracker: advisor-side client for Quran memorization submissions
//!
//! This crate provides the session, API client, and local persistence
//! layers for tracking "setoran hafalan" submissions of advised students,
//! against the university backend and its Keycloak identity provider.

pub mod claims;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod store;

use config::Config;
use services::{AuthClient, SessionController, SetoranClient};
use store::{SnapshotCache, TokenStore};

/// The production session controller type.
pub type Session = SessionController<AuthClient, SetoranClient>;

/// Wire up the production controller from configuration.
pub fn build_session(config: &Config) -> Session {
    let idp = AuthClient::new(config);
    let api = SetoranClient::new(&config.base_url);
    let tokens = TokenStore::new(config.token_path());
    let snapshots = SnapshotCache::new(config.snapshot_path());
    SessionController::new(idp, api, tokens, snapshots)
}
