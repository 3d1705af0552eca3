// SPDX-License-Identifier: MIT

//! Services module - identity provider client, backend API client, and
//! session orchestration.

pub mod api;
pub mod auth;
pub mod session;

pub use api::{SetoranApi, SetoranClient};
pub use auth::{AuthClient, IdentityProvider};
pub use session::{Fetched, SessionController, SessionState};
