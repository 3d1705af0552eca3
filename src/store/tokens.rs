// SPDX-License-Identifier: MIT

//! On-disk storage for the session's token triple.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::CacheError;

/// The token triple returned by the identity provider.
///
/// Always saved and replaced as a unit; there is no partial update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenSet {
    pub access_token: String,
    pub refresh_token: String,
    pub id_token: String,
}

/// File-backed store for the current session's tokens.
///
/// A failed or corrupt read is indistinguishable from absence; callers
/// treat `None` as "unauthenticated".
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Persist all three tokens atomically.
    pub fn save(&self, tokens: &TokenSet) -> Result<(), CacheError> {
        super::write_json(&self.path, tokens)
    }

    /// The last saved triple, or `None` when absent or unreadable.
    pub fn load(&self) -> Option<TokenSet> {
        super::read_json(&self.path)
    }

    pub fn access_token(&self) -> Option<String> {
        self.load().map(|t| t.access_token)
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.load().map(|t| t.refresh_token)
    }

    pub fn id_token(&self) -> Option<String> {
        self.load().map(|t| t.id_token)
    }

    /// Erase all three tokens.
    pub fn clear(&self) -> Result<(), CacheError> {
        super::remove(&self.path)
    }
}
