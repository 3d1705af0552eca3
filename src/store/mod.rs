// SPDX-License-Identifier: MIT

//! Local persistence: the token store and the student snapshot cache.
//!
//! Both stores are single JSON files written via temp-file-and-rename so a
//! crash never leaves a partially written document behind. Unreadable
//! files read as absent.

pub mod snapshot;
pub mod tokens;

pub use snapshot::SnapshotCache;
pub use tokens::{TokenSet, TokenStore};

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::CacheError;

/// Atomically replace `path` with the JSON serialization of `value`.
pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), CacheError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| CacheError::Write(e.to_string()))?;
    }

    let json = serde_json::to_vec_pretty(value).map_err(|e| CacheError::Write(e.to_string()))?;

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, &json).map_err(|e| CacheError::Write(e.to_string()))?;
    fs::rename(&tmp, path).map_err(|e| CacheError::Write(e.to_string()))?;
    Ok(())
}

/// Read and parse `path`, treating missing or corrupt files as absent.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Option<T> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) => {
            if e.kind() != ErrorKind::NotFound {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read local state");
            }
            return None;
        }
    };

    match serde_json::from_str(&data) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Discarding unreadable local state");
            None
        }
    }
}

/// Remove `path`, treating a missing file as success.
pub(crate) fn remove(path: &Path) -> Result<(), CacheError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(CacheError::Write(e.to_string())),
    }
}
