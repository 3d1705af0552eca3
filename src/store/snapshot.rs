// SPDX-License-Identifier: MIT

//! Best-effort snapshot of the last fetched student detail.
//!
//! One slot, last write wins: the slot is keyed implicitly by whatever
//! student was fetched most recently, so a fallback read taken after
//! switching students can return another student's data. Callers must
//! check the embedded `nim` before presenting the snapshot as current.

use std::path::PathBuf;

use crate::error::CacheError;
use crate::models::StudentDetail;

/// Single-slot on-disk cache used as a read fallback when a live fetch
/// fails. Never authoritative, never merged with live data.
#[derive(Debug, Clone)]
pub struct SnapshotCache {
    path: PathBuf,
}

impl SnapshotCache {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Overwrite the snapshot slot.
    pub fn save(&self, snapshot: &StudentDetail) -> Result<(), CacheError> {
        super::write_json(&self.path, snapshot)
    }

    /// The last saved snapshot, or `None` when absent or unreadable.
    pub fn load(&self) -> Option<StudentDetail> {
        super::read_json(&self.path)
    }
}
