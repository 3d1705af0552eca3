// SPDX-License-Identifier: MIT

//! Wire-format data models for the setoran backend.
//!
//! Field names follow the backend's JSON exactly (Indonesian), so the
//! structs double as documentation of the wire format.

pub mod advisor;
pub mod student;
pub mod submission;

pub use advisor::{AdvisedStudents, Advisor, AdvisorSummary, CohortCount};
pub use student::{StudentDetail, StudentInfo, StudentRecord, StudentSubmissions, SubmissionProgress};
pub use submission::{PendingComponent, SubmissionBatch, SubmissionComponent, SubmissionEvidence};

use serde::Deserialize;

/// Standard `{response, message, data}` envelope wrapping every backend payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    pub response: bool,
    pub message: String,
    #[serde(default)]
    pub data: Option<T>,
}
