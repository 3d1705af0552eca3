// SPDX-License-Identifier: MIT

//! Per-student models: roster entries and the student detail endpoint.

use serde::{Deserialize, Serialize};

use crate::models::advisor::Advisor;
use crate::models::submission::SubmissionComponent;

/// One student in the advisor's roster.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StudentRecord {
    pub email: String,
    pub nim: String,
    pub nama: String,
    pub angkatan: String,
    pub semester: u32,
    pub info_setoran: SubmissionProgress,
}

/// Aggregate submission progress for one student.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SubmissionProgress {
    pub total_wajib_setor: u32,
    pub total_sudah_setor: u32,
    pub total_belum_setor: u32,
    pub persentase_progres_setor: f32,
    pub tgl_terakhir_setor: Option<String>,
    #[serde(default)]
    pub terakhir_setor: String,
    /// Omitted by the roster endpoint; populated by the detail endpoint.
    #[serde(default)]
    pub komponen_setoran: Vec<SubmissionComponent>,
}

impl SubmissionProgress {
    /// Display-only consistency check. The server owns the real counts;
    /// the client never recomputes them for persistence.
    pub fn counts_consistent(&self) -> bool {
        self.total_sudah_setor + self.total_belum_setor == self.total_wajib_setor
    }
}

/// Payload of `GET /mahasiswa/setoran/{nim}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StudentDetail {
    pub info: StudentInfo,
    pub setoran: StudentSubmissions,
}

/// Student identity plus the assigned academic advisor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StudentInfo {
    pub nama: String,
    pub nim: String,
    pub email: String,
    pub angkatan: String,
    pub semester: u32,
    pub dosen_pa: Advisor,
}

/// Submission state for one student: activity log, aggregate progress,
/// and the per-component detail list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StudentSubmissions {
    /// Server-side activity log; passed through untouched.
    #[serde(default)]
    pub log: Vec<serde_json::Value>,
    pub info_dasar: SubmissionProgress,
    #[serde(default)]
    pub ringkasan: Vec<serde_json::Value>,
    pub detail: Vec<SubmissionComponent>,
}

impl StudentDetail {
    /// Components not yet submitted.
    pub fn pending_components(&self) -> impl Iterator<Item = &SubmissionComponent> {
        self.setoran.detail.iter().filter(|c| !c.sudah_setor)
    }

    /// Look up a component by id.
    pub fn find_component(&self, id: &str) -> Option<&SubmissionComponent> {
        self.setoran.detail.iter().find(|c| c.id == id)
    }
}
