// SPDX-License-Identifier: MIT

//! Advisor-side summary models (`GET /dosen/pa-saya`).

use serde::{Deserialize, Serialize};

use crate::models::student::StudentRecord;

/// Advisor identity plus the roster of advised students.
///
/// Replaced wholesale on every successful fetch; never mutated in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisorSummary {
    pub nip: String,
    pub nama: String,
    pub email: String,
    pub info_mahasiswa_pa: AdvisedStudents,
}

/// Per-cohort counts and the flat student roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisedStudents {
    pub ringkasan: Vec<CohortCount>,
    pub daftar_mahasiswa: Vec<StudentRecord>,
}

/// Number of advised students admitted in one cohort year.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CohortCount {
    pub tahun: String,
    pub total: u32,
}

/// Advisor identity as embedded in validation evidence and student detail.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Advisor {
    pub nip: String,
    pub nama: String,
    pub email: String,
}

impl AdvisorSummary {
    /// Roster entries from one admission cohort.
    pub fn students_in_cohort<'a>(
        &'a self,
        angkatan: &'a str,
    ) -> impl Iterator<Item = &'a StudentRecord> {
        self.info_mahasiswa_pa
            .daftar_mahasiswa
            .iter()
            .filter(move |m| m.angkatan == angkatan)
    }

    /// Look up one roster entry by student number.
    pub fn find_student(&self, nim: &str) -> Option<&StudentRecord> {
        self.info_mahasiswa_pa
            .daftar_mahasiswa
            .iter()
            .find(|m| m.nim == nim)
    }
}
