// SPDX-License-Identifier: MIT

//! Submission components and the batch request bodies for submit/withdraw.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::advisor::Advisor;

/// One curriculum component (e.g. a surah) and its completion state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubmissionComponent {
    pub id: String,
    pub nama: String,
    pub label: String,
    pub sudah_setor: bool,
    /// Present only when the component has been submitted and validated.
    pub info_setoran: Option<SubmissionEvidence>,
}

/// Validation record attached to a completed component.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubmissionEvidence {
    pub id: String,
    pub tgl_setoran: String,
    pub tgl_validasi: String,
    pub dosen_yang_mengesahkan: Advisor,
}

/// One staged entry of a submit or withdraw batch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PendingComponent {
    /// Validation record id; required only for withdrawal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub id_komponen_setoran: String,
    pub nama_komponen_setoran: String,
}

impl PendingComponent {
    /// Stage a component for submission.
    pub fn submit(component: &SubmissionComponent) -> Self {
        Self {
            id: None,
            id_komponen_setoran: component.id.clone(),
            nama_komponen_setoran: component.nama.clone(),
        }
    }

    /// Stage a completed component for withdrawal, carrying its validation id.
    pub fn withdraw(component: &SubmissionComponent) -> Self {
        Self {
            id: component.info_setoran.as_ref().map(|e| e.id.clone()),
            id_komponen_setoran: component.id.clone(),
            nama_komponen_setoran: component.nama.clone(),
        }
    }
}

/// Body of `POST`/`DELETE /mahasiswa/setoran/{nim}`.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionBatch {
    pub data_setoran: Vec<PendingComponent>,
    /// Submission date; the server assigns one when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tgl_setoran: Option<NaiveDate>,
}
