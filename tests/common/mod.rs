// SPDX-License-Identifier: MIT

//! Shared fixtures for integration tests.

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use setoran_tracker::models::{
    AdvisedStudents, Advisor, AdvisorSummary, CohortCount, StudentDetail, StudentInfo,
    StudentRecord, StudentSubmissions, SubmissionComponent, SubmissionProgress,
};
use setoran_tracker::store::TokenSet;

/// Mint an unvalidated test JWT carrying Keycloak-shaped claims.
#[allow(dead_code)]
pub fn make_jwt(name: &str, username: &str, email: &str, roles: &[&str]) -> String {
    #[derive(Serialize)]
    struct RealmAccess {
        roles: Vec<String>,
    }

    #[derive(Serialize)]
    struct TestClaims {
        sub: String,
        name: String,
        preferred_username: String,
        email: String,
        realm_access: RealmAccess,
        exp: usize,
        iat: usize,
    }

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize;

    let claims = TestClaims {
        sub: username.to_string(),
        name: name.to_string(),
        preferred_username: username.to_string(),
        email: email.to_string(),
        realm_access: RealmAccess {
            roles: roles.iter().map(|r| r.to_string()).collect(),
        },
        exp: now + 300,
        iat: now,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(b"test-signing-key"),
    )
    .expect("Failed to create test JWT")
}

/// Token triple whose access and id tokens carry the given realm roles.
#[allow(dead_code)]
pub fn token_set_with_roles(roles: &[&str]) -> TokenSet {
    let jwt = make_jwt("Dosen Satu", "dosen1", "dosen1@example.ac.id", roles);
    TokenSet {
        access_token: jwt.clone(),
        refresh_token: "refresh-1".to_string(),
        id_token: jwt,
    }
}

/// Token triple with opaque marker tokens, for tests that never parse claims.
#[allow(dead_code)]
pub fn plain_token_set(suffix: &str) -> TokenSet {
    TokenSet {
        access_token: format!("access-{suffix}"),
        refresh_token: format!("refresh-{suffix}"),
        id_token: format!("id-{suffix}"),
    }
}

#[allow(dead_code)]
pub fn sample_advisor() -> Advisor {
    Advisor {
        nip: "198701012015031001".to_string(),
        nama: "Dosen Satu".to_string(),
        email: "dosen1@example.ac.id".to_string(),
    }
}

/// Student detail with `count` components, none yet submitted.
#[allow(dead_code)]
pub fn sample_detail(nim: &str, count: usize) -> StudentDetail {
    let detail = (1..=count)
        .map(|i| SubmissionComponent {
            id: format!("c{i}"),
            nama: format!("Surah {i}"),
            label: "KP".to_string(),
            sudah_setor: false,
            info_setoran: None,
        })
        .collect::<Vec<_>>();

    StudentDetail {
        info: StudentInfo {
            nama: format!("Mahasiswa {nim}"),
            nim: nim.to_string(),
            email: format!("{nim}@students.example.ac.id"),
            angkatan: "2020".to_string(),
            semester: 6,
            dosen_pa: sample_advisor(),
        },
        setoran: StudentSubmissions {
            log: Vec::new(),
            info_dasar: SubmissionProgress {
                total_wajib_setor: count as u32,
                total_sudah_setor: 0,
                total_belum_setor: count as u32,
                persentase_progres_setor: 0.0,
                tgl_terakhir_setor: None,
                terakhir_setor: String::new(),
                komponen_setoran: Vec::new(),
            },
            ringkasan: Vec::new(),
            detail,
        },
    }
}

#[allow(dead_code)]
pub fn sample_summary() -> AdvisorSummary {
    let advisor = sample_advisor();
    AdvisorSummary {
        nip: advisor.nip.clone(),
        nama: advisor.nama.clone(),
        email: advisor.email.clone(),
        info_mahasiswa_pa: AdvisedStudents {
            ringkasan: vec![CohortCount {
                tahun: "2020".to_string(),
                total: 1,
            }],
            daftar_mahasiswa: vec![StudentRecord {
                email: "12050001@students.example.ac.id".to_string(),
                nim: "12050001".to_string(),
                nama: "Mahasiswa 12050001".to_string(),
                angkatan: "2020".to_string(),
                semester: 6,
                info_setoran: SubmissionProgress::default(),
            }],
        },
    }
}
