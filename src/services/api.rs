// SPDX-License-Identifier: MIT

//! Setoran backend API client.
//!
//! Every call takes a bearer access token; the session controller decides
//! which token to use and handles the 401 refresh-and-retry flow. Branching
//! is driven by the HTTP status first, then by the `{response, message,
//! data}` envelope every payload is wrapped in.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;

use crate::error::{ApiError, AppError};
use crate::models::{AdvisorSummary, Envelope, PendingComponent, StudentDetail, SubmissionBatch};

/// Network boundary for the setoran backend, mockable in tests.
#[async_trait]
pub trait SetoranApi {
    /// `GET /dosen/pa-saya`: the advisor's cohorts and student roster.
    async fn advisor_summary(&self, access_token: &str) -> Result<AdvisorSummary, AppError>;

    /// `GET /mahasiswa/setoran/{nim}`: one student's submission detail.
    async fn student_submissions(
        &self,
        access_token: &str,
        nim: &str,
    ) -> Result<StudentDetail, AppError>;

    /// `POST /mahasiswa/setoran/{nim}`: mark components as submitted.
    ///
    /// One logical batch; the server owns conflict resolution.
    async fn submit_components(
        &self,
        access_token: &str,
        nim: &str,
        components: &[PendingComponent],
        date: Option<NaiveDate>,
    ) -> Result<(), AppError>;

    /// `DELETE /mahasiswa/setoran/{nim}`: reverse completed components.
    async fn withdraw_components(
        &self,
        access_token: &str,
        nim: &str,
        components: &[PendingComponent],
    ) -> Result<(), AppError>;
}

/// HTTP client for the setoran backend.
#[derive(Clone)]
pub struct SetoranClient {
    http: reqwest::Client,
    base_url: String,
}

impl SetoranClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Generic authorized GET, unwrapped through the response envelope.
    async fn get_data<T: DeserializeOwned>(
        &self,
        url: &str,
        access_token: &str,
    ) -> Result<T, AppError> {
        let response = self
            .http
            .get(url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        unwrap_envelope(response).await
    }
}

#[async_trait]
impl SetoranApi for SetoranClient {
    async fn advisor_summary(&self, access_token: &str) -> Result<AdvisorSummary, AppError> {
        let url = format!("{}/dosen/pa-saya", self.base_url);
        self.get_data(&url, access_token).await
    }

    async fn student_submissions(
        &self,
        access_token: &str,
        nim: &str,
    ) -> Result<StudentDetail, AppError> {
        let url = format!("{}/mahasiswa/setoran/{}", self.base_url, nim);
        self.get_data(&url, access_token).await
    }

    async fn submit_components(
        &self,
        access_token: &str,
        nim: &str,
        components: &[PendingComponent],
        date: Option<NaiveDate>,
    ) -> Result<(), AppError> {
        let url = format!("{}/mahasiswa/setoran/{}", self.base_url, nim);
        let body = SubmissionBatch {
            data_setoran: components.to_vec(),
            tgl_setoran: date,
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        check_ack(response).await
    }

    async fn withdraw_components(
        &self,
        access_token: &str,
        nim: &str,
        components: &[PendingComponent],
    ) -> Result<(), AppError> {
        let url = format!("{}/mahasiswa/setoran/{}", self.base_url, nim);
        let body = SubmissionBatch {
            data_setoran: components.to_vec(),
            tgl_setoran: None,
        };

        let response = self
            .http
            .delete(&url)
            .bearer_auth(access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        check_ack(response).await
    }
}

/// Map an HTTP status to the error taxonomy.
fn status_error(status: u16, body: String) -> ApiError {
    match status {
        401 => ApiError::Unauthorized,
        403 => ApiError::Forbidden,
        404 => ApiError::NotFound,
        _ => ApiError::Server { status, body },
    }
}

/// Check the status, then unwrap the `{response, message, data}` envelope.
///
/// A 2xx with `response == false` surfaces the server message verbatim and
/// never yields data.
async fn unwrap_envelope<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, AppError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(status_error(status.as_u16(), body).into());
    }

    let envelope: Envelope<T> = response
        .json()
        .await
        .map_err(|e| AppError::Decode(format!("response body: {e}")))?;

    if !envelope.response {
        return Err(ApiError::Rejected(envelope.message).into());
    }

    envelope
        .data
        .ok_or_else(|| AppError::Decode("envelope missing data".to_string()))
}

/// Check an acknowledge-only response (submit/withdraw).
///
/// Write endpoints return an envelope without a payload worth parsing, so
/// only a rejection message is extracted when one is present.
async fn check_ack(response: reqwest::Response) -> Result<(), AppError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(status_error(status.as_u16(), body).into());
    }

    let text = response.text().await.unwrap_or_default();
    if let Ok(envelope) = serde_json::from_str::<Envelope<serde_json::Value>>(&text) {
        if !envelope.response {
            return Err(ApiError::Rejected(envelope.message).into());
        }
    }
    Ok(())
}
