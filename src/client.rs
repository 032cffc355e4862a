//! Thin client for the record-serving API.
//!
//! One short fixed timeout, no retry, no backoff — a failed pull is
//! reported to the caller, which falls back to a "no data" state.

use thiserror::Error;

use crate::config;
use crate::models::{Kpis, PatientRecord};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("API unreachable: {0}")]
    Request(#[from] reqwest::Error),
}

pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(config::API_REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            base_url: base_url.into(),
            http,
        })
    }

    pub fn with_default_base() -> Result<Self, ClientError> {
        Self::new(config::DEFAULT_API_BASE_URL)
    }

    /// `GET /patients` — the full record list.
    pub async fn fetch_patients(&self) -> Result<Vec<PatientRecord>, ClientError> {
        let url = format!("{}/patients", self.base_url);
        let records = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(records)
    }

    /// `GET /kpis` — the derived summary numbers.
    pub async fn fetch_kpis(&self) -> Result<Kpis, ClientError> {
        let url = format!("{}/kpis", self.base_url);
        let kpis = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(kpis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unreachable_server_reports_error_without_retry() {
        // Port 9 (discard) is never serving HTTP.
        let client = ApiClient::new("http://127.0.0.1:9").unwrap();
        let err = client.fetch_patients().await.unwrap_err();
        assert!(matches!(err, ClientError::Request(_)));
    }
}
