//! HTTP client for the monitor API.

use super::models::{MonitoredSensor, ModelStatus, RetrainTicket, RetrainingJob, SensorMetricPoint};
use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum MonitorApiError {
    #[error("No session token available")]
    Unauthenticated,

    #[error("Request to {path} failed: {source}")]
    Request {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{path} returned {status}: {message}")]
    Status {
        path: String,
        status: u16,
        message: String,
    },

    #[error("Failed to parse response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: reqwest::Error,
    },
}

impl MonitorApiError {
    /// HTTP status returned by the monitor API, if it answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            MonitorApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Supplies the bearer token sent with every request.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// `None` when there is no active session.
    async fn access_token(&self) -> Option<String>;
}

pub struct StaticTokenProvider {
    token: Option<String>,
}

impl StaticTokenProvider {
    pub fn new(token: Option<String>) -> Self {
        Self { token }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> Option<String> {
        self.token.clone()
    }
}

/// Client for the monitor API: sensors, metric history and model retraining.
///
/// Failed requests are reported once and never retried.
pub struct MonitorApiClient {
    client: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenProvider>,
}

impl MonitorApiClient {
    /// # Arguments
    /// * `base_url` - Base URL of the monitor API (e.g., "http://localhost:8000")
    /// * `tokens` - Source of the bearer token
    /// * `timeout_sec` - Request timeout in seconds
    pub fn new(base_url: String, tokens: Arc<dyn TokenProvider>, timeout_sec: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_sec))
            .build()?;

        let base_url = base_url.trim_end_matches('/').to_string();

        Ok(Self {
            client,
            base_url,
            tokens,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn sensors(&self) -> Result<Vec<MonitoredSensor>, MonitorApiError> {
        self.get_json("/api/sensors").await
    }

    /// Sensor samples of the last `hours` hours, oldest first.
    pub async fn metric_history(&self, hours: u32) -> Result<Vec<SensorMetricPoint>, MonitorApiError> {
        self.get_json(&format!("/api/metrics/history?hours={}", hours))
            .await
    }

    /// Asks the monitor to create a pending retraining job.
    pub async fn trigger_retrain(&self) -> Result<RetrainTicket, MonitorApiError> {
        let path = "/api/retrain";
        let response = self.send(self.request(Method::POST, path).await?, path).await?;
        decode(response, path).await
    }

    pub async fn model_status(&self) -> Result<ModelStatus, MonitorApiError> {
        self.get_json("/api/model/status").await
    }

    /// Retraining jobs, most recent first.
    pub async fn retraining_jobs(&self) -> Result<Vec<RetrainingJob>, MonitorApiError> {
        self.get_json("/api/retraining/jobs").await
    }

    async fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, MonitorApiError> {
        let token = self
            .tokens
            .access_token()
            .await
            .ok_or(MonitorApiError::Unauthenticated)?;
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);
        Ok(self.client.request(method, url).bearer_auth(token))
    }

    async fn send(&self, request: RequestBuilder, path: &str) -> Result<Response, MonitorApiError> {
        let response = request.send().await.map_err(|source| MonitorApiError::Request {
            path: path.to_string(),
            source,
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(MonitorApiError::Status {
            path: path.to_string(),
            status: status.as_u16(),
            message: error_message(&body, status),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, MonitorApiError> {
        let response = self.send(self.request(Method::GET, path).await?, path).await?;
        decode(response, path).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response, path: &str) -> Result<T, MonitorApiError> {
    response.json().await.map_err(|source| MonitorApiError::Decode {
        path: path.to_string(),
        source,
    })
}

/// Prefers the `detail` field of a JSON error body, then the raw body, then
/// the status reason.
fn error_message(body: &str, status: reqwest::StatusCode) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(detail) = value.get("detail").and_then(|d| d.as_str()) {
            return detail.to_string();
        }
    }
    let body = body.trim();
    if !body.is_empty() {
        return body.to_string();
    }
    status
        .canonical_reason()
        .unwrap_or("unknown error")
        .to_string()
}
