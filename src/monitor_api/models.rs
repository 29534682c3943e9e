//! Models for the monitor API responses.
//!
//! These types match the camelCase JSON returned by the monitor service.

use crate::dataset::timestamp;
use crate::dataset::SensorStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Sensors
// =============================================================================

/// One accuracy/latency/throughput sample of a monitored sensor.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct SensorMetricPoint {
    pub accuracy: f64,
    pub latency: f64,
    pub throughput: f64,
    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitoredSensor {
    pub id: String,
    pub name: String,
    pub status: SensorStatus,
    #[serde(with = "timestamp")]
    pub last_run: DateTime<Utc>,
    /// `None` when the sensor has not reported any sample yet.
    #[serde(default)]
    pub metrics: Option<Vec<SensorMetricPoint>>,
}

// =============================================================================
// Model & retraining
// =============================================================================

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrainTicket {
    pub job_id: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ModelStatusMetrics {
    pub accuracy: f64,
    pub latency: f64,
    pub throughput: f64,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelStatus {
    pub status: String,
    #[serde(with = "timestamp")]
    pub last_trained: DateTime<Utc>,
    pub metrics: ModelStatusMetrics,
}

/// Lifecycle of a retraining job. Jobs are created `Pending`; later
/// transitions happen on the monitor side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RetrainingStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrainingJob {
    pub id: String,
    pub status: RetrainingStatus,
    #[serde(with = "timestamp")]
    pub started_at: DateTime<Utc>,
    #[serde(default, with = "timestamp::option")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub error_message: Option<String>,
}
