//! Client for the monitor API backing the pipeline health and model
//! retraining panels.

mod client;
mod models;

pub use client::{MonitorApiClient, MonitorApiError, StaticTokenProvider, TokenProvider};
pub use models::{
    ModelStatus, ModelStatusMetrics, MonitoredSensor, RetrainTicket, RetrainingJob,
    RetrainingStatus, SensorMetricPoint,
};
