use crate::dataset::SensorStatus;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// Per-brand rollup over the most recent metric window of each campaign.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrandPerformance {
    pub brand: String,
    pub campaigns: usize,
    pub avg_roi: f64,
    pub avg_engagement: f64,
    pub total_reach: i64,
    /// Metric rows that contributed to the averages.
    pub metric_rows: usize,
}

/// Latest reading of one sensor type, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorStatusView {
    pub sensor_type: String,
    pub name: String,
    pub status: SensorStatus,
    pub value: f64,
    pub timestamp: DateTime<Utc>,
    pub trend: String,
}

/// One point of the daily performance series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub avg_roi: f64,
    pub avg_engagement: f64,
    pub total_reach: i64,
    pub samples: usize,
}

/// Headline figures of the dashboard.
///
/// `data_freshness`, `model_accuracy` and `system_latency_ms` come from a
/// [`MetricsSource`](super::MetricsSource) and are not derived from the dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub total_campaigns: usize,
    pub total_metrics: usize,
    pub total_assets: usize,
    pub total_sensors: usize,
    pub total_models: usize,
    pub active_campaigns: usize,
    pub avg_roi: f64,
    pub avg_engagement: f64,
    pub pipeline_health: u32,
    pub data_freshness: f64,
    pub model_accuracy: f64,
    pub system_latency_ms: f64,
}
