use axum::{http::StatusCode, response::IntoResponse};
use lazy_static::lazy_static;
use prometheus::{
    CounterVec, Encoder, GaugeVec, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder,
};
use std::time::Duration;

use crate::dataset::DatasetCounts;

/// Metric name prefix for all campaign insights metrics
const PREFIX: &str = "campaign_insights";

lazy_static! {
    // Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    // HTTP Request Metrics
    pub static ref HTTP_REQUESTS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_http_requests_total"), "Total number of HTTP requests"),
        &["method", "path", "status"]
    ).expect("Failed to create http_requests_total metric");

    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            format!("{PREFIX}_http_request_duration_seconds"),
            "HTTP request duration in seconds"
        )
        .buckets(vec![0.001, 0.01, 0.05, 0.1, 0.5, 1.0, 2.0, 5.0, 10.0]),
        &["method", "path"]
    ).expect("Failed to create http_request_duration_seconds metric");

    // Dataset Metrics
    pub static ref DATASET_LOADS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_dataset_loads_total"), "Dataset loads by outcome"),
        &["outcome"]
    ).expect("Failed to create dataset_loads_total metric");

    pub static ref DATASET_LOAD_DURATION_SECONDS: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            format!("{PREFIX}_dataset_load_duration_seconds"),
            "Dataset load duration in seconds"
        )
        .buckets(vec![0.01, 0.05, 0.1, 0.5, 1.0, 5.0, 10.0, 30.0, 60.0]),
        &["outcome"]
    ).expect("Failed to create dataset_load_duration_seconds metric");

    pub static ref DATASET_RECORDS: GaugeVec = GaugeVec::new(
        Opts::new(format!("{PREFIX}_dataset_records"), "Records in the cached dataset"),
        &["collection"]
    ).expect("Failed to create dataset_records metric");

    // Monitor API Metrics
    pub static ref MONITOR_API_ERRORS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_monitor_api_errors_total"), "Failed monitor API calls"),
        &["operation"]
    ).expect("Failed to create monitor_api_errors_total metric");
}

/// Initialize all metrics and register them with the Prometheus registry
pub fn init_metrics() {
    // Register all metrics - ignore errors if already registered (for tests)
    let _ = REGISTRY.register(Box::new(HTTP_REQUESTS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(HTTP_REQUEST_DURATION_SECONDS.clone()));
    let _ = REGISTRY.register(Box::new(DATASET_LOADS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(DATASET_LOAD_DURATION_SECONDS.clone()));
    let _ = REGISTRY.register(Box::new(DATASET_RECORDS.clone()));
    let _ = REGISTRY.register(Box::new(MONITOR_API_ERRORS_TOTAL.clone()));

    tracing::info!("Metrics system initialized successfully");
}

/// Collapses campaign ids so per-campaign routes share one label.
pub fn route_label(path: &str) -> String {
    const CAMPAIGNS: &str = "/v1/insights/campaigns/";
    match path.strip_prefix(CAMPAIGNS) {
        Some(rest) => {
            let mut segments = rest.splitn(2, '/');
            let id = segments.next().unwrap_or_default();
            if id.is_empty() || id == "latest" || id == "active" {
                return path.to_string();
            }
            match segments.next() {
                Some(tail) => format!("{CAMPAIGNS}{{id}}/{tail}"),
                None => format!("{CAMPAIGNS}{{id}}"),
            }
        }
        None => path.to_string(),
    }
}

/// Record an HTTP request
pub fn record_http_request(method: &str, path: &str, status: u16, duration: Duration) {
    let route = route_label(path);
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, &route, &status.to_string()])
        .inc();

    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[method, &route])
        .observe(duration.as_secs_f64());
}

/// Record the outcome of a dataset load ("loaded", "illustrative" or "kept")
pub fn record_dataset_load(outcome: &str, duration: Duration) {
    DATASET_LOADS_TOTAL.with_label_values(&[outcome]).inc();
    DATASET_LOAD_DURATION_SECONDS
        .with_label_values(&[outcome])
        .observe(duration.as_secs_f64());
}

/// Publish the record counts of the dataset now being served
pub fn set_dataset_records(counts: &DatasetCounts) {
    DATASET_RECORDS
        .with_label_values(&["campaigns"])
        .set(counts.campaigns as f64);
    DATASET_RECORDS
        .with_label_values(&["metrics"])
        .set(counts.metrics as f64);
    DATASET_RECORDS
        .with_label_values(&["assets"])
        .set(counts.assets as f64);
    DATASET_RECORDS
        .with_label_values(&["sensors"])
        .set(counts.sensors as f64);
    DATASET_RECORDS
        .with_label_values(&["models"])
        .set(counts.models as f64);
}

pub fn record_monitor_api_error(operation: &str) {
    MONITOR_API_ERRORS_TOTAL
        .with_label_values(&[operation])
        .inc();
}

/// Handler for the /metrics endpoint
pub async fn metrics_handler() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();

    let mut buffer = vec![];
    match encoder.encode(&metric_families, &mut buffer) {
        Ok(()) => {
            let response = String::from_utf8(buffer).unwrap_or_default();
            (StatusCode::OK, response)
        }
        Err(e) => {
            tracing::error!("Failed to encode metrics: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to encode metrics: {}", e),
            )
        }
    }
}
