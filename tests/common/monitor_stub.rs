//! Stub monitor API
//!
//! Mimics the monitor service: bearer-token auth, FastAPI-style
//! `{"detail": ...}` error bodies, camelCase payloads.

use super::constants::MONITOR_TOKEN;
use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

#[derive(Default)]
pub struct StubRecorder {
    /// `hours` of the last metric history request
    pub last_history_hours: Option<u32>,
    pub retrain_requests: usize,
}

#[derive(Clone)]
struct StubState {
    recorder: Arc<Mutex<StubRecorder>>,
    has_model_status: bool,
}

#[derive(Deserialize)]
struct HistoryQuery {
    hours: Option<u32>,
}

fn detail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "detail": message }))).into_response()
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {}", MONITOR_TOKEN))
        .unwrap_or(false)
}

async fn sensors(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return detail(StatusCode::UNAUTHORIZED, "Invalid token");
    }
    Json(json!([
        {
            "id": "sensor-a",
            "name": "data_freshness",
            "status": "OK",
            "lastRun": "2024-05-01T10:00:00.000123",
            "metrics": [
                {"accuracy": 0.91, "latency": 120.0, "throughput": 55.0, "timestamp": "2024-05-01T09:00:00"}
            ]
        },
        {
            "id": "sensor-b",
            "name": "api_latency",
            "status": "FAIL",
            "lastRun": "2024-05-01T10:05:00+00:00",
            "metrics": null
        }
    ]))
    .into_response()
}

async fn metric_history(
    State(state): State<StubState>,
    headers: HeaderMap,
    Query(query): Query<HistoryQuery>,
) -> Response {
    if !authorized(&headers) {
        return detail(StatusCode::UNAUTHORIZED, "Invalid token");
    }
    state.recorder.lock().unwrap().last_history_hours = query.hours;
    Json(json!([
        {"accuracy": 0.90, "latency": 130.0, "throughput": 50.0, "timestamp": "2024-05-01T08:00:00"},
        {"accuracy": 0.92, "latency": 110.0, "throughput": 58.0, "timestamp": "2024-05-01T09:00:00"}
    ]))
    .into_response()
}

async fn retrain(State(state): State<StubState>, headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return detail(StatusCode::UNAUTHORIZED, "Invalid token");
    }
    let mut recorder = state.recorder.lock().unwrap();
    recorder.retrain_requests += 1;
    Json(json!({ "jobId": format!("job-{}", recorder.retrain_requests) })).into_response()
}

async fn model_status(State(state): State<StubState>, headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return detail(StatusCode::UNAUTHORIZED, "Invalid token");
    }
    if !state.has_model_status {
        return detail(StatusCode::NOT_FOUND, "No model status found");
    }
    Json(json!({
        "status": "healthy",
        "lastTrained": "2024-04-30T22:00:00+00:00",
        "metrics": {"accuracy": 0.93, "latency": 98.0, "throughput": 61.0}
    }))
    .into_response()
}

async fn retraining_jobs(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return detail(StatusCode::UNAUTHORIZED, "Invalid token");
    }
    Json(json!([
        {"id": "job-2", "status": "running", "startedAt": "2024-05-01T10:00:00", "completedAt": null, "errorMessage": null},
        {"id": "job-1", "status": "failed", "startedAt": "2024-04-30T10:00:00", "completedAt": "2024-04-30T10:20:00", "errorMessage": "OOM"}
    ]))
    .into_response()
}

/// Running stub monitor API, shut down on drop.
pub struct MonitorStub {
    pub base_url: String,
    pub recorder: Arc<Mutex<StubRecorder>>,
    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl MonitorStub {
    pub async fn spawn(has_model_status: bool) -> Self {
        let recorder = Arc::new(Mutex::new(StubRecorder::default()));
        let state = StubState {
            recorder: recorder.clone(),
            has_model_status,
        };

        let app = Router::new()
            .route("/api/sensors", get(sensors))
            .route("/api/metrics/history", get(metric_history))
            .route("/api/retrain", post(retrain))
            .route("/api/model/status", get(model_status))
            .route("/api/retraining/jobs", get(retraining_jobs))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Monitor stub failed");
        });

        Self {
            base_url: format!("http://127.0.0.1:{}", port),
            recorder,
            _shutdown_tx: Some(shutdown_tx),
        }
    }
}

impl Drop for MonitorStub {
    fn drop(&mut self) {
        if let Some(tx) = self._shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
