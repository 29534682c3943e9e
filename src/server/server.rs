use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tower_http::services::ServeDir;
use tracing::{error, info};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::loading::load_or_fallback;
use super::metrics::{metrics_handler, record_monitor_api_error};
use super::{log_requests, state::*, ServerConfig};
use crate::aggregator::{AggregatorState, LoadOutcome, DEFAULT_TREND_DAYS};
use crate::dataset::{CampaignId, DatasetCounts};
use crate::monitor_api::{MonitorApiClient, MonitorApiError};

const DEFAULT_LATEST_LIMIT: i64 = 10;
const DEFAULT_HISTORY_HOURS: u32 = 24;

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub dataset: AggregatorState,
    pub source: String,
    pub counts: DatasetCounts,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

#[derive(Deserialize, Debug)]
struct LatestCampaignsQuery {
    pub limit: Option<i64>,
}

#[derive(Deserialize, Debug)]
struct TrendsQuery {
    pub days: Option<i64>,
}

#[derive(Deserialize, Debug)]
struct MetricHistoryQuery {
    pub hours: Option<u32>,
}

#[derive(Serialize, Debug)]
struct ReloadResponse {
    pub loaded: bool,
    pub reason: Option<String>,
    pub counts: DatasetCounts,
}

#[derive(Serialize, Debug)]
struct ErrorBody {
    pub error: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
        .into_response()
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        dataset: state.aggregator.state(),
        source: state.aggregator.source().describe(),
        counts: state.aggregator.counts(),
    };
    Json(stats)
}

// =============================================================================
// Insights
// =============================================================================

async fn get_summary(State(aggregator): State<GuardedAggregator>) -> impl IntoResponse {
    Json(aggregator.dashboard_summary())
}

async fn get_raw_summary(State(aggregator): State<GuardedAggregator>) -> impl IntoResponse {
    Json(aggregator.summary_blob())
}

async fn get_latest_campaigns(
    State(aggregator): State<GuardedAggregator>,
    Query(query): Query<LatestCampaignsQuery>,
) -> impl IntoResponse {
    Json(aggregator.latest_campaigns(query.limit.unwrap_or(DEFAULT_LATEST_LIMIT)))
}

async fn get_active_campaigns(State(aggregator): State<GuardedAggregator>) -> impl IntoResponse {
    Json(aggregator.active_campaigns())
}

async fn get_campaign(
    State(aggregator): State<GuardedAggregator>,
    Path(id): Path<String>,
) -> Response {
    match aggregator.campaign(&CampaignId::from(id)) {
        Some(campaign) => Json(campaign).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn get_campaign_metrics(
    State(aggregator): State<GuardedAggregator>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    Json(aggregator.campaign_metrics(&CampaignId::from(id)))
}

async fn get_campaign_assets(
    State(aggregator): State<GuardedAggregator>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    Json(aggregator.campaign_assets(&CampaignId::from(id)))
}

async fn get_campaign_benchmarks(
    State(aggregator): State<GuardedAggregator>,
    Path(id): Path<String>,
) -> Response {
    match aggregator.campaign_benchmarks(&CampaignId::from(id)) {
        Some(report) => Json(report).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn get_brands(State(aggregator): State<GuardedAggregator>) -> impl IntoResponse {
    Json(aggregator.brand_performance())
}

async fn get_sensors(State(aggregator): State<GuardedAggregator>) -> impl IntoResponse {
    Json(aggregator.sensor_status())
}

async fn get_models(State(aggregator): State<GuardedAggregator>) -> impl IntoResponse {
    Json(aggregator.model_performance())
}

async fn get_trends(
    State(aggregator): State<GuardedAggregator>,
    Query(query): Query<TrendsQuery>,
) -> impl IntoResponse {
    Json(aggregator.performance_trends(query.days.unwrap_or(DEFAULT_TREND_DAYS)))
}

async fn post_reload(State(aggregator): State<GuardedAggregator>) -> impl IntoResponse {
    let outcome = load_or_fallback(&aggregator).await;
    let reason = match outcome {
        LoadOutcome::Loaded(_) => None,
        LoadOutcome::Fallback { reason } => Some(reason),
    };
    Json(ReloadResponse {
        loaded: reason.is_none(),
        reason,
        counts: aggregator.counts(),
    })
}

// =============================================================================
// Monitor API proxy
// =============================================================================

fn monitor_error_response(operation: &str, err: MonitorApiError) -> Response {
    record_monitor_api_error(operation);
    error!("Monitor API {} failed: {}", operation, err);
    let status = match &err {
        MonitorApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
        _ => StatusCode::BAD_GATEWAY,
    };
    error_response(status, err.to_string())
}

fn monitor_or_unavailable(monitor: OptionalMonitorClient) -> Result<Arc<MonitorApiClient>, Response> {
    monitor.ok_or_else(|| {
        error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            "Monitor API is not configured",
        )
    })
}

fn into_monitor_response<T: Serialize>(
    operation: &str,
    result: Result<T, MonitorApiError>,
) -> Response {
    match result {
        Ok(value) => Json(value).into_response(),
        Err(err) => monitor_error_response(operation, err),
    }
}

async fn get_monitor_sensors(State(monitor): State<OptionalMonitorClient>) -> Response {
    match monitor_or_unavailable(monitor) {
        Ok(client) => into_monitor_response("sensors", client.sensors().await),
        Err(response) => response,
    }
}

async fn get_monitor_metric_history(
    State(monitor): State<OptionalMonitorClient>,
    Query(query): Query<MetricHistoryQuery>,
) -> Response {
    let hours = query.hours.unwrap_or(DEFAULT_HISTORY_HOURS);
    match monitor_or_unavailable(monitor) {
        Ok(client) => into_monitor_response("metric_history", client.metric_history(hours).await),
        Err(response) => response,
    }
}

async fn post_monitor_retrain(State(monitor): State<OptionalMonitorClient>) -> Response {
    match monitor_or_unavailable(monitor) {
        Ok(client) => into_monitor_response("retrain", client.trigger_retrain().await),
        Err(response) => response,
    }
}

async fn get_monitor_model_status(State(monitor): State<OptionalMonitorClient>) -> Response {
    match monitor_or_unavailable(monitor) {
        Ok(client) => into_monitor_response("model_status", client.model_status().await),
        Err(response) => response,
    }
}

async fn get_monitor_retraining_jobs(State(monitor): State<OptionalMonitorClient>) -> Response {
    match monitor_or_unavailable(monitor) {
        Ok(client) => into_monitor_response("retraining_jobs", client.retraining_jobs().await),
        Err(response) => response,
    }
}

pub fn make_app(
    config: ServerConfig,
    aggregator: GuardedAggregator,
    monitor: OptionalMonitorClient,
) -> Router {
    let state = ServerState {
        config: config.clone(),
        start_time: Instant::now(),
        aggregator,
        monitor,
    };

    let insights_routes: Router = Router::new()
        .route("/summary", get(get_summary))
        .route("/summary/raw", get(get_raw_summary))
        .route("/campaigns/latest", get(get_latest_campaigns))
        .route("/campaigns/active", get(get_active_campaigns))
        .route("/campaigns/{id}", get(get_campaign))
        .route("/campaigns/{id}/metrics", get(get_campaign_metrics))
        .route("/campaigns/{id}/assets", get(get_campaign_assets))
        .route("/campaigns/{id}/benchmarks", get(get_campaign_benchmarks))
        .route("/brands", get(get_brands))
        .route("/sensors", get(get_sensors))
        .route("/models", get(get_models))
        .route("/trends", get(get_trends))
        .route("/reload", post(post_reload))
        .with_state(state.clone());

    let monitor_routes: Router = Router::new()
        .route("/sensors", get(get_monitor_sensors))
        .route("/metrics/history", get(get_monitor_metric_history))
        .route("/retrain", post(post_monitor_retrain))
        .route("/model/status", get(get_monitor_model_status))
        .route("/retraining/jobs", get(get_monitor_retraining_jobs))
        .with_state(state.clone());

    let home_router: Router = match config.frontend_dir_path {
        Some(frontend_path) => {
            let static_files_service =
                ServeDir::new(frontend_path).append_index_html_on_directories(true);
            Router::new().fallback_service(static_files_service)
        }
        None => Router::new()
            .route("/", get(home))
            .with_state(state.clone()),
    };

    home_router
        .nest("/v1/insights", insights_routes)
        .nest("/v1/monitor", monitor_routes)
        .layer(middleware::from_fn_with_state(state, log_requests))
}

fn make_metrics_app() -> Router {
    Router::new().route("/metrics", get(metrics_handler))
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(err) => error!("Failed to listen for shutdown signal: {}", err),
    }
}

pub async fn run_server(
    config: ServerConfig,
    aggregator: GuardedAggregator,
    monitor: OptionalMonitorClient,
) -> Result<()> {
    let port = config.port;
    let metrics_port = config.metrics_port;
    let app = make_app(config, aggregator, monitor);

    let metrics_listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", metrics_port))
        .await
        .with_context(|| format!("Failed to bind metrics port {}", metrics_port))?;
    tokio::spawn(async move {
        if let Err(err) = axum::serve(metrics_listener, make_metrics_app()).await {
            error!("Metrics server stopped: {}", err);
        }
    });
    info!("Metrics available on port {}", metrics_port);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;
    info!("Listening on port {}", port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
