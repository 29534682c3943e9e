//! Test fixture dataset
//!
//! Writes the six dataset resources into a temp directory. Dates are anchored
//! on the current time so "active" and "trend window" checks stay valid.

use super::constants::*;
use chrono::{DateTime, Duration, Utc};
use serde_json::json;
use tempfile::TempDir;

fn ts(value: DateTime<Utc>) -> String {
    value.to_rfc3339()
}

/// Naive ISO-8601, as written by some exporters.
fn naive(value: DateTime<Utc>) -> String {
    value.format("%Y-%m-%dT%H:%M:%S").to_string()
}

fn campaign(
    id: &str,
    brand: &str,
    status: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    created: DateTime<Utc>,
) -> serde_json::Value {
    json!({
        "campaign_id": id,
        "name": format!("{brand} {id}"),
        "brand": brand,
        "industry": "Sportswear",
        "type": "Digital",
        "region": "NA",
        "start_date": ts(start),
        "end_date": ts(end),
        "budget": 250000.0,
        "status": status,
        "tenant_id": "ces",
        "created_at": naive(created),
    })
}

fn metric(id: &str, campaign_id: &str, date: DateTime<Utc>, roi: f64, reach: i64) -> serde_json::Value {
    json!({
        "metric_id": id,
        "campaign_id": campaign_id,
        "date": naive(date),
        "roi": roi,
        "engagement_rate": roi * 2.0,
        "reach": reach,
        "ctr": 2.5,
        "conversion_rate": 1.5,
        "sentiment_score": 0.6,
        "impressions": reach * 3,
        "tenant_id": "ces",
    })
}

fn asset(id: &str, campaign_id: &str, score: f64) -> serde_json::Value {
    json!({
        "asset_id": id,
        "campaign_id": campaign_id,
        "name": format!("{id}.png"),
        "type": "image",
        "format": "png",
        "size_mb": 2.4,
        "dimensions": "1080x1080",
        "emotional_trigger": "joy",
        "brand_integration": "subtle",
        "visual_distinctness": 0.7,
        "text_readability": 0.8,
        "color_harmony": 0.9,
        "performance_score": score,
        "tenant_id": "ces",
    })
}

fn sensor(id: &str, sensor_type: &str, at: DateTime<Utc>, value: f64, status: &str) -> serde_json::Value {
    json!({
        "sensor_id": id,
        "sensor_type": sensor_type,
        "timestamp": naive(at),
        "value": value,
        "status": status,
        "tenant_id": "ces",
        "metadata": {"source": "fixture"},
    })
}

fn model(id: &str, model_type: &str, date: DateTime<Utc>, accuracy: f64) -> serde_json::Value {
    json!({
        "model_id": id,
        "model_type": model_type,
        "version": "v1.2.0",
        "date": naive(date),
        "accuracy": accuracy,
        "precision": 0.88,
        "recall": 0.84,
        "f1_score": 0.86,
        "latency_ms": 140.0,
        "status": "active",
        "tenant_id": "ces",
    })
}

fn write(dir: &TempDir, name: &str, value: &serde_json::Value) -> anyhow::Result<()> {
    std::fs::write(dir.path().join(name), serde_json::to_vec_pretty(value)?)?;
    Ok(())
}

/// Creates the fixture dataset in a fresh temp directory.
pub fn create_test_dataset() -> anyhow::Result<TempDir> {
    let dir = TempDir::new()?;
    let now = Utc::now();
    let days = Duration::days;
    let hours = Duration::hours;

    let campaigns = json!([
        campaign(NIKE_CAMPAIGN_1_ID, NIKE_BRAND, "Active", now - days(10), now + days(10), now - days(3)),
        campaign(NIKE_CAMPAIGN_2_ID, NIKE_BRAND, "Active", now - days(5), now + days(20), now - days(1)),
        campaign(NIKE_CAMPAIGN_3_ID, NIKE_BRAND, "Paused", now - days(5), now + days(20), now - days(7)),
        campaign(APPLE_CAMPAIGN_ID, APPLE_BRAND, "Completed", now - days(60), now - days(30), now - days(65)),
    ]);

    let metrics = json!([
        metric("metric-1", NIKE_CAMPAIGN_1_ID, now - days(2), 3.0, 100),
        metric("metric-2", NIKE_CAMPAIGN_1_ID, now - days(1), 5.0, 200),
        metric("metric-3", APPLE_CAMPAIGN_ID, now - days(40), 2.0, 50),
    ]);

    let assets = json!([
        asset("asset-banner", NIKE_CAMPAIGN_1_ID, 0.42),
        asset(TOP_ASSET_ID, NIKE_CAMPAIGN_1_ID, 0.91),
        asset("asset-apple", APPLE_CAMPAIGN_ID, 0.66),
    ]);

    let sensors = json!([
        sensor("sensor-1", "data_freshness", now - hours(2), 99.0, "OK"),
        sensor("sensor-2", "data_freshness", now - hours(1), 41.0, "FAIL"),
        sensor("sensor-3", "api_latency", now - hours(1), 120.0, "OK"),
    ]);

    let models = json!([
        model("model-1", "roi_optimizer", now - days(3), 0.82),
        model("model-2", "roi_optimizer", now - days(1), 0.91),
        model("model-3", "engagement_predictor", now - days(2), 0.87),
    ]);

    let summary = json!({
        "total_campaigns": 4,
        "total_metrics": 3,
        "generated_at": ts(now),
    });

    write(&dir, "campaigns.json", &campaigns)?;
    write(&dir, "performance_metrics.json", &metrics)?;
    write(&dir, "creative_assets.json", &assets)?;
    write(&dir, "sensor_data.json", &sensors)?;
    write(&dir, "model_performance.json", &models)?;
    write(&dir, "dataset_summary.json", &summary)?;

    Ok(dir)
}
