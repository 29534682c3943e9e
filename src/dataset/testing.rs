//! Record builders shared by unit tests.

use super::*;
use chrono::{DateTime, Duration, TimeZone, Utc};

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
}

/// Active campaign spanning `base_time() ± 10 days`, created at `base_time()`.
pub fn campaign(id: &str, brand: &str) -> Campaign {
    Campaign {
        id: CampaignId::from(id),
        name: format!("{brand} {id}"),
        brand: brand.to_string(),
        industry: "Tech".to_string(),
        campaign_type: "Digital".to_string(),
        region: None,
        start_date: base_time() - Duration::days(10),
        end_date: base_time() + Duration::days(10),
        budget: 100_000.0,
        status: CampaignStatus::Active,
        tenant: "ces".to_string(),
        created_at: base_time(),
    }
}

/// Metric dated `base_time() + day` days, engagement is half the ROI.
pub fn metric(id: &str, campaign_id: &str, day: i64, roi: f64, reach: i64) -> PerformanceMetric {
    PerformanceMetric {
        id: id.to_string(),
        campaign_id: CampaignId::from(campaign_id),
        date: base_time() + Duration::days(day),
        roi,
        engagement_rate: roi / 2.0,
        reach,
        ctr: 1.0,
        conversion_rate: 2.0,
        sentiment_score: 0.5,
        brand_recall: None,
        impressions: None,
        clicks: None,
        cost_per_acquisition: None,
        video_completion_rate: None,
        share_rate: None,
        save_rate: None,
        tenant: "ces".to_string(),
    }
}

pub fn asset(id: &str, campaign_id: &str, performance_score: f64) -> CreativeAsset {
    CreativeAsset {
        id: id.to_string(),
        campaign_id: CampaignId::from(campaign_id),
        name: format!("asset {id}"),
        asset_type: "image".to_string(),
        format: "png".to_string(),
        size_mb: 1.5,
        dimensions: None,
        duration_seconds: None,
        emotional_trigger: None,
        brand_integration: None,
        visual_distinctness: 0.5,
        text_readability: 0.5,
        color_harmony: 0.5,
        performance_score,
        a_b_test_variant: None,
        tenant: "ces".to_string(),
        created_at: None,
    }
}

/// Sensor reading taken `base_time() + hour` hours.
pub fn sensor(id: &str, sensor_type: &str, hour: i64, status: SensorStatus) -> SensorReading {
    SensorReading {
        id: id.to_string(),
        sensor_type: sensor_type.to_string(),
        timestamp: base_time() + Duration::hours(hour),
        value: 1.0,
        status,
        tenant: "ces".to_string(),
        metadata: serde_json::Value::Null,
    }
}

pub fn model(id: &str, model_type: &str, day: i64, accuracy: f64) -> ModelPerformance {
    ModelPerformance {
        id: id.to_string(),
        model_type: model_type.to_string(),
        version: "v1.0.0".to_string(),
        date: base_time() + Duration::days(day),
        accuracy,
        precision: 0.9,
        recall: 0.8,
        f1_score: 0.85,
        latency_ms: 120.0,
        throughput_rps: None,
        training_time_hours: None,
        training_data_size: None,
        feature_count: None,
        last_retrained: None,
        status: "active".to_string(),
        tenant: "ces".to_string(),
    }
}
