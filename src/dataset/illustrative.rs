//! Fixed illustrative dataset, installed when the real one cannot be fetched
//! so dashboards never render blank.

use super::*;
use chrono::{DateTime, Duration, Utc};

const BRANDS: &[(&str, &str)] = &[
    ("Nike", "Fashion"),
    ("CocaCola", "Food & Beverage"),
    ("Apple", "Tech"),
];

const SENSOR_TYPES: &[(&str, f64)] = &[
    ("data_freshness", 0.97),
    ("model_accuracy", 0.88),
    ("api_latency", 180.0),
    ("data_quality", 0.96),
    ("throughput", 1040.0),
];

const MODEL_TYPES: &[&str] = &["engagement_predictor", "roi_optimizer", "sentiment_analyzer"];

const METRIC_DAYS: i64 = 14;

impl Dataset {
    /// Builds the illustrative dataset with dates anchored on `now`.
    ///
    /// Every campaign except the last one is running at `now`; the last one
    /// is completed so that status filters have something to exclude.
    pub fn illustrative(now: DateTime<Utc>) -> Dataset {
        let mut campaigns = Vec::new();
        let mut metrics = Vec::new();
        let mut assets = Vec::new();

        for (index, (brand, industry)) in BRANDS.iter().enumerate() {
            for variant in 0..2 {
                let ordinal = index * 2 + variant;
                let id = CampaignId::new(format!("demo-campaign-{}", ordinal + 1));
                let completed = ordinal == BRANDS.len() * 2 - 1;
                let start_date = now - Duration::days(30 + ordinal as i64);
                let end_date = if completed {
                    now - Duration::days(1)
                } else {
                    now + Duration::days(30)
                };

                campaigns.push(Campaign {
                    id: id.clone(),
                    name: format!("{} Launch {}", brand, variant + 1),
                    brand: brand.to_string(),
                    industry: industry.to_string(),
                    campaign_type: if variant == 0 { "Digital" } else { "Social Media" }.to_string(),
                    region: Some("Global".to_string()),
                    start_date,
                    end_date,
                    budget: 250_000.0 * (ordinal + 1) as f64,
                    status: if completed {
                        CampaignStatus::Completed
                    } else {
                        CampaignStatus::Active
                    },
                    tenant: "ces".to_string(),
                    created_at: start_date - Duration::days(7 - ordinal as i64),
                });

                for day in 0..METRIC_DAYS {
                    let wave = ((day + ordinal as i64) % 5) as f64;
                    metrics.push(PerformanceMetric {
                        id: format!("demo-metric-{}-{}", ordinal + 1, day + 1),
                        campaign_id: id.clone(),
                        date: now - Duration::days(METRIC_DAYS - day),
                        roi: 2.0 + ordinal as f64 * 0.4 + wave * 0.3,
                        engagement_rate: 3.5 + wave * 0.5,
                        reach: 400_000 + 25_000 * (ordinal as i64 + 1) + 10_000 * wave as i64,
                        ctr: 1.2 + wave * 0.2,
                        conversion_rate: 2.5 + wave * 0.1,
                        sentiment_score: 0.6 + wave * 0.05,
                        brand_recall: None,
                        impressions: None,
                        clicks: None,
                        cost_per_acquisition: None,
                        video_completion_rate: None,
                        share_rate: None,
                        save_rate: None,
                        tenant: "ces".to_string(),
                    });
                }

                for (slot, (asset_type, format)) in
                    [("video", "mp4"), ("banner", "png")].iter().enumerate()
                {
                    assets.push(CreativeAsset {
                        id: format!("demo-asset-{}-{}", ordinal + 1, slot + 1),
                        campaign_id: id.clone(),
                        name: format!("{} {} {}", brand, asset_type, slot + 1),
                        asset_type: asset_type.to_string(),
                        format: format.to_string(),
                        size_mb: 4.0 + slot as f64,
                        dimensions: Some("1920x1080".to_string()),
                        duration_seconds: (slot == 0).then_some(30),
                        emotional_trigger: Some("Joy".to_string()),
                        brand_integration: Some("Moderate".to_string()),
                        visual_distinctness: 0.7,
                        text_readability: 0.8,
                        color_harmony: 0.75,
                        performance_score: 0.55 + 0.05 * ordinal as f64 + 0.1 * slot as f64,
                        a_b_test_variant: None,
                        tenant: "ces".to_string(),
                        created_at: Some(start_date),
                    });
                }
            }
        }

        let mut sensors = Vec::new();
        for (index, (sensor_type, value)) in SENSOR_TYPES.iter().enumerate() {
            for hours_ago in [8_i64, 4, 0] {
                let status = if *sensor_type == "api_latency" && hours_ago == 0 {
                    SensorStatus::Warn
                } else {
                    SensorStatus::Ok
                };
                sensors.push(SensorReading {
                    id: format!("demo-sensor-{}-{}", index + 1, hours_ago),
                    sensor_type: sensor_type.to_string(),
                    timestamp: now - Duration::hours(hours_ago),
                    value: *value,
                    status,
                    tenant: "ces".to_string(),
                    metadata: serde_json::json!({
                        "pipeline": format!("ces_{}_pipeline", sensor_type),
                        "environment": "demo",
                    }),
                });
            }
        }

        let mut models = Vec::new();
        for (index, model_type) in MODEL_TYPES.iter().enumerate() {
            for days_ago in [1_i64, 0] {
                models.push(ModelPerformance {
                    id: format!("demo-model-{}-{}", index + 1, days_ago),
                    model_type: model_type.to_string(),
                    version: format!("v1.{}.{}", index, 1 - days_ago),
                    date: now - Duration::days(days_ago),
                    accuracy: 0.86 - 0.01 * days_ago as f64,
                    precision: 0.88,
                    recall: 0.84,
                    f1_score: 0.86,
                    latency_ms: 90.0 + 20.0 * index as f64,
                    throughput_rps: Some(450.0),
                    training_time_hours: None,
                    training_data_size: None,
                    feature_count: None,
                    last_retrained: Some(now - Duration::days(7)),
                    status: "active".to_string(),
                    tenant: "ces".to_string(),
                });
            }
        }

        let summary = serde_json::json!({
            "generation_timestamp": now.to_rfc3339(),
            "illustrative": true,
            "total_campaigns": campaigns.len(),
            "total_metrics": metrics.len(),
            "total_assets": assets.len(),
            "total_sensors": sensors.len(),
            "total_models": models.len(),
            "brands": BRANDS.iter().map(|(brand, _)| *brand).collect::<Vec<_>>(),
        });

        Dataset::from_parts(DatasetParts {
            campaigns,
            metrics,
            assets,
            sensors,
            models,
            summary,
        })
    }
}
