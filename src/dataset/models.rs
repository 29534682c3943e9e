use super::timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a [`Campaign`], also used as foreign key by metrics and assets.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CampaignId(String);

impl CampaignId {
    pub fn new(id: impl Into<String>) -> Self {
        CampaignId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CampaignId {
    fn from(value: &str) -> Self {
        CampaignId(value.to_owned())
    }
}

impl From<String> for CampaignId {
    fn from(value: String) -> Self {
        CampaignId(value)
    }
}

impl fmt::Display for CampaignId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CampaignStatus {
    Active,
    Completed,
    Paused,
    Planning,
    #[serde(other)]
    Other,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    #[serde(rename = "campaign_id")]
    pub id: CampaignId,
    #[serde(default)]
    pub name: String,
    pub brand: String,
    #[serde(default)]
    pub industry: String,
    #[serde(rename = "type", default)]
    pub campaign_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(with = "timestamp")]
    pub start_date: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub budget: f64,
    pub status: CampaignStatus,
    #[serde(rename = "tenant_id", default)]
    pub tenant: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

/// One day of performance figures for a campaign.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetric {
    #[serde(rename = "metric_id")]
    pub id: String,
    pub campaign_id: CampaignId,
    #[serde(with = "timestamp")]
    pub date: DateTime<Utc>,
    pub roi: f64,
    pub engagement_rate: f64,
    pub reach: i64,
    #[serde(default)]
    pub ctr: f64,
    #[serde(default)]
    pub conversion_rate: f64,
    #[serde(default)]
    pub sentiment_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_recall: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impressions: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clicks: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_per_acquisition: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_completion_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub save_rate: Option<f64>,
    #[serde(rename = "tenant_id", default)]
    pub tenant: String,
}

/// A creative file attached to a campaign, with the scores produced by the
/// creative feature models.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreativeAsset {
    #[serde(rename = "asset_id")]
    pub id: String,
    pub campaign_id: CampaignId,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub asset_type: String,
    pub format: String,
    #[serde(default)]
    pub size_mb: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotional_trigger: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_integration: Option<String>,
    #[serde(default)]
    pub visual_distinctness: f64,
    #[serde(default)]
    pub text_readability: f64,
    #[serde(default)]
    pub color_harmony: f64,
    pub performance_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a_b_test_variant: Option<String>,
    #[serde(rename = "tenant_id", default)]
    pub tenant: String,
    #[serde(default, with = "timestamp::option", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SensorStatus {
    Ok,
    Warn,
    Fail,
    #[serde(other)]
    Unknown,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    #[serde(rename = "sensor_id")]
    pub id: String,
    pub sensor_type: String,
    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,
    pub value: f64,
    pub status: SensorStatus,
    #[serde(rename = "tenant_id", default)]
    pub tenant: String,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub metadata: serde_json::Value,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelPerformance {
    #[serde(rename = "model_id")]
    pub id: String,
    pub model_type: String,
    pub version: String,
    #[serde(with = "timestamp")]
    pub date: DateTime<Utc>,
    pub accuracy: f64,
    #[serde(default)]
    pub precision: f64,
    #[serde(default)]
    pub recall: f64,
    #[serde(default)]
    pub f1_score: f64,
    #[serde(default)]
    pub latency_ms: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub throughput_rps: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub training_time_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub training_data_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_count: Option<u32>,
    #[serde(default, with = "timestamp::option", skip_serializing_if = "Option::is_none")]
    pub last_retrained: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: String,
    #[serde(rename = "tenant_id", default)]
    pub tenant: String,
}
