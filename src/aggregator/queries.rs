//! Read-only analytical queries over a [`Dataset`].
//!
//! Every function tolerates empty collections and dangling references, and
//! never divides by zero.

use super::views::{BrandPerformance, DashboardSummary, SensorStatusView, TrendPoint};
use super::MetricsSource;
use crate::dataset::{
    Campaign, CampaignId, CampaignStatus, CreativeAsset, Dataset, ModelPerformance,
    PerformanceMetric, SensorReading, SensorStatus,
};
use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// Metric rows per campaign considered by [`brand_performance`].
pub const BRAND_WINDOW_ROWS: usize = 7;

/// Metric rows considered by the summary averages: the last rows in input order.
pub const SUMMARY_METRICS_CAP: usize = 1000;

pub const DEFAULT_TREND_DAYS: i64 = 30;

fn mean(sum: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

pub fn latest_campaigns(dataset: &Dataset, limit: i64) -> Vec<Campaign> {
    if limit <= 0 {
        return Vec::new();
    }
    let mut campaigns: Vec<&Campaign> = dataset.campaigns().iter().collect();
    // Stable, so equal timestamps keep input order.
    campaigns.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    campaigns
        .into_iter()
        .take(usize::try_from(limit).unwrap_or(usize::MAX))
        .cloned()
        .collect()
}

fn is_active_at(campaign: &Campaign, now: DateTime<Utc>) -> bool {
    campaign.status == CampaignStatus::Active
        && campaign.start_date <= now
        && now <= campaign.end_date
}

pub fn active_campaigns(dataset: &Dataset, now: DateTime<Utc>) -> Vec<Campaign> {
    dataset
        .campaigns()
        .iter()
        .filter(|c| is_active_at(c, now))
        .cloned()
        .collect()
}

pub fn campaign_metrics(dataset: &Dataset, campaign_id: &CampaignId) -> Vec<PerformanceMetric> {
    let mut metrics: Vec<PerformanceMetric> = dataset.metrics_for(campaign_id).cloned().collect();
    metrics.sort_by_key(|m| m.date);
    metrics
}

/// Assets of a campaign, best performing first.
pub fn campaign_assets(dataset: &Dataset, campaign_id: &CampaignId) -> Vec<CreativeAsset> {
    let mut assets: Vec<CreativeAsset> = dataset.assets_for(campaign_id).cloned().collect();
    assets.sort_by(|a, b| b.performance_score.total_cmp(&a.performance_score));
    assets
}

#[derive(Default)]
struct BrandAccumulator {
    campaigns: usize,
    rows: usize,
    roi_sum: f64,
    engagement_sum: f64,
    reach_sum: i64,
}

/// Rolls campaigns up by brand. For each campaign only its
/// [`BRAND_WINDOW_ROWS`] most recent metric rows are considered; averages are
/// taken over all the rows collected for the brand.
pub fn brand_performance(dataset: &Dataset) -> Vec<BrandPerformance> {
    let mut rollups: BTreeMap<&str, BrandAccumulator> = BTreeMap::new();

    for campaign in dataset.campaigns() {
        let acc = rollups.entry(campaign.brand.as_str()).or_default();
        acc.campaigns += 1;

        let mut recent: Vec<&PerformanceMetric> = dataset.metrics_for(&campaign.id).collect();
        recent.sort_by(|a, b| b.date.cmp(&a.date));
        for metric in recent.into_iter().take(BRAND_WINDOW_ROWS) {
            acc.rows += 1;
            acc.roi_sum += metric.roi;
            acc.engagement_sum += metric.engagement_rate;
            acc.reach_sum = acc.reach_sum.saturating_add(metric.reach);
        }
    }

    rollups
        .into_iter()
        .map(|(brand, acc)| BrandPerformance {
            brand: brand.to_string(),
            campaigns: acc.campaigns,
            avg_roi: mean(acc.roi_sum, acc.rows),
            avg_engagement: mean(acc.engagement_sum, acc.rows),
            total_reach: acc.reach_sum,
            metric_rows: acc.rows,
        })
        .collect()
}

/// Latest reading per sensor type. On equal timestamps the earlier row wins.
fn latest_sensor_readings(dataset: &Dataset) -> BTreeMap<&str, &SensorReading> {
    let mut latest: BTreeMap<&str, &SensorReading> = BTreeMap::new();
    for reading in dataset.sensors() {
        match latest.entry(reading.sensor_type.as_str()) {
            Entry::Vacant(entry) => {
                entry.insert(reading);
            }
            Entry::Occupied(mut entry) => {
                if reading.timestamp > entry.get().timestamp {
                    entry.insert(reading);
                }
            }
        }
    }
    latest
}

pub fn sensor_display_name(sensor_type: &str) -> String {
    sensor_type.replace('_', " ").to_uppercase()
}

/// Signed percentage with one decimal, e.g. `+3.2%`, `-7.3%`, `+0.0%`.
pub fn format_trend(delta: f64) -> String {
    let scaled = delta * 10.0;
    let rounded = if scaled.is_finite() {
        scaled.round() / 10.0
    } else {
        0.0
    };
    // Avoid "-0.0%".
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{:+.1}%", rounded)
}

pub fn sensor_status(dataset: &Dataset, metrics: &dyn MetricsSource) -> Vec<SensorStatusView> {
    latest_sensor_readings(dataset)
        .into_values()
        .map(|reading| SensorStatusView {
            sensor_type: reading.sensor_type.clone(),
            name: sensor_display_name(&reading.sensor_type),
            status: reading.status,
            value: reading.value,
            timestamp: reading.timestamp,
            trend: format_trend(metrics.sensor_trend(&reading.sensor_type)),
        })
        .collect()
}

/// Latest row per model type. On equal dates the earlier row wins.
pub fn model_performance(dataset: &Dataset) -> Vec<ModelPerformance> {
    let mut latest: BTreeMap<&str, &ModelPerformance> = BTreeMap::new();
    for row in dataset.models() {
        match latest.entry(row.model_type.as_str()) {
            Entry::Vacant(entry) => {
                entry.insert(row);
            }
            Entry::Occupied(mut entry) => {
                if row.date > entry.get().date {
                    entry.insert(row);
                }
            }
        }
    }
    latest.into_values().cloned().collect()
}

#[derive(Default)]
struct DayAccumulator {
    rows: usize,
    roi_sum: f64,
    engagement_sum: f64,
    reach_sum: i64,
}

/// Daily series over metrics dated on or after `now - days`, grouped by UTC
/// calendar date, ascending.
pub fn performance_trends(dataset: &Dataset, days: i64, now: DateTime<Utc>) -> Vec<TrendPoint> {
    if days <= 0 {
        return Vec::new();
    }
    // A window reaching past the representable range includes everything.
    let cutoff = TimeDelta::try_days(days).and_then(|window| now.checked_sub_signed(window));

    let mut by_day: BTreeMap<NaiveDate, DayAccumulator> = BTreeMap::new();
    for metric in dataset.metrics() {
        if cutoff.is_some_and(|cutoff| metric.date < cutoff) {
            continue;
        }
        let acc = by_day.entry(metric.date.date_naive()).or_default();
        acc.rows += 1;
        acc.roi_sum += metric.roi;
        acc.engagement_sum += metric.engagement_rate;
        acc.reach_sum = acc.reach_sum.saturating_add(metric.reach);
    }

    by_day
        .into_iter()
        .map(|(date, acc)| TrendPoint {
            date,
            avg_roi: mean(acc.roi_sum, acc.rows),
            avg_engagement: mean(acc.engagement_sum, acc.rows),
            total_reach: acc.reach_sum,
            samples: acc.rows,
        })
        .collect()
}

pub fn dashboard_summary(
    dataset: &Dataset,
    now: DateTime<Utc>,
    metrics: &dyn MetricsSource,
) -> DashboardSummary {
    let all_metrics = dataset.metrics();
    let recent = &all_metrics[all_metrics.len().saturating_sub(SUMMARY_METRICS_CAP)..];
    let roi_sum: f64 = recent.iter().map(|m| m.roi).sum();
    let engagement_sum: f64 = recent.iter().map(|m| m.engagement_rate).sum();

    let latest_sensors = latest_sensor_readings(dataset);
    let pipeline_health = if latest_sensors.is_empty() {
        100
    } else {
        let ok = latest_sensors
            .values()
            .filter(|r| r.status == SensorStatus::Ok)
            .count();
        (100.0 * ok as f64 / latest_sensors.len() as f64).round() as u32
    };

    let counts = dataset.counts();
    DashboardSummary {
        total_campaigns: counts.campaigns,
        total_metrics: counts.metrics,
        total_assets: counts.assets,
        total_sensors: counts.sensors,
        total_models: counts.models,
        active_campaigns: dataset
            .campaigns()
            .iter()
            .filter(|c| is_active_at(c, now))
            .count(),
        avg_roi: mean(roi_sum, recent.len()),
        avg_engagement: mean(engagement_sum, recent.len()),
        pipeline_health,
        data_freshness: metrics.data_freshness(),
        model_accuracy: metrics.model_accuracy(),
        system_latency_ms: metrics.system_latency_ms(),
    }
}
