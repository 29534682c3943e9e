use super::{Campaign, CampaignId, CreativeAsset, ModelPerformance, PerformanceMetric, SensorReading};
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// The raw collections as fetched from a dataset source.
#[derive(Debug, Default, Clone)]
pub struct DatasetParts {
    pub campaigns: Vec<Campaign>,
    pub metrics: Vec<PerformanceMetric>,
    pub assets: Vec<CreativeAsset>,
    pub sensors: Vec<SensorReading>,
    pub models: Vec<ModelPerformance>,
    pub summary: serde_json::Value,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DatasetCounts {
    pub campaigns: usize,
    pub metrics: usize,
    pub assets: usize,
    pub sensors: usize,
    pub models: usize,
}

/// Immutable, indexed view over one loaded dataset.
///
/// Collections keep their input order. Campaign lookups and the
/// campaign -> metrics/assets relations are indexed once at build time.
#[derive(Debug, Default, Clone)]
pub struct Dataset {
    campaigns: Vec<Campaign>,
    metrics: Vec<PerformanceMetric>,
    assets: Vec<CreativeAsset>,
    sensors: Vec<SensorReading>,
    models: Vec<ModelPerformance>,
    summary: serde_json::Value,

    campaign_index: HashMap<CampaignId, usize>,
    metrics_by_campaign: HashMap<CampaignId, Vec<usize>>,
    assets_by_campaign: HashMap<CampaignId, Vec<usize>>,
}

impl Dataset {
    pub fn from_parts(parts: DatasetParts) -> Dataset {
        let DatasetParts {
            campaigns,
            metrics,
            assets,
            sensors,
            models,
            summary,
        } = parts;

        let mut campaign_index = HashMap::with_capacity(campaigns.len());
        for (position, campaign) in campaigns.iter().enumerate() {
            // First occurrence wins for duplicated ids.
            campaign_index.entry(campaign.id.clone()).or_insert(position);
        }

        let mut metrics_by_campaign: HashMap<CampaignId, Vec<usize>> = HashMap::new();
        for (position, metric) in metrics.iter().enumerate() {
            metrics_by_campaign
                .entry(metric.campaign_id.clone())
                .or_default()
                .push(position);
        }

        let mut assets_by_campaign: HashMap<CampaignId, Vec<usize>> = HashMap::new();
        for (position, asset) in assets.iter().enumerate() {
            assets_by_campaign
                .entry(asset.campaign_id.clone())
                .or_default()
                .push(position);
        }

        let dataset = Dataset {
            campaigns,
            metrics,
            assets,
            sensors,
            models,
            summary,
            campaign_index,
            metrics_by_campaign,
            assets_by_campaign,
        };

        let orphaned_metrics = dataset.count_orphans(&dataset.metrics_by_campaign);
        let orphaned_assets = dataset.count_orphans(&dataset.assets_by_campaign);
        if orphaned_metrics > 0 || orphaned_assets > 0 {
            debug!(
                "Dataset has {} metric rows and {} assets referencing unknown campaigns",
                orphaned_metrics, orphaned_assets
            );
        }

        dataset
    }

    fn count_orphans(&self, relation: &HashMap<CampaignId, Vec<usize>>) -> usize {
        relation
            .iter()
            .filter(|(id, _)| !self.campaign_index.contains_key(*id))
            .map(|(_, rows)| rows.len())
            .sum()
    }

    pub fn campaigns(&self) -> &[Campaign] {
        &self.campaigns
    }

    pub fn metrics(&self) -> &[PerformanceMetric] {
        &self.metrics
    }

    pub fn assets(&self) -> &[CreativeAsset] {
        &self.assets
    }

    pub fn sensors(&self) -> &[SensorReading] {
        &self.sensors
    }

    pub fn models(&self) -> &[ModelPerformance] {
        &self.models
    }

    pub fn summary(&self) -> &serde_json::Value {
        &self.summary
    }

    pub fn campaign(&self, id: &CampaignId) -> Option<&Campaign> {
        self.campaign_index.get(id).map(|&pos| &self.campaigns[pos])
    }

    /// Metric rows referencing `id`, in input order. Empty for unknown ids.
    pub fn metrics_for<'a>(
        &'a self,
        id: &CampaignId,
    ) -> impl Iterator<Item = &'a PerformanceMetric> + 'a {
        self.metrics_by_campaign
            .get(id)
            .into_iter()
            .flatten()
            .map(move |&pos| &self.metrics[pos])
    }

    /// Creative assets referencing `id`, in input order. Empty for unknown ids.
    pub fn assets_for<'a>(&'a self, id: &CampaignId) -> impl Iterator<Item = &'a CreativeAsset> + 'a {
        self.assets_by_campaign
            .get(id)
            .into_iter()
            .flatten()
            .map(move |&pos| &self.assets[pos])
    }

    pub fn counts(&self) -> DatasetCounts {
        DatasetCounts {
            campaigns: self.campaigns.len(),
            metrics: self.metrics.len(),
            assets: self.assets.len(),
            sensors: self.sensors.len(),
            models: self.models.len(),
        }
    }
}
