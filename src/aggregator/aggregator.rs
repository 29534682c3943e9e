use super::benchmarks::{self, CampaignBenchmarks};
use super::queries;
use super::views::{BrandPerformance, DashboardSummary, SensorStatusView, TrendPoint};
use super::MetricsSource;
use crate::dataset::{
    fetch_dataset, Campaign, CampaignId, CreativeAsset, Dataset, DatasetCounts, DatasetError,
    DatasetSource, ModelPerformance, PerformanceMetric,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Result of a [`DatasetAggregator::load`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Loaded(DatasetCounts),
    /// The fetch failed; the caller decides which static defaults to use.
    Fallback { reason: String },
}

impl LoadOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregatorState {
    Unloaded,
    Loaded,
}

/// Caches one dataset for the session and answers analytical queries over it.
///
/// The cached dataset is swapped wholesale behind an `Arc`: readers take a
/// snapshot and compute without holding the lock, writers replace it
/// atomically. Concurrent loads race and the last one to finish wins.
pub struct DatasetAggregator {
    source: Arc<dyn DatasetSource>,
    metrics_source: Arc<dyn MetricsSource>,
    fetch_timeout: Duration,
    snapshot: RwLock<Option<Arc<Dataset>>>,
}

impl DatasetAggregator {
    pub fn new(
        source: Arc<dyn DatasetSource>,
        metrics_source: Arc<dyn MetricsSource>,
        fetch_timeout: Duration,
    ) -> Self {
        Self {
            source,
            metrics_source,
            fetch_timeout,
            snapshot: RwLock::new(None),
        }
    }

    pub fn source(&self) -> &dyn DatasetSource {
        self.source.as_ref()
    }

    /// Fetches every collection and replaces the cache on success.
    ///
    /// Never fails: any fetch error or a timeout is reported as
    /// [`LoadOutcome::Fallback`] and leaves the current cache untouched.
    pub async fn load(&self) -> LoadOutcome {
        let start = Instant::now();
        info!("Loading dataset from {}", self.source.describe());

        let fetched = tokio::time::timeout(self.fetch_timeout, fetch_dataset(self.source.as_ref()))
            .await
            .unwrap_or(Err(DatasetError::Timeout(self.fetch_timeout)));

        match fetched {
            Ok(dataset) => {
                let counts = dataset.counts();
                self.install(dataset);
                info!(
                    "Loaded dataset in {:?}: {} campaigns, {} metrics, {} assets, {} sensor readings, {} model rows",
                    start.elapsed(),
                    counts.campaigns,
                    counts.metrics,
                    counts.assets,
                    counts.sensors,
                    counts.models
                );
                LoadOutcome::Loaded(counts)
            }
            Err(err) => {
                warn!("Dataset load failed after {:?}: {}", start.elapsed(), err);
                LoadOutcome::Fallback {
                    reason: err.to_string(),
                }
            }
        }
    }

    /// Replaces the cached dataset.
    pub fn install(&self, dataset: Dataset) {
        let dataset = Arc::new(dataset);
        match self.snapshot.write() {
            Ok(mut guard) => *guard = Some(dataset),
            Err(poisoned) => *poisoned.into_inner() = Some(dataset),
        }
    }

    /// Installs `dataset` only if nothing has been loaded yet. Returns whether
    /// it was installed.
    pub fn install_if_unloaded(&self, dataset: Dataset) -> bool {
        let mut guard = match self.snapshot.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if guard.is_some() {
            return false;
        }
        *guard = Some(Arc::new(dataset));
        true
    }

    /// The currently cached dataset, if any.
    pub fn snapshot(&self) -> Option<Arc<Dataset>> {
        match self.snapshot.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn state(&self) -> AggregatorState {
        if self.snapshot().is_some() {
            AggregatorState::Loaded
        } else {
            AggregatorState::Unloaded
        }
    }

    pub fn counts(&self) -> DatasetCounts {
        self.query(|dataset| dataset.counts())
    }

    fn query<T: Default>(&self, f: impl FnOnce(&Dataset) -> T) -> T {
        match self.snapshot() {
            Some(dataset) => f(&dataset),
            None => T::default(),
        }
    }

    pub fn latest_campaigns(&self, limit: i64) -> Vec<Campaign> {
        self.query(|d| queries::latest_campaigns(d, limit))
    }

    pub fn active_campaigns(&self) -> Vec<Campaign> {
        self.active_campaigns_at(Utc::now())
    }

    pub fn active_campaigns_at(&self, now: DateTime<Utc>) -> Vec<Campaign> {
        self.query(|d| queries::active_campaigns(d, now))
    }

    pub fn campaign(&self, id: &CampaignId) -> Option<Campaign> {
        self.snapshot().and_then(|d| d.campaign(id).cloned())
    }

    pub fn campaign_metrics(&self, id: &CampaignId) -> Vec<PerformanceMetric> {
        self.query(|d| queries::campaign_metrics(d, id))
    }

    pub fn campaign_assets(&self, id: &CampaignId) -> Vec<CreativeAsset> {
        self.query(|d| queries::campaign_assets(d, id))
    }

    /// Benchmark ratings of one campaign, `None` when unknown or unloaded.
    pub fn campaign_benchmarks(&self, id: &CampaignId) -> Option<CampaignBenchmarks> {
        self.snapshot().and_then(|d| benchmarks::campaign_benchmarks(&d, id))
    }

    pub fn brand_performance(&self) -> Vec<BrandPerformance> {
        self.query(queries::brand_performance)
    }

    pub fn sensor_status(&self) -> Vec<SensorStatusView> {
        self.query(|d| queries::sensor_status(d, self.metrics_source.as_ref()))
    }

    pub fn model_performance(&self) -> Vec<ModelPerformance> {
        self.query(queries::model_performance)
    }

    pub fn performance_trends(&self, days: i64) -> Vec<TrendPoint> {
        self.performance_trends_at(days, Utc::now())
    }

    pub fn performance_trends_at(&self, days: i64, now: DateTime<Utc>) -> Vec<TrendPoint> {
        self.query(|d| queries::performance_trends(d, days, now))
    }

    pub fn dashboard_summary(&self) -> DashboardSummary {
        self.dashboard_summary_at(Utc::now())
    }

    /// Unloaded, this is the summary of an empty dataset: zero totals, full
    /// pipeline health and the placeholder figures.
    pub fn dashboard_summary_at(&self, now: DateTime<Utc>) -> DashboardSummary {
        let metrics = self.metrics_source.as_ref();
        match self.snapshot() {
            Some(dataset) => queries::dashboard_summary(&dataset, now, metrics),
            None => queries::dashboard_summary(&Dataset::default(), now, metrics),
        }
    }

    /// The opaque summary object of the dataset, `null` when unloaded.
    pub fn summary_blob(&self) -> serde_json::Value {
        self.query(|d| d.summary().clone())
    }
}
