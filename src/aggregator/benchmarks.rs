//! Industry benchmark ratings for campaign performance.
//!
//! Values are in dataset units: ROI as a multiple of spend, the others as
//! percentages (`ctr: 2.5` means 2.5%).

use crate::dataset::{CampaignId, Dataset, PerformanceMetric};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BenchmarkKind {
    Roi,
    BrandRecall,
    Ctr,
    CompletionRate,
}

impl BenchmarkKind {
    pub const ALL: [BenchmarkKind; 4] = [
        BenchmarkKind::Roi,
        BenchmarkKind::BrandRecall,
        BenchmarkKind::Ctr,
        BenchmarkKind::CompletionRate,
    ];

    pub fn thresholds(&self) -> Thresholds {
        match self {
            BenchmarkKind::Roi => Thresholds::new(3.0, 2.0, 1.0),
            BenchmarkKind::BrandRecall => Thresholds::new(75.0, 60.0, 45.0),
            BenchmarkKind::Ctr => Thresholds::new(5.0, 3.0, 2.0),
            BenchmarkKind::CompletionRate => Thresholds::new(85.0, 70.0, 50.0),
        }
    }

    /// The figure this kind reads from a metric row, if the row carries it.
    fn sample(&self, metric: &PerformanceMetric) -> Option<f64> {
        match self {
            BenchmarkKind::Roi => Some(metric.roi),
            BenchmarkKind::BrandRecall => metric.brand_recall,
            BenchmarkKind::Ctr => Some(metric.ctr),
            BenchmarkKind::CompletionRate => metric.video_completion_rate,
        }
    }
}

/// Lower bounds (inclusive) of each rating band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Thresholds {
    pub excellent: f64,
    pub good: f64,
    pub average: f64,
}

impl Thresholds {
    const fn new(excellent: f64, good: f64, average: f64) -> Self {
        Self {
            excellent,
            good,
            average,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BenchmarkRating {
    Excellent,
    Good,
    Average,
    BelowAverage,
    /// Negative or non-finite value.
    Invalid,
}

pub fn rate(kind: BenchmarkKind, value: f64) -> BenchmarkRating {
    if !value.is_finite() || value < 0.0 {
        return BenchmarkRating::Invalid;
    }
    let thresholds = kind.thresholds();
    if value >= thresholds.excellent {
        BenchmarkRating::Excellent
    } else if value >= thresholds.good {
        BenchmarkRating::Good
    } else if value >= thresholds.average {
        BenchmarkRating::Average
    } else {
        BenchmarkRating::BelowAverage
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkScore {
    pub kind: BenchmarkKind,
    /// Mean over every row carrying the figure.
    pub average: f64,
    /// Figure of the most recent row carrying it.
    pub latest: f64,
    pub samples: usize,
    pub rating: BenchmarkRating,
    pub thresholds: Thresholds,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CampaignBenchmarks {
    pub campaign_id: CampaignId,
    pub scores: Vec<BenchmarkScore>,
}

/// Rates the campaign's metric history against each benchmark.
///
/// Kinds without a single sample are left out. A kind with any invalid
/// sample is rated [`BenchmarkRating::Invalid`]. `None` for an unknown
/// campaign.
pub fn campaign_benchmarks(dataset: &Dataset, id: &CampaignId) -> Option<CampaignBenchmarks> {
    let campaign = dataset.campaign(id)?;
    let mut metrics: Vec<&PerformanceMetric> = dataset.metrics_for(&campaign.id).collect();
    metrics.sort_by(|a, b| a.date.cmp(&b.date));

    let scores = BenchmarkKind::ALL
        .iter()
        .filter_map(|kind| score(*kind, &metrics))
        .collect();

    Some(CampaignBenchmarks {
        campaign_id: campaign.id.clone(),
        scores,
    })
}

/// `metrics` must be sorted by date ascending.
fn score(kind: BenchmarkKind, metrics: &[&PerformanceMetric]) -> Option<BenchmarkScore> {
    let samples: Vec<f64> = metrics.iter().filter_map(|m| kind.sample(m)).collect();
    let latest = *samples.last()?;

    let average = samples.iter().sum::<f64>() / samples.len() as f64;
    let rating = if samples.iter().any(|v| rate(kind, *v) == BenchmarkRating::Invalid) {
        BenchmarkRating::Invalid
    } else {
        rate(kind, average)
    };

    Some(BenchmarkScore {
        kind,
        average,
        latest,
        samples: samples.len(),
        rating,
        thresholds: kind.thresholds(),
    })
}
