//! Placeholder figures for the parts of the dashboard that have no real
//! metrics pipeline behind them yet.

use clap::ValueEnum;
use rand::Rng;
use std::ops::Range;
use std::sync::Arc;

const DATA_FRESHNESS_PERCENT: Range<f64> = 95.0..100.0;
const MODEL_ACCURACY_PERCENT: Range<f64> = 85.0..95.0;
const SYSTEM_LATENCY_MS: Range<f64> = 80.0..200.0;
const SENSOR_TREND_PERCENT: Range<f64> = -10.0..10.0;

pub trait MetricsSource: Send + Sync {
    fn data_freshness(&self) -> f64;

    fn model_accuracy(&self) -> f64;

    fn system_latency_ms(&self) -> f64;

    /// Percentage change of the given sensor over the previous period.
    fn sensor_trend(&self, sensor_type: &str) -> f64;
}

/// Draws every figure uniformly within fixed bounds, on every call.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomMetricsSource;

impl MetricsSource for RandomMetricsSource {
    fn data_freshness(&self) -> f64 {
        rand::rng().random_range(DATA_FRESHNESS_PERCENT)
    }

    fn model_accuracy(&self) -> f64 {
        rand::rng().random_range(MODEL_ACCURACY_PERCENT)
    }

    fn system_latency_ms(&self) -> f64 {
        rand::rng().random_range(SYSTEM_LATENCY_MS)
    }

    fn sensor_trend(&self, _sensor_type: &str) -> f64 {
        rand::rng().random_range(SENSOR_TREND_PERCENT)
    }
}

/// Returns the same figures every time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedMetricsSource {
    pub data_freshness: f64,
    pub model_accuracy: f64,
    pub system_latency_ms: f64,
    pub sensor_trend: f64,
}

impl Default for FixedMetricsSource {
    fn default() -> Self {
        Self {
            data_freshness: 98.5,
            model_accuracy: 91.2,
            system_latency_ms: 120.0,
            sensor_trend: 0.0,
        }
    }
}

impl MetricsSource for FixedMetricsSource {
    fn data_freshness(&self) -> f64 {
        self.data_freshness
    }

    fn model_accuracy(&self) -> f64 {
        self.model_accuracy
    }

    fn system_latency_ms(&self) -> f64 {
        self.system_latency_ms
    }

    fn sensor_trend(&self, _sensor_type: &str) -> f64 {
        self.sensor_trend
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PlaceholderMode {
    #[default]
    Random,
    Fixed,
}

impl PlaceholderMode {
    pub fn make_source(&self) -> Arc<dyn MetricsSource> {
        match self {
            PlaceholderMode::Random => Arc::new(RandomMetricsSource),
            PlaceholderMode::Fixed => Arc::new(FixedMetricsSource::default()),
        }
    }
}
