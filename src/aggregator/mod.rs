mod aggregator;
mod benchmarks;
mod placeholder_metrics;
mod queries;
mod views;

pub use aggregator::{AggregatorState, DatasetAggregator, LoadOutcome};
pub use benchmarks::{
    rate, BenchmarkKind, BenchmarkRating, BenchmarkScore, CampaignBenchmarks, Thresholds,
};
pub use placeholder_metrics::{
    FixedMetricsSource, MetricsSource, PlaceholderMode, RandomMetricsSource,
};
pub use queries::{
    format_trend, sensor_display_name, BRAND_WINDOW_ROWS, DEFAULT_TREND_DAYS, SUMMARY_METRICS_CAP,
};
pub use views::{BrandPerformance, DashboardSummary, SensorStatusView, TrendPoint};
