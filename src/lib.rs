//! Campaign Insights Library
//!
//! Dataset loading, the analytical aggregator and the HTTP surface of the
//! marketing insights dashboard.

pub mod aggregator;
pub mod config;
pub mod dataset;
pub mod monitor_api;
pub mod server;

// Re-export commonly used types for convenience
pub use aggregator::{DatasetAggregator, LoadOutcome, MetricsSource};
pub use dataset::{Dataset, DatasetSource, DirDatasetSource, HttpDatasetSource};
pub use monitor_api::{MonitorApiClient, StaticTokenProvider, TokenProvider};
pub use server::{load_or_fallback, make_app, run_server, RequestsLoggingLevel, ServerConfig};
