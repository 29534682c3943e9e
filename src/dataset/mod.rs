mod dataset;
mod illustrative;
mod models;
mod source;
pub mod timestamp;

#[cfg(test)]
pub(crate) mod testing;

pub use dataset::{Dataset, DatasetCounts, DatasetParts};
pub use models::{
    Campaign, CampaignId, CampaignStatus, CreativeAsset, ModelPerformance, PerformanceMetric,
    SensorReading, SensorStatus,
};
pub use source::{
    fetch_dataset, DatasetError, DatasetSource, DirDatasetSource, HttpDatasetSource, Resource,
};
