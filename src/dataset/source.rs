//! Dataset sources: where the JSON collections are fetched from.

use super::{Campaign, CreativeAsset, Dataset, DatasetParts, ModelPerformance, PerformanceMetric, SensorReading};
use anyhow::Result;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// The fixed set of resources making up a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Campaigns,
    PerformanceMetrics,
    CreativeAssets,
    SensorData,
    ModelPerformance,
    Summary,
}

impl Resource {
    pub const ALL: [Resource; 6] = [
        Resource::Campaigns,
        Resource::PerformanceMetrics,
        Resource::CreativeAssets,
        Resource::SensorData,
        Resource::ModelPerformance,
        Resource::Summary,
    ];

    /// Path of the resource relative to the dataset root.
    pub fn file_name(&self) -> &'static str {
        match self {
            Resource::Campaigns => "campaigns.json",
            Resource::PerformanceMetrics => "performance_metrics.json",
            Resource::CreativeAssets => "creative_assets.json",
            Resource::SensorData => "sensor_data.json",
            Resource::ModelPerformance => "model_performance.json",
            Resource::Summary => "dataset_summary.json",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("IO error reading {resource}: {source}")]
    Io {
        resource: Resource,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode {resource}: {source}")]
    Decode {
        resource: Resource,
        #[source]
        source: serde_json::Error,
    },

    #[error("Request for {resource} failed: {source}")]
    Request {
        resource: Resource,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request for {resource} failed with status: {status}")]
    Status { resource: Resource, status: u16 },

    #[error("Dataset fetch timed out after {0:?}")]
    Timeout(Duration),
}

#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Human readable location, used in logs.
    fn describe(&self) -> String;

    /// Fetch the raw bytes of a single resource.
    async fn fetch(&self, resource: Resource) -> Result<Vec<u8>, DatasetError>;
}

/// Reads the dataset from JSON files in a local directory.
pub struct DirDatasetSource {
    root: PathBuf,
}

impl DirDatasetSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl DatasetSource for DirDatasetSource {
    fn describe(&self) -> String {
        format!("directory {}", self.root.display())
    }

    async fn fetch(&self, resource: Resource) -> Result<Vec<u8>, DatasetError> {
        let path = self.root.join(resource.file_name());
        debug!("Reading {}", path.display());
        tokio::fs::read(&path)
            .await
            .map_err(|source| DatasetError::Io { resource, source })
    }
}

/// Fetches the dataset over HTTP from `{base_url}/{resource}`.
pub struct HttpDatasetSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDatasetSource {
    /// # Arguments
    /// * `base_url` - URL the resources are served under (e.g., "https://cdn.example.com/data")
    /// * `timeout_sec` - Per-request timeout in seconds
    pub fn new(base_url: String, timeout_sec: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_sec))
            .build()?;

        let base_url = base_url.trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl DatasetSource for HttpDatasetSource {
    fn describe(&self) -> String {
        self.base_url.clone()
    }

    async fn fetch(&self, resource: Resource) -> Result<Vec<u8>, DatasetError> {
        let url = format!("{}/{}", self.base_url, resource.file_name());
        debug!("GET {}", url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| DatasetError::Request { resource, source })?;

        if !response.status().is_success() {
            return Err(DatasetError::Status {
                resource,
                status: response.status().as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|source| DatasetError::Request { resource, source })?;
        Ok(bytes.to_vec())
    }
}

async fn fetch_collection<T: DeserializeOwned>(
    source: &dyn DatasetSource,
    resource: Resource,
) -> Result<Vec<T>, DatasetError> {
    let bytes = source.fetch(resource).await?;
    serde_json::from_slice(&bytes).map_err(|source| DatasetError::Decode { resource, source })
}

async fn fetch_summary(source: &dyn DatasetSource) -> Result<serde_json::Value, DatasetError> {
    let bytes = source.fetch(Resource::Summary).await?;
    serde_json::from_slice(&bytes).map_err(|source| DatasetError::Decode {
        resource: Resource::Summary,
        source,
    })
}

/// Fetches every resource concurrently. Any single failure fails the whole batch.
pub async fn fetch_dataset(source: &dyn DatasetSource) -> Result<Dataset, DatasetError> {
    let (campaigns, metrics, assets, sensors, models, summary) = futures::try_join!(
        fetch_collection::<Campaign>(source, Resource::Campaigns),
        fetch_collection::<PerformanceMetric>(source, Resource::PerformanceMetrics),
        fetch_collection::<CreativeAsset>(source, Resource::CreativeAssets),
        fetch_collection::<SensorReading>(source, Resource::SensorData),
        fetch_collection::<ModelPerformance>(source, Resource::ModelPerformance),
        fetch_summary(source),
    )?;

    Ok(Dataset::from_parts(DatasetParts {
        campaigns,
        metrics,
        assets,
        sensors,
        models,
        summary,
    }))
}
