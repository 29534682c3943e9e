use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    // Dataset location, exactly one of the two
    pub data_dir: Option<String>,
    pub data_url: Option<String>,

    pub port: Option<u16>,
    pub metrics_port: Option<u16>,
    pub logging_level: Option<String>,
    pub fetch_timeout_sec: Option<u64>,
    pub frontend_dir_path: Option<String>,

    pub monitor_api: Option<MonitorApiConfig>,
    pub placeholders: Option<PlaceholdersConfig>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct MonitorApiConfig {
    pub base_url: Option<String>,
    pub token: Option<String>,
    pub timeout_sec: Option<u64>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct PlaceholdersConfig {
    /// "random" or "fixed"
    pub mode: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}
