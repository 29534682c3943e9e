mod file_config;

pub use file_config::{FileConfig, MonitorApiConfig, PlaceholdersConfig};

use crate::aggregator::PlaceholderMode;
use crate::dataset::{DatasetSource, DirDatasetSource, HttpDatasetSource};
use crate::server::RequestsLoggingLevel;
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub data_dir: Option<PathBuf>,
    pub data_url: Option<String>,
    pub port: u16,
    pub metrics_port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub fetch_timeout_sec: u64,
    pub frontend_dir_path: Option<String>,
    pub monitor_api_url: Option<String>,
    pub monitor_api_token: Option<String>,
    pub monitor_api_timeout_sec: u64,
    pub placeholders: PlaceholderMode,
}

/// Where the dataset collections are fetched from.
#[derive(Debug, Clone, PartialEq)]
pub enum DataSourceSettings {
    Dir(PathBuf),
    Http { base_url: String },
}

impl DataSourceSettings {
    pub fn build(&self, fetch_timeout: Duration) -> Result<Arc<dyn DatasetSource>> {
        Ok(match self {
            DataSourceSettings::Dir(path) => Arc::new(DirDatasetSource::new(path.clone())),
            DataSourceSettings::Http { base_url } => Arc::new(HttpDatasetSource::new(
                base_url.clone(),
                fetch_timeout.as_secs(),
            )?),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonitorApiSettings {
    pub base_url: String,
    pub token: Option<String>,
    pub timeout_sec: u64,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_source: DataSourceSettings,
    pub port: u16,
    pub metrics_port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub fetch_timeout_sec: u64,
    pub frontend_dir_path: Option<String>,

    /// `None` disables the monitor proxy routes.
    pub monitor_api: Option<MonitorApiSettings>,
    pub placeholder_mode: PlaceholderMode,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        // The dataset location is overridden as a whole, so a TOML data_url
        // replaces a CLI data_dir instead of conflicting with it.
        let (data_dir, data_url) = if file.data_dir.is_some() || file.data_url.is_some() {
            (file.data_dir.map(PathBuf::from), file.data_url)
        } else {
            (cli.data_dir.clone(), cli.data_url.clone())
        };

        let data_source = match (data_dir, data_url) {
            (Some(_), Some(_)) => {
                bail!("data_dir and data_url are mutually exclusive, specify only one")
            }
            (None, None) => bail!(
                "data_dir or data_url must be specified via --data-dir/--data-url or in config file"
            ),
            (Some(dir), None) => {
                if !dir.exists() {
                    bail!("Data directory does not exist: {:?}", dir);
                }
                if !dir.is_dir() {
                    bail!("data_dir is not a directory: {:?}", dir);
                }
                DataSourceSettings::Dir(dir)
            }
            (None, Some(url)) => {
                if !url.starts_with("http://") && !url.starts_with("https://") {
                    bail!("data_url must be an http(s) URL: {}", url);
                }
                DataSourceSettings::Http { base_url: url }
            }
        };

        let port = file.port.unwrap_or(cli.port);
        let metrics_port = file.metrics_port.unwrap_or(cli.metrics_port);

        let logging_level = file
            .logging_level
            .and_then(|s| parse_logging_level(&s))
            .unwrap_or_else(|| cli.logging_level.clone());

        let fetch_timeout_sec = file.fetch_timeout_sec.unwrap_or(cli.fetch_timeout_sec);
        if fetch_timeout_sec == 0 {
            bail!("fetch_timeout_sec must be greater than zero");
        }

        let frontend_dir_path = file
            .frontend_dir_path
            .or_else(|| cli.frontend_dir_path.clone());

        let monitor_file = file.monitor_api.unwrap_or_default();
        let monitor_api = monitor_file
            .base_url
            .or_else(|| cli.monitor_api_url.clone())
            .map(|base_url| MonitorApiSettings {
                base_url,
                token: monitor_file
                    .token
                    .or_else(|| cli.monitor_api_token.clone()),
                timeout_sec: monitor_file
                    .timeout_sec
                    .unwrap_or(cli.monitor_api_timeout_sec),
            });

        if monitor_api.as_ref().is_some_and(|m| m.timeout_sec == 0) {
            bail!("monitor_api timeout_sec must be greater than zero");
        }

        let placeholder_mode = file
            .placeholders
            .and_then(|p| p.mode)
            .and_then(|s| PlaceholderMode::from_str(&s, true).ok())
            .unwrap_or(cli.placeholders);

        Ok(Self {
            data_source,
            port,
            metrics_port,
            logging_level,
            fetch_timeout_sec,
            frontend_dir_path,
            monitor_api,
            placeholder_mode,
        })
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_sec)
    }
}

/// Parses a logging level string into RequestsLoggingLevel.
/// Uses clap's ValueEnum trait for parsing.
fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}
