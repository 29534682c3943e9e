use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use campaign_insights::aggregator::{DatasetAggregator, LoadOutcome, PlaceholderMode};
use campaign_insights::config::{AppConfig, CliConfig, FileConfig};
use campaign_insights::monitor_api::{MonitorApiClient, StaticTokenProvider};
use campaign_insights::server::{self, load_or_fallback, run_server, RequestsLoggingLevel};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Directory holding the dataset JSON files.
    #[clap(long, value_parser = parse_path)]
    pub data_dir: Option<PathBuf>,

    /// Base URL the dataset JSON files are served under.
    #[clap(long)]
    pub data_url: Option<String>,

    /// Optional TOML config file. Its values override the command line.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 3001)]
    pub port: u16,

    /// The port for the metrics server (Prometheus scraping).
    #[clap(long, default_value_t = 9091)]
    pub metrics_port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Timeout in seconds for fetching the whole dataset.
    #[clap(long, default_value_t = 30)]
    pub fetch_timeout_sec: u64,

    /// Path to the frontend directory to be statically served.
    #[clap(long)]
    pub frontend_dir_path: Option<String>,

    /// Base URL of the monitor API (sensors, model retraining).
    #[clap(long)]
    pub monitor_api_url: Option<String>,

    /// Bearer token sent to the monitor API.
    #[clap(long)]
    pub monitor_api_token: Option<String>,

    /// Timeout in seconds for monitor API requests.
    #[clap(long, default_value_t = 10)]
    pub monitor_api_timeout_sec: u64,

    /// How the dashboard placeholder figures are produced.
    #[clap(long, default_value = "random")]
    pub placeholders: PlaceholderMode,

    /// Load the dataset, print its counts and summary, then exit.
    #[clap(long)]
    pub check_only: bool,
}

impl CliArgs {
    fn to_cli_config(&self) -> CliConfig {
        CliConfig {
            data_dir: self.data_dir.clone(),
            data_url: self.data_url.clone(),
            port: self.port,
            metrics_port: self.metrics_port,
            logging_level: self.logging_level.clone(),
            fetch_timeout_sec: self.fetch_timeout_sec,
            frontend_dir_path: self.frontend_dir_path.clone(),
            monitor_api_url: self.monitor_api_url.clone(),
            monitor_api_token: self.monitor_api_token.clone(),
            monitor_api_timeout_sec: self.monitor_api_timeout_sec,
            placeholders: self.placeholders,
        }
    }
}

async fn check_dataset(aggregator: &DatasetAggregator) -> Result<()> {
    match aggregator.load().await {
        LoadOutcome::Loaded(counts) => {
            println!("{}", serde_json::to_string_pretty(&counts)?);
            println!("{}", serde_json::to_string_pretty(&aggregator.dashboard_summary())?);
            println!("{}", serde_json::to_string_pretty(&aggregator.summary_blob())?);
            Ok(())
        }
        LoadOutcome::Fallback { reason } => {
            anyhow::bail!("Dataset could not be loaded: {}", reason)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading config from {:?}", path);
            Some(FileConfig::load(path)?)
        }
        None => None,
    };
    let config = AppConfig::resolve(&cli_args.to_cli_config(), file_config)?;

    #[cfg(feature = "fixed_placeholders")]
    let placeholder_mode = PlaceholderMode::Fixed;
    #[cfg(not(feature = "fixed_placeholders"))]
    let placeholder_mode = config.placeholder_mode;
    info!("Placeholder figures: {:?}", placeholder_mode);

    let source = config.data_source.build(config.fetch_timeout())?;
    let aggregator = Arc::new(DatasetAggregator::new(
        source,
        placeholder_mode.make_source(),
        config.fetch_timeout(),
    ));

    if cli_args.check_only {
        return check_dataset(&aggregator).await;
    }

    info!("Initializing metrics...");
    server::metrics::init_metrics();

    load_or_fallback(&aggregator).await;

    let monitor = match &config.monitor_api {
        Some(settings) => {
            info!("Monitor API configured at {}", settings.base_url);
            let tokens = Arc::new(StaticTokenProvider::new(settings.token.clone()));
            Some(Arc::new(MonitorApiClient::new(
                settings.base_url.clone(),
                tokens,
                settings.timeout_sec,
            )?))
        }
        None => None,
    };

    let server_config = server::ServerConfig {
        requests_logging_level: config.logging_level.clone(),
        port: config.port,
        metrics_port: config.metrics_port,
        frontend_dir_path: config.frontend_dir_path.clone(),
    };

    run_server(server_config, aggregator, monitor).await
}
