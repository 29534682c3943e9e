//! Test server lifecycle management
//!
//! Each test gets an isolated server with its own dataset directory.

use super::constants::*;
use super::fixtures::create_test_dataset;
use axum::Router;
use campaign_insights::aggregator::{DatasetAggregator, FixedMetricsSource};
use campaign_insights::dataset::{DatasetSource, DirDatasetSource, HttpDatasetSource};
use campaign_insights::monitor_api::{MonitorApiClient, StaticTokenProvider};
use campaign_insights::server::{load_or_fallback, make_app, RequestsLoggingLevel, ServerConfig};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;

/// Where the test server loads its dataset from.
pub enum DatasetLocation {
    /// Fixture dataset read from a temp directory
    Dir,
    /// Fixture dataset served over HTTP by a static file server
    Http,
    /// A directory that does not exist, forcing the illustrative fallback
    Unreachable,
}

pub struct TestServerOptions {
    pub dataset: DatasetLocation,
    pub monitor_url: Option<String>,
    pub monitor_token: Option<String>,
}

impl Default for TestServerOptions {
    fn default() -> Self {
        Self {
            dataset: DatasetLocation::Dir,
            monitor_url: None,
            monitor_token: Some(MONITOR_TOKEN.to_string()),
        }
    }
}

/// Binds a random port and serves `app` until the returned sender is dropped
/// or fired.
async fn serve_in_background(app: Router) -> (u16, tokio::sync::oneshot::Sender<()>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let port = listener
        .local_addr()
        .expect("Failed to get local address")
        .port();

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .expect("Server failed");
    });

    (port, shutdown_tx)
}

/// Test server instance with an isolated dataset
///
/// When dropped, the server gracefully shuts down and temp resources are cleaned up.
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    /// Aggregator behind the server, for direct inspection in tests
    pub aggregator: Arc<DatasetAggregator>,

    // Private fields - keep resources alive until drop
    _temp_dataset_dir: Option<TempDir>,
    _shutdown_txs: Vec<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Spawns a server over the fixture dataset read from disk
    pub async fn spawn() -> Self {
        Self::spawn_with(TestServerOptions::default()).await
    }

    /// Spawns a new test server on a random port
    ///
    /// The dataset is loaded (or the fallback installed) before the server
    /// starts accepting requests. Placeholder figures are fixed.
    pub async fn spawn_with(options: TestServerOptions) -> Self {
        let mut shutdown_txs = Vec::new();

        let (temp_dataset_dir, source): (Option<TempDir>, Arc<dyn DatasetSource>) =
            match options.dataset {
                DatasetLocation::Dir => {
                    let dir = create_test_dataset().expect("Failed to create test dataset");
                    let source: Arc<dyn DatasetSource> =
                        Arc::new(DirDatasetSource::new(dir.path()));
                    (Some(dir), source)
                }
                DatasetLocation::Http => {
                    let dir = create_test_dataset().expect("Failed to create test dataset");
                    let files = Router::new().fallback_service(ServeDir::new(dir.path()));
                    let (port, tx) = serve_in_background(files).await;
                    shutdown_txs.push(tx);
                    let source: Arc<dyn DatasetSource> = Arc::new(
                        HttpDatasetSource::new(format!("http://127.0.0.1:{}/", port), 5)
                            .expect("Failed to build HTTP dataset source"),
                    );
                    (Some(dir), source)
                }
                DatasetLocation::Unreachable => (
                    None,
                    Arc::new(DirDatasetSource::new("/nonexistent/campaign/dataset")),
                ),
            };

        let aggregator = Arc::new(DatasetAggregator::new(
            source,
            Arc::new(FixedMetricsSource::default()),
            Duration::from_secs(5),
        ));
        load_or_fallback(&aggregator).await;

        let monitor = options.monitor_url.map(|url| {
            let tokens = Arc::new(StaticTokenProvider::new(options.monitor_token.clone()));
            Arc::new(MonitorApiClient::new(url, tokens, 5).expect("Failed to build monitor client"))
        });

        let config = ServerConfig {
            requests_logging_level: RequestsLoggingLevel::None,
            ..Default::default()
        };
        let app = make_app(config, aggregator.clone(), monitor);
        let (port, tx) = serve_in_background(app).await;
        shutdown_txs.push(tx);

        let server = Self {
            base_url: format!("http://127.0.0.1:{}", port),
            aggregator,
            _temp_dataset_dir: temp_dataset_dir,
            _shutdown_txs: shutdown_txs,
        };

        server.wait_for_ready().await;

        server
    }

    /// Waits for the server to become ready by polling the / endpoint
    async fn wait_for_ready(&self) {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .expect("Failed to build reqwest client");

        let start = std::time::Instant::now();
        let timeout = Duration::from_millis(SERVER_READY_TIMEOUT_MS);

        loop {
            if start.elapsed() > timeout {
                panic!(
                    "Server did not become ready within {}ms",
                    SERVER_READY_TIMEOUT_MS
                );
            }

            match client.get(format!("{}/", self.base_url)).send().await {
                Ok(response) if response.status().is_success() => return,
                _ => {
                    tokio::time::sleep(Duration::from_millis(SERVER_READY_POLL_INTERVAL_MS)).await;
                }
            }
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        for tx in self._shutdown_txs.drain(..) {
            let _ = tx.send(());
        }
    }
}
