//! Common test infrastructure
//!
//! Tests should only import from this module, not from internal submodules.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{TestClient, TestServer};
//!
//! #[tokio::test]
//! async fn test_get_brands() {
//!     let server = TestServer::spawn().await;
//!     let client = TestClient::new(server.base_url.clone());
//!
//!     let brands = client.get_brands().await;
//!     assert_eq!(brands.as_array().unwrap().len(), 2);
//! }
//! ```

mod client;
mod constants;
mod fixtures;
mod monitor_stub;
mod server;

// Public API - this is what tests import
pub use client::TestClient;
pub use constants::*;
#[allow(unused_imports)]
pub use monitor_stub::MonitorStub;
#[allow(unused_imports)]
pub use server::{DatasetLocation, TestServer, TestServerOptions};

#[allow(unused_imports)]
pub(crate) use fixtures::create_test_dataset;
