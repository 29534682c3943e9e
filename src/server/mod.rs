pub mod config;
mod http_layers;
mod loading;
pub mod metrics;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use http_layers::*;
pub use loading::load_or_fallback;
pub use server::{make_app, run_server};
