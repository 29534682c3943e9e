use axum::extract::FromRef;

use crate::aggregator::DatasetAggregator;
use crate::monitor_api::MonitorApiClient;
use std::sync::Arc;
use std::time::Instant;

use super::ServerConfig;

pub type GuardedAggregator = Arc<DatasetAggregator>;
pub type OptionalMonitorClient = Option<Arc<MonitorApiClient>>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub aggregator: GuardedAggregator,
    pub monitor: OptionalMonitorClient,
}

impl FromRef<ServerState> for GuardedAggregator {
    fn from_ref(input: &ServerState) -> Self {
        input.aggregator.clone()
    }
}

impl FromRef<ServerState> for OptionalMonitorClient {
    fn from_ref(input: &ServerState) -> Self {
        input.monitor.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}
