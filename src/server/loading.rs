use crate::aggregator::{DatasetAggregator, LoadOutcome};
use crate::dataset::Dataset;
use chrono::Utc;
use std::time::Instant;
use tracing::{info, warn};

use super::metrics::{record_dataset_load, set_dataset_records};

/// Loads the dataset and, if that fails before anything was ever loaded,
/// installs the illustrative dataset so the dashboard does not render blank.
///
/// A failed reload keeps serving the previously loaded dataset.
pub async fn load_or_fallback(aggregator: &DatasetAggregator) -> LoadOutcome {
    let start = Instant::now();
    let outcome = aggregator.load().await;

    match &outcome {
        LoadOutcome::Loaded(counts) => {
            record_dataset_load("loaded", start.elapsed());
            set_dataset_records(counts);
        }
        LoadOutcome::Fallback { reason } => {
            let illustrative = Dataset::illustrative(Utc::now());
            let counts = illustrative.counts();
            if aggregator.install_if_unloaded(illustrative) {
                warn!("Serving the illustrative dataset ({})", reason);
                record_dataset_load("illustrative", start.elapsed());
                set_dataset_records(&counts);
            } else {
                info!("Keeping the previously loaded dataset ({})", reason);
                record_dataset_load("kept", start.elapsed());
            }
        }
    }

    outcome
}
