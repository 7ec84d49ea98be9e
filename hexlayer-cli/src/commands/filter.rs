//! Filter command - visible subset of a snapshot's detected entities.

use std::path::PathBuf;

use hexlayer::config::ConfigFile;
use hexlayer::visibility::VisibilityFilter;
use tracing::info;

use super::common::{load_snapshot, print_json};
use crate::error::CliError;

/// Arguments for the filter command.
pub struct FilterArgs {
    pub snapshot: PathBuf,
    pub threshold: Option<f64>,
    pub dense: bool,
}

/// Run the filter command.
pub fn run(args: FilterArgs, config: &ConfigFile) -> Result<(), CliError> {
    let snapshot = load_snapshot(&args.snapshot)?;

    // Explicit threshold > dense context > configured default
    let threshold = args
        .threshold
        .unwrap_or_else(|| config.visibility.threshold_for(args.dense));
    let visible = VisibilityFilter::new(threshold)
        .filter_par(&snapshot.detected_entities, &snapshot.clusters);

    info!(
        total = snapshot.detected_entities.len(),
        visible = visible.len(),
        threshold,
        "Entities filtered"
    );
    print_json(&visible)
}
