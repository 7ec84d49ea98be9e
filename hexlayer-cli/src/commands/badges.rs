//! Badges command - numbered badge positions for each cluster.

use std::path::PathBuf;

use hexlayer::annotation::place_cluster_badges;
use hexlayer::config::ConfigFile;

use super::common::{load_snapshot, print_json};
use crate::error::CliError;

/// Arguments for the badges command.
pub struct BadgesArgs {
    pub snapshot: PathBuf,
    pub offset: Option<f64>,
}

/// Run the badges command.
pub fn run(args: BadgesArgs, config: &ConfigFile) -> Result<(), CliError> {
    let snapshot = load_snapshot(&args.snapshot)?;
    let offset = args
        .offset
        .unwrap_or(config.annotation.badge_offset_meters);

    print_json(&place_cluster_badges(&snapshot.clusters, offset))
}
