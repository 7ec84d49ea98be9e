//! Plan command - full render pass for a snapshot and viewport.

use std::path::PathBuf;

use hexlayer::config::ConfigFile;
use hexlayer::overlay::OverlayEngine;
use hexlayer::render::{RenderOptions, RenderPlan};
use tracing::info;

use super::common::{load_snapshot, print_json, ViewportArgs};
use crate::error::CliError;

/// Arguments for the plan command.
pub struct PlanArgs {
    pub snapshot: PathBuf,
    pub viewport: ViewportArgs,
    pub dense: bool,
}

/// Run the plan command.
pub fn run(args: PlanArgs, config: &ConfigFile) -> Result<(), CliError> {
    let snapshot = load_snapshot(&args.snapshot)?;
    let engine = OverlayEngine::from_settings(&config.overlay);
    let options = RenderOptions::from_config(config, args.dense);

    let plan = RenderPlan::build(
        &engine,
        &snapshot,
        &args.viewport.bounds(),
        args.viewport.zoom,
        options,
    );

    info!(
        cells = plan.overlay.len(),
        visible = plan.visible_entities.len(),
        badges = plan.badges.len(),
        "Render plan built"
    );
    print_json(&plan)
}
