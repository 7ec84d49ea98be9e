//! Overlay command - hex coverage grid for a viewport as GeoJSON.

use hexlayer::config::ConfigFile;
use hexlayer::hexgrid::{resolution_from_u8, FixedResolution};
use hexlayer::overlay::{OverlayEngine, OverlayFeatureCollection};
use tracing::info;

use super::common::{print_json, ViewportArgs};
use crate::error::CliError;

/// Arguments for the overlay command.
pub struct OverlayArgs {
    pub viewport: ViewportArgs,
    pub margin: Option<f64>,
    pub resolution: Option<u8>,
}

/// Run the overlay command.
pub fn run(args: OverlayArgs, config: &ConfigFile) -> Result<(), CliError> {
    let overlay = compute(&args, config)?;
    info!(
        cells = overlay.len(),
        resolution = ?overlay.resolution(),
        truncated = overlay.is_truncated(),
        "Overlay computed"
    );
    print_json(&overlay)
}

/// Compute the overlay, honouring a fixed `--resolution` if given.
fn compute(args: &OverlayArgs, config: &ConfigFile) -> Result<OverlayFeatureCollection, CliError> {
    let margin = args.margin.unwrap_or(config.overlay.margin_degrees);
    let bounds = args.viewport.bounds();

    let overlay = match args.resolution {
        Some(res) => OverlayEngine::with_policy(FixedResolution(resolution_from_u8(res)?))
            .with_margin(margin)
            .with_max_cells(config.overlay.max_cells)
            .compute_overlay(&bounds, args.viewport.zoom),
        None => OverlayEngine::from_settings(&config.overlay)
            .with_margin(margin)
            .compute_overlay(&bounds, args.viewport.zoom),
    };
    Ok(overlay)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexlayer::geo::GeoPoint;

    fn args(resolution: Option<u8>) -> OverlayArgs {
        OverlayArgs {
            viewport: ViewportArgs {
                sw: GeoPoint::new(1.340, 103.955),
                ne: GeoPoint::new(1.346, 103.963),
                zoom: 18,
            },
            margin: None,
            resolution,
        }
    }

    #[test]
    fn test_compute_with_fixed_resolution() {
        let overlay = compute(&args(Some(8)), &ConfigFile::default()).unwrap();
        assert_eq!(overlay.resolution(), Some(8));
        assert!(!overlay.is_empty());
    }

    #[test]
    fn test_compute_rejects_invalid_resolution() {
        let result = compute(&args(Some(16)), &ConfigFile::default());
        assert!(matches!(result, Err(CliError::Resolution(_))));
    }
}
