//! Common types and utilities shared across CLI commands.

use std::path::Path;

use clap::Args;
use hexlayer::geo::GeoPoint;
use hexlayer::snapshot::PollingSnapshot;
use hexlayer::viewport::ViewportBounds;
use serde::Serialize;

use crate::error::CliError;

/// Parse a `LAT,LON` argument.
pub fn parse_lat_lon(s: &str) -> Result<GeoPoint, String> {
    let (lat, lon) = s
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LON but got '{}'", s))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|_| format!("invalid latitude '{}'", lat.trim()))?;
    let lon: f64 = lon
        .trim()
        .parse()
        .map_err(|_| format!("invalid longitude '{}'", lon.trim()))?;
    Ok(GeoPoint::new(lat, lon))
}

/// Viewport arguments shared by `overlay` and `plan`.
#[derive(Debug, Clone, Args)]
pub struct ViewportArgs {
    /// South-west corner as LAT,LON
    #[arg(long, value_parser = parse_lat_lon, allow_hyphen_values = true)]
    pub sw: GeoPoint,

    /// North-east corner as LAT,LON
    #[arg(long, value_parser = parse_lat_lon, allow_hyphen_values = true)]
    pub ne: GeoPoint,

    /// Map zoom level
    #[arg(long, default_value_t = 18)]
    pub zoom: u8,
}

impl ViewportArgs {
    /// Viewport bounds from the corner arguments.
    pub fn bounds(&self) -> ViewportBounds {
        ViewportBounds::new(self.sw, self.ne)
    }
}

/// Load a polling snapshot file.
pub fn load_snapshot(path: &Path) -> Result<PollingSnapshot, CliError> {
    Ok(PollingSnapshot::from_path(path)?)
}

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
