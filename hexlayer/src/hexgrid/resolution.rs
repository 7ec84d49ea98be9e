//! Zoom level → H3 resolution policies.
//!
//! The grid resolution is a policy, not a constant: callers pick a table,
//! a fixed value, or any closure.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use h3o::Resolution;
use thiserror::Error;

/// Resolution used by the dashboard at its default zoom of 18.
pub const REFERENCE_RESOLUTION: u8 = 11;

/// Finest resolution the default table will ever pick.
///
/// The viewport margin is a fixed 0.005°, so at deep zoom the padded area
/// stays around a square kilometre; resolution 12 keeps that to a few
/// thousand cells.
pub const DEFAULT_MAX_RESOLUTION: u8 = 12;

/// Offset between map zoom and H3 resolution in the default table.
const DEFAULT_ZOOM_OFFSET: u8 = 7;

/// Highest zoom level listed explicitly in the default table.
const DEFAULT_TABLE_MAX_ZOOM: u8 = DEFAULT_ZOOM_OFFSET + DEFAULT_MAX_RESOLUTION;

/// Errors raised while building a resolution table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    /// Value outside H3's 0..=15 range.
    #[error("Invalid H3 resolution: {0} (must be 0-15)")]
    InvalidResolution(u8),

    /// An entry could not be parsed as `zoom=resolution`.
    #[error("Invalid resolution table entry '{0}' (expected zoom=resolution)")]
    InvalidEntry(String),

    /// The table has no entries.
    #[error("Resolution table is empty")]
    EmptyTable,
}

/// Convert a raw number to an H3 [`Resolution`].
pub fn resolution_from_u8(value: u8) -> Result<Resolution, ResolutionError> {
    Resolution::try_from(value).map_err(|_| ResolutionError::InvalidResolution(value))
}

/// Maps a map zoom level to the H3 resolution to tessellate at.
pub trait ResolutionPolicy: Send + Sync {
    /// Resolution for the given zoom level.
    fn resolution_for_zoom(&self, zoom: u8) -> Resolution;
}

impl<F> ResolutionPolicy for F
where
    F: Fn(u8) -> Resolution + Send + Sync,
{
    fn resolution_for_zoom(&self, zoom: u8) -> Resolution {
        self(zoom)
    }
}

/// Same resolution at every zoom level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedResolution(pub Resolution);

impl FixedResolution {
    /// The constant resolution the original dashboard used.
    pub fn reference() -> Self {
        Self(Resolution::Eleven)
    }
}

impl ResolutionPolicy for FixedResolution {
    fn resolution_for_zoom(&self, _zoom: u8) -> Resolution {
        self.0
    }
}

/// Step table from zoom level to resolution.
///
/// Lookup uses the entry with the largest zoom that is `<=` the requested
/// zoom. Zooms below the first entry use the first entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoomResolutionTable {
    entries: BTreeMap<u8, Resolution>,
}

impl ZoomResolutionTable {
    /// Build a table from `(zoom, resolution)` pairs.
    pub fn from_entries<I>(entries: I) -> Result<Self, ResolutionError>
    where
        I: IntoIterator<Item = (u8, u8)>,
    {
        let entries = entries
            .into_iter()
            .map(|(zoom, res)| resolution_from_u8(res).map(|r| (zoom, r)))
            .collect::<Result<BTreeMap<_, _>, _>>()?;

        if entries.is_empty() {
            return Err(ResolutionError::EmptyTable);
        }
        Ok(Self { entries })
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a constructed table.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in ascending zoom order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, Resolution)> + '_ {
        self.entries.iter().map(|(z, r)| (*z, *r))
    }
}

impl Default for ZoomResolutionTable {
    /// `resolution = clamp(zoom - 7, 0, 12)`, so zoom 18 maps to 11.
    fn default() -> Self {
        let entries = (DEFAULT_ZOOM_OFFSET..=DEFAULT_TABLE_MAX_ZOOM)
            .filter_map(|zoom| {
                Resolution::try_from(zoom - DEFAULT_ZOOM_OFFSET)
                    .ok()
                    .map(|res| (zoom, res))
            })
            .collect();
        Self { entries }
    }
}

impl ResolutionPolicy for ZoomResolutionTable {
    fn resolution_for_zoom(&self, zoom: u8) -> Resolution {
        self.entries
            .range(..=zoom)
            .next_back()
            .or_else(|| self.entries.iter().next())
            .map(|(_, res)| *res)
            .unwrap_or(Resolution::Zero)
    }
}

impl FromStr for ZoomResolutionTable {
    type Err = ResolutionError;

    /// Parse `"16=9, 17=10, 18=11"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let pairs = s
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| {
                let (zoom, res) = entry
                    .split_once('=')
                    .ok_or_else(|| ResolutionError::InvalidEntry(entry.to_string()))?;
                let zoom = zoom
                    .trim()
                    .parse::<u8>()
                    .map_err(|_| ResolutionError::InvalidEntry(entry.to_string()))?;
                let res = res
                    .trim()
                    .parse::<u8>()
                    .map_err(|_| ResolutionError::InvalidEntry(entry.to_string()))?;
                Ok((zoom, res))
            })
            .collect::<Result<Vec<_>, ResolutionError>>()?;

        Self::from_entries(pairs)
    }
}

impl fmt::Display for ZoomResolutionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .entries
            .iter()
            .map(|(zoom, res)| format!("{}={}", zoom, u8::from(*res)))
            .collect();
        write!(f, "{}", parts.join(","))
    }
}
