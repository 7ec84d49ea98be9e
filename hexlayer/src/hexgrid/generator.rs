//! Hexagonal tessellation of a bounding polygon.
//!
//! The polygon is handed to h3o's polyfill with
//! [`ContainmentMode::IntersectsBoundary`], so every cell that touches the
//! box or lies within it is kept. Output is sorted by cell index.

use geo_types::{Coord, LineString};
use h3o::geom::{ContainmentMode, PolyfillConfig, Polygon, ToCells};
use h3o::{CellIndex, LatLng, Resolution};
use serde::Serialize;
use tracing::{debug, warn};

use super::resolution::{ResolutionPolicy, ZoomResolutionTable};
use crate::geo::GeoPoint;
use crate::viewport::BoundingPolygon;

/// Default upper bound on cells generated for one viewport.
pub const DEFAULT_MAX_CELLS: usize = 50_000;

/// One hexagonal grid cell with its boundary ring.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HexCell {
    /// H3 cell index in its canonical hexadecimal form.
    pub id: String,
    /// Closed boundary ring in (lat, lon); first point equals last.
    pub boundary: Vec<GeoPoint>,
}

impl HexCell {
    /// Build a cell from an H3 index.
    pub fn from_index(cell: CellIndex) -> Self {
        let mut boundary: Vec<GeoPoint> = cell
            .boundary()
            .iter()
            .map(|ll| GeoPoint::new(ll.lat(), ll.lng()))
            .collect();
        if let Some(first) = boundary.first().copied() {
            boundary.push(first);
        }
        Self {
            id: cell.to_string(),
            boundary,
        }
    }

    /// Returns true if the boundary ring is closed.
    pub fn is_closed(&self) -> bool {
        self.boundary.len() > 1 && self.boundary.first() == self.boundary.last()
    }
}

/// Result of one tessellation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HexGrid {
    /// Cells sorted by index.
    pub cells: Vec<HexCell>,
    /// Resolution the grid was generated at.
    pub resolution: Option<Resolution>,
    /// True if generation stopped at the cell limit.
    pub truncated: bool,
}

impl HexGrid {
    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if no cells were generated.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Tessellates bounding polygons into hex cells.
#[derive(Debug, Clone)]
pub struct HexGridGenerator<P = ZoomResolutionTable> {
    policy: P,
    max_cells: usize,
}

impl Default for HexGridGenerator {
    fn default() -> Self {
        Self::new(ZoomResolutionTable::default())
    }
}

impl<P: ResolutionPolicy> HexGridGenerator<P> {
    /// Create a generator with the given resolution policy.
    pub fn new(policy: P) -> Self {
        Self {
            policy,
            max_cells: DEFAULT_MAX_CELLS,
        }
    }

    /// Set the cell limit.
    pub fn with_max_cells(mut self, max_cells: usize) -> Self {
        self.max_cells = max_cells.max(1);
        self
    }

    /// The resolution policy in use.
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Cell limit.
    pub fn max_cells(&self) -> usize {
        self.max_cells
    }

    /// Resolution chosen for a zoom level.
    pub fn resolution_for_zoom(&self, zoom: u8) -> Resolution {
        self.policy.resolution_for_zoom(zoom)
    }

    /// Tessellate `polygon` at the resolution chosen for `zoom`.
    pub fn generate(&self, polygon: &BoundingPolygon, zoom: u8) -> HexGrid {
        self.generate_at(polygon, self.resolution_for_zoom(zoom))
    }

    /// Tessellate `polygon` at an explicit resolution.
    ///
    /// Returns an empty grid if the polygon is not finite or extends past
    /// ±90° latitude / ±180° longitude. A polygon smaller than one cell
    /// yields the cell containing its center.
    pub fn generate_at(&self, polygon: &BoundingPolygon, resolution: Resolution) -> HexGrid {
        if !polygon.is_finite() {
            debug!("Skipping tessellation of non-finite polygon");
            return HexGrid::default();
        }
        if !is_geographic(polygon) {
            debug!("Skipping tessellation of polygon outside geographic range");
            return HexGrid::default();
        }

        let config =
            PolyfillConfig::new(resolution).containment_mode(ContainmentMode::IntersectsBoundary);
        let mut kept: Vec<CellIndex> = match Polygon::from_degrees(to_geo_polygon(polygon)) {
            Ok(shape) => shape.to_cells(config).take(self.max_cells.saturating_add(1)).collect(),
            Err(e) => {
                debug!(error = %e, "Polyfill rejected polygon, falling back to center cell");
                Vec::new()
            }
        };

        kept.sort_unstable_by_key(|cell| u64::from(*cell));
        kept.dedup();

        let truncated = kept.len() > self.max_cells;
        if truncated {
            kept.truncate(self.max_cells);
            warn!(
                resolution = u8::from(resolution),
                max_cells = self.max_cells,
                "Hex grid truncated at cell limit"
            );
        }

        if kept.is_empty() {
            let center = polygon.center();
            match LatLng::new(center.lat, center.lon) {
                Ok(ll) => kept.push(ll.to_cell(resolution)),
                Err(e) => {
                    debug!(center = %center, error = %e, "Polygon center is not a valid coordinate");
                    return HexGrid::default();
                }
            }
        }

        let cells: Vec<HexCell> = kept.into_iter().map(HexCell::from_index).collect();
        debug!(
            resolution = u8::from(resolution),
            cells = cells.len(),
            truncated,
            "Generated hex grid"
        );

        HexGrid {
            cells,
            resolution: Some(resolution),
            truncated,
        }
    }
}

fn is_geographic(polygon: &BoundingPolygon) -> bool {
    let (min_lat, max_lat, min_lon, max_lon) = polygon.extent();
    min_lat >= -90.0 && max_lat <= 90.0 && min_lon >= -180.0 && max_lon <= 180.0
}

/// The ring as a `geo_types` polygon (x = lon, y = lat).
fn to_geo_polygon(polygon: &BoundingPolygon) -> geo_types::Polygon<f64> {
    let exterior: LineString<f64> = polygon
        .ring()
        .iter()
        .map(|p| Coord { x: p.lon, y: p.lat })
        .collect();
    geo_types::Polygon::new(exterior, Vec::new())
}
