//! Viewport bounds and the padded polygon the hex grid is generated over.
//!
//! The map widget reports its visible area as a southwest/northeast corner
//! pair. Before tessellating we grow that box by a fixed margin so cells
//! straddling the screen edge are still drawn while the user pans.
//!
//! Anti-meridian and pole crossing viewports are not supported: bounds are
//! expected to satisfy `south_west <= north_east` component-wise.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geo::GeoPoint;

/// Default padding added on every side of the viewport (degrees).
pub const DEFAULT_MARGIN_DEGREES: f64 = 0.005;

/// Number of points in a [`BoundingPolygon`] ring (four corners plus closure).
pub const BOUNDING_RING_LEN: usize = 5;

/// Reasons a viewport cannot be tessellated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViewportError {
    /// A corner has a NaN or infinite component.
    #[error("Viewport corner is not finite: {0}")]
    NonFinite(GeoPoint),

    /// Southwest corner lies north or east of the northeast corner.
    #[error("Viewport is inverted: south-west {south_west} is not below/left of north-east {north_east}")]
    Inverted {
        south_west: GeoPoint,
        north_east: GeoPoint,
    },

    /// Both corners are the same point.
    #[error("Viewport is empty: both corners at {0}")]
    Empty(GeoPoint),
}

/// Visible map area as reported by the map widget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportBounds {
    /// Southwest corner (minimum lat/lon).
    pub south_west: GeoPoint,
    /// Northeast corner (maximum lat/lon).
    pub north_east: GeoPoint,
}

impl ViewportBounds {
    /// Create bounds from two corners.
    pub const fn new(south_west: GeoPoint, north_east: GeoPoint) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    /// Check that the bounds describe a usable, non-empty area.
    pub fn validate(&self) -> Result<(), ViewportError> {
        for corner in [self.south_west, self.north_east] {
            if !corner.is_finite() {
                return Err(ViewportError::NonFinite(corner));
            }
        }
        if self.south_west.lat > self.north_east.lat || self.south_west.lon > self.north_east.lon {
            return Err(ViewportError::Inverted {
                south_west: self.south_west,
                north_east: self.north_east,
            });
        }
        if self.south_west == self.north_east {
            return Err(ViewportError::Empty(self.south_west));
        }
        Ok(())
    }

    /// Center of the box (simple midpoint, no wraparound).
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.south_west.lat + self.north_east.lat) / 2.0,
            (self.south_west.lon + self.north_east.lon) / 2.0,
        )
    }

    /// Expand into a closed ring using [`DEFAULT_MARGIN_DEGREES`].
    pub fn expand(&self) -> BoundingPolygon {
        expand_viewport(self, DEFAULT_MARGIN_DEGREES)
    }
}

/// Closed 5-point ring produced by [`expand_viewport`].
///
/// Point order: SW, SE, NE, NW, SW. The first and last points are always
/// equal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingPolygon {
    ring: [GeoPoint; BOUNDING_RING_LEN],
}

impl BoundingPolygon {
    /// The ring points, closed.
    pub fn ring(&self) -> &[GeoPoint] {
        &self.ring
    }

    /// Southwest corner of the expanded box.
    pub fn south_west(&self) -> GeoPoint {
        self.ring[0]
    }

    /// Northeast corner of the expanded box.
    pub fn north_east(&self) -> GeoPoint {
        self.ring[2]
    }

    /// Axis-aligned extent as `(min_lat, max_lat, min_lon, max_lon)`.
    pub fn extent(&self) -> (f64, f64, f64, f64) {
        self.ring.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY),
            |(min_lat, max_lat, min_lon, max_lon), p| {
                (
                    min_lat.min(p.lat),
                    max_lat.max(p.lat),
                    min_lon.min(p.lon),
                    max_lon.max(p.lon),
                )
            },
        )
    }

    /// Midpoint of the expanded box.
    pub fn center(&self) -> GeoPoint {
        let (min_lat, max_lat, min_lon, max_lon) = self.extent();
        GeoPoint::new((min_lat + max_lat) / 2.0, (min_lon + max_lon) / 2.0)
    }

    /// Returns true if every ring point is finite.
    pub fn is_finite(&self) -> bool {
        self.ring.iter().all(GeoPoint::is_finite)
    }

    /// Returns true if `point` lies inside or on the edge of the box.
    pub fn contains(&self, point: GeoPoint) -> bool {
        let (min_lat, max_lat, min_lon, max_lon) = self.extent();
        (min_lat..=max_lat).contains(&point.lat) && (min_lon..=max_lon).contains(&point.lon)
    }
}

/// Pad a viewport by `margin_degrees` on every side.
///
/// Never fails: empty bounds still produce a valid (possibly zero-area)
/// ring, and non-finite input simply propagates into the ring.
pub fn expand_viewport(bounds: &ViewportBounds, margin_degrees: f64) -> BoundingPolygon {
    let south = bounds.south_west.lat - margin_degrees;
    let west = bounds.south_west.lon - margin_degrees;
    let north = bounds.north_east.lat + margin_degrees;
    let east = bounds.north_east.lon + margin_degrees;

    let sw = GeoPoint::new(south, west);
    BoundingPolygon {
        ring: [
            sw,
            GeoPoint::new(south, east),
            GeoPoint::new(north, east),
            GeoPoint::new(north, west),
            sw,
        ],
    }
}
