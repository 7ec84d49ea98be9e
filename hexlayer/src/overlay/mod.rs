//! Overlay computation
//!
//! Turns a viewport into the hex coverage overlay handed to the rendering
//! layer:
//!
//! ```text
//! ViewportBounds ──► expand_viewport ──► BoundingPolygon
//!                                              │
//!            zoom ──► ResolutionPolicy ──► HexGridGenerator
//!                                              │
//!                                              ▼
//!                                   OverlayFeatureCollection (GeoJSON)
//! ```
//!
//! Invalid or empty viewports yield an empty collection; this module never
//! returns errors.
//!
//! # Example
//!
//! ```ignore
//! use hexlayer::overlay::{OverlayEngine, OverlayMemo, ViewportEvent};
//!
//! let mut memo = OverlayMemo::new(OverlayEngine::default());
//!
//! // On every map event; only drag/zoom end actually recompute
//! let overlay = memo.on_event(ViewportEvent::DragEnd, &bounds, zoom);
//! let geojson = serde_json::to_string(&*overlay)?;
//! ```

mod collection;
mod memo;

pub use collection::OverlayFeatureCollection;
pub use memo::{MemoStats, OverlayMemo, ViewportEvent};

use tracing::debug;

use crate::config::OverlaySettings;
use crate::hexgrid::{HexGridGenerator, ResolutionPolicy, ZoomResolutionTable};
use crate::viewport::{expand_viewport, ViewportBounds, DEFAULT_MARGIN_DEGREES};

/// Computes hex overlays for viewports.
#[derive(Debug, Clone)]
pub struct OverlayEngine<P = ZoomResolutionTable> {
    margin_degrees: f64,
    generator: HexGridGenerator<P>,
}

impl Default for OverlayEngine {
    fn default() -> Self {
        Self::with_policy(ZoomResolutionTable::default())
    }
}

impl OverlayEngine {
    /// Build an engine from configuration settings.
    pub fn from_settings(settings: &OverlaySettings) -> Self {
        Self::with_policy(settings.resolution_table.clone())
            .with_margin(settings.margin_degrees)
            .with_max_cells(settings.max_cells)
    }
}

impl<P: ResolutionPolicy> OverlayEngine<P> {
    /// Create an engine using `policy` for zoom → resolution.
    pub fn with_policy(policy: P) -> Self {
        Self {
            margin_degrees: DEFAULT_MARGIN_DEGREES,
            generator: HexGridGenerator::new(policy),
        }
    }

    /// Set the viewport margin (degrees).
    pub fn with_margin(mut self, margin_degrees: f64) -> Self {
        self.margin_degrees = margin_degrees;
        self
    }

    /// Set the per-overlay cell limit.
    pub fn with_max_cells(mut self, max_cells: usize) -> Self {
        self.generator = self.generator.with_max_cells(max_cells);
        self
    }

    /// Viewport margin in degrees.
    pub fn margin_degrees(&self) -> f64 {
        self.margin_degrees
    }

    /// The underlying grid generator.
    pub fn generator(&self) -> &HexGridGenerator<P> {
        &self.generator
    }

    /// Compute the overlay for a viewport at a zoom level.
    pub fn compute_overlay(&self, bounds: &ViewportBounds, zoom: u8) -> OverlayFeatureCollection {
        if let Err(e) = bounds.validate() {
            debug!(error = %e, "Viewport rejected, returning empty overlay");
            return OverlayFeatureCollection::empty();
        }

        let polygon = expand_viewport(bounds, self.margin_degrees);
        let grid = self.generator.generate(&polygon, zoom);

        debug!(
            zoom,
            cells = grid.len(),
            truncated = grid.truncated,
            "Computed overlay"
        );
        OverlayFeatureCollection::from(grid)
    }
}

/// Compute an overlay with the default engine.
pub fn compute_overlay(bounds: &ViewportBounds, zoom: u8) -> OverlayFeatureCollection {
    OverlayEngine::default().compute_overlay(bounds, zoom)
}
