//! Caller-owned memoization of the last computed overlay.
//!
//! The engine itself is pure. Hosts that want to avoid recomputing the grid
//! on every frame keep an [`OverlayMemo`] next to their map widget and feed
//! it viewport events; only drag-end and zoom-end events may trigger a new
//! tessellation.

use std::sync::Arc;

use tracing::trace;

use super::{OverlayEngine, OverlayFeatureCollection};
use crate::hexgrid::{ResolutionPolicy, ZoomResolutionTable};
use crate::viewport::ViewportBounds;

/// Viewport change reported by the map widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportEvent {
    /// Intermediate pan frame.
    Pan,
    /// User released a drag.
    DragEnd,
    /// Zoom animation finished.
    ZoomEnd,
}

impl ViewportEvent {
    /// Whether this event may trigger a recompute.
    pub fn triggers_recompute(self) -> bool {
        matches!(self, ViewportEvent::DragEnd | ViewportEvent::ZoomEnd)
    }
}

/// Hit/miss counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoStats {
    /// Requests answered from the cached collection.
    pub hits: u64,
    /// Requests that ran the engine.
    pub misses: u64,
}

#[derive(Debug, Clone)]
struct MemoEntry {
    bounds: ViewportBounds,
    zoom: u8,
    overlay: Arc<OverlayFeatureCollection>,
}

/// Last overlay computed by one engine, keyed by `(bounds, zoom)`.
///
/// The memo owns its engine, so a cached collection is only ever returned
/// for the margin, policy and cell limit it was computed with.
#[derive(Debug)]
pub struct OverlayMemo<P = ZoomResolutionTable> {
    engine: OverlayEngine<P>,
    last: Option<MemoEntry>,
    stats: MemoStats,
}

impl Default for OverlayMemo {
    fn default() -> Self {
        Self::new(OverlayEngine::default())
    }
}

impl<P: ResolutionPolicy> OverlayMemo<P> {
    /// Create an empty memo around `engine`.
    pub fn new(engine: OverlayEngine<P>) -> Self {
        Self {
            engine,
            last: None,
            stats: MemoStats::default(),
        }
    }

    /// The engine used for recomputes.
    pub fn engine(&self) -> &OverlayEngine<P> {
        &self.engine
    }

    /// Return the cached overlay if `(bounds, zoom)` matches, otherwise
    /// compute and cache a new one.
    pub fn get_or_compute(&mut self, bounds: &ViewportBounds, zoom: u8) -> Arc<OverlayFeatureCollection> {
        if let Some(entry) = &self.last {
            if entry.zoom == zoom && entry.bounds == *bounds {
                self.stats.hits += 1;
                return Arc::clone(&entry.overlay);
            }
        }

        self.stats.misses += 1;
        let overlay = Arc::new(self.engine.compute_overlay(bounds, zoom));
        self.last = Some(MemoEntry {
            bounds: *bounds,
            zoom,
            overlay: Arc::clone(&overlay),
        });
        overlay
    }

    /// Handle a viewport event.
    ///
    /// Pan frames return the cached overlay (or an empty one before the
    /// first recompute) without running the engine.
    pub fn on_event(
        &mut self,
        event: ViewportEvent,
        bounds: &ViewportBounds,
        zoom: u8,
    ) -> Arc<OverlayFeatureCollection> {
        if event.triggers_recompute() {
            return self.get_or_compute(bounds, zoom);
        }

        trace!(?event, "Viewport event does not trigger recompute");
        self.stats.hits += 1;
        self.current()
            .unwrap_or_else(|| Arc::new(OverlayFeatureCollection::empty()))
    }

    /// The cached overlay, if any.
    pub fn current(&self) -> Option<Arc<OverlayFeatureCollection>> {
        self.last.as_ref().map(|entry| Arc::clone(&entry.overlay))
    }

    /// Drop the cached overlay.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Hit/miss counters since creation.
    pub fn stats(&self) -> MemoStats {
        self.stats
    }
}
