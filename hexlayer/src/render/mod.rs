//! Render pass composition.
//!
//! Bundles everything the front end draws for one pass: the hex overlay for
//! the current viewport, the entities that survive visibility filtering,
//! and the numbered cluster badges.

use serde::Serialize;
use tracing::debug;

use crate::annotation::{place_cluster_badges, ClusterBadge};
use crate::config::ConfigFile;
use crate::hexgrid::ResolutionPolicy;
use crate::overlay::{OverlayEngine, OverlayFeatureCollection};
use crate::snapshot::PollingSnapshot;
use crate::viewport::ViewportBounds;
use crate::visibility::{Cluster, DetectedEntity, VisibilityFilter};

/// Per-pass options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Entity sampling threshold.
    pub threshold: f64,
    /// Badge distance north of each cluster marker (meters).
    pub badge_offset_meters: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from_config(&ConfigFile::default(), false)
    }
}

impl RenderOptions {
    /// Options from configuration, optionally for a dense context.
    pub fn from_config(config: &ConfigFile, dense: bool) -> Self {
        Self {
            threshold: config.visibility.threshold_for(dense),
            badge_offset_meters: config.annotation.badge_offset_meters,
        }
    }
}

/// Everything drawn in one render pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderPlan {
    /// Hex coverage overlay (GeoJSON).
    pub overlay: OverlayFeatureCollection,
    /// Clusters, echoed for marker and circle drawing.
    pub clusters: Vec<Cluster>,
    /// Entities to draw.
    pub visible_entities: Vec<DetectedEntity>,
    /// Numbered cluster badges.
    pub badges: Vec<ClusterBadge>,
}

impl RenderPlan {
    /// Build a plan from a snapshot and the current viewport.
    pub fn build<P: ResolutionPolicy>(
        engine: &OverlayEngine<P>,
        snapshot: &PollingSnapshot,
        bounds: &ViewportBounds,
        zoom: u8,
        options: RenderOptions,
    ) -> Self {
        let overlay = engine.compute_overlay(bounds, zoom);
        let visible_entities = VisibilityFilter::new(options.threshold)
            .filter(&snapshot.detected_entities, &snapshot.clusters);
        let badges = place_cluster_badges(&snapshot.clusters, options.badge_offset_meters);

        debug!(
            cells = overlay.len(),
            entities = snapshot.detected_entities.len(),
            visible = visible_entities.len(),
            badges = badges.len(),
            "Built render plan"
        );

        Self {
            overlay,
            clusters: snapshot.clusters.clone(),
            visible_entities,
            badges,
        }
    }
}
