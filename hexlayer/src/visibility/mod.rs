//! Entity visibility filtering.
//!
//! Decides which detected entities are drawn on each render pass:
//!
//! 1. Anything within a cluster's radius is always shown.
//! 2. Everything else is sampled: shown if the coordinate's
//!    [`pseudo_random_unit`] falls below the threshold.
//!
//! The decision depends only on the entity coordinates, the cluster set and
//! the threshold, so repeated renders never flicker.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::geo::{distance_meters, pseudo_random_unit, GeoPoint};

/// Threshold used outside dense contexts.
pub const DEFAULT_THRESHOLD: f64 = 0.3;

/// Threshold used where many entities crowd the map.
pub const DENSE_THRESHOLD: f64 = 0.1;

/// A zone of interest: center plus catchment radius.
///
/// Deserializes from both the polling layer's tuple form
/// `[[lat, lon], radiusMeters]` and an object
/// `{"center": [lat, lon] | {"lat", "lon"}, "radiusMeters": r}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "ClusterRecord", rename_all = "camelCase")]
pub struct Cluster {
    /// Cluster center.
    pub center: GeoPoint,
    /// Catchment radius in meters.
    pub radius_meters: f64,
}

impl Cluster {
    /// Create a new cluster.
    pub const fn new(center: GeoPoint, radius_meters: f64) -> Self {
        Self {
            center,
            radius_meters,
        }
    }

    /// Returns true if `point` is within the catchment radius.
    ///
    /// Non-finite centers or radii never contain anything.
    #[inline]
    pub fn contains(&self, point: GeoPoint) -> bool {
        self.center.is_finite()
            && self.radius_meters.is_finite()
            && distance_meters(point, self.center) <= self.radius_meters
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CenterRecord {
    Pair([f64; 2]),
    Point(GeoPoint),
}

impl From<CenterRecord> for GeoPoint {
    fn from(record: CenterRecord) -> Self {
        match record {
            CenterRecord::Pair(pair) => GeoPoint::from(pair),
            CenterRecord::Point(point) => point,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ClusterRecord {
    Tuple([f64; 2], f64),
    Object {
        center: CenterRecord,
        #[serde(rename = "radiusMeters", alias = "radius_meters", alias = "radius")]
        radius_meters: f64,
    },
}

impl From<ClusterRecord> for Cluster {
    fn from(record: ClusterRecord) -> Self {
        match record {
            ClusterRecord::Tuple(center, radius_meters) => Cluster::new(center.into(), radius_meters),
            ClusterRecord::Object {
                center,
                radius_meters,
            } => Cluster::new(center.into(), radius_meters),
        }
    }
}

/// A sensor-reported point of interest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedEntity {
    /// Identifier from the polling layer (may be empty).
    #[serde(default)]
    pub id: String,
    /// Reported position.
    pub coordinates: GeoPoint,
}

impl DetectedEntity {
    /// Create a new entity.
    pub fn new(id: impl Into<String>, coordinates: GeoPoint) -> Self {
        Self {
            id: id.into(),
            coordinates,
        }
    }
}

/// Decide whether one entity should be drawn.
///
/// Entities with non-finite coordinates are never visible.
pub fn is_visible(entity: &DetectedEntity, clusters: &[Cluster], threshold: f64) -> bool {
    let point = entity.coordinates;
    if !point.is_finite() {
        return false;
    }
    if clusters.iter().any(|cluster| cluster.contains(point)) {
        return true;
    }
    pseudo_random_unit(point.lat, point.lon) < threshold
}

/// Select the entities to draw, preserving input order.
pub fn filter_visible_entities(
    entities: &[DetectedEntity],
    clusters: &[Cluster],
    threshold: f64,
) -> Vec<DetectedEntity> {
    VisibilityFilter::new(threshold).filter(entities, clusters)
}

/// Visibility filter bound to a sampling threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityFilter {
    threshold: f64,
}

impl Default for VisibilityFilter {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl VisibilityFilter {
    /// Create a filter with the given threshold.
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Filter for dense contexts ([`DENSE_THRESHOLD`]).
    pub fn dense() -> Self {
        Self::new(DENSE_THRESHOLD)
    }

    /// Sampling threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Decide one entity.
    pub fn is_visible(&self, entity: &DetectedEntity, clusters: &[Cluster]) -> bool {
        is_visible(entity, clusters, self.threshold)
    }

    /// Visible subset, input order preserved.
    pub fn filter(&self, entities: &[DetectedEntity], clusters: &[Cluster]) -> Vec<DetectedEntity> {
        let visible: Vec<DetectedEntity> = entities
            .iter()
            .filter(|e| self.is_visible(e, clusters))
            .cloned()
            .collect();

        tracing::trace!(
            total = entities.len(),
            visible = visible.len(),
            clusters = clusters.len(),
            threshold = self.threshold,
            "Filtered entities"
        );
        visible
    }

    /// Same result as [`filter`](Self::filter), evaluated on the rayon pool.
    pub fn filter_par(
        &self,
        entities: &[DetectedEntity],
        clusters: &[Cluster],
    ) -> Vec<DetectedEntity> {
        entities
            .par_iter()
            .filter(|e| self.is_visible(e, clusters))
            .cloned()
            .collect()
    }
}
