//! Annotation placement around cluster markers.
//!
//! Each cluster gets a numbered badge drawn a short distance north of its
//! marker so the two icons don't overlap.

use std::f64::consts::PI;

use serde::Serialize;

use crate::geo::GeoPoint;
use crate::visibility::Cluster;

/// WGS84 equatorial radius used for the north offset (meters).
pub const EQUATORIAL_RADIUS_METERS: f64 = 6_378_137.0;

/// Distance between a cluster marker and its badge (meters).
pub const DEFAULT_BADGE_OFFSET_METERS: f64 = 20.0;

/// Shift `origin` due north by `distance_meters`.
///
/// Equirectangular approximation: longitude is unchanged and the latitude
/// delta is `distance / R` radians. Good enough for offsets of tens of
/// meters; not geodesically exact.
#[inline]
pub fn offset_position(origin: GeoPoint, distance_meters: f64) -> GeoPoint {
    let d_lat = (distance_meters / EQUATORIAL_RADIUS_METERS) * (180.0 / PI);
    GeoPoint::new(origin.lat + d_lat, origin.lon)
}

/// Numbered badge placed next to a cluster marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClusterBadge {
    /// 1-based cluster number shown in the badge.
    pub label: usize,
    /// Badge position.
    pub position: GeoPoint,
}

/// One badge per cluster, labelled in input order starting at 1.
pub fn place_cluster_badges(clusters: &[Cluster], offset_meters: f64) -> Vec<ClusterBadge> {
    clusters
        .iter()
        .enumerate()
        .map(|(index, cluster)| ClusterBadge {
            label: index + 1,
            position: offset_position(cluster.center, offset_meters),
        })
        .collect()
}
