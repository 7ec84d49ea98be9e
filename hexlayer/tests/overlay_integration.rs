//! Integration tests for the overlay and visibility engine.
//!
//! These tests drive the public API the way a map host would:
//! - viewport → overlay GeoJSON
//! - polling snapshot → visible entities and cluster badges
//! - viewport events through the caller-owned memo
//!
//! Run with: `cargo test --test overlay_integration`

use std::collections::HashSet;

use h3o::{LatLng, Resolution};
use hexlayer::annotation::{offset_position, place_cluster_badges, DEFAULT_BADGE_OFFSET_METERS};
use hexlayer::compute_overlay;
use hexlayer::filter_visible_entities;
use hexlayer::geo::{pseudo_random_unit, GeoPoint};
use hexlayer::hexgrid::ResolutionPolicy;
use hexlayer::overlay::{OverlayEngine, OverlayMemo, ViewportEvent};
use hexlayer::render::{RenderOptions, RenderPlan};
use hexlayer::snapshot::PollingSnapshot;
use hexlayer::viewport::ViewportBounds;
use hexlayer::visibility::{is_visible, Cluster, DetectedEntity};

// ============================================================================
// Helper Functions
// ============================================================================

/// Viewport over the dashboard's default start position (Singapore, ZL18).
fn singapore_viewport() -> ViewportBounds {
    ViewportBounds::new(GeoPoint::new(1.340, 103.955), GeoPoint::new(1.346, 103.963))
}

/// Backend payload in the polling layer's native shape.
const SNAPSHOT_JSON: &str = r#"{
    "clusters": [
        [[1.343, 103.959], 60],
        [[1.3455, 103.9615], 35]
    ],
    "detectedEntities": [
        {"id": "inside-1", "coordinates": {"lat": 1.343, "lon": 103.959}},
        {"id": "inside-2", "coordinates": {"lat": 1.3456, "lon": 103.9615}},
        {"id": "reference", "coordinates": {"lat": 1.0, "lon": 2.0}},
        {"id": "far", "coordinates": {"lat": 1.5, "lon": 2.25}}
    ]
}"#;

// ============================================================================
// Overlay
// ============================================================================

/// A ZL18 Singapore viewport yields a non-empty grid that covers the whole
/// expanded bounding polygon.
#[test]
fn test_singapore_overlay_covers_expanded_polygon() {
    let bounds = singapore_viewport();
    let overlay = compute_overlay(&bounds, 18);

    assert!(!overlay.is_empty(), "Overlay should contain cells");
    assert_eq!(overlay.resolution(), Some(11));
    assert!(!overlay.is_truncated());

    let ids: HashSet<&str> = overlay.cells().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids.len(), overlay.len(), "Cells should be deduplicated");

    // Sample a lattice over the expanded polygon; each sample's cell must be present
    let polygon = bounds.expand();
    let (min_lat, max_lat, min_lon, max_lon) = polygon.extent();
    let steps = 12;
    for i in 0..=steps {
        for j in 0..=steps {
            let lat = min_lat + (max_lat - min_lat) * i as f64 / steps as f64;
            let lon = min_lon + (max_lon - min_lon) * j as f64 / steps as f64;
            let cell = LatLng::new(lat, lon).unwrap().to_cell(Resolution::Eleven);
            assert!(
                ids.contains(cell.to_string().as_str()),
                "Sample ({}, {}) not covered",
                lat,
                lon
            );
        }
    }
}

/// Every boundary ring in the overlay is closed, and the GeoJSON rings are too.
#[test]
fn test_overlay_rings_closed_in_geojson() {
    let overlay = compute_overlay(&singapore_viewport(), 16);
    assert!(!overlay.is_empty());

    for cell in overlay.cells() {
        assert_eq!(cell.boundary.first(), cell.boundary.last(), "Cell {} ring open", cell.id);
    }

    let json = overlay.to_geojson();
    let features = json["features"].as_array().unwrap();
    assert_eq!(features.len(), overlay.len());
    for feature in features {
        let ring = feature["geometry"]["coordinates"][0].as_array().unwrap();
        assert_eq!(ring.first(), ring.last());
    }
}

/// Invalid viewports produce an empty collection, never a panic.
#[test]
fn test_invalid_viewports_yield_empty_overlay() {
    let p = GeoPoint::new(1.343, 103.959);
    let cases = [
        ViewportBounds::new(p, p),
        ViewportBounds::new(GeoPoint::new(f64::NAN, 103.955), GeoPoint::new(1.346, 103.963)),
        ViewportBounds::new(GeoPoint::new(1.346, 103.963), GeoPoint::new(1.340, 103.955)),
    ];
    for bounds in cases {
        assert!(compute_overlay(&bounds, 18).is_empty());
    }
}

/// A custom closure policy is honoured end to end.
#[test]
fn test_closure_policy_drives_resolution() {
    let policy = |zoom: u8| if zoom >= 18 { Resolution::Ten } else { Resolution::Eight };
    assert_eq!(policy.resolution_for_zoom(18), Resolution::Ten);

    let engine = OverlayEngine::with_policy(policy);
    assert_eq!(engine.compute_overlay(&singapore_viewport(), 18).resolution(), Some(10));
    assert_eq!(engine.compute_overlay(&singapore_viewport(), 15).resolution(), Some(8));
}

/// Drag/zoom end recompute; pan frames reuse the cached overlay.
#[test]
fn test_memo_follows_viewport_events() {
    let mut memo = OverlayMemo::new(OverlayEngine::default());

    let settled = memo.on_event(ViewportEvent::ZoomEnd, &singapore_viewport(), 17);
    for _ in 0..10 {
        memo.on_event(ViewportEvent::Pan, &singapore_viewport(), 17);
    }
    assert_eq!(memo.stats().misses, 1);
    assert!(std::sync::Arc::ptr_eq(&settled, &memo.current().unwrap()));
}

// ============================================================================
// Visibility
// ============================================================================

/// An entity at a cluster center is visible regardless of threshold.
#[test]
fn test_entity_at_cluster_center_visible() {
    let cluster = Cluster::new(GeoPoint::new(1.343, 103.959), 60.0);
    let entity = DetectedEntity::new("e", GeoPoint::new(1.343, 103.959));
    for threshold in [0.0, 0.1, 0.3, 0.99] {
        assert!(is_visible(&entity, &[cluster], threshold));
    }
}

/// The reference entity at (1, 2) hashes to 0.37, so it is hidden at 0.1.
#[test]
fn test_reference_entity_sampling_locked() {
    assert_eq!(pseudo_random_unit(1.0, 2.0), 0.37);

    let entity = DetectedEntity::new("ref", GeoPoint::new(1.000000, 2.000000));
    let visible = is_visible(&entity, &[], 0.1);
    assert_eq!(visible, pseudo_random_unit(1.0, 2.0) < 0.1);
    assert!(!visible);
}

/// Snapshot → filtered entities, stable across repeated render passes.
#[test]
fn test_snapshot_filtering_is_stable() {
    let snapshot = PollingSnapshot::from_json(SNAPSHOT_JSON).unwrap();

    let first = filter_visible_entities(&snapshot.detected_entities, &snapshot.clusters, 0.1);
    let ids: Vec<&str> = first.iter().map(|e| e.id.as_str()).collect();
    // (1.5, 2.25) hashes to 0.59 and (1, 2) to 0.37: both sampled out at 0.1
    assert_eq!(ids, vec!["inside-1", "inside-2"]);

    for _ in 0..5 {
        let again = filter_visible_entities(&snapshot.detected_entities, &snapshot.clusters, 0.1);
        assert_eq!(again, first);
    }

    let generous = filter_visible_entities(&snapshot.detected_entities, &snapshot.clusters, 0.6);
    assert_eq!(generous.len(), 4);
}

// ============================================================================
// Annotation
// ============================================================================

/// Badges sit 20 m north of each cluster, numbered from 1.
#[test]
fn test_cluster_badges_from_snapshot() {
    let snapshot = PollingSnapshot::from_json(SNAPSHOT_JSON).unwrap();
    let badges = place_cluster_badges(&snapshot.clusters, DEFAULT_BADGE_OFFSET_METERS);

    assert_eq!(badges.len(), 2);
    for (i, (badge, cluster)) in badges.iter().zip(&snapshot.clusters).enumerate() {
        assert_eq!(badge.label, i + 1);
        assert_eq!(badge.position.lon, cluster.center.lon);
        assert!(badge.position.lat > cluster.center.lat);
    }

    let origin = GeoPoint::new(1.343, 103.959);
    assert_eq!(offset_position(origin, 0.0), origin);
}

// ============================================================================
// Render plan
// ============================================================================

/// The render plan combines all three outputs and serializes for a front end.
#[test]
fn test_render_plan_end_to_end() {
    let snapshot = PollingSnapshot::from_json(SNAPSHOT_JSON).unwrap();
    let engine = OverlayEngine::default();
    let plan = RenderPlan::build(
        &engine,
        &snapshot,
        &singapore_viewport(),
        17,
        RenderOptions::default(),
    );

    assert!(!plan.overlay.is_empty());
    assert_eq!(plan.badges.len(), 2);
    assert_eq!(plan.clusters.len(), 2);

    let json = serde_json::to_value(&plan).unwrap();
    assert_eq!(json["overlay"]["type"], "FeatureCollection");
    assert_eq!(json["clusters"][0]["radiusMeters"], 60.0);
}
