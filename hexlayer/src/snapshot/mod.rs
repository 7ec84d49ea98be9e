//! Polling-layer snapshots.
//!
//! The backend periodically returns the current clusters and detected
//! entities. This module only parses that payload into the core's types;
//! fetching it is the host's job.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::visibility::{Cluster, DetectedEntity};

/// Errors raised while reading a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Reading the file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The payload is not valid snapshot JSON.
    #[error("Invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// One poll's worth of cluster and entity records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollingSnapshot {
    /// Detection clusters.
    #[serde(default)]
    pub clusters: Vec<Cluster>,

    /// Detected entities.
    #[serde(default, alias = "detected_entities")]
    pub detected_entities: Vec<DetectedEntity>,
}

impl PollingSnapshot {
    /// Parse from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)?;
        debug!(
            clusters = snapshot.clusters.len(),
            entities = snapshot.detected_entities.len(),
            "Parsed polling snapshot"
        );
        Ok(snapshot)
    }

    /// Read and parse a JSON file.
    pub fn from_path(path: &Path) -> Result<Self, SnapshotError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::GeoPoint;

    #[test]
    fn test_parse_backend_payload() {
        let json = r#"{
            "clusters": [[[1.343, 103.959], 60], [[1.345, 103.961], 40.5]],
            "detectedEntities": [
                {"coordinates": {"lat": 1.3431, "lon": 103.9591}},
                {"id": "d-7", "coordinates": {"lat": 1.0, "lon": 2.0}, "score": 0.8}
            ],
            "drones": []
        }"#;
        let snapshot = PollingSnapshot::from_json(json).unwrap();

        assert_eq!(snapshot.clusters.len(), 2);
        assert_eq!(snapshot.clusters[1].radius_meters, 40.5);
        assert_eq!(snapshot.detected_entities.len(), 2);
        assert_eq!(snapshot.detected_entities[1].id, "d-7");
        assert_eq!(
            snapshot.detected_entities[0].coordinates,
            GeoPoint::new(1.3431, 103.9591)
        );
    }

    #[test]
    fn test_parse_snake_case_and_missing_fields() {
        let snapshot = PollingSnapshot::from_json(
            r#"{"detected_entities": [{"coordinates": {"lat": 0.0, "lon": 0.0}}]}"#,
        )
        .unwrap();
        assert!(snapshot.clusters.is_empty());
        assert_eq!(snapshot.detected_entities.len(), 1);
    }

    #[test]
    fn test_parse_invalid_json() {
        let err = PollingSnapshot::from_json("{not json").unwrap_err();
        assert!(matches!(err, SnapshotError::Json(_)));
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("snapshot.json");
        std::fs::write(&path, r#"{"clusters": [[[1.0, 2.0], 10]]}"#).unwrap();

        let snapshot = PollingSnapshot::from_path(&path).unwrap();
        assert_eq!(snapshot.clusters[0].center, GeoPoint::new(1.0, 2.0));
    }

    #[test]
    fn test_from_missing_path() {
        let err = PollingSnapshot::from_path(Path::new("/nonexistent/snapshot.json")).unwrap_err();
        assert!(matches!(err, SnapshotError::Io(_)));
    }
}
