//! Overlay feature collection and its GeoJSON form.

use serde::ser::{Serialize, Serializer};

use crate::hexgrid::{HexCell, HexGrid};

/// Hex cells packaged for the rendering layer.
///
/// Regenerated wholesale on every recompute. Serializes as a GeoJSON
/// `FeatureCollection` of `Polygon` features whose rings use `[lon, lat]`
/// order; the cell id is carried in `properties.id`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayFeatureCollection {
    cells: Vec<HexCell>,
    resolution: Option<u8>,
    truncated: bool,
}

impl OverlayFeatureCollection {
    /// An empty collection.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Cells in the collection.
    pub fn cells(&self) -> &[HexCell] {
        &self.cells
    }

    /// H3 resolution of the cells, if any were generated.
    pub fn resolution(&self) -> Option<u8> {
        self.resolution
    }

    /// True if the grid hit the cell limit.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Number of features.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if there are no features.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Serialize to a GeoJSON value.
    pub fn to_geojson(&self) -> serde_json::Value {
        // Serializing plain numbers and strings into a Value cannot fail
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

impl From<HexGrid> for OverlayFeatureCollection {
    fn from(grid: HexGrid) -> Self {
        Self {
            resolution: grid.resolution.map(u8::from),
            truncated: grid.truncated,
            cells: grid.cells,
        }
    }
}

#[derive(serde::Serialize)]
struct GeoJsonCollection<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    features: Vec<GeoJsonFeature<'a>>,
}

#[derive(serde::Serialize)]
struct GeoJsonFeature<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    properties: GeoJsonProperties<'a>,
    geometry: GeoJsonPolygon,
}

#[derive(serde::Serialize)]
struct GeoJsonProperties<'a> {
    id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    resolution: Option<u8>,
}

#[derive(serde::Serialize)]
struct GeoJsonPolygon {
    #[serde(rename = "type")]
    kind: &'static str,
    coordinates: Vec<Vec<[f64; 2]>>,
}

impl Serialize for OverlayFeatureCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let features = self
            .cells
            .iter()
            .map(|cell| GeoJsonFeature {
                kind: "Feature",
                properties: GeoJsonProperties {
                    id: &cell.id,
                    resolution: self.resolution,
                },
                geometry: GeoJsonPolygon {
                    kind: "Polygon",
                    coordinates: vec![cell
                        .boundary
                        .iter()
                        .map(|p| p.to_geojson_position())
                        .collect()],
                },
            })
            .collect();

        GeoJsonCollection {
            kind: "FeatureCollection",
            features,
        }
        .serialize(serializer)
    }
}
