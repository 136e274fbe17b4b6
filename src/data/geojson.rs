//! Minimal serde model of the GeoJSON subset the pipeline consumes.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// GeoJSON geometry types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJsonGeometry {
    Point {
        coordinates: [f64; 2],
    },
    LineString {
        coordinates: Vec<[f64; 2]>,
    },
    Polygon {
        coordinates: Vec<Vec<[f64; 2]>>,
    },
    MultiPoint {
        coordinates: Vec<[f64; 2]>,
    },
    MultiLineString {
        coordinates: Vec<Vec<[f64; 2]>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<[f64; 2]>>>,
    },
}

/// GeoJSON feature with geometry and properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoJsonFeature {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    pub geometry: Option<GeoJsonGeometry>,
    pub properties: Option<HashMap<String, serde_json::Value>>,
}

/// Root GeoJSON object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJson {
    Feature(GeoJsonFeature),
    FeatureCollection { features: Vec<GeoJsonFeature> },
    Geometry(GeoJsonGeometry),
}

impl GeoJson {
    /// Parses a GeoJSON document from a string.
    pub fn from_str(data: &str) -> Result<Self> {
        Ok(serde_json::from_str(data)?)
    }

    /// Reads and parses a GeoJSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        Self::from_str(&std::fs::read_to_string(path)?)
    }

    /// Returns the document's features; a bare feature or geometry becomes a
    /// one-element collection.
    pub fn into_features(self) -> Vec<GeoJsonFeature> {
        match self {
            GeoJson::Feature(feature) => vec![feature],
            GeoJson::FeatureCollection { features } => features,
            GeoJson::Geometry(geometry) => vec![GeoJsonFeature {
                id: None,
                geometry: Some(geometry),
                properties: None,
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_feature_collection() {
        let data = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [-73.9, 40.7]},
                "properties": {"state": "ny"}
            }]
        }"#;

        let features = GeoJson::from_str(data).unwrap().into_features();
        assert_eq!(features.len(), 1);
        match features[0].geometry {
            Some(GeoJsonGeometry::Point { coordinates }) => {
                assert_eq!(coordinates, [-73.9, 40.7]);
            }
            ref other => panic!("unexpected geometry: {:?}", other),
        }
    }

    #[test]
    fn test_parse_multi_polygon() {
        let data = r#"{
            "type": "Feature",
            "geometry": {
                "type": "MultiPolygon",
                "coordinates": [[[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]]
            },
            "properties": null
        }"#;

        let features = GeoJson::from_str(data).unwrap().into_features();
        match &features[0].geometry {
            Some(GeoJsonGeometry::MultiPolygon { coordinates }) => {
                assert_eq!(coordinates[0][0].len(), 4);
            }
            other => panic!("unexpected geometry: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(GeoJson::from_str("{not json").is_err());
    }
}
