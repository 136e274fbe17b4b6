//! District features and label anchors parsed out of GeoJSON.

use crate::core::geo::{LatLng, LatLngBounds};
use crate::data::geojson::{GeoJson, GeoJsonFeature, GeoJsonGeometry};
use crate::data::states;
use crate::{Error, Result};
use std::collections::HashMap;
use std::path::Path;

/// Census property carrying the state FIPS code.
const STATE_FIELD: &str = "STATEFP";
/// Census property carrying the district number within its state.
const DISTRICT_FIELD: &str = "CD113FP";

/// District code the Census assigns to undefined areas (large water bodies);
/// such features get outlines but never a map of their own.
const UNDEFINED_DISTRICT: &str = "ZZ";

/// One congressional district: identity, outer boundary rings, and the
/// geographic bounding box that drives its map layout.
#[derive(Debug, Clone)]
pub struct District {
    pub state_fips: u32,
    pub usps: &'static str,
    pub state_name: &'static str,
    pub code: String,
    pub rings: Vec<Vec<LatLng>>,
    bounds: LatLngBounds,
}

impl District {
    /// Output key, e.g. `CA12`. Doubles as the CLI filter key.
    pub fn key(&self) -> String {
        format!("{}{}", self.usps, self.code)
    }

    /// District number as an integer (`"07"` -> 7; `0` for at-large seats).
    pub fn number(&self) -> Result<u32> {
        self.code
            .parse()
            .map_err(|_| Error::ParseError(format!("district code {:?} is not numeric", self.code)))
    }

    pub fn is_undefined(&self) -> bool {
        self.code == UNDEFINED_DISTRICT
    }

    pub fn bounds(&self) -> &LatLngBounds {
        &self.bounds
    }
}

/// Loads all district features from a GeoJSON FeatureCollection, in document
/// order. An unrecognized state identifier fails the whole load.
pub fn load_districts(path: &Path) -> Result<Vec<District>> {
    let features = GeoJson::from_file(path)?.into_features();
    let mut districts = Vec::with_capacity(features.len());

    for feature in features {
        let state_fips = prop_string(&feature, STATE_FIELD)?
            .parse::<u32>()
            .map_err(|_| Error::ParseError(format!("{} is not numeric", STATE_FIELD)))?;
        let usps = states::usps_for_fips(state_fips)?;
        let state_name = states::name_for_usps(usps)?;
        let code = prop_string(&feature, DISTRICT_FIELD)?;

        let rings = outer_rings(&feature)?;
        let bounds = ring_bounds(&rings)
            .ok_or_else(|| Error::ParseError(format!("{}{} has no geometry", usps, code)))?;

        districts.push(District {
            state_fips,
            usps,
            state_name,
            code,
            rings,
            bounds,
        });
    }

    Ok(districts)
}

/// Label anchor points, one per district, keyed by lowercase state code and
/// district number.
#[derive(Debug, Default)]
pub struct LabelIndex {
    points: HashMap<(String, String), LatLng>,
}

impl LabelIndex {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn load(path: &Path) -> Result<Self> {
        let mut points = HashMap::new();

        for feature in GeoJson::from_file(path)?.into_features() {
            let state = prop_string(&feature, "state")?.to_lowercase();
            let code = normalize_code(&prop_string(&feature, "district")?);
            if let Some(GeoJsonGeometry::Point { coordinates }) = feature.geometry {
                points.insert((state, code), LatLng::new(coordinates[1], coordinates[0]));
            }
        }

        Ok(Self { points })
    }

    pub fn get(&self, usps: &str, code: &str) -> Option<LatLng> {
        self.points
            .get(&(usps.to_lowercase(), normalize_code(code)))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Zero-pads numeric district codes so `"1"`, `"01"`, and `1` all collide.
fn normalize_code(code: &str) -> String {
    match code.trim().parse::<u32>() {
        Ok(n) => format!("{:02}", n),
        Err(_) => code.trim().to_uppercase(),
    }
}

/// Reads a property as a string, tolerating numeric JSON values (ogr2ogr
/// sometimes emits FIPS codes as numbers).
fn prop_string(feature: &GeoJsonFeature, key: &str) -> Result<String> {
    let value = feature
        .properties
        .as_ref()
        .and_then(|props| props.get(key))
        .ok_or_else(|| Error::ParseError(format!("feature is missing property {:?}", key)))?;

    match value {
        serde_json::Value::String(s) => Ok(s.clone()),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(Error::ParseError(format!(
            "property {:?} has unsupported type: {}",
            key, other
        ))),
    }
}

/// Outer boundary rings of a polygonal feature, as lat/lng paths.
fn outer_rings(feature: &GeoJsonFeature) -> Result<Vec<Vec<LatLng>>> {
    let to_ring =
        |ring: &Vec<[f64; 2]>| -> Vec<LatLng> { ring.iter().map(|c| LatLng::new(c[1], c[0])).collect() };

    match &feature.geometry {
        Some(GeoJsonGeometry::Polygon { coordinates }) => {
            Ok(coordinates.first().map(to_ring).into_iter().collect())
        }
        Some(GeoJsonGeometry::MultiPolygon { coordinates }) => Ok(coordinates
            .iter()
            .filter_map(|polygon| polygon.first().map(to_ring))
            .collect()),
        other => Err(Error::ParseError(format!(
            "expected a polygonal geometry, got {:?}",
            other
        ))),
    }
}

fn ring_bounds(rings: &[Vec<LatLng>]) -> Option<LatLngBounds> {
    let mut points = rings.iter().flatten();
    let first = points.next()?;
    let mut bounds = LatLngBounds::new(*first, *first);
    for point in points {
        bounds.extend(point);
    }
    Some(bounds)
}
