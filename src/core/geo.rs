use crate::core::constants::MAX_LATITUDE;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Web Mercator earth radius (EPSG:3857 sphere).
const EARTH_RADIUS: f64 = 6378137.0;

/// Represents a geographical coordinate with latitude and longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Creates a new LatLng coordinate
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validates that the coordinates are within valid ranges
    pub fn is_valid(&self) -> bool {
        self.lat >= -90.0 && self.lat <= 90.0 && self.lng >= -180.0 && self.lng <= 180.0
    }

    /// Converts to Web Mercator projection (EPSG:3857)
    pub fn to_mercator(&self) -> (f64, f64) {
        let x = self.lng.to_radians() * EARTH_RADIUS;
        let y = ((PI / 4.0 + self.lat.to_radians() / 2.0).tan().ln()) * EARTH_RADIUS;
        (x, y)
    }

    /// Creates LatLng from Web Mercator coordinates
    pub fn from_mercator(x: f64, y: f64) -> Self {
        let lng = (x / EARTH_RADIUS).to_degrees();
        let lat = (2.0 * (y / EARTH_RADIUS).exp().atan() - PI / 2.0).to_degrees();
        Self::new(lat, lng)
    }
}

impl Default for LatLng {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Represents a bounding box of geographical coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatLngBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl LatLngBounds {
    pub fn new(south_west: LatLng, north_east: LatLng) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    /// Creates bounds from individual coordinates
    pub fn from_coords(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self::new(LatLng::new(south, west), LatLng::new(north, east))
    }

    /// Checks if the bounds contain a point
    pub fn contains(&self, point: &LatLng) -> bool {
        point.lat >= self.south_west.lat
            && point.lat <= self.north_east.lat
            && point.lng >= self.south_west.lng
            && point.lng <= self.north_east.lng
    }

    /// Extends the bounds to include a point
    pub fn extend(&mut self, point: &LatLng) {
        self.south_west.lat = self.south_west.lat.min(point.lat);
        self.south_west.lng = self.south_west.lng.min(point.lng);
        self.north_east.lat = self.north_east.lat.max(point.lat);
        self.north_east.lng = self.north_east.lng.max(point.lng);
    }

    /// Gets the span of the bounds
    pub fn span(&self) -> LatLng {
        LatLng::new(
            self.north_east.lat - self.south_west.lat,
            self.north_east.lng - self.south_west.lng,
        )
    }

    /// Returns bounds grown by `fraction` of the current span on every side,
    /// framing a feature with breathing room. Invariant: min stays <= max on
    /// each axis for any non-negative fraction.
    pub fn expanded(&self, fraction: f64) -> LatLngBounds {
        let span = self.span();
        LatLngBounds::from_coords(
            self.south_west.lat - span.lat * fraction,
            self.south_west.lng - span.lng * fraction,
            self.north_east.lat + span.lat * fraction,
            self.north_east.lng + span.lng * fraction,
        )
    }
}

/// Represents a tile coordinate in the slippy map tile system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: u32,
    pub y: u32,
    pub z: u8,
}

impl TileCoord {
    pub fn new(x: u32, y: u32, z: u8) -> Self {
        Self { x, y, z }
    }

    /// Converts tile coordinate to LatLng (northwest corner)
    pub fn to_lat_lng(&self) -> LatLng {
        let n = 2_f64.powi(self.z as i32);
        let lng = self.x as f64 / n * 360.0 - 180.0;
        let lat = (PI * (1.0 - 2.0 * self.y as f64 / n)).sinh().atan().to_degrees();

        LatLng::new(lat, lng)
    }

    /// Checks if the tile is valid for the given zoom level
    pub fn is_valid(&self) -> bool {
        let max_coord = 2_u32.pow(self.z as u32);
        self.x < max_coord && self.y < max_coord
    }
}

/// A point located within the tile grid of one zoom level: the tile that
/// contains it plus fractional offsets in `[0, 1)` on each axis.
///
/// Offsets are what let a mosaic be pasted at sub-tile precision; indices are
/// only meaningful for the zoom level they were computed at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TilePosition {
    pub tile: TileCoord,
    pub x_offset: f64,
    pub y_offset: f64,
}

impl TilePosition {
    /// Locates `(lng, lat)` in the slippy-map tile grid at `zoom`.
    ///
    /// Latitudes at or beyond the Web Mercator asymptotic limit and
    /// non-finite inputs are rejected rather than letting NaN reach the
    /// downstream pixel arithmetic.
    pub fn from_lng_lat(lng: f64, lat: f64, zoom: u8) -> Result<Self> {
        if !lng.is_finite() || !lat.is_finite() {
            return Err(Error::InvalidCoordinates(format!(
                "non-finite coordinate ({}, {})",
                lng, lat
            )));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(Error::InvalidCoordinates(format!(
                "longitude {} out of range",
                lng
            )));
        }
        if lat.abs() >= MAX_LATITUDE {
            return Err(Error::InvalidCoordinates(format!(
                "latitude {} at or beyond the Mercator limit",
                lat
            )));
        }

        let n = 2_f64.powi(zoom as i32);
        // Half-open grid: the antimeridian belongs to the last column.
        let max_fraction = n * (1.0 - 1e-12);

        let xf = ((lng + 180.0) / 360.0 * n).clamp(0.0, max_fraction);
        let lat_rad = lat.to_radians();
        let yf = ((1.0 - lat_rad.tan().asinh() / PI) / 2.0 * n).clamp(0.0, max_fraction);

        let x = xf.floor();
        let y = yf.floor();
        Ok(Self {
            tile: TileCoord::new(x as u32, y as u32, zoom),
            x_offset: xf - x,
            y_offset: yf - y,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lat_lng_creation() {
        let coord = LatLng::new(40.7128, -74.0060);
        assert_eq!(coord.lat, 40.7128);
        assert_eq!(coord.lng, -74.0060);
        assert!(coord.is_valid());
    }

    #[test]
    fn test_root_tile_at_origin() {
        let pos = TilePosition::from_lng_lat(0.0, 0.0, 0).unwrap();
        assert_eq!(pos.tile, TileCoord::new(0, 0, 0));
        assert!((pos.x_offset - 0.5).abs() < 1e-9);
        assert!((pos.y_offset - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_tile_indices_within_grid() {
        for zoom in [0u8, 3, 7, 12] {
            let n = 2_u32.pow(zoom as u32);
            for lng in [-180.0, -74.0060, 0.0, 122.7, 180.0] {
                for lat in [-85.0, -33.86, 0.0, 40.7128, 85.0] {
                    let pos = TilePosition::from_lng_lat(lng, lat, zoom).unwrap();
                    assert!(pos.tile.x < n, "x out of range at z{}", zoom);
                    assert!(pos.tile.y < n, "y out of range at z{}", zoom);
                    assert!((0.0..1.0).contains(&pos.x_offset));
                    assert!((0.0..1.0).contains(&pos.y_offset));
                    assert!(pos.tile.is_valid());
                }
            }
        }
    }

    #[test]
    fn test_column_monotonic_in_longitude() {
        let mut last = 0;
        for step in 0..=36 {
            let lng = -180.0 + step as f64 * 10.0;
            let pos = TilePosition::from_lng_lat(lng, 41.5, 8).unwrap();
            assert!(pos.tile.x >= last);
            last = pos.tile.x;
        }
    }

    #[test]
    fn test_mercator_limit_rejected() {
        assert!(TilePosition::from_lng_lat(0.0, MAX_LATITUDE, 4).is_err());
        assert!(TilePosition::from_lng_lat(0.0, -89.0, 4).is_err());
        assert!(TilePosition::from_lng_lat(0.0, f64::NAN, 4).is_err());
        assert!(TilePosition::from_lng_lat(181.0, 0.0, 4).is_err());
    }

    #[test]
    fn test_bounds_expansion_keeps_ordering() {
        let bounds = LatLngBounds::from_coords(40.0, -75.0, 41.0, -73.0);
        for margin in [0.0, 0.06, 1.5] {
            let grown = bounds.expanded(margin);
            assert!(grown.south_west.lat <= grown.north_east.lat);
            assert!(grown.south_west.lng <= grown.north_east.lng);
            assert!(grown.contains(&bounds.south_west));
            assert!(grown.contains(&bounds.north_east));
        }
    }

    #[test]
    fn test_bounds_extend() {
        let mut bounds = LatLngBounds::from_coords(40.0, -75.0, 41.0, -73.0);
        bounds.extend(&LatLng::new(42.5, -76.5));
        assert_eq!(bounds.north_east.lat, 42.5);
        assert_eq!(bounds.south_west.lng, -76.5);
    }

    #[test]
    fn test_mercator_round_trip() {
        let coord = LatLng::new(37.7749, -122.4194);
        let (x, y) = coord.to_mercator();
        let back = LatLng::from_mercator(x, y);
        assert!((back.lat - coord.lat).abs() < 1e-9);
        assert!((back.lng - coord.lng).abs() < 1e-9);
    }

    #[test]
    fn test_tile_northwest_corner() {
        // Tile (0, 0) at zoom 1 covers the northwest quadrant.
        let nw = TileCoord::new(0, 0, 1).to_lat_lng();
        assert!((nw.lng - -180.0).abs() < 1e-9);
        assert!((nw.lat - MAX_LATITUDE).abs() < 1e-6);

        // Its southeast corner is the map center.
        let center = TileCoord::new(1, 1, 1).to_lat_lng();
        assert!(center.lat.abs() < 1e-9);
        assert!(center.lng.abs() < 1e-9);
    }
}
