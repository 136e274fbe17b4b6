//! Canvas layout: picking a print-friendly aspect ratio for a district and
//! fitting its geographic bounds to the chosen canvas.

use crate::core::constants::ASPECT_RATIOS;
use crate::core::geo::{LatLng, LatLngBounds};

/// Picks canvas dimensions for a district whose (expanded) bounds are given.
///
/// Walks the aspect-ratio table until the district's longitude/latitude span
/// ratio clears the threshold; landscape ratios widen the canvas off the base
/// `size`, portrait ratios heighten it.
pub fn pick_canvas(bounds: &LatLngBounds, size: u32) -> (u32, u32) {
    let span = bounds.span();
    let span_ratio = span.lng / span.lat;

    for &(threshold, ratio) in ASPECT_RATIOS {
        if span_ratio > threshold {
            return if ratio > 1.0 {
                ((ratio * size as f64) as u32, size)
            } else {
                (size, (size as f64 / ratio) as u32)
            };
        }
    }

    // Unreachable for finite positive spans: the table's last threshold is 0.
    (size, size)
}

/// Grows the bounds, centered and in projected Web Mercator space, until the
/// box's aspect ratio matches the canvas's. The returned bounds are what the
/// map actually shows; tiles and the vector overlay must agree on them.
pub fn fit_bounds(bounds: &LatLngBounds, width: u32, height: u32) -> LatLngBounds {
    let (min_x, min_y) = bounds.south_west.to_mercator();
    let (max_x, max_y) = bounds.north_east.to_mercator();

    let box_w = max_x - min_x;
    let box_h = max_y - min_y;
    let canvas_aspect = width as f64 / height as f64;

    let (grow_x, grow_y) = if box_w / box_h < canvas_aspect {
        (box_h * canvas_aspect - box_w, 0.0)
    } else {
        (0.0, box_w / canvas_aspect - box_h)
    };

    LatLngBounds::new(
        LatLng::from_mercator(min_x - grow_x / 2.0, min_y - grow_y / 2.0),
        LatLng::from_mercator(max_x + grow_x / 2.0, max_y + grow_y / 2.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wide_district_gets_landscape_canvas() {
        // 4:1 span picks the tabloid landscape ratio.
        let bounds = LatLngBounds::from_coords(40.0, -108.0, 41.0, -104.0);
        let (w, h) = pick_canvas(&bounds, 1000);
        assert_eq!((w, h), (3000, 1000));
    }

    #[test]
    fn test_square_district_gets_square_canvas() {
        let bounds = LatLngBounds::from_coords(40.0, -105.0, 41.0, -104.0);
        let (w, h) = pick_canvas(&bounds, 1000);
        assert_eq!((w, h), (1000, 1000));
    }

    #[test]
    fn test_tall_district_gets_portrait_canvas() {
        let bounds = LatLngBounds::from_coords(37.0, -105.0, 42.0, -104.0);
        let (w, h) = pick_canvas(&bounds, 1000);
        assert_eq!(w, 1000);
        assert_eq!(h, (1000.0 / (8.5 / 17.0)) as u32);
    }

    #[test]
    fn test_fit_bounds_matches_canvas_aspect() {
        let bounds = LatLngBounds::from_coords(40.0, -105.0, 41.0, -104.0);
        let fitted = fit_bounds(&bounds, 1600, 900);

        let (min_x, min_y) = fitted.south_west.to_mercator();
        let (max_x, max_y) = fitted.north_east.to_mercator();
        let aspect = (max_x - min_x) / (max_y - min_y);
        assert!((aspect - 1600.0 / 900.0).abs() < 1e-6);
    }

    #[test]
    fn test_fit_bounds_only_grows() {
        let bounds = LatLngBounds::from_coords(40.0, -105.0, 41.0, -104.0);
        for (w, h) in [(1600u32, 900u32), (900, 1600), (1000, 1000)] {
            let fitted = fit_bounds(&bounds, w, h);
            assert!(fitted.contains(&bounds.south_west));
            assert!(fitted.contains(&bounds.north_east));
        }
    }
}
