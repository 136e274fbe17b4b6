//! The vector overlay: boundary outlines for every district in view, grey
//! shading over districts other than the subject, and district-number labels
//! at their anchor points. Rendered into a transparent canvas that is later
//! alpha-composited over the tile mosaic.

use crate::core::geo::{LatLng, LatLngBounds};
use crate::data::districts::{District, LabelIndex};
use crate::render::annotate::Fonts;
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_line_segment_mut, draw_polygon_mut, draw_text_mut, text_size, Blend};
use imageproc::point::Point;
use rusttype::Scale;

/// District boundary color, rgb(100%, 75%, 25%).
const OUTLINE: Rgba<u8> = Rgba([255, 191, 64, 255]);
/// Wide secondary outline at 35% opacity.
const OUTLINE_FADED: Rgba<u8> = Rgba([255, 191, 64, 89]);
/// rgb(70%, 70%, 70%) at 55% opacity, dimming territory outside the subject.
const SHADE: Rgba<u8> = Rgba([179, 179, 179, 140]);

/// Maps lng/lat to canvas pixels. The y axis interpolates in projected Web
/// Mercator so the overlay registers with the tile mosaic underneath.
struct Projector {
    west: f64,
    lng_span: f64,
    merc_top: f64,
    merc_span: f64,
    width: f64,
    height: f64,
}

impl Projector {
    fn new(bounds: &LatLngBounds, width: u32, height: u32) -> Self {
        let (_, merc_top) = bounds.north_east.to_mercator();
        let (_, merc_bottom) = bounds.south_west.to_mercator();
        Self {
            west: bounds.south_west.lng,
            lng_span: bounds.north_east.lng - bounds.south_west.lng,
            merc_top,
            merc_span: merc_top - merc_bottom,
            width: width as f64,
            height: height as f64,
        }
    }

    fn project(&self, point: &LatLng) -> (f32, f32) {
        let x = (point.lng - self.west) / self.lng_span * self.width;
        let (_, merc_y) = point.to_mercator();
        let y = (self.merc_top - merc_y) / self.merc_span * self.height;
        (x as f32, y as f32)
    }
}

/// Renders the overlay for `districts[subject]` over the given bounds.
///
/// `map_size` is the nominal short-edge size the stroke widths and label
/// sizes key off, which keeps the context map's proportions consistent with
/// the main map's.
pub fn render(
    districts: &[District],
    subject: usize,
    labels: &LabelIndex,
    bounds: &LatLngBounds,
    width: u32,
    height: u32,
    fonts: &Fonts,
    map_size: u32,
) -> RgbaImage {
    let projector = Projector::new(bounds, width, height);
    let mut canvas = Blend(RgbaImage::new(width, height));

    // Dim every district that is not the subject.
    for (idx, district) in districts.iter().enumerate() {
        if idx == subject || district.is_undefined() {
            continue;
        }
        for ring in &district.rings {
            fill_ring(&mut canvas, &projector, ring, SHADE);
        }
    }

    // Boundary outlines for every district: a hard thin line to be exact
    // plus a faded wider one for strength.
    let wide = (map_size as f32 / 140.0).max(1.0);
    for district in districts {
        for ring in &district.rings {
            stroke_ring(&mut canvas, &projector, ring, wide, OUTLINE_FADED);
            stroke_ring(&mut canvas, &projector, ring, 2.0, OUTLINE);
        }
    }

    let label_scale = Scale::uniform(map_size as f32 / 15.0);
    for (idx, district) in districts.iter().enumerate() {
        if idx == subject || district.is_undefined() {
            continue;
        }
        let anchor = match labels.get(district.usps, &district.code) {
            Some(anchor) if bounds.contains(&anchor) => anchor,
            _ => continue,
        };
        let (x, y) = projector.project(&anchor);
        let (text_w, text_h) = text_size(label_scale, &fonts.bold, &district.code);
        draw_text_mut(
            &mut canvas,
            OUTLINE,
            x as i32 - text_w / 2,
            y as i32 - text_h / 2,
            label_scale,
            &fonts.bold,
            &district.code,
        );
    }

    canvas.0
}

/// Fills one boundary ring as a polygon, clipped to the canvas.
fn fill_ring(canvas: &mut Blend<RgbaImage>, projector: &Projector, ring: &[LatLng], color: Rgba<u8>) {
    let mut points: Vec<Point<i32>> = Vec::with_capacity(ring.len());
    for coord in ring {
        let (x, y) = projector.project(coord);
        let point = Point::new(x as i32, y as i32);
        if points.last() != Some(&point) {
            points.push(point);
        }
    }
    // draw_polygon_mut wants an open path.
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    if points.len() < 3 {
        return;
    }
    draw_polygon_mut(canvas, &points, color);
}

/// Strokes one boundary ring segment by segment. Widths beyond one pixel are
/// built from parallel passes offset along the segment normal.
fn stroke_ring(
    canvas: &mut Blend<RgbaImage>,
    projector: &Projector,
    ring: &[LatLng],
    width: f32,
    color: Rgba<u8>,
) {
    for pair in ring.windows(2) {
        let start = projector.project(&pair[0]);
        let end = projector.project(&pair[1]);
        draw_thick_segment(canvas, start, end, width, color);
    }
}

fn draw_thick_segment(
    canvas: &mut Blend<RgbaImage>,
    start: (f32, f32),
    end: (f32, f32),
    width: f32,
    color: Rgba<u8>,
) {
    let dx = end.0 - start.0;
    let dy = end.1 - start.1;
    let length = (dx * dx + dy * dy).sqrt();
    if length == 0.0 {
        return;
    }

    let (nx, ny) = (-dy / length, dx / length);
    let passes = width.max(1.0).round() as i32;
    for i in 0..passes {
        let offset = i as f32 - (passes as f32 - 1.0) / 2.0;
        draw_line_segment_mut(
            canvas,
            (start.0 + nx * offset, start.1 + ny * offset),
            (end.0 + nx * offset, end.1 + ny * offset),
            color,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_projector() -> Projector {
        let bounds = LatLngBounds::from_coords(30.0, -100.0, 50.0, -80.0);
        Projector::new(&bounds, 1000, 1000)
    }

    #[test]
    fn test_projection_corners() {
        let projector = test_projector();

        let (x, y) = projector.project(&LatLng::new(50.0, -100.0));
        assert!(x.abs() < 1e-3);
        assert!(y.abs() < 1e-3);

        let (x, y) = projector.project(&LatLng::new(30.0, -80.0));
        assert!((x - 1000.0).abs() < 1e-3);
        assert!((y - 1000.0).abs() < 1e-3);
    }

    #[test]
    fn test_projection_y_is_mercator_stretched() {
        // The geographic midpoint of the latitude range sits below the pixel
        // midpoint: Mercator stretches high latitudes.
        let projector = test_projector();
        let (_, y) = projector.project(&LatLng::new(40.0, -90.0));
        assert!(y > 500.0);
    }

    #[test]
    fn test_degenerate_rings_are_ignored() {
        let projector = test_projector();
        let mut canvas = Blend(RgbaImage::new(100, 100));

        // Two points and a closed pair collapse below a drawable polygon.
        let ring = vec![LatLng::new(40.0, -90.0), LatLng::new(40.0, -90.0)];
        fill_ring(&mut canvas, &projector, &ring, SHADE);
        stroke_ring(&mut canvas, &projector, &ring, 2.0, OUTLINE);

        assert!(canvas.0.pixels().all(|p| p.0[3] == 0));
    }
}
