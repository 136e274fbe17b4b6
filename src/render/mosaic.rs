//! Tile mosaic assembly: pick a zoom level for a bounding box, fetch the
//! covering tiles through the store, rescale and paste them into a canvas
//! aligned with the target's pixel grid, then composite the vector overlay
//! on top.

use crate::core::constants::{MAX_TILE_SCALE, MAX_TILE_ZOOM, MIN_TILE_SCALE, TILE_OVERSCAN};
use crate::core::geo::{LatLngBounds, TileCoord, TilePosition};
use crate::tiles::store::TileStore;
use crate::{Error, Result};
use image::imageops::{self, FilterType};
use image::RgbaImage;

/// The zoom level selected for a mosaic and the factor by which native tile
/// pixels must be stretched to land on the target's resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomChoice {
    pub zoom: u8,
    pub scale: f64,
}

/// Chooses the zoom level whose nominal tile resolution best matches the
/// degrees-per-pixel of the target raster, preferring the coarser axis.
///
/// Map labels are drawn small at high zoom, so mild upscaling of a lower
/// zoom beats crisp tiles with unreadable text; the scale band bounds how
/// far that trade is allowed to go. A scale outside the band means the
/// bounding box and canvas disagree badly (a layout or projection bug) and
/// is fatal for this map.
pub fn choose_zoom(
    bounds: &LatLngBounds,
    width: u32,
    height: u32,
    tile_px: u32,
) -> Result<ZoomChoice> {
    let span = bounds.span();
    let deg_per_px_x = span.lng / width as f64;
    let deg_per_px_y = span.lat / height as f64;
    let deg_per_px = deg_per_px_x.max(deg_per_px_y);

    let raw = (360.0 / (deg_per_px * tile_px as f64)).log2() + 0.5;
    let zoom = (raw.floor() as i64).clamp(0, MAX_TILE_ZOOM as i64) as u8;

    let nominal = 360.0 / 2_f64.powi(zoom as i32) / tile_px as f64;
    let scale = nominal / deg_per_px_x;

    if scale > MAX_TILE_SCALE || scale < MIN_TILE_SCALE {
        return Err(Error::ScaleMismatch(scale));
    }

    Ok(ZoomChoice { zoom, scale })
}

/// Assembles the tile mosaic for `bounds` into a `width` x `height` canvas.
///
/// The tile range covers the box's two opposite corners plus one tile of
/// overscan past each far edge; indices that fall outside the zoom level's
/// grid (overscan at the antimeridian or pole) are skipped rather than
/// requested.
pub fn build(
    store: &TileStore,
    bounds: &LatLngBounds,
    width: u32,
    height: u32,
) -> Result<RgbaImage> {
    let choice = choose_zoom(bounds, width, height, store.tile_px())?;
    let zoom = choice.zoom;

    let top_left = TilePosition::from_lng_lat(bounds.south_west.lng, bounds.north_east.lat, zoom)?;
    let bottom_right =
        TilePosition::from_lng_lat(bounds.north_east.lng, bounds.south_west.lat, zoom)?;

    let scaled_px = ((store.tile_px() as f64 * choice.scale) as u32).max(1);
    let filter = if choice.scale > 1.0 {
        FilterType::CatmullRom
    } else {
        FilterType::Lanczos3
    };

    let grid = 2_u64.pow(zoom as u32);
    let mut canvas = RgbaImage::new(width, height);

    for x in top_left.tile.x..=bottom_right.tile.x + TILE_OVERSCAN {
        if x as u64 >= grid {
            continue;
        }
        for y in top_left.tile.y..=bottom_right.tile.y + TILE_OVERSCAN {
            if y as u64 >= grid {
                continue;
            }

            let data = store.get_or_fetch(TileCoord::new(x, y, zoom))?;
            let tile = image::load_from_memory(&data)?.to_rgba8();
            let tile = imageops::resize(&tile, scaled_px, scaled_px, filter);

            let offset_x = (x - top_left.tile.x) as i64 * scaled_px as i64
                - (top_left.x_offset * scaled_px as f64) as i64;
            let offset_y = (y - top_left.tile.y) as i64 * scaled_px as i64
                - (top_left.y_offset * scaled_px as f64) as i64;
            imageops::overlay(&mut canvas, &tile, offset_x, offset_y);
        }
    }

    Ok(canvas)
}

/// Alpha-composites the vector overlay onto the assembled mosaic, producing
/// the final map image.
pub fn compose(mut mosaic: RgbaImage, vector: &RgbaImage) -> RgbaImage {
    imageops::overlay(&mut mosaic, vector, 0, 0);
    mosaic
}
