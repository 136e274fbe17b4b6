//! Single-page PDF export of a finished map, for print shops that want a
//! paginated file instead of a raw PNG.

use crate::{Error, Result};
use image::{DynamicImage, RgbaImage};
use printpdf::{Image, ImageTransform, Mm, PdfDocument};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

const DPI: f64 = 300.0;
const MM_PER_INCH: f64 = 25.4;

/// Writes `map` as a one-page PDF sized so the raster prints at 300 dpi.
pub fn save_pdf(map: &RgbaImage, title: &str, path: &Path) -> Result<()> {
    let (width_px, height_px) = map.dimensions();
    let width_mm = width_px as f64 * MM_PER_INCH / DPI;
    let height_mm = height_px as f64 * MM_PER_INCH / DPI;

    let (doc, page, layer) =
        PdfDocument::new(title, Mm(width_mm as f32), Mm(height_mm as f32), "map");
    let canvas = doc.get_page(page).get_layer(layer);

    // PDF image XObjects carry no alpha; the mosaic background is opaque
    // anyway, so flatten to RGB.
    let flattened = DynamicImage::ImageRgba8(map.clone()).to_rgb8();
    let embedded = Image::from_dynamic_image(&DynamicImage::ImageRgb8(flattened));
    embedded.add_to_layer(
        canvas,
        ImageTransform {
            dpi: Some(DPI as f32),
            ..Default::default()
        },
    );

    doc.save(&mut BufWriter::new(File::create(path)?))
        .map_err(|e| Error::Render(format!("PDF export failed: {}", e)))
}
