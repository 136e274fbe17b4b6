//! Raster post-processing: the title band with its superscript ordinal, the
//! attribution footer, the context map's border, and the inset paste.

use crate::core::config::FontConfig;
use crate::{Error, Result};
use image::imageops;
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use rusttype::{Font, Scale};
use std::path::Path;

const BAND: Rgba<u8> = Rgba([85, 85, 85, 255]);
const TEXT: Rgba<u8> = Rgba([255, 255, 255, 255]);
const BORDER: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// The three faces the title and footer are set in.
pub struct Fonts {
    pub regular: Font<'static>,
    pub bold: Font<'static>,
    pub bold_italic: Font<'static>,
}

impl Fonts {
    pub fn load(config: &FontConfig) -> Result<Self> {
        Ok(Self {
            regular: load_font(&config.regular)?,
            bold: load_font(&config.bold)?,
            bold_italic: load_font(&config.bold_italic)?,
        })
    }
}

fn load_font(path: &Path) -> Result<Font<'static>> {
    let data =
        std::fs::read(path).map_err(|e| Error::Font(format!("{}: {}", path.display(), e)))?;
    Font::try_from_vec(data)
        .ok_or_else(|| Error::Font(format!("{} is not a usable TrueType font", path.display())))
}

/// English ordinal suffix: 1 -> "st", 2 -> "nd", 3 -> "rd", 4 -> "th",
/// except the 11/12/13 family which is always "th".
pub fn ordinal_suffix(n: u32) -> &'static str {
    match n % 100 {
        11 | 12 | 13 => "th",
        _ => match n % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    }
}

/// Draws the dark title band and footer band, the centered title with its
/// superscript ordinal, and the right-aligned attribution line.
pub fn add_header_footer(
    img: &mut RgbaImage,
    state_name: &str,
    district: u32,
    year: u16,
    attribution: &str,
    fonts: &Fonts,
) {
    let (width, height) = img.dimensions();
    let min_dim = width.min(height) as i32;

    draw_filled_rect_mut(
        img,
        Rect::at(0, 0).of_size(width, (min_dim / 15) as u32),
        BAND,
    );
    draw_filled_rect_mut(
        img,
        Rect::at(0, height as i32 - min_dim / 50).of_size(width, (min_dim / 50) as u32),
        BAND,
    );

    let title_a = format!("The {}", district);
    let title_b = format!("   Congressional District of {} ({})", state_name, year);
    let suffix = ordinal_suffix(district);

    let title_scale = Scale::uniform(min_dim as f32 / 25.0);
    let suffix_scale = Scale::uniform(min_dim as f32 / 50.0);

    let (title_a_width, _) = text_size(title_scale, &fonts.bold, &title_a);
    let title = format!("{}{}", title_a, title_b);
    let (title_width, _) = text_size(title_scale, &fonts.bold, &title);
    let (_, suffix_height) = text_size(suffix_scale, &fonts.bold_italic, suffix);

    let x = (width as i32 - title_width) / 2;
    draw_text_mut(
        img,
        TEXT,
        x,
        4 + suffix_height / 4,
        title_scale,
        &fonts.bold,
        &title,
    );
    draw_text_mut(
        img,
        TEXT,
        x + title_a_width - 2,
        4 + suffix_height / 6,
        suffix_scale,
        &fonts.bold_italic,
        suffix,
    );

    let footer_scale = Scale::uniform(min_dim as f32 / 100.0);
    let (footer_width, _) = text_size(footer_scale, &fonts.regular, attribution);
    draw_text_mut(
        img,
        TEXT,
        width as i32 - footer_width - 10,
        height as i32 - min_dim / 60,
        footer_scale,
        &fonts.regular,
        attribution,
    );
}

/// One-pixel black frame around the context map.
pub fn draw_thumbnail_border(img: &mut RgbaImage) {
    let (width, height) = img.dimensions();
    draw_hollow_rect_mut(img, Rect::at(0, 0).of_size(width, height), BORDER);
}

/// Pastes the context-map inset below the title band's left edge.
pub fn paste_inset(main: &mut RgbaImage, inset: &RgbaImage) {
    let band = main.width().min(main.height()) as i64 / 15;
    imageops::overlay(main, inset, band / 2, band * 3 / 2);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinal_suffixes() {
        assert_eq!(ordinal_suffix(1), "st");
        assert_eq!(ordinal_suffix(2), "nd");
        assert_eq!(ordinal_suffix(3), "rd");
        assert_eq!(ordinal_suffix(4), "th");
        assert_eq!(ordinal_suffix(11), "th");
        assert_eq!(ordinal_suffix(12), "th");
        assert_eq!(ordinal_suffix(13), "th");
        assert_eq!(ordinal_suffix(21), "st");
        assert_eq!(ordinal_suffix(22), "nd");
        assert_eq!(ordinal_suffix(53), "rd");
        assert_eq!(ordinal_suffix(0), "th");
        assert_eq!(ordinal_suffix(111), "th");
    }

    #[test]
    fn test_thumbnail_border() {
        let mut img = RgbaImage::from_pixel(50, 40, Rgba([255, 255, 255, 255]));
        draw_thumbnail_border(&mut img);

        assert_eq!(img.get_pixel(0, 0), &BORDER);
        assert_eq!(img.get_pixel(49, 39), &BORDER);
        assert_eq!(img.get_pixel(25, 0), &BORDER);
        assert_eq!(img.get_pixel(25, 20), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_inset_lands_inside_the_band_margin() {
        let mut main = RgbaImage::from_pixel(300, 300, Rgba([0, 0, 0, 255]));
        let inset = RgbaImage::from_pixel(50, 50, Rgba([255, 0, 0, 255]));
        paste_inset(&mut main, &inset);

        // band = 300 / 15 = 20 -> inset anchored at (10, 30).
        assert_eq!(main.get_pixel(10, 30), &Rgba([255, 0, 0, 255]));
        assert_eq!(main.get_pixel(9, 29), &Rgba([0, 0, 0, 255]));
    }
}
