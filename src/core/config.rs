//! Pipeline configuration.
//!
//! Plain structs with defaults matching the standard Census CD113 setup; the
//! CLI overrides individual fields. There is no config-file layer.

use std::path::PathBuf;

/// Everything a [`crate::Pipeline`] needs to run one batch.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// GeoJSON FeatureCollection of district polygons with `STATEFP` and
    /// `CD113FP` properties (the Census shapefile converted with ogr2ogr).
    pub districts_path: PathBuf,

    /// Optional GeoJSON point collection giving one label anchor per
    /// district, keyed by lowercase state code and district number.
    pub labels_path: Option<PathBuf>,

    /// Tile endpoint serving `{base}/{z}/{x}/{y}.png`.
    pub tile_base_url: String,

    /// Pixel side length of the server's square tiles.
    pub tile_px: u32,

    /// Directory of the on-disk tile store.
    pub cache_dir: PathBuf,

    /// Root of the output tree; maps land in `{output_dir}/{size}/`.
    pub output_dir: PathBuf,

    /// Pixel size of the main map's short edge.
    pub map_size: u32,

    /// The context-map inset is rendered at `map_size / context_divisor`.
    pub context_divisor: u32,

    pub fonts: FontConfig,

    /// Year shown in the title band.
    pub title_year: u16,

    /// Attribution line drawn in the footer band.
    pub attribution: String,

    /// Also write a PDF next to each PNG (requires the `pdf` feature).
    pub pdf: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            districts_path: PathBuf::from("data/tl_2013_us_cd113.geojson"),
            labels_path: Some(PathBuf::from("data/district_labels.geojson")),
            tile_base_url: "http://localhost:20008/tile/OSMBright".to_string(),
            tile_px: crate::core::constants::TILE_SIZE,
            cache_dir: PathBuf::from("tiles"),
            output_dir: PathBuf::from("maps"),
            map_size: 3072,
            context_divisor: 6,
            fonts: FontConfig::default(),
            title_year: 2013,
            attribution: "Copyright \u{a9} 2014 Civic Impulse, LLC (GovTrack.us). \
                          Data from OpenStreetMap.org; U.S. Census Bureau."
                .to_string(),
            pdf: false,
        }
    }
}

/// Paths to the regular, bold, and bold-italic faces used for the title and
/// footer text.
#[derive(Debug, Clone)]
pub struct FontConfig {
    pub regular: PathBuf,
    pub bold: PathBuf,
    pub bold_italic: PathBuf,
}

impl Default for FontConfig {
    fn default() -> Self {
        let base = PathBuf::from("/usr/share/fonts/truetype/gentium");
        Self {
            regular: base.join("GenR102.ttf"),
            bold: base.join("GenAR102.ttf"),
            bold_italic: base.join("GenAI102.ttf"),
        }
    }
}
