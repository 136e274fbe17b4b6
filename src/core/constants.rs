//! Constants shared across the pipeline. The scale band, overscan margin, and
//! frame margins are empirically tuned values carried over from the original
//! tile mosaicking procedure; they affect visual output and are not re-derived.

/// Default square tile size in pixels.
pub const TILE_SIZE: u32 = 256;

/// Web Mercator latitude limit; tile math is undefined at or beyond it.
pub const MAX_LATITUDE: f64 = 85.0511287798;

/// Lower bound of the acceptable tile scale factor. Below this the chosen
/// zoom level would downscale tiles too far and shrink map labels.
pub const MIN_TILE_SCALE: f64 = 0.66;

/// Upper bound of the acceptable tile scale factor. Above this the mosaic
/// would be a visibly blurry upscale.
pub const MAX_TILE_SCALE: f64 = 1.4;

/// Extra tiles fetched past the bounding box's far corner on each axis,
/// covering edge gaps left by fractional-offset rounding.
pub const TILE_OVERSCAN: u32 = 1;

/// Highest zoom level the mosaic will request from a tile server.
pub const MAX_TILE_ZOOM: u8 = 19;

/// Bounding-box margin around a district on its main map, as a fraction of
/// the district's span on each axis.
pub const DISTRICT_MARGIN: f64 = 0.06;

/// Bounding-box margin for the zoomed-out context map.
pub const CONTEXT_MARGIN: f64 = 1.5;

/// Attempts per tile fetch before giving up on the map being generated.
pub const FETCH_ATTEMPTS: u32 = 3;

/// Base delay between fetch attempts; doubles on each retry.
pub const FETCH_RETRY_DELAY_MS: u64 = 500;

/// Per-request timeout for tile fetches.
pub const FETCH_TIMEOUT_SECS: u64 = 30;

/// Candidate output aspect ratios as `(span_ratio_threshold, width/height)`,
/// walked in order until the district's longitude/latitude span ratio exceeds
/// the threshold. Ratios match common paper sizes so maps print nicely.
pub const ASPECT_RATIOS: &[(f64, f64)] = &[
    (3.0, 3.0 / 1.0),        // 8.5x17 tabloid landscape
    (1.5, 16.0 / 9.0),       // HD widescreen
    (1.25, 11.0 / 8.5),      // 8.5x11 letter landscape
    (1.0 / 1.25, 1.0 / 1.0), // square
    (1.0 / 1.5, 8.5 / 11.0), // 8.5x11 letter portrait
    (0.0, 8.5 / 17.0),       // 8.5x17 tabloid portrait
];
