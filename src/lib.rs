//! # printmaps
//!
//! Batch generator for printable maps of U.S. Congressional Districts.
//!
//! For every district polygon in a GeoJSON feature collection, the pipeline
//! renders a vector overlay (boundary outlines, shading of other districts,
//! district-number labels), mosaics slippy-map raster tiles underneath it,
//! stamps a title band and attribution footer, composites a small context-map
//! inset, and writes the result as a PNG (optionally PDF) into an output tree
//! keyed by state, district, and size.

pub mod core;
pub mod data;
pub mod pipeline;
pub mod render;
pub mod tiles;

pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::{FontConfig, PipelineConfig},
    geo::{LatLng, LatLngBounds, TileCoord, TilePosition},
};

pub use crate::pipeline::{OutputFilter, Pipeline, RunSummary};

pub use crate::tiles::{
    fetch::{HttpFetcher, TileFetcher},
    source::{HttpTileSource, TileSource},
    store::TileStore,
};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Unknown state identifier: {0}")]
    UnknownState(String),

    #[error("Tile scale {0:.3} is outside the acceptable band")]
    ScaleMismatch(f64),

    #[error("Failed to fetch {url} after {attempts} attempts")]
    Fetch { url: String, attempts: u32 },

    #[error("Font error: {0}")]
    Font(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Render error: {0}")]
    Render(String),
}
