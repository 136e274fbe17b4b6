use crate::core::geo::TileCoord;

/// Trait representing anything that can produce tile URLs for a given coordinate.
pub trait TileSource: Send + Sync {
    /// Build a URL for the requested `coord`.
    fn url(&self, coord: TileCoord) -> String;
}

/// Tile endpoint serving the conventional `{base}/{z}/{x}/{y}.png` layout,
/// e.g. a local TileMill/OSMBright instance.
pub struct HttpTileSource {
    base_url: String,
}

impl HttpTileSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }
}

impl TileSource for HttpTileSource {
    fn url(&self, coord: TileCoord) -> String {
        format!("{}/{}/{}/{}.png", self.base_url, coord.z, coord.x, coord.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_layout() {
        let source = HttpTileSource::new("http://localhost:20008/tile/OSMBright");
        assert_eq!(
            source.url(TileCoord::new(3, 5, 7)),
            "http://localhost:20008/tile/OSMBright/7/3/5.png"
        );
    }

    #[test]
    fn test_trailing_slash_stripped() {
        let source = HttpTileSource::new("https://tiles.example.org/");
        assert_eq!(
            source.url(TileCoord::new(0, 0, 0)),
            "https://tiles.example.org/0/0/0.png"
        );
    }
}
