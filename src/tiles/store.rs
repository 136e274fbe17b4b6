use crate::core::geo::TileCoord;
use crate::tiles::fetch::TileFetcher;
use crate::tiles::source::TileSource;
use crate::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Content-addressed on-disk tile store.
///
/// Tiles are immutable once written and keyed by `(zoom, column, row)` in a
/// flat directory of `{z}-{x}-{y}.png` files, so the store needs no locking
/// and no eviction: concurrent runs can at worst fetch the same tile twice.
pub struct TileStore {
    dir: PathBuf,
    tile_px: u32,
    source: Box<dyn TileSource>,
    fetcher: Box<dyn TileFetcher>,
}

impl TileStore {
    pub fn new(
        dir: impl Into<PathBuf>,
        tile_px: u32,
        source: Box<dyn TileSource>,
        fetcher: Box<dyn TileFetcher>,
    ) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            tile_px,
            source,
            fetcher,
        })
    }

    /// Pixel side length of the source's square tiles.
    pub fn tile_px(&self) -> u32 {
        self.tile_px
    }

    /// On-disk location for a tile, whether or not it exists yet.
    pub fn path_for(&self, coord: TileCoord) -> PathBuf {
        self.dir
            .join(format!("{}-{}-{}.png", coord.z, coord.x, coord.y))
    }

    pub fn contains(&self, coord: TileCoord) -> bool {
        self.path_for(coord).exists()
    }

    /// Returns the tile's bytes, fetching and persisting them on a miss.
    /// Rerunning over a warm store issues no fetches at all.
    pub fn get_or_fetch(&self, coord: TileCoord) -> Result<Vec<u8>> {
        let path = self.path_for(coord);
        if path.exists() {
            return Ok(fs::read(&path)?);
        }

        let url = self.source.url(coord);
        let data = self.fetcher.fetch(&url)?;
        write_atomically(&path, &data)?;
        log::debug!("stored tile {:?} ({} bytes)", coord, data.len());
        Ok(data)
    }
}

/// Writes through a temp file then renames, so a killed run never leaves a
/// truncated tile to poison later batches.
fn write_atomically(path: &Path, data: &[u8]) -> Result<()> {
    let tmp = path.with_extension("png.part");
    fs::write(&tmp, data)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct FakeSource;

    impl TileSource for FakeSource {
        fn url(&self, coord: TileCoord) -> String {
            format!("fake://{}/{}/{}", coord.z, coord.x, coord.y)
        }
    }

    struct CountingFetcher {
        calls: Arc<AtomicUsize>,
    }

    impl TileFetcher for CountingFetcher {
        fn fetch(&self, url: &str) -> Result<Vec<u8>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(url.as_bytes().to_vec())
        }
    }

    fn store_with_counter(dir: &Path) -> (TileStore, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let fetcher = CountingFetcher {
            calls: Arc::clone(&calls),
        };
        let store = TileStore::new(dir, 256, Box::new(FakeSource), Box::new(fetcher)).unwrap();
        (store, calls)
    }

    #[test]
    fn test_miss_fetches_then_hits_cache() {
        let dir = tempfile::tempdir().unwrap();
        let (store, calls) = store_with_counter(dir.path());
        let coord = TileCoord::new(3, 5, 7);

        assert!(!store.contains(coord));
        let first = store.get_or_fetch(coord).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(store.contains(coord));

        let second = store.get_or_fetch(coord).unwrap();
        assert_eq!(first, second);
        assert_eq!(calls.load(Ordering::SeqCst), 1, "cache hit must not fetch");
    }

    #[test]
    fn test_flat_file_naming() {
        let dir = tempfile::tempdir().unwrap();
        let (store, _) = store_with_counter(dir.path());
        let coord = TileCoord::new(11, 42, 9);

        store.get_or_fetch(coord).unwrap();
        assert!(dir.path().join("9-11-42.png").exists());
    }

    #[test]
    fn test_fetch_error_propagates_and_stores_nothing() {
        struct FailingFetcher;
        impl TileFetcher for FailingFetcher {
            fn fetch(&self, url: &str) -> Result<Vec<u8>> {
                Err(crate::Error::Fetch {
                    url: url.to_string(),
                    attempts: 3,
                })
            }
        }

        let dir = tempfile::tempdir().unwrap();
        let store =
            TileStore::new(dir.path(), 256, Box::new(FakeSource), Box::new(FailingFetcher)).unwrap();
        let coord = TileCoord::new(1, 1, 1);

        assert!(store.get_or_fetch(coord).is_err());
        assert!(!store.contains(coord));
    }
}
