//! Batch orchestration: iterate the district features, generate each map at
//! full size plus a context inset, and keep one bad district from sinking the
//! whole run.

use crate::core::config::PipelineConfig;
use crate::core::constants::{CONTEXT_MARGIN, DISTRICT_MARGIN};
use crate::data::districts::{self, District, LabelIndex};
use crate::render::annotate::{self, Fonts};
use crate::render::{layout, mosaic, overlay};
use crate::tiles::fetch::HttpFetcher;
use crate::tiles::source::HttpTileSource;
use crate::tiles::store::TileStore;
use crate::Result;
use image::RgbaImage;
use std::fs;
use std::path::Path;

/// CLI filter sentinel meaning "skip everything already generated".
const RESUME_SENTINEL: &str = "continue";

/// Which maps a run should (re)generate.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputFilter {
    /// Generate every map, overwriting existing output.
    All,
    /// Generate only maps whose output file does not exist yet.
    Resume,
    /// Generate only maps whose key (e.g. `CA12`) starts with the prefix.
    Prefix(String),
}

impl OutputFilter {
    /// Interprets the CLI's single optional positional argument.
    pub fn parse(arg: Option<&str>) -> Self {
        match arg {
            None => OutputFilter::All,
            Some(RESUME_SENTINEL) => OutputFilter::Resume,
            Some(prefix) => OutputFilter::Prefix(prefix.to_string()),
        }
    }

    fn matches(&self, key: &str) -> bool {
        match self {
            OutputFilter::Prefix(prefix) => key.starts_with(prefix.as_str()),
            _ => true,
        }
    }
}

/// Outcome counts for one batch run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub generated: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// The map-generation pipeline. Single-threaded and blocking throughout;
/// one district's maps are fully generated before the next is started.
pub struct Pipeline {
    config: PipelineConfig,
    districts: Vec<District>,
    labels: LabelIndex,
    store: TileStore,
    fonts: Fonts,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        let districts = districts::load_districts(&config.districts_path)?;
        log::info!(
            "loaded {} district features from {}",
            districts.len(),
            config.districts_path.display()
        );

        let labels = match &config.labels_path {
            Some(path) if path.exists() => LabelIndex::load(path)?,
            Some(path) => {
                log::warn!(
                    "label source {} not found; maps will omit district numbers",
                    path.display()
                );
                LabelIndex::empty()
            }
            None => LabelIndex::empty(),
        };

        let fonts = Fonts::load(&config.fonts)?;
        let store = TileStore::new(
            &config.cache_dir,
            config.tile_px,
            Box::new(HttpTileSource::new(config.tile_base_url.clone())),
            Box::new(HttpFetcher),
        )?;

        Ok(Self {
            config,
            districts,
            labels,
            store,
            fonts,
        })
    }

    /// Runs the batch. A failure while generating one district's maps is
    /// logged and counted but does not abort the remaining districts.
    pub fn run(&self, filter: &OutputFilter) -> Result<RunSummary> {
        let size_dir = self.config.output_dir.join(self.config.map_size.to_string());
        fs::create_dir_all(&size_dir)?;

        let mut summary = RunSummary::default();
        for (idx, district) in self.districts.iter().enumerate() {
            if district.is_undefined() {
                continue;
            }
            let key = district.key();
            if !filter.matches(&key) {
                continue;
            }

            let target = size_dir.join(format!("{}.png", key));
            if *filter == OutputFilter::Resume && target.exists() {
                log::debug!("{} already generated, skipping", key);
                summary.skipped += 1;
                continue;
            }

            match self.generate(idx, &target) {
                Ok(()) => {
                    log::info!("saved {}", target.display());
                    summary.generated += 1;
                }
                Err(e) => {
                    log::error!("{}: {}", key, e);
                    summary.failed += 1;
                }
            }
        }

        Ok(summary)
    }

    /// Generates one district's full map with its context inset and writes
    /// the output file(s).
    fn generate(&self, idx: usize, target: &Path) -> Result<()> {
        let mut main = self.render_one(idx, self.config.map_size, DISTRICT_MARGIN, false)?;
        let context = self.render_one(
            idx,
            self.config.map_size / self.config.context_divisor,
            CONTEXT_MARGIN,
            true,
        )?;
        annotate::paste_inset(&mut main, &context);
        main.save(target)?;

        if self.config.pdf {
            #[cfg(feature = "pdf")]
            {
                let district = &self.districts[idx];
                crate::render::pdf::save_pdf(
                    &main,
                    &format!("{} Congressional District {}", district.state_name, district.code),
                    &target.with_extension("pdf"),
                )?;
            }
            #[cfg(not(feature = "pdf"))]
            log::warn!("PDF output requested but this build lacks the `pdf` feature");
        }

        Ok(())
    }

    /// Renders one map image: vector overlay, bands or border, tile mosaic,
    /// final composite.
    fn render_one(&self, idx: usize, size: u32, margin: f64, thumbnail: bool) -> Result<RgbaImage> {
        let district = &self.districts[idx];
        let framed = district.bounds().expanded(margin);
        let (width, height) = layout::pick_canvas(&framed, size);
        let bounds = layout::fit_bounds(&framed, width, height);

        let mut vector = overlay::render(
            &self.districts,
            idx,
            &self.labels,
            &bounds,
            width,
            height,
            &self.fonts,
            size,
        );
        if thumbnail {
            annotate::draw_thumbnail_border(&mut vector);
        } else {
            annotate::add_header_footer(
                &mut vector,
                district.state_name,
                district.number()?,
                self.config.title_year,
                &self.config.attribution,
                &self.fonts,
            );
        }

        let tiles = mosaic::build(&self.store, &bounds, width, height)?;
        Ok(mosaic::compose(tiles, &vector))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_parsing() {
        assert_eq!(OutputFilter::parse(None), OutputFilter::All);
        assert_eq!(OutputFilter::parse(Some("continue")), OutputFilter::Resume);
        assert_eq!(
            OutputFilter::parse(Some("CA12")),
            OutputFilter::Prefix("CA12".to_string())
        );
    }

    #[test]
    fn test_filter_matching() {
        let filter = OutputFilter::parse(Some("CA"));
        assert!(filter.matches("CA12"));
        assert!(filter.matches("CA01"));
        assert!(!filter.matches("WA01"));

        assert!(OutputFilter::All.matches("WY00"));
        assert!(OutputFilter::Resume.matches("WY00"));
    }
}
