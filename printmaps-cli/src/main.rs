use anyhow::Context;
use clap::Parser;
use printmaps::{OutputFilter, Pipeline, PipelineConfig};
use std::path::PathBuf;

/// Generate printable maps of U.S. Congressional Districts.
#[derive(Parser, Debug)]
#[command(name = "printmaps", version, about)]
struct Args {
    /// Output key filter: a key prefix (e.g. `CA12`) regenerates only the
    /// matching maps; the sentinel `continue` skips maps already on disk.
    filter: Option<String>,

    /// GeoJSON district polygons (the Census shapefile converted with ogr2ogr)
    #[arg(long, default_value = "data/tl_2013_us_cd113.geojson")]
    districts: PathBuf,

    /// GeoJSON label anchor points, one per district
    #[arg(long)]
    labels: Option<PathBuf>,

    /// Tile endpoint serving {z}/{x}/{y}.png
    #[arg(long, default_value = "http://localhost:20008/tile/OSMBright")]
    tile_url: String,

    /// Directory of the on-disk tile store
    #[arg(long, default_value = "tiles")]
    cache_dir: PathBuf,

    /// Root of the output tree
    #[arg(long, default_value = "maps")]
    output_dir: PathBuf,

    /// Pixel size of the main map's short edge
    #[arg(long, default_value_t = 3072)]
    size: u32,

    /// Also write a PDF next to each PNG (requires the `pdf` build feature)
    #[arg(long)]
    pdf: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = PipelineConfig {
        districts_path: args.districts,
        tile_base_url: args.tile_url,
        cache_dir: args.cache_dir,
        output_dir: args.output_dir,
        map_size: args.size,
        pdf: args.pdf,
        ..PipelineConfig::default()
    };
    if args.labels.is_some() {
        config.labels_path = args.labels;
    }

    let filter = OutputFilter::parse(args.filter.as_deref());
    let pipeline = Pipeline::new(config).context("failed to initialize the pipeline")?;
    let summary = pipeline.run(&filter)?;

    log::info!(
        "batch complete: {} generated, {} skipped, {} failed",
        summary.generated,
        summary.skipped,
        summary.failed
    );
    if summary.failed > 0 {
        anyhow::bail!("{} maps failed to generate", summary.failed);
    }
    Ok(())
}
