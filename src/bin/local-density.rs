use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::info;

use local_density::config::Config;
use local_density::rand::Rng;
use local_density::raster::RasterImage;
use local_density::save;

/// Stipple an image into a grid of blue-noise frames and save it as SVG.
#[derive(Parser, Debug)]
#[clap(name = "local-density", version)]
struct Opts {
    /// Source raster image (RGB or RGBA).
    #[clap(short, long)]
    input: PathBuf,

    /// Destination SVG file.
    #[clap(short, long)]
    output: PathBuf,

    /// Grid cell size in pixels.
    #[clap(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    grid: u32,

    /// Seed for the random stream. Random if omitted; the seed used is always logged.
    #[clap(long)]
    seed: Option<u64>,

    /// Also rasterise the drawing to this PNG file.
    #[clap(long)]
    preview: Option<PathBuf>,

    /// Write a JSON summary of the run to this file.
    #[clap(long)]
    report: Option<PathBuf>,

    /// Only print warnings and errors.
    #[clap(long)]
    silent: bool,

    #[clap(flatten)]
    config: Config,
}

fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();

    let level = if opts.silent { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();

    let image = RasterImage::open(&opts.input)?;

    let (seed, mut rng) = match opts.seed {
        Some(seed) => (seed, Rng::from_seed(seed)),
        None => Rng::from_entropy(),
    };
    info!("seed: {}", seed);

    let mut source = opts.config.sampler.build();
    let output = local_density::run(&image, opts.grid, &opts.config, &mut *source, &mut rng)?;

    let mut files = vec![(opts.output.clone(), output.document.encode_svg())];
    if let Some(path) = &opts.preview {
        files.push((path.clone(), output.document.encode_png()?));
    }
    if let Some(path) = &opts.report {
        let mut report = output.report;
        report.seed = Some(seed);
        let json = serde_json::to_vec_pretty(&report).context("Failed to encode report")?;
        files.push((path.clone(), json));
    }

    save::write_all(&files)?;
    for (path, _) in &files {
        info!("wrote {}", path.display());
    }

    Ok(())
}
