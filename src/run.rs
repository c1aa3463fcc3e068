use log::{debug, info};
use serde::Serialize;

use crate::config::Config;
use crate::density::{DensityMap, DensityRange};
use crate::document::{Document, FinishedDocument};
use crate::error::Result;
use crate::frame::{Frame, FrameSpec};
use crate::grid::Grid;
use crate::points::PointSource;
use crate::rand::Rng;
use crate::raster::RasterImage;

/// Everything a run produces. Nothing has been written to disk yet.
pub struct Output {
    pub document: FinishedDocument,
    /// Frames in draw order.
    pub frames: Vec<Frame>,
    pub report: Report,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub image: ImageInfo,
    pub grid: Grid,
    pub columns: usize,
    pub rows: usize,
    pub canvas: (u32, u32),
    pub density: DensityRange,
    pub degenerate: bool,
    /// Seed of the random stream, when the caller knows it.
    pub seed: Option<u64>,
    pub config: Config,
    pub frames: usize,
    pub circles: usize,
}

#[derive(Debug, Copy, Clone, Serialize)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub channels: u8,
}

/// Converts `image` into a frame drawing.
///
/// Two passes over the grid: the first measures every cell and finds the global density range,
/// the second plans, renders and appends each frame in row-major order.
pub fn run(
    image: &RasterImage,
    grid_size: u32,
    config: &Config,
    source: &mut dyn PointSource,
    rng: &mut Rng,
) -> Result<Output> {
    let (width, height) = (image.width(), image.height());
    info!(
        "Source image: {}x{}   ({})",
        width,
        height,
        image.channels()
    );

    let grid = Grid::new(grid_size, width, height)?;
    let densities = DensityMap::scan(image, &grid);
    let range = densities.range();
    info!(
        "{}x{} cells, raw density range [{:.3}, {:.3}]",
        grid.columns(),
        grid.rows(),
        range.min,
        range.max
    );

    let (canvas_width, canvas_height) = grid.canvas_size();
    let mut document = Document::new(canvas_width, canvas_height);
    let layout = config.layout();
    let size = f64::from(grid_size);

    let mut frames = Vec::with_capacity(grid.cell_count());
    for (index, cell) in grid.cells().enumerate() {
        let spec = FrameSpec {
            origin: (f64::from(cell.i), f64::from(cell.j)),
            plan: layout.plan((cell.i, cell.j), (width, height), grid_size),
            density: densities.normalized(index),
            size,
            radius: config.circle_size,
        };
        let frame = spec.render(source, rng);
        debug!(
            "cell ({}, {}): density {:.2}, {} marks, theta {:.4}",
            cell.i,
            cell.j,
            spec.density,
            frame.samples.len(),
            frame.theta
        );
        frame.draw(&mut document);
        frames.push(frame);
    }

    let document = document.finish();
    let circles = document.circles();
    info!("{} frames, {} marks", frames.len(), circles);

    let report = Report {
        image: ImageInfo {
            width,
            height,
            channels: image.channels(),
        },
        grid,
        columns: grid.columns(),
        rows: grid.rows(),
        canvas: (canvas_width, canvas_height),
        density: range,
        degenerate: range.is_degenerate(),
        seed: None,
        config: config.clone(),
        frames: frames.len(),
        circles,
    };

    Ok(Output {
        document,
        frames,
        report,
    })
}
