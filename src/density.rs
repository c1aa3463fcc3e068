use log::warn;
use serde::Serialize;

use crate::grid::{Cell, Grid};
use crate::raster::RasterImage;

/// Upper end of the working density range; a cell at the global maximum asks for this many points.
pub const MAX_DENSITY: f64 = 100.0;

/// Density given to every cell when the whole image has a single raw density (`min == max`).
/// There is no contrast to encode, so every frame gets the same mid-range fill.
pub const UNIFORM_DENSITY: f64 = MAX_DENSITY / 2.0;

/// Mean intensity over the `cell_width x cell_height` window whose top-left pixel is `(i, j)`.
///
/// The sum is divided by the number of pixels actually visited, so clamped border cells are not
/// darkened by their missing area. An empty window yields NaN.
pub fn measure(image: &RasterImage, i: u32, j: u32, cell_width: u32, cell_height: u32) -> f64 {
    let mut sum = 0.0;
    let mut count = 0u64;
    for y in j..j + cell_height {
        for x in i..i + cell_width {
            sum += image.intensity(x, y);
            count += 1;
        }
    }
    sum / count as f64
}

pub fn measure_cell(image: &RasterImage, cell: Cell) -> f64 {
    measure(image, cell.i, cell.j, cell.width, cell.height)
}

/// Global bounds of the raw densities observed in one run.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct DensityRange {
    pub min: f64,
    pub max: f64,
}

impl DensityRange {
    pub fn from_values<I: IntoIterator<Item = f64>>(values: I) -> Self {
        values.into_iter().fold(
            DensityRange {
                min: f64::INFINITY,
                max: f64::NEG_INFINITY,
            },
            |range, v| DensityRange {
                min: range.min.min(v),
                max: range.max.max(v),
            },
        )
    }

    pub fn is_degenerate(&self) -> bool {
        !(self.min < self.max)
    }

    /// Maps a raw density onto `[0, MAX_DENSITY]` via `(raw - min) / (max - min) * MAX_DENSITY`.
    /// A degenerate range maps everything to [`UNIFORM_DENSITY`].
    pub fn scale(&self, raw: f64) -> f64 {
        if self.is_degenerate() {
            return UNIFORM_DENSITY;
        }
        ((raw - self.min) / (self.max - self.min) * MAX_DENSITY).clamp(0.0, MAX_DENSITY)
    }
}

/// Raw per-cell densities from the first pass over the grid, in draw order, plus their range.
#[derive(Debug, Clone)]
pub struct DensityMap {
    raw: Vec<f64>,
    range: DensityRange,
}

impl DensityMap {
    pub fn scan(image: &RasterImage, grid: &Grid) -> Self {
        let raw: Vec<f64> = grid.cells().map(|cell| measure_cell(image, cell)).collect();
        let range = DensityRange::from_values(raw.iter().copied());
        if range.is_degenerate() {
            warn!(
                "image has uniform density {:.3}; every frame uses density {}",
                range.min, UNIFORM_DENSITY
            );
        }
        DensityMap { raw, range }
    }

    pub fn range(&self) -> DensityRange {
        self.range
    }

    pub fn cell_count(&self) -> usize {
        self.raw.len()
    }

    pub fn raw(&self, index: usize) -> f64 {
        self.raw[index]
    }

    /// Normalized density of the `index`-th cell in draw order.
    pub fn normalized(&self, index: usize) -> f64 {
        self.range.scale(self.raw[index])
    }
}
