use serde::Serialize;

use crate::error::{Error, Result};

/// Frames are laid out with this many grid cells of slack on the right and bottom of the canvas,
/// so drifting cells stay on the page.
const CANVAS_MARGIN_CELLS: u32 = 5;

/// An axis-aligned partition of a `width x height` image into `size x size` cells. Cells on the
/// right and bottom border are clamped to the image and may be smaller.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct Grid {
    size: u32,
    width: u32,
    height: u32,
    #[serde(skip)]
    canvas: (u32, u32),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Cell {
    /// Left edge, a multiple of the grid size.
    pub i: u32,
    /// Top edge, a multiple of the grid size.
    pub j: u32,
    pub width: u32,
    pub height: u32,
}

impl Grid {
    pub fn new(size: u32, width: u32, height: u32) -> Result<Self> {
        if size == 0 {
            return Err(Error::ZeroGrid);
        }
        let canvas = canvas_extent(size, width, height).ok_or(Error::CanvasTooLarge {
            size,
            width,
            height,
        })?;
        Ok(Grid {
            size,
            width,
            height,
            canvas,
        })
    }

    pub fn columns(&self) -> usize {
        self.width.div_ceil(self.size) as usize
    }

    pub fn rows(&self) -> usize {
        self.height.div_ceil(self.size) as usize
    }

    pub fn cell_count(&self) -> usize {
        self.columns() * self.rows()
    }

    /// All cells in draw order: row-major, increasing `j` then increasing `i`.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let size = self.size as usize;
        (0..self.height).step_by(size).flat_map(move |j| {
            (0..self.width).step_by(size).map(move |i| Cell {
                i,
                j,
                width: self.size.min(self.width - i),
                height: self.size.min(self.height - j),
            })
        })
    }

    /// Output canvas extent: `width + 5 * size` by `2 * height + 5 * size`.
    pub fn canvas_size(&self) -> (u32, u32) {
        self.canvas
    }
}

fn canvas_extent(size: u32, width: u32, height: u32) -> Option<(u32, u32)> {
    let margin = CANVAS_MARGIN_CELLS.checked_mul(size)?;
    let canvas_width = width.checked_add(margin)?;
    let canvas_height = height.checked_mul(2)?.checked_add(margin)?;
    Some((canvas_width, canvas_height))
}
