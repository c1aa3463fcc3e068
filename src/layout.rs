use crate::math::pi;

/// Where a cell's frame ends up: its origin is moved by `offset` and the frame is rotated by
/// `theta` radians about that moved origin.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Plan {
    pub offset: (f64, f64),
    pub theta: f64,
}

impl Plan {
    pub const IDENTITY: Plan = Plan {
        offset: (0.0, 0.0),
        theta: 0.0,
    };
}

/// Progressive distortion: cells near the origin stay put and axis-aligned, and drift and
/// rotate more the farther they sit from it, growing like `(i / width)^pow_x * (j / height)^pow_y`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Distortion {
    /// Vertical drift, in grid cells per unit of strength.
    pub scale: f64,
    /// Rotation, in multiples of pi per unit of strength.
    pub coef: f64,
    pub pow_x: f64,
    pub pow_y: f64,
}

impl Default for Distortion {
    fn default() -> Self {
        Distortion {
            scale: 10.0,
            coef: 10.0,
            pow_x: 6.0,
            pow_y: 4.0,
        }
    }
}

impl Distortion {
    pub fn plan(&self, (i, j): (u32, u32), (width, height): (u32, u32), grid_size: u32) -> Plan {
        let (i, j) = (f64::from(i), f64::from(j));
        let strength_i = (i / f64::from(width)).powf(self.pow_x);
        let strength_j = (j / f64::from(height)).powf(self.pow_y);
        let strength = strength_i * strength_j;
        Plan {
            offset: (i * strength, strength * f64::from(grid_size) * self.scale),
            theta: strength * pi(self.coef),
        }
    }
}

/// Chooses how cell position turns into a [`Plan`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Layout {
    Distort(Distortion),
    /// Rotation only, `theta = pi/4 * (i^2 / width^2 + j^2 / height^2)`, no drift.
    Classic,
}

impl Default for Layout {
    fn default() -> Self {
        Layout::Distort(Distortion::default())
    }
}

impl Layout {
    pub fn plan(&self, cell: (u32, u32), image: (u32, u32), grid_size: u32) -> Plan {
        match self {
            Layout::Distort(distortion) => distortion.plan(cell, image, grid_size),
            Layout::Classic => {
                let (i, j) = (f64::from(cell.0), f64::from(cell.1));
                let (w, h) = (f64::from(image.0), f64::from(image.1));
                let factor = i * i / (w * w) + j * j / (h * h);
                Plan {
                    offset: (0.0, 0.0),
                    theta: pi(0.25) * factor,
                }
            }
        }
    }
}
