use crate::document::{Document, Style};
use crate::layout::Plan;
use crate::math::{frac, rotate};
use crate::points::PointSource;
use crate::rand::Rng;

/// Side length, in points, of the square blue-noise tile requested for `density`:
/// `round(sqrt(density))`.
pub fn sample_count(density: f64) -> usize {
    density.max(0.0).sqrt().round() as usize
}

/// Number of points asked of the point source for `density`. Always a perfect square.
pub fn requested_points(density: f64) -> usize {
    let n = sample_count(density);
    n * n
}

/// Number of points a frame actually draws: the density itself, capped by what the source
/// returned. Non-square densities are simply truncated (or under-filled).
pub fn consumed_points(density: f64, available: usize) -> usize {
    (density.max(0.0).round() as usize).min(available)
}

/// What to draw for one grid cell.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameSpec {
    /// Top-left pixel of the cell in the source image.
    pub origin: (f64, f64),
    pub plan: Plan,
    /// Normalized density in `[0, 100]`.
    pub density: f64,
    /// Frame side length, the grid size.
    pub size: f64,
    /// Radius of every mark.
    pub radius: f64,
}

/// A rendered cell: stipple positions and outline, already rotated about `center`.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub center: (f64, f64),
    pub theta: f64,
    pub size: f64,
    pub radius: f64,
    /// Cranley-Patterson rotation shared by every point of this frame.
    pub jitter: (f64, f64),
    pub requested: usize,
    pub samples: Vec<(f64, f64)>,
    pub outline: [(f64, f64); 4],
}

impl FrameSpec {
    pub fn center(&self) -> (f64, f64) {
        (
            self.origin.0 + self.plan.offset.0,
            self.origin.1 + self.plan.offset.1,
        )
    }

    /// Lays out the frame. Draws from `rng` twice per frame in a fixed order: first the shuffle of
    /// the requested points, then the jitter offset.
    pub fn render(&self, source: &mut dyn PointSource, rng: &mut Rng) -> Frame {
        let center = self.center();
        let theta = self.plan.theta;

        let requested = requested_points(self.density);
        let mut points = if requested == 0 {
            Vec::new()
        } else {
            source.request(requested)
        };
        rng.shuffle(&mut points);
        points.truncate(consumed_points(self.density, points.len()));

        let jitter = (rng.rnd(), rng.rnd());
        let samples = points
            .into_iter()
            .map(|(px, py)| {
                let p = (
                    center.0 + frac(jitter.0 + px) * self.size,
                    center.1 + frac(jitter.1 + py) * self.size,
                );
                rotate(p, theta, center)
            })
            .collect();

        let outline = square(center, self.size).map(|corner| rotate(corner, theta, center));

        Frame {
            center,
            theta,
            size: self.size,
            radius: self.radius,
            jitter,
            requested,
            samples,
            outline,
        }
    }
}

/// Corners of the axis-aligned `size x size` square whose top-left corner is `origin`, clockwise
/// on screen.
pub fn square(origin: (f64, f64), size: f64) -> [(f64, f64); 4] {
    let (x, y) = origin;
    [(x, y), (x + size, y), (x + size, y + size), (x, y + size)]
}

impl Frame {
    /// Appends the marks, then the outline.
    pub fn draw(&self, doc: &mut Document) {
        for &sample in &self.samples {
            doc.circle(sample, self.radius, Style::MARK);
        }
        doc.polygon(self.outline.to_vec(), Style::OUTLINE);
    }
}
