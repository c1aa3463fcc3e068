//! Blue-noise point sources.
//!
//! A [`PointSource`] hands out well-spread points of the unit square by count. Sources are
//! deterministic: asking twice for the same count returns the same ordered sequence. Callers that
//! only need part of a sequence must shuffle before truncating, since a fixed-order prefix of a
//! sequence built for another count is biased.

use std::collections::HashMap;

use bitvec::prelude::{bitvec, BitVec};
use rand_core::RngCore;

use crate::math::torus_dist_sq;
use crate::rand::Rng;

const DEFAULT_SEED: u64 = 0x1d_b9_07;

pub trait PointSource {
    /// Returns at least `count` points in `[0, 1) x [0, 1)`.
    fn request(&mut self, count: usize) -> Vec<(f64, f64)>;
}

impl<P: PointSource + ?Sized> PointSource for Box<P> {
    fn request(&mut self, count: usize) -> Vec<(f64, f64)> {
        (**self).request(count)
    }
}

// Void-and-cluster (Ulichney 1993).

const SIGMA: f64 = 1.5;
const TWO_SIGMA_SQUARED: f64 = 2.0 * SIGMA * SIGMA;
/// Dither arrays hold at least this many cells per requested point, so a request never fills the
/// whole array (which would degenerate into a regular lattice).
const CELLS_PER_POINT: usize = 4;
const MIN_WIDTH: usize = 8;

/// A `width x width` toroidal dither array: every cell has a distinct rank, and for every `k` the
/// cells ranked below `k` form a blue-noise pattern.
#[derive(Debug, Clone)]
pub struct DitherArray {
    width: usize,
    ranks: Vec<usize>,
}

/// Binary pattern plus the Gaussian energy every cell receives from the set cells around it.
#[derive(Clone)]
struct Field {
    width: usize,
    kernel: Vec<f64>,
    pattern: BitVec,
    energy: Vec<f64>,
    ones: usize,
}

impl Field {
    fn new(width: usize) -> Self {
        let len = width * width;
        let wrap = |d: usize| d.min(width - d) as f64;
        let kernel = (0..len)
            .map(|index| {
                let (dx, dy) = (wrap(index % width), wrap(index / width));
                (-(dx * dx + dy * dy) / TWO_SIGMA_SQUARED).exp()
            })
            .collect();
        Field {
            width,
            kernel,
            pattern: bitvec![0; len],
            energy: vec![0.0; len],
            ones: 0,
        }
    }

    fn set(&mut self, index: usize, value: bool) {
        if self.pattern[index] == value {
            return;
        }
        self.pattern.set(index, value);
        let sign = if value {
            self.ones += 1;
            1.0
        } else {
            self.ones -= 1;
            -1.0
        };

        let width = self.width;
        let (x, y) = (index % width, index / width);
        for (cell, energy) in self.energy.iter_mut().enumerate() {
            let dx = (cell % width + width - x) % width;
            let dy = (cell / width + width - y) % width;
            *energy += sign * self.kernel[dy * width + dx];
        }
    }

    /// The set cell with the most energy, i.e. the one with the most crowded neighbourhood.
    fn tightest_cluster(&self) -> Option<usize> {
        self.pattern
            .iter_ones()
            .reduce(|best, i| if self.energy[i] > self.energy[best] { i } else { best })
    }

    /// The unset cell with the least energy, i.e. the centre of the emptiest region.
    fn largest_void(&self) -> Option<usize> {
        self.pattern
            .iter_zeros()
            .reduce(|best, i| if self.energy[i] < self.energy[best] { i } else { best })
    }
}

impl DitherArray {
    pub fn generate<R: RngCore>(width: usize, rng: &mut R) -> Self {
        assert!(width > 0, "empty dither array");
        let len = width * width;
        let mut field = Field::new(width);

        // Random seed pattern covering roughly a tenth of the cells.
        let seeded = (len / 10).max(1);
        while field.ones < seeded {
            let index = rng.next_u32() as usize % len;
            field.set(index, true);
        }

        // Move cluster pixels into voids until that stops changing anything.
        for _ in 0..len * len {
            let Some(cluster) = field.tightest_cluster() else {
                break;
            };
            field.set(cluster, false);
            let Some(void) = field.largest_void() else {
                break;
            };
            field.set(void, true);
            if void == cluster {
                break;
            }
        }

        let mut ranks = vec![0; len];

        // Ranks below the initial pattern: remove clusters one at a time.
        let mut shrinking = field.clone();
        while let Some(cluster) = shrinking.tightest_cluster() {
            shrinking.set(cluster, false);
            ranks[cluster] = shrinking.ones;
        }

        // Ranks from the initial pattern up: fill voids until the array is full.
        while let Some(void) = field.largest_void() {
            ranks[void] = field.ones;
            field.set(void, true);
        }

        DitherArray { width, ranks }
    }

    pub fn rank(&self, x: usize, y: usize) -> usize {
        self.ranks[y * self.width + x]
    }

    /// Centres of the `count` lowest-ranked cells, in rank order. Returns every cell if `count`
    /// exceeds the array size.
    pub fn points(&self, count: usize) -> Vec<(f64, f64)> {
        let mut by_rank = vec![0; self.ranks.len()];
        for (index, &rank) in self.ranks.iter().enumerate() {
            by_rank[rank] = index;
        }
        let width = self.width as f64;
        by_rank
            .into_iter()
            .take(count)
            .map(|index| {
                let (x, y) = (index % self.width, index / self.width);
                ((x as f64 + 0.5) / width, (y as f64 + 0.5) / width)
            })
            .collect()
    }
}

/// Serves points from void-and-cluster dither arrays, built on demand and cached per size.
#[derive(Debug)]
pub struct VoidAndCluster {
    seed: u64,
    arrays: HashMap<usize, DitherArray>,
}

impl Default for VoidAndCluster {
    fn default() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }
}

impl VoidAndCluster {
    pub fn with_seed(seed: u64) -> Self {
        VoidAndCluster {
            seed,
            arrays: HashMap::new(),
        }
    }

    pub fn width_for(count: usize) -> usize {
        let width = ((count * CELLS_PER_POINT) as f64).sqrt().ceil() as usize;
        width.max(MIN_WIDTH)
    }
}

impl PointSource for VoidAndCluster {
    fn request(&mut self, count: usize) -> Vec<(f64, f64)> {
        if count == 0 {
            return Vec::new();
        }
        let width = Self::width_for(count);
        let seed = self.seed ^ width as u64;
        let array = self.arrays.entry(width).or_insert_with(|| {
            log::debug!("building {}x{} dither array", width, width);
            DitherArray::generate(width, &mut Rng::from_seed(seed))
        });
        array.points(count)
    }
}

// Best-candidate (Mitchell 1991).

const CANDIDATES_PER_POINT: usize = 10;

/// Grows a single point sequence where each new point is the best of a batch of uniform
/// candidates, "best" meaning farthest (on the torus) from every point placed so far. Any prefix
/// of the sequence is well spread, so one growing sequence serves every count.
#[derive(Debug)]
pub struct BestCandidate {
    rng: Rng,
    points: Vec<(f64, f64)>,
}

impl Default for BestCandidate {
    fn default() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }
}

impl BestCandidate {
    pub fn with_seed(seed: u64) -> Self {
        BestCandidate {
            rng: Rng::from_seed(seed),
            points: Vec::new(),
        }
    }

    fn grow(&mut self) {
        let candidates = self.points.len() * CANDIDATES_PER_POINT + 1;
        let mut best = (self.rng.rnd(), self.rng.rnd());
        let mut best_dist = self.nearest_sq(best);
        for _ in 1..candidates {
            let candidate = (self.rng.rnd(), self.rng.rnd());
            let d = self.nearest_sq(candidate);
            if d > best_dist {
                best = candidate;
                best_dist = d;
            }
        }
        self.points.push(best);
    }

    fn nearest_sq(&self, p: (f64, f64)) -> f64 {
        self.points
            .iter()
            .map(|&q| torus_dist_sq(p, q))
            .fold(f64::INFINITY, f64::min)
    }
}

impl PointSource for BestCandidate {
    fn request(&mut self, count: usize) -> Vec<(f64, f64)> {
        while self.points.len() < count {
            self.grow();
        }
        self.points[..count].to_vec()
    }
}
