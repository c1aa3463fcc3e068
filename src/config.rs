use serde::Serialize;

use crate::layout::{Distortion, Layout};
use crate::points::{BestCandidate, PointSource, VoidAndCluster};

/// Rendering parameters. The defaults are the documented CLI defaults.
#[derive(Debug, Clone, PartialEq, clap::Args, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Translation scale factor: how far distorted cells drift down, in grid cells.
    #[clap(short, long, default_value_t = 10.0)]
    pub scale: f64,

    /// Rotation coefficient, in multiples of pi.
    #[clap(short, long, default_value_t = 10.0)]
    pub coef: f64,

    /// Radius of every stipple mark.
    #[clap(long = "circleSize", alias = "circle-size", default_value_t = 10.0)]
    pub circle_size: f64,

    /// Horizontal distortion exponent.
    #[clap(long = "powX", alias = "pow-x", default_value_t = 6.0)]
    pub pow_x: f64,

    /// Vertical distortion exponent.
    #[clap(long = "powY", alias = "pow-y", default_value_t = 4.0)]
    pub pow_y: f64,

    /// How cell position turns into drift and rotation. `classic` ignores the four distortion
    /// parameters above.
    #[clap(long, value_enum, default_value_t = LayoutKind::Distort)]
    pub layout: LayoutKind,

    /// Blue-noise point generator.
    #[clap(long, value_enum, default_value_t = SamplerKind::VoidAndCluster)]
    pub sampler: SamplerKind,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, clap::ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutKind {
    Distort,
    Classic,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, clap::ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SamplerKind {
    VoidAndCluster,
    BestCandidate,
}

impl Default for Config {
    fn default() -> Self {
        let distortion = Distortion::default();
        Config {
            scale: distortion.scale,
            coef: distortion.coef,
            circle_size: 10.0,
            pow_x: distortion.pow_x,
            pow_y: distortion.pow_y,
            layout: LayoutKind::Distort,
            sampler: SamplerKind::VoidAndCluster,
        }
    }
}

impl Config {
    pub fn layout(&self) -> Layout {
        match self.layout {
            LayoutKind::Distort => Layout::Distort(Distortion {
                scale: self.scale,
                coef: self.coef,
                pow_x: self.pow_x,
                pow_y: self.pow_y,
            }),
            LayoutKind::Classic => Layout::Classic,
        }
    }
}

impl SamplerKind {
    pub fn build(self) -> Box<dyn PointSource> {
        match self {
            SamplerKind::VoidAndCluster => Box::<VoidAndCluster>::default(),
            SamplerKind::BestCandidate => Box::<BestCandidate>::default(),
        }
    }
}
