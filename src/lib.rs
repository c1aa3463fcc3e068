//! Turns a raster image into a drawing of per-cell frames, each stippled with blue-noise points
//! whose count follows the local brightness of the image.

pub mod config;
pub mod density;
pub mod document;
pub mod error;
pub mod frame;
pub mod grid;
pub mod layout;
pub mod math;
pub mod points;
pub mod rand;
pub mod raster;
pub mod run;
pub mod save;

pub use error::{Error, Result};
pub use run::{run, Output, Report};
