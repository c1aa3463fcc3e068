use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything that can abort a run. There are no retries: the first error wins and nothing is
/// written.
#[derive(Error, Debug)]
pub enum Error {
    #[error("input image not found: {}", path.display())]
    MissingInput { path: PathBuf },

    #[error("failed to decode image {}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("image is empty ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    #[error("image has {channels} channel(s); at least 3 (R, G, B) are required")]
    TooFewChannels { channels: u8 },

    #[error("pixel buffer holds {actual} bytes, expected {expected} for {width}x{height}x{channels}")]
    BufferSize {
        width: u32,
        height: u32,
        channels: u8,
        expected: usize,
        actual: usize,
    },

    #[error("grid size must be at least 1 pixel")]
    ZeroGrid,

    #[error("grid size {size} makes the {width}x{height} canvas too large")]
    CanvasTooLarge { size: u32, width: u32, height: u32 },

    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode preview")]
    EncodePreview(#[source] image::ImageError),
}
