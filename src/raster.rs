use std::path::Path;

use image::DynamicImage;

use crate::error::{Error, Result};

/// A decoded, read-only source image: interleaved 8-bit channels, row-major, with the byte for
/// channel `c` of pixel `(x, y)` at `channels * (width * y + x) + c`.
#[derive(Debug, Clone)]
pub struct RasterImage {
    width: u32,
    height: u32,
    channels: u8,
    data: Vec<u8>,
}

impl RasterImage {
    pub fn new(width: u32, height: u32, channels: u8, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::EmptyImage { width, height });
        }
        if channels < 3 {
            return Err(Error::TooFewChannels { channels });
        }
        let expected = width as usize * height as usize * channels as usize;
        if data.len() != expected {
            return Err(Error::BufferSize {
                width,
                height,
                channels,
                expected,
                actual: data.len(),
            });
        }
        Ok(RasterImage {
            width,
            height,
            channels,
            data,
        })
    }

    /// Decodes the image at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::MissingInput {
                path: path.to_path_buf(),
            });
        }
        let img = image::open(path).map_err(|source| Error::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_dynamic(img)
    }

    /// Keeps 8-bit RGB and RGBA buffers as they are; everything else (luma, 16-bit, float) is
    /// converted to 8-bit RGB, or RGBA when the source has alpha.
    pub fn from_dynamic(img: DynamicImage) -> Result<Self> {
        let (width, height) = (img.width(), img.height());
        let (channels, data) = match img {
            DynamicImage::ImageRgb8(buf) => (3, buf.into_raw()),
            DynamicImage::ImageRgba8(buf) => (4, buf.into_raw()),
            other if other.color().has_alpha() => (4, other.to_rgba8().into_raw()),
            other => (3, other.to_rgb8().into_raw()),
        };
        Self::new(width, height, channels, data)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Achromatic intensity of pixel `(x, y)`: the plain mean of its R, G and B bytes. Extra
    /// channels are ignored.
    #[inline(always)]
    pub fn intensity(&self, x: u32, y: u32) -> f64 {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let index = self.channels as usize * (self.width as usize * y as usize + x as usize);
        let rgb = &self.data[index..index + 3];
        (f64::from(rgb[0]) + f64::from(rgb[1]) + f64::from(rgb[2])) / 3.0
    }
}
