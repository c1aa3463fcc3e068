//! In-memory drawing that frames are appended to, and its serialisations.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

mod preview;
mod svg;

pub use self::preview::rasterize;

use crate::error::{Error, Result};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    pub const BLUE: Color = Color { r: 0, g: 0, b: 255 };
    pub const WHITE: Color = Color {
        r: 255,
        g: 255,
        b: 255,
    };

    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Style {
    pub fill: Option<Color>,
    pub stroke: Option<Stroke>,
}

impl Style {
    /// Stipple marks: solid black with a hairline black outline.
    pub const MARK: Style = Style {
        fill: Some(Color::BLACK),
        stroke: Some(Stroke {
            color: Color::BLACK,
            width: 1.0,
        }),
    };

    /// Frame outlines: blue hairline, no fill.
    pub const OUTLINE: Style = Style {
        fill: None,
        stroke: Some(Stroke {
            color: Color::BLUE,
            width: 1.0,
        }),
    };
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle { center: (f64, f64), radius: f64 },
    /// Closed polygon; the last point connects back to the first.
    Polygon { points: Vec<(f64, f64)> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub shape: Shape,
    pub style: Style,
}

/// Append-only sequence of primitives on a fixed `width x height` canvas (origin top-left).
/// Later elements are drawn over earlier ones.
#[derive(Debug, Clone)]
pub struct Document {
    width: u32,
    height: u32,
    elements: Vec<Element>,
}

impl Document {
    pub fn new(width: u32, height: u32) -> Self {
        Document {
            width,
            height,
            elements: Vec::new(),
        }
    }

    pub fn circle(&mut self, center: (f64, f64), radius: f64, style: Style) {
        self.elements.push(Element {
            shape: Shape::Circle { center, radius },
            style,
        });
    }

    pub fn polygon(&mut self, points: Vec<(f64, f64)>, style: Style) {
        self.elements.push(Element {
            shape: Shape::Polygon { points },
            style,
        });
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Seals the document. Nothing can be appended afterwards.
    pub fn finish(self) -> FinishedDocument {
        FinishedDocument {
            width: self.width,
            height: self.height,
            elements: self.elements,
        }
    }
}

/// A sealed [`Document`], ready to be serialised.
#[derive(Debug, Clone)]
pub struct FinishedDocument {
    width: u32,
    height: u32,
    elements: Vec<Element>,
}

impl FinishedDocument {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn circles(&self) -> usize {
        self.count(|shape| matches!(shape, Shape::Circle { .. }))
    }

    pub fn polygons(&self) -> usize {
        self.count(|shape| matches!(shape, Shape::Polygon { .. }))
    }

    fn count(&self, f: impl Fn(&Shape) -> bool) -> usize {
        self.elements.iter().filter(|e| f(&e.shape)).count()
    }

    pub fn to_svg(&self) -> ::svg::Document {
        svg::build(self)
    }

    /// The SVG file contents.
    pub fn encode_svg(&self) -> Vec<u8> {
        self.to_svg().to_string().into_bytes()
    }

    /// Rasterises the document onto a white background and encodes it as PNG.
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let dt = rasterize(self);
        let (width, height) = (dt.width() as u32, dt.height() as u32);
        let data = dt.get_data();
        let img = RgbaImage::from_fn(width, height, |x, y| {
            unpremultiply(data[(y * width + x) as usize])
        });
        let mut png = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(Error::EncodePreview)?;
        Ok(png)
    }
}

/// raqote pixels are premultiplied ARGB packed into a `u32`.
fn unpremultiply(pixel: u32) -> Rgba<u8> {
    let a = (pixel >> 24) as u8;
    let channel = |shift: u32| {
        let c = (pixel >> shift) & 0xff;
        match a {
            0 => 0,
            255 => c as u8,
            _ => (c * 255 / u32::from(a)).min(255) as u8,
        }
    };
    Rgba([channel(16), channel(8), channel(0), a])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_hex() {
        assert_eq!(Color::BLACK.hex(), "#000000");
        assert_eq!(Color::BLUE.hex(), "#0000ff");
        assert_eq!(Color { r: 18, g: 52, b: 171 }.hex(), "#1234ab");
    }

    #[test]
    fn test_append_and_finish() {
        let mut doc = Document::new(30, 40);
        assert!(doc.is_empty());
        doc.circle((1.0, 2.0), 3.0, Style::MARK);
        doc.circle((4.0, 5.0), 3.0, Style::MARK);
        doc.polygon(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)], Style::OUTLINE);
        assert_eq!(doc.len(), 3);

        let doc = doc.finish();
        assert_eq!((doc.width(), doc.height()), (30, 40));
        assert_eq!((doc.circles(), doc.polygons()), (2, 1));
        assert_eq!(
            doc.elements()[1].shape,
            Shape::Circle {
                center: (4.0, 5.0),
                radius: 3.0
            }
        );
    }

    #[test]
    fn test_unpremultiply() {
        assert_eq!(unpremultiply(0xff_12_34_ab), Rgba([0x12, 0x34, 0xab, 0xff]));
        assert_eq!(unpremultiply(0x80_40_00_80), Rgba([127, 0, 255, 0x80]));
        assert_eq!(unpremultiply(0), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_encodings() {
        let mut doc = Document::new(12, 8);
        doc.circle((6.0, 4.0), 2.0, Style::MARK);
        let doc = doc.finish();

        let svg = String::from_utf8(doc.encode_svg()).unwrap();
        assert!(svg.contains("<circle"));

        let png = image::load_from_memory(&doc.encode_png().unwrap())
            .unwrap()
            .to_rgba8();
        assert_eq!(png.dimensions(), (12, 8));
        assert_eq!(png.get_pixel(6, 4), &Rgba([0, 0, 0, 255]));
        assert_eq!(png.get_pixel(0, 0), &Rgba([255, 255, 255, 255]));
    }
}
