use std::f32::consts::PI;

use raqote::{DrawOptions, DrawTarget, Path, PathBuilder, SolidSource, Source, StrokeStyle};

use super::{Color, FinishedDocument, Shape};

/// Renders the document onto a white raster of the same size.
pub fn rasterize(doc: &FinishedDocument) -> DrawTarget {
    let mut dt = DrawTarget::new(doc.width() as i32, doc.height() as i32);
    dt.clear(solid(Color::WHITE));
    for element in doc.elements() {
        let path = trace(&element.shape);
        if let Some(fill) = element.style.fill {
            dt.fill(&path, &Source::Solid(solid(fill)), &DrawOptions::new());
        }
        if let Some(stroke) = element.style.stroke {
            let style = StrokeStyle {
                width: stroke.width as f32,
                ..StrokeStyle::default()
            };
            dt.stroke(
                &path,
                &Source::Solid(solid(stroke.color)),
                &style,
                &DrawOptions::new(),
            );
        }
    }
    dt
}

fn solid(color: Color) -> SolidSource {
    SolidSource::from_unpremultiplied_argb(0xff, color.r, color.g, color.b)
}

fn trace(shape: &Shape) -> Path {
    let mut pb = PathBuilder::new();
    match shape {
        Shape::Circle { center, radius } => {
            pb.arc(
                center.0 as f32,
                center.1 as f32,
                *radius as f32,
                0.0,
                2.0 * PI,
            );
        }
        Shape::Polygon { points } => {
            let mut points = points.iter();
            if let Some(&(x, y)) = points.next() {
                pb.move_to(x as f32, y as f32);
                for &(x, y) in points {
                    pb.line_to(x as f32, y as f32);
                }
            }
        }
    }
    pb.close();
    pb.finish()
}
