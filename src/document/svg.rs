use svg::node::element::{Circle, Polygon};
use svg::Document;

use super::{Element, FinishedDocument, Shape, Style};

pub(super) fn build(doc: &FinishedDocument) -> Document {
    let (width, height) = (doc.width(), doc.height());
    doc.elements().iter().fold(
        Document::new()
            .set("width", width)
            .set("height", height)
            .set("viewBox", (0, 0, width, height)),
        |document, element| add(document, element),
    )
}

fn add(document: Document, element: &Element) -> Document {
    match &element.shape {
        Shape::Circle { center, radius } => document.add(styled(
            Circle::new()
                .set("cx", center.0)
                .set("cy", center.1)
                .set("r", *radius),
            &element.style,
        )),
        Shape::Polygon { points } => {
            let points: Vec<String> = points.iter().map(|(x, y)| format!("{},{}", x, y)).collect();
            document.add(styled(
                Polygon::new().set("points", points.join(" ")),
                &element.style,
            ))
        }
    }
}

fn styled<N: svg::node::Node>(mut node: N, style: &Style) -> N {
    let fill = style.fill.map_or_else(|| "none".to_string(), |c| c.hex());
    node.assign("fill", fill);
    if let Some(stroke) = style.stroke {
        node.assign("stroke", stroke.color.hex());
        node.assign("stroke-width", stroke.width);
    }
    node
}

#[cfg(test)]
mod tests {
    use super::super::Document as Drawing;
    use super::*;

    #[test]
    fn test_svg_markup() {
        let mut doc = Drawing::new(70, 90);
        doc.circle((1.5, 2.0), 10.0, Style::MARK);
        doc.polygon(vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)], Style::OUTLINE);
        let text = build(&doc.finish()).to_string();

        assert!(text.contains("width=\"70\""));
        assert!(text.contains("height=\"90\""));
        assert!(text.contains("viewBox=\"0 0 70 90\""));
        assert_eq!(text.matches("<circle").count(), 1);
        assert!(text.contains("cx=\"1.5\""));
        assert!(text.contains("r=\"10\""));
        assert_eq!(text.matches("<polygon").count(), 1);
        assert!(text.contains("points=\"0,0 10,0 10,10 0,10\""));
        assert!(text.contains("fill=\"none\""));
        assert!(text.contains("stroke=\"#0000ff\""));
    }

    #[test]
    fn test_draw_order_is_kept() {
        let mut doc = Drawing::new(10, 10);
        doc.polygon(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)], Style::OUTLINE);
        doc.circle((5.0, 5.0), 1.0, Style::MARK);
        let text = build(&doc.finish()).to_string();
        let polygon = text.find("<polygon").unwrap();
        let circle = text.find("<circle").unwrap();
        assert!(polygon < circle);
    }
}
