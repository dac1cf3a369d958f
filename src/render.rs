//! Renderer Collaborators - Turning records into graphic elements
//!
//! The engine does not draw; it asks an [`ElementRenderer`] for elements and
//! inserts whatever comes back, in the order produced, as overlay children of
//! the target surface. [`SvgRenderer`] is the stock implementation: a stroked
//! `<path>` for drawings, translucent `<rect>`s for highlights, and mid-text
//! `<line>`s for strikeouts.

use svg::node::element as svg_element;
use svg::node::element::path::Data;

use crate::annotation::{Drawing, Markup};

/// Renderer hook: one graphic per drawing, one graphic per markup rectangle.
pub trait ElementRenderer {
    /// Render a freehand stroke as a single element.
    fn render_path(&self, drawing: &Drawing) -> Box<dyn svg::Node>;

    /// Render a highlight, one element per rectangle.
    fn render_rect(&self, markup: &Markup) -> Vec<Box<dyn svg::Node>>;

    /// Render a strikeout, one element per rectangle.
    ///
    /// Rectangle `y` values already sit at mid-text; the renderer draws the
    /// line straight through them.
    fn render_line(&self, markup: &Markup) -> Vec<Box<dyn svg::Node>>;
}

/// Stock SVG renderer.
pub struct SvgRenderer;

impl ElementRenderer for SvgRenderer {
    fn render_path(&self, drawing: &Drawing) -> Box<dyn svg::Node> {
        let mut data = Data::new();
        let mut points = drawing.lines.iter();
        if let Some(first) = points.next() {
            data = data.move_to((first.x, first.y));
            for point in points {
                data = data.line_to((point.x, point.y));
            }
        }

        Box::new(
            svg_element::Path::new()
                .set("d", data)
                .set("fill", "none")
                .set("stroke", format!("#{}", drawing.color))
                .set("stroke-width", drawing.width)
                .set("stroke-linecap", "round")
                .set("stroke-linejoin", "round"),
        )
    }

    fn render_rect(&self, markup: &Markup) -> Vec<Box<dyn svg::Node>> {
        markup
            .rectangles
            .iter()
            .map(|rect| {
                Box::new(
                    svg_element::Rectangle::new()
                        .set("x", rect.x)
                        .set("y", rect.y)
                        .set("width", rect.width)
                        .set("height", rect.height)
                        .set("fill", format!("#{}", markup.color))
                        .set("fill-opacity", 0.2),
                ) as Box<dyn svg::Node>
            })
            .collect()
    }

    fn render_line(&self, markup: &Markup) -> Vec<Box<dyn svg::Node>> {
        markup
            .rectangles
            .iter()
            .map(|rect| {
                Box::new(
                    svg_element::Line::new()
                        .set("x1", rect.x)
                        .set("y1", rect.y)
                        .set("x2", rect.right())
                        .set("y2", rect.y)
                        .set("stroke", format!("#{}", markup.color))
                        .set("stroke-width", 1),
                ) as Box<dyn svg::Node>
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Point, Rect};

    fn drawing() -> Drawing {
        Drawing {
            width: 2.0,
            color: "FF00FF".to_string(),
            lines: vec![Point::new(5.0, 5.0), Point::new(10.0, 12.0), Point::new(15.0, 8.0)],
        }
    }

    #[test]
    fn test_render_path() {
        let element = SvgRenderer.render_path(&drawing());
        let markup = element.to_string();

        assert!(markup.contains("path"));
        assert!(markup.contains("stroke=\"#FF00FF\""));
        assert!(markup.contains("fill=\"none\""));
    }

    #[test]
    fn test_render_rect_one_element_per_rectangle() {
        let markup = Markup {
            color: "FFFF00".to_string(),
            rectangles: vec![Rect::new(10.0, 10.0, 50.0, 20.0), Rect::new(10.0, 30.0, 40.0, 20.0)],
        };

        let elements = SvgRenderer.render_rect(&markup);
        assert_eq!(elements.len(), 2);
        assert!(elements[0].to_string().contains("#FFFF00"));
    }

    #[test]
    fn test_render_line_spans_rectangle_width() {
        let markup = Markup {
            color: "FF0000".to_string(),
            rectangles: vec![Rect::new(10.0, 20.0, 50.0, 20.0)],
        };

        let elements = SvgRenderer.render_line(&markup);
        assert_eq!(elements.len(), 1);

        let text = elements[0].to_string();
        assert!(text.contains("x1=\"10\""));
        assert!(text.contains("x2=\"60\""));
        assert!(text.contains("stroke=\"#FF0000\""));
    }
}
