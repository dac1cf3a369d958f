//! Annotation Model - Persisted annotation records
//!
//! The tagged union handed to the store on commit. The serde shape matches
//! the persisted wire format: an internally tagged object with a lowercase
//! `"type"` discriminant, e.g.
//!
//! ```json
//! {"type": "highlight", "color": "FFFF00", "rectangles": [...]}
//! ```
//!
//! Records are created only by a successful commit; the engine hands them to
//! the store and never retains them.

use serde::{Deserialize, Serialize};

use crate::types::{HIGHLIGHT_COLOR, Point, Rect, STRIKEOUT_COLOR};

/// A committed freehand stroke: pen width, color token, and every captured
/// point in capture order (duplicates allowed).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drawing {
    pub width: f32,
    pub color: String,
    pub lines: Vec<Point>,
}

/// A committed selection markup: color token plus one surface-local rectangle
/// per selected line fragment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Markup {
    pub color: String,
    pub rectangles: Vec<Rect>,
}

/// An annotation record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Annotation {
    Drawing(Drawing),
    Highlight(Markup),
    Strikeout(Markup),
}

impl Annotation {
    /// The wire-format discriminant for this record.
    pub fn kind(&self) -> &'static str {
        match self {
            Annotation::Drawing(_) => "drawing",
            Annotation::Highlight(_) => "highlight",
            Annotation::Strikeout(_) => "strikeout",
        }
    }

    /// Whether this record carries committable geometry: a stroke needs at
    /// least two points, a markup at least one rectangle.
    pub fn has_geometry(&self) -> bool {
        match self {
            Annotation::Drawing(drawing) => drawing.lines.len() > 1,
            Annotation::Highlight(markup) | Annotation::Strikeout(markup) => {
                !markup.rectangles.is_empty()
            }
        }
    }
}

/// Which selection-driven annotation type rect mode produces.
///
/// Fixed when the mode is enabled; applies to every selection committed
/// while the mode stays armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkupKind {
    Highlight,
    Strikeout,
}

impl MarkupKind {
    /// Color used when the caller never supplied an explicit one.
    pub fn default_color(&self) -> &'static str {
        match self {
            MarkupKind::Highlight => HIGHLIGHT_COLOR,
            MarkupKind::Strikeout => STRIKEOUT_COLOR,
        }
    }

    /// Lowercase name, matching the record discriminant.
    pub fn as_str(&self) -> &'static str {
        match self {
            MarkupKind::Highlight => "highlight",
            MarkupKind::Strikeout => "strikeout",
        }
    }

    /// Wrap a markup body in the record variant for this kind.
    pub fn annotation(self, markup: Markup) -> Annotation {
        match self {
            MarkupKind::Highlight => Annotation::Highlight(markup),
            MarkupKind::Strikeout => Annotation::Strikeout(markup),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_highlight_wire_format() {
        let annotation = Annotation::Highlight(Markup {
            color: "FFFF00".to_string(),
            rectangles: vec![Rect::new(10.0, 10.0, 50.0, 20.0)],
        });

        assert_eq!(
            serde_json::to_value(&annotation).unwrap(),
            json!({
                "type": "highlight",
                "color": "FFFF00",
                "rectangles": [{"x": 10.0, "y": 10.0, "width": 50.0, "height": 20.0}],
            })
        );
    }

    #[test]
    fn test_drawing_wire_format() {
        let annotation = Annotation::Drawing(Drawing {
            width: 1.0,
            color: "000000".to_string(),
            lines: vec![Point::new(5.0, 5.0), Point::new(6.0, 7.0)],
        });

        assert_eq!(
            serde_json::to_value(&annotation).unwrap(),
            json!({
                "type": "drawing",
                "width": 1.0,
                "color": "000000",
                "lines": [{"x": 5.0, "y": 5.0}, {"x": 6.0, "y": 7.0}],
            })
        );
    }

    #[test]
    fn test_roundtrip() {
        let annotation = Annotation::Strikeout(Markup {
            color: "FF0000".to_string(),
            rectangles: vec![Rect::new(10.0, 20.0, 50.0, 20.0), Rect::new(10.0, 40.0, 40.0, 20.0)],
        });

        let value = serde_json::to_value(&annotation).unwrap();
        let back: Annotation = serde_json::from_value(value).unwrap();
        assert_eq!(back, annotation);
    }

    #[test]
    fn test_has_geometry() {
        let empty_stroke = Annotation::Drawing(Drawing {
            width: 1.0,
            color: "000000".to_string(),
            lines: vec![Point::new(5.0, 5.0)],
        });
        assert!(!empty_stroke.has_geometry());

        let stroke = Annotation::Drawing(Drawing {
            width: 1.0,
            color: "000000".to_string(),
            lines: vec![Point::new(5.0, 5.0), Point::new(6.0, 6.0)],
        });
        assert!(stroke.has_geometry());

        let empty_markup = Annotation::Highlight(Markup {
            color: "FFFF00".to_string(),
            rectangles: vec![],
        });
        assert!(!empty_markup.has_geometry());
    }

    #[test]
    fn test_default_colors() {
        assert_eq!(MarkupKind::Highlight.default_color(), "FFFF00");
        assert_eq!(MarkupKind::Strikeout.default_color(), "FF0000");
    }

    #[test]
    fn test_kind_names_match_wire_tags() {
        let markup = Markup { color: "FFFF00".to_string(), rectangles: vec![] };

        for kind in [MarkupKind::Highlight, MarkupKind::Strikeout] {
            assert_eq!(kind.annotation(markup.clone()).kind(), kind.as_str());
        }
    }
}
