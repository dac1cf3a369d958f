//! Core Types - Geometry primitives and color tokens
//!
//! Shared by every other module. All coordinates are `f32`:
//! viewport-space values come straight from the host's layout engine,
//! surface-local values are produced by subtracting a resolved [`Offset`].

use serde::{Deserialize, Serialize};

// =============================================================================
// POINT
// =============================================================================

/// A surface-local coordinate pair.
///
/// Points only exist relative to a surface origin; viewport-space positions
/// travel as plain `(f32, f32)` on pointer events until they are localized.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

// =============================================================================
// RECT
// =============================================================================

/// An axis-aligned rectangle.
///
/// Used both for viewport-space bounding boxes (where `x`/`y` are the
/// box's left/top) and for surface-local annotation rectangles.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Right edge (`x + width`).
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge (`y + height`).
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Whether the point lies inside this rectangle (edges inclusive).
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }

    /// Whether both dimensions are strictly positive.
    ///
    /// Degenerate rectangles never survive to a committed annotation.
    pub fn is_positive(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

// =============================================================================
// OFFSET
// =============================================================================

/// Cumulative viewport-to-surface displacement.
///
/// Computed on demand by [`crate::view::ViewTree::resolve_offset`] and never
/// cached: layout can shift between any two events.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Offset {
    pub left: f32,
    pub top: f32,
}

impl Offset {
    pub const ZERO: Offset = Offset { left: 0.0, top: 0.0 };

    /// Create a new offset.
    pub const fn new(left: f32, top: f32) -> Self {
        Self { left, top }
    }

    /// Convert a viewport-space position into a surface-local point.
    pub fn localize(&self, x: f32, y: f32) -> Point {
        Point::new(x - self.left, y - self.top)
    }
}

// =============================================================================
// COLOR TOKENS
// =============================================================================

/// Default pen stroke color.
pub const PEN_COLOR: &str = "000000";

/// Default highlight fill color.
pub const HIGHLIGHT_COLOR: &str = "FFFF00";

/// Default strikeout line color.
pub const STRIKEOUT_COLOR: &str = "FF0000";

/// Check whether a string is a usable hex color token.
///
/// Accepts 3, 6 or 8 hex digits, with or without a leading `#`.
/// Annotation records store the bare digits (`"FFFF00"`).
pub fn is_color_token(token: &str) -> bool {
    let hex = token.trim().trim_start_matches('#');

    matches!(hex.len(), 3 | 6 | 8) && hex.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Normalize a caller-supplied color token, falling back when it is invalid.
///
/// Returns the bare-digit form of `token`, or `fallback` (assumed valid)
/// when `token` does not parse as a hex color.
pub fn normalize_color(token: &str, fallback: &str) -> String {
    let hex = token.trim().trim_start_matches('#');

    if is_color_token(hex) {
        hex.to_owned()
    } else {
        log::debug!("ignoring invalid color token {token:?}, using {fallback:?}");
        fallback.to_owned()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);

        assert!(rect.contains(10.0, 20.0));
        assert!(rect.contains(110.0, 70.0));
        assert!(rect.contains(55.0, 45.0));

        assert!(!rect.contains(9.0, 45.0));
        assert!(!rect.contains(55.0, 71.0));
        assert!(!rect.contains(111.0, 45.0));
    }

    #[test]
    fn test_rect_is_positive() {
        assert!(Rect::new(0.0, 0.0, 1.0, 1.0).is_positive());
        assert!(!Rect::new(0.0, 0.0, 0.0, 10.0).is_positive());
        assert!(!Rect::new(0.0, 0.0, 10.0, 0.0).is_positive());
        assert!(!Rect::new(0.0, 0.0, -5.0, 10.0).is_positive());
    }

    #[test]
    fn test_offset_localize() {
        let offset = Offset::new(30.0, 90.0);
        let point = offset.localize(40.0, 100.0);

        assert_eq!(point, Point::new(10.0, 10.0));
    }

    #[test]
    fn test_color_token_validation() {
        assert!(is_color_token("FFFF00"));
        assert!(is_color_token("#ff0000"));
        assert!(is_color_token("abc"));
        assert!(is_color_token("11223344"));

        assert!(!is_color_token("FFFF0"));
        assert!(!is_color_token("GG0000"));
        assert!(!is_color_token(""));
        assert!(!is_color_token("yellow"));
    }

    #[test]
    fn test_normalize_color() {
        assert_eq!(normalize_color("#FF00FF", PEN_COLOR), "FF00FF");
        assert_eq!(normalize_color("00FF00", PEN_COLOR), "00FF00");
        assert_eq!(normalize_color("not-a-color", PEN_COLOR), PEN_COLOR);
        assert_eq!(normalize_color("", HIGHLIGHT_COLOR), HIGHLIGHT_COLOR);
    }
}
