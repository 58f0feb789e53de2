use std::fmt;

use crate::point::Point;

/// Axis-aligned clip region in layer coordinates.
///
/// Fields follow the CSS `rect()` order: top, right, bottom, left.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ClipRect {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl ClipRect {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Splits the viewport at `x` into the (left, right) visible regions.
    ///
    /// `x` is not clamped to the viewport; a divider pushed past an edge
    /// simply yields an inverted (empty) rectangle on that side.
    pub fn split_at(nw: Point, se: Point, x: f64) -> (Self, Self) {
        let left = Self::new(nw.y, x, se.y, nw.x);
        let right = Self::new(nw.y, se.x, se.y, x);
        (left, right)
    }

    /// CSS form, e.g. `rect(0px,400px,600px,0px)`.
    pub fn to_css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ClipRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rect({}px,{}px,{}px,{}px)",
            self.top, self.right, self.bottom, self.left
        )
    }
}
