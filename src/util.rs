//! Geometry helpers shared by the tools and the pixel algorithms.
//!
//! This module provides:
//! - [`Point`] and [`Rect`] value types in surface-local coordinates
//! - Shift-key constraints (axis snap for lines, equal sides for shapes)
//! - Ellipse bounding box calculations

// ============================================================================
// Points and Rectangles
// ============================================================================

/// A position on the canvas in surface-local pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the integer pixel containing this point.
    pub fn pixel(self) -> (i32, i32) {
        (self.x.floor() as i32, self.y.floor() as i32)
    }

    /// Returns the nearest whole-pixel position, used when placing pixel blocks.
    pub fn rounded(self) -> (i32, i32) {
        (self.x.round() as i32, self.y.round() as i32)
    }
}

/// Axis-aligned rectangle with integer pixel bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Creates a new rectangle. Width/height must be positive.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Option<Self> {
        if width <= 0 || height <= 0 {
            None
        } else {
            Some(Self {
                x,
                y,
                width,
                height,
            })
        }
    }

    /// Builds a rectangle from min/max bounds (inclusive min, exclusive max).
    ///
    /// Returns `None` when a side does not fit in an `i32`.
    pub fn from_min_max(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Option<Self> {
        let width = max_x.checked_sub(min_x)?;
        let height = max_y.checked_sub(min_y)?;
        Self::new(min_x, min_y, width, height)
    }

    /// Builds the pixel rectangle spanned by two drag corners, in any order.
    pub fn from_corners(a: Point, b: Point) -> Option<Self> {
        let min_x = a.x.min(b.x).round() as i32;
        let min_y = a.y.min(b.y).round() as i32;
        let max_x = a.x.max(b.x).round() as i32;
        let max_y = a.y.max(b.y).round() as i32;
        Self::from_min_max(min_x, min_y, max_x, max_y)
    }

    /// Clamps the rectangle to `[0, width) x [0, height)`.
    ///
    /// Returns `None` when nothing of the rectangle remains inside the bounds.
    pub fn clamp_to_bounds(&self, width: i32, height: i32) -> Option<Self> {
        let min_x = self.x.clamp(0, width);
        let min_y = self.y.clamp(0, height);
        let max_x = self.x.saturating_add(self.width).clamp(0, width);
        let max_y = self.y.saturating_add(self.height).clamp(0, height);
        Self::from_min_max(min_x, min_y, max_x, max_y)
    }

    /// Number of pixels covered.
    pub fn area(&self) -> i64 {
        self.width as i64 * self.height as i64
    }
}

// ============================================================================
// Shift-key Constraints
// ============================================================================

/// Snaps a line end point to the horizontal or vertical axis through `start`.
///
/// The axis with the greater displacement wins; ties snap horizontally.
pub fn snap_to_axis(start: Point, end: Point) -> Point {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    if dx.abs() >= dy.abs() {
        Point::new(end.x, start.y)
    } else {
        Point::new(start.x, end.y)
    }
}

/// Forces `|dx| == |dy|` between `start` and `end`, keeping the sign of each axis.
///
/// The longer side determines the size, so a 40x10 drag becomes 40x40.
pub fn constrain_equal_sides(start: Point, end: Point) -> Point {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let size = dx.abs().max(dy.abs());
    let sign = |v: f64| if v < 0.0 { -1.0 } else { 1.0 };
    Point::new(start.x + size * sign(dx), start.y + size * sign(dy))
}

/// Calculates ellipse parameters from two corner points.
///
/// Converts a drag rectangle (from corner to corner) into the ellipse inscribed
/// in it.
///
/// # Returns
/// Tuple `(cx, cy, rx, ry)` where:
/// - `cx`, `cy` = center point coordinates
/// - `rx` = horizontal radius (half width)
/// - `ry` = vertical radius (half height)
pub fn ellipse_bounds(a: Point, b: Point) -> (f64, f64, f64, f64) {
    let cx = (a.x + b.x) / 2.0;
    let cy = (a.y + b.y) / 2.0;
    let rx = (b.x - a.x).abs() / 2.0;
    let ry = (b.y - a.y).abs() / 2.0;
    (cx, cy, rx, ry)
}
