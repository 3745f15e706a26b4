//! Global brush style shared by every tool.

use super::color::{self, Color};
use super::font::FontDescriptor;

/// Current drawing style.
///
/// Tools only read this; it changes through explicit style operations on the
/// engine (color pick, size adjust, fill toggle, font size).
#[derive(Debug, Clone, PartialEq)]
pub struct BrushStyle {
    pub color: Color,
    /// Stroke width in pixels.
    pub size: f64,
    /// Rectangles, circles and polygons are filled instead of outlined.
    pub filled: bool,
    pub font: FontDescriptor,
    pub font_size: f64,
}

impl Default for BrushStyle {
    fn default() -> Self {
        Self {
            color: color::CYAN,
            size: 10.0,
            filled: false,
            font: FontDescriptor::default(),
            font_size: 24.0,
        }
    }
}
