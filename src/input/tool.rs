//! Drawing tool selection.

use std::fmt;
use std::str::FromStr;

/// The ten canvas tools. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    /// Freehand strokes committed as the pointer moves
    Brush,
    /// Freehand strokes that punch pixels out of the artwork
    Eraser,
    /// Straight line between press and release (Shift snaps to an axis)
    Line,
    /// Rectangle from corner to corner (Shift forces a square)
    Rectangle,
    /// Ellipse inscribed in the dragged box (Shift forces a circle)
    Circle,
    /// Click to add vertices, double-click to close
    Polygon,
    /// Click to place a text entry
    Text,
    /// Flood fill the clicked region
    Fill,
    /// Pick the clicked pixel's color
    Eyedropper,
    /// Drag a rectangle, then drag its pixels elsewhere
    Selection,
}

impl ToolKind {
    pub const ALL: [ToolKind; 10] = [
        ToolKind::Brush,
        ToolKind::Eraser,
        ToolKind::Line,
        ToolKind::Rectangle,
        ToolKind::Circle,
        ToolKind::Polygon,
        ToolKind::Text,
        ToolKind::Fill,
        ToolKind::Eyedropper,
        ToolKind::Selection,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Brush => "brush",
            ToolKind::Eraser => "eraser",
            ToolKind::Line => "line",
            ToolKind::Rectangle => "rectangle",
            ToolKind::Circle => "circle",
            ToolKind::Polygon => "polygon",
            ToolKind::Text => "text",
            ToolKind::Fill => "fill",
            ToolKind::Eyedropper => "eyedropper",
            ToolKind::Selection => "selection",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ToolKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ToolKind::ALL
            .into_iter()
            .find(|tool| tool.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                let names: Vec<_> = ToolKind::ALL.iter().map(|t| t.name()).collect();
                format!("unknown tool '{wanted}' (expected one of {})", names.join(", "))
            })
    }
}
