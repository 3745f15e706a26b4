//! In-progress gesture state.

use crate::util::{self, Point, Rect};
use cairo::ImageSurface;

/// Which of the two box-dragged shapes a [`ToolSession::Shape`] draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Rectangle,
    Circle,
}

/// State of the gesture currently in progress, if any.
///
/// Only the fields of the active gesture exist, so e.g. polygon vertices
/// cannot linger while the brush is active.
#[derive(Debug, Default)]
pub enum ToolSession {
    /// No gesture in progress
    #[default]
    Idle,
    /// Brush or eraser stroke; `last` is the end of the previous segment
    Stroke { last: Point, erase: bool },
    /// Line drag; `end` is the raw cursor, snapping is applied on read
    Line {
        start: Point,
        end: Point,
        axis_locked: bool,
    },
    /// Rectangle/circle drag; `end` is the raw cursor
    Shape {
        kind: ShapeKind,
        start: Point,
        end: Point,
        filled: bool,
        equal_sides: bool,
    },
    /// Polygon vertices placed so far plus the hovering cursor
    Polygon { vertices: Vec<Point>, cursor: Point },
    /// Open text entry
    Text { anchor: Point, buffer: String },
    /// Marquee selection
    Selection(SelectionState),
}

/// Selection gesture: marquee first, then drag mode once pixels are captured.
#[derive(Debug)]
pub struct SelectionState {
    /// Marquee press position
    pub start: Point,
    /// Current marquee corner while sizing
    pub cursor: Point,
    /// Captured region on the committed surface
    pub rect: Option<Rect>,
    /// Copy of the captured pixels
    pub capture: Option<ImageSurface>,
    /// True once the region is captured and further drags move it
    pub dragging: bool,
    /// Press position of the current move drag
    pub drag_anchor: Point,
    /// Top-left corner where the captured pixels will be pasted
    pub offset: Point,
}

impl SelectionState {
    pub fn new(start: Point) -> Self {
        Self {
            start,
            cursor: start,
            rect: None,
            capture: None,
            dragging: false,
            drag_anchor: start,
            offset: start,
        }
    }

    /// Marquee spanned by press and cursor, `None` while it has no area.
    pub fn marquee(&self) -> Option<Rect> {
        Rect::from_corners(self.start, self.cursor)
    }
}

impl ToolSession {
    pub fn is_idle(&self) -> bool {
        matches!(self, ToolSession::Idle)
    }

    /// Whether pointer motion without a pressed button still updates the
    /// gesture (polygon previews follow the hovering cursor).
    pub fn tracks_hover(&self) -> bool {
        matches!(self, ToolSession::Polygon { .. })
    }

    /// Whether keyboard input currently edits text instead of triggering
    /// shortcuts.
    pub fn is_text_entry(&self) -> bool {
        matches!(self, ToolSession::Text { .. })
    }

    /// Last known raw cursor position for gestures that redraw on modifier
    /// changes.
    pub fn cursor(&self) -> Option<Point> {
        match self {
            ToolSession::Line { end, .. } | ToolSession::Shape { end, .. } => Some(*end),
            ToolSession::Polygon { cursor, .. } => Some(*cursor),
            _ => None,
        }
    }

    /// Line end point after the Shift axis snap, if a line is in progress.
    pub fn line_end(&self) -> Option<Point> {
        match self {
            ToolSession::Line {
                start,
                end,
                axis_locked,
            } => Some(if *axis_locked {
                util::snap_to_axis(*start, *end)
            } else {
                *end
            }),
            _ => None,
        }
    }

    /// Shape box corners after the Shift equal-sides constraint.
    pub fn shape_corners(&self) -> Option<(Point, Point)> {
        match self {
            ToolSession::Shape {
                start,
                end,
                equal_sides,
                ..
            } => Some(if *equal_sides {
                (*start, util::constrain_equal_sides(*start, *end))
            } else {
                (*start, *end)
            }),
            _ => None,
        }
    }

    /// Number of placed polygon vertices (0 for other gestures).
    pub fn polygon_len(&self) -> usize {
        match self {
            ToolSession::Polygon { vertices, .. } => vertices.len(),
            _ => 0,
        }
    }
}
