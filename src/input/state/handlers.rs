//! Per-tool gesture handlers and the static dispatch table.
//!
//! Each [`ToolKind`] maps to one [`ToolHandlers`] entry. Handlers receive the
//! surfaces, the brush style and a read-only copy of the modifier state through
//! [`ToolContext`], and the gesture state through [`ToolSession`].

use super::session::{SelectionState, ShapeKind, ToolSession};
use crate::CanvasError;
use crate::draw::{BrushStyle, Color, SurfaceSet, pixels, render};
use crate::input::{Modifiers, ToolKind};
use crate::util::{Point, Rect};

/// Everything a tool handler may touch.
pub struct ToolContext<'a> {
    pub surfaces: &'a mut SurfaceSet,
    pub style: &'a BrushStyle,
    pub modifiers: Modifiers,
    pub fill_tolerance: u8,
}

/// What the engine should do after a handler ran.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToolOutcome {
    /// Nothing committed
    None,
    /// The committed surface changed; record a history entry
    Committed,
    /// The eyedropper picked a color; adopt it and switch to the brush
    PickedColor(Color),
}

pub type Handler =
    fn(&mut ToolContext<'_>, &mut ToolSession, Point) -> Result<ToolOutcome, CanvasError>;

/// Gesture entry points of one tool.
pub struct ToolHandlers {
    /// Pointer pressed
    pub begin: Handler,
    /// Pointer moved while the gesture is active (or Shift toggled)
    pub update: Handler,
    /// Pointer released
    pub finish: Handler,
    /// Double click; only the polygon tool reacts
    pub double_click: Handler,
}

fn noop(
    _: &mut ToolContext<'_>,
    _: &mut ToolSession,
    _: Point,
) -> Result<ToolOutcome, CanvasError> {
    Ok(ToolOutcome::None)
}

static BRUSH: ToolHandlers = ToolHandlers {
    begin: brush_begin,
    update: stroke_update,
    finish: stroke_finish,
    double_click: noop,
};

static ERASER: ToolHandlers = ToolHandlers {
    begin: eraser_begin,
    update: stroke_update,
    finish: stroke_finish,
    double_click: noop,
};

static LINE: ToolHandlers = ToolHandlers {
    begin: line_begin,
    update: line_update,
    finish: line_finish,
    double_click: noop,
};

static RECTANGLE: ToolHandlers = ToolHandlers {
    begin: rectangle_begin,
    update: shape_update,
    finish: shape_finish,
    double_click: noop,
};

static CIRCLE: ToolHandlers = ToolHandlers {
    begin: circle_begin,
    update: shape_update,
    finish: shape_finish,
    double_click: noop,
};

static POLYGON: ToolHandlers = ToolHandlers {
    begin: polygon_begin,
    update: polygon_update,
    finish: noop,
    double_click: polygon_close,
};

static TEXT: ToolHandlers = ToolHandlers {
    begin: text_begin,
    update: noop,
    finish: noop,
    double_click: noop,
};

static FILL: ToolHandlers = ToolHandlers {
    begin: fill_begin,
    update: noop,
    finish: noop,
    double_click: noop,
};

static EYEDROPPER: ToolHandlers = ToolHandlers {
    begin: eyedropper_begin,
    update: noop,
    finish: noop,
    double_click: noop,
};

static SELECTION: ToolHandlers = ToolHandlers {
    begin: selection_begin,
    update: selection_update,
    finish: selection_finish,
    double_click: noop,
};

/// Looks up the handler table entry for `tool`.
pub fn handlers_for(tool: ToolKind) -> &'static ToolHandlers {
    match tool {
        ToolKind::Brush => &BRUSH,
        ToolKind::Eraser => &ERASER,
        ToolKind::Line => &LINE,
        ToolKind::Rectangle => &RECTANGLE,
        ToolKind::Circle => &CIRCLE,
        ToolKind::Polygon => &POLYGON,
        ToolKind::Text => &TEXT,
        ToolKind::Fill => &FILL,
        ToolKind::Eyedropper => &EYEDROPPER,
        ToolKind::Selection => &SELECTION,
    }
}

// ============================================================================
// Brush / eraser
// ============================================================================

fn stroke_begin(
    ctx: &mut ToolContext<'_>,
    session: &mut ToolSession,
    point: Point,
    erase: bool,
) -> Result<ToolOutcome, CanvasError> {
    *session = ToolSession::Stroke { last: point, erase };
    // A zero-length segment leaves a round dot so single clicks mark the canvas.
    let cr = ctx.surfaces.committed().context()?;
    render::render_stroke_segment(&cr, point, point, ctx.style, erase)?;
    Ok(ToolOutcome::None)
}

fn brush_begin(
    ctx: &mut ToolContext<'_>,
    session: &mut ToolSession,
    point: Point,
) -> Result<ToolOutcome, CanvasError> {
    stroke_begin(ctx, session, point, false)
}

fn eraser_begin(
    ctx: &mut ToolContext<'_>,
    session: &mut ToolSession,
    point: Point,
) -> Result<ToolOutcome, CanvasError> {
    stroke_begin(ctx, session, point, true)
}

fn stroke_update(
    ctx: &mut ToolContext<'_>,
    session: &mut ToolSession,
    point: Point,
) -> Result<ToolOutcome, CanvasError> {
    let ToolSession::Stroke { last, erase } = session else {
        return Ok(ToolOutcome::None);
    };
    let cr = ctx.surfaces.committed().context()?;
    render::render_stroke_segment(&cr, *last, point, ctx.style, *erase)?;
    *last = point;
    Ok(ToolOutcome::None)
}

fn stroke_finish(
    ctx: &mut ToolContext<'_>,
    session: &mut ToolSession,
    point: Point,
) -> Result<ToolOutcome, CanvasError> {
    if !matches!(session, ToolSession::Stroke { .. }) {
        return Ok(ToolOutcome::None);
    }
    stroke_update(ctx, session, point)?;
    *session = ToolSession::Idle;
    Ok(ToolOutcome::Committed)
}

// ============================================================================
// Line
// ============================================================================

fn line_begin(
    ctx: &mut ToolContext<'_>,
    session: &mut ToolSession,
    point: Point,
) -> Result<ToolOutcome, CanvasError> {
    *session = ToolSession::Line {
        start: point,
        end: point,
        axis_locked: ctx.modifiers.shift,
    };
    Ok(ToolOutcome::None)
}

fn line_update(
    ctx: &mut ToolContext<'_>,
    session: &mut ToolSession,
    point: Point,
) -> Result<ToolOutcome, CanvasError> {
    let ToolSession::Line {
        end, axis_locked, ..
    } = session
    else {
        return Ok(ToolOutcome::None);
    };
    *end = point;
    *axis_locked = ctx.modifiers.shift;
    draw_line_preview(ctx, session)?;
    Ok(ToolOutcome::None)
}

fn draw_line_preview(ctx: &ToolContext<'_>, session: &ToolSession) -> Result<(), CanvasError> {
    ctx.surfaces.clear_overlay()?;
    if let (ToolSession::Line { start, .. }, Some(end)) = (session, session.line_end()) {
        let cr = ctx.surfaces.overlay().context()?;
        render::render_line(&cr, *start, end, ctx.style)?;
    }
    Ok(())
}

fn line_finish(
    ctx: &mut ToolContext<'_>,
    session: &mut ToolSession,
    point: Point,
) -> Result<ToolOutcome, CanvasError> {
    let ToolSession::Line {
        end, axis_locked, ..
    } = session
    else {
        return Ok(ToolOutcome::None);
    };
    *end = point;
    *axis_locked = ctx.modifiers.shift;

    let taken = std::mem::take(session);
    ctx.surfaces.clear_overlay()?;
    let (ToolSession::Line { start, .. }, Some(end)) = (&taken, taken.line_end()) else {
        return Ok(ToolOutcome::None);
    };
    if *start == end {
        return Ok(ToolOutcome::None);
    }
    let cr = ctx.surfaces.committed().context()?;
    render::render_line(&cr, *start, end, ctx.style)?;
    log::debug!("Committed line {start:?} -> {end:?}");
    Ok(ToolOutcome::Committed)
}

// ============================================================================
// Rectangle / circle
// ============================================================================

fn shape_begin(
    ctx: &mut ToolContext<'_>,
    session: &mut ToolSession,
    point: Point,
    kind: ShapeKind,
) -> Result<ToolOutcome, CanvasError> {
    *session = ToolSession::Shape {
        kind,
        start: point,
        end: point,
        filled: ctx.style.filled,
        equal_sides: ctx.modifiers.shift,
    };
    Ok(ToolOutcome::None)
}

fn rectangle_begin(
    ctx: &mut ToolContext<'_>,
    session: &mut ToolSession,
    point: Point,
) -> Result<ToolOutcome, CanvasError> {
    shape_begin(ctx, session, point, ShapeKind::Rectangle)
}

fn circle_begin(
    ctx: &mut ToolContext<'_>,
    session: &mut ToolSession,
    point: Point,
) -> Result<ToolOutcome, CanvasError> {
    shape_begin(ctx, session, point, ShapeKind::Circle)
}

fn render_shape_session(
    cr: &cairo::Context,
    session: &ToolSession,
    style: &BrushStyle,
) -> Result<(), CanvasError> {
    let (ToolSession::Shape { kind, filled, .. }, Some((a, b))) = (session, session.shape_corners())
    else {
        return Ok(());
    };
    match kind {
        ShapeKind::Rectangle => render::render_rect(cr, a, b, style, *filled),
        ShapeKind::Circle => render::render_ellipse(cr, a, b, style, *filled),
    }
}

fn shape_update(
    ctx: &mut ToolContext<'_>,
    session: &mut ToolSession,
    point: Point,
) -> Result<ToolOutcome, CanvasError> {
    let ToolSession::Shape {
        end, equal_sides, ..
    } = session
    else {
        return Ok(ToolOutcome::None);
    };
    *end = point;
    *equal_sides = ctx.modifiers.shift;

    ctx.surfaces.clear_overlay()?;
    let cr = ctx.surfaces.overlay().context()?;
    render_shape_session(&cr, session, ctx.style)?;
    Ok(ToolOutcome::None)
}

fn shape_finish(
    ctx: &mut ToolContext<'_>,
    session: &mut ToolSession,
    point: Point,
) -> Result<ToolOutcome, CanvasError> {
    let ToolSession::Shape {
        end, equal_sides, ..
    } = session
    else {
        return Ok(ToolOutcome::None);
    };
    *end = point;
    *equal_sides = ctx.modifiers.shift;

    let taken = std::mem::take(session);
    ctx.surfaces.clear_overlay()?;
    let Some((a, b)) = taken.shape_corners() else {
        return Ok(ToolOutcome::None);
    };
    if a.x == b.x || a.y == b.y {
        return Ok(ToolOutcome::None);
    }
    let cr = ctx.surfaces.committed().context()?;
    render_shape_session(&cr, &taken, ctx.style)?;
    Ok(ToolOutcome::Committed)
}

// ============================================================================
// Polygon
// ============================================================================

/// Minimum vertex count for a polygon to be committed.
pub const MIN_POLYGON_VERTICES: usize = 3;

fn draw_polygon_preview(ctx: &ToolContext<'_>, session: &ToolSession) -> Result<(), CanvasError> {
    ctx.surfaces.clear_overlay()?;
    if let ToolSession::Polygon { vertices, cursor } = session {
        let mut path = vertices.clone();
        path.push(*cursor);
        let cr = ctx.surfaces.overlay().context()?;
        render::render_polygon(&cr, &path, ctx.style, false, false)?;
    }
    Ok(())
}

fn polygon_begin(
    ctx: &mut ToolContext<'_>,
    session: &mut ToolSession,
    point: Point,
) -> Result<ToolOutcome, CanvasError> {
    match session {
        ToolSession::Polygon { vertices, cursor } => {
            // The presses of a double click land on the same spot.
            if vertices.last() != Some(&point) {
                vertices.push(point);
            }
            *cursor = point;
        }
        _ => {
            *session = ToolSession::Polygon {
                vertices: vec![point],
                cursor: point,
            };
        }
    }
    draw_polygon_preview(ctx, session)?;
    Ok(ToolOutcome::None)
}

fn polygon_update(
    ctx: &mut ToolContext<'_>,
    session: &mut ToolSession,
    point: Point,
) -> Result<ToolOutcome, CanvasError> {
    let ToolSession::Polygon { cursor, .. } = session else {
        return Ok(ToolOutcome::None);
    };
    *cursor = point;
    draw_polygon_preview(ctx, session)?;
    Ok(ToolOutcome::None)
}

fn polygon_close(
    ctx: &mut ToolContext<'_>,
    session: &mut ToolSession,
    _point: Point,
) -> Result<ToolOutcome, CanvasError> {
    let ToolSession::Polygon { vertices, .. } = session else {
        return Ok(ToolOutcome::None);
    };
    if vertices.len() < MIN_POLYGON_VERTICES {
        log::debug!(
            "Ignoring polygon close with {} vertices (need {MIN_POLYGON_VERTICES})",
            vertices.len()
        );
        return Ok(ToolOutcome::None);
    }
    let vertices = std::mem::take(vertices);
    *session = ToolSession::Idle;
    ctx.surfaces.clear_overlay()?;

    let cr = ctx.surfaces.committed().context()?;
    render::render_polygon(&cr, &vertices, ctx.style, true, ctx.style.filled)?;
    log::debug!("Committed polygon with {} vertices", vertices.len());
    Ok(ToolOutcome::Committed)
}

// ============================================================================
// Text
// ============================================================================

fn text_begin(
    ctx: &mut ToolContext<'_>,
    session: &mut ToolSession,
    point: Point,
) -> Result<ToolOutcome, CanvasError> {
    match session {
        ToolSession::Text { anchor, .. } => *anchor = point,
        _ => {
            *session = ToolSession::Text {
                anchor: point,
                buffer: String::new(),
            }
        }
    }
    draw_text_preview(ctx, session)?;
    Ok(ToolOutcome::None)
}

/// Width of the caret drawn after the text entry preview.
const CARET_WIDTH: f64 = 2.0;

/// Redraws the open text entry (buffer plus caret) on the overlay.
pub fn draw_text_preview(ctx: &ToolContext<'_>, session: &ToolSession) -> Result<(), CanvasError> {
    ctx.surfaces.clear_overlay()?;
    let ToolSession::Text { anchor, buffer } = session else {
        return Ok(());
    };
    let cr = ctx.surfaces.overlay().context()?;
    render::render_text(&cr, *anchor, buffer, ctx.style)?;

    let caret_x = anchor.x + text_width(&cr, buffer, ctx.style);
    ctx.style.color.apply(&cr);
    cr.rectangle(caret_x, anchor.y, CARET_WIDTH, ctx.style.font_size);
    cr.fill()?;
    Ok(())
}

fn text_width(cr: &cairo::Context, text: &str, style: &BrushStyle) -> f64 {
    let last_line = text.rsplit('\n').next().unwrap_or("");
    if last_line.is_empty() {
        return 0.0;
    }
    let layout = pangocairo::functions::create_layout(cr);
    layout.set_font_description(Some(&style.font.to_pango(style.font_size)));
    layout.set_text(last_line);
    let (_, logical) = layout.pixel_extents();
    logical.width() as f64
}

/// Commits an open text entry to the committed surface.
///
/// Empty buffers are discarded without a history entry.
pub fn submit_text(
    ctx: &mut ToolContext<'_>,
    session: &mut ToolSession,
) -> Result<ToolOutcome, CanvasError> {
    if !session.is_text_entry() {
        return Ok(ToolOutcome::None);
    }
    let taken = std::mem::take(session);
    ctx.surfaces.clear_overlay()?;
    let ToolSession::Text { anchor, buffer } = taken else {
        return Ok(ToolOutcome::None);
    };
    if buffer.trim().is_empty() {
        return Ok(ToolOutcome::None);
    }
    let cr = ctx.surfaces.committed().context()?;
    render::render_text(&cr, anchor, &buffer, ctx.style)?;
    Ok(ToolOutcome::Committed)
}

// ============================================================================
// Fill / eyedropper
// ============================================================================

fn fill_begin(
    ctx: &mut ToolContext<'_>,
    _session: &mut ToolSession,
    point: Point,
) -> Result<ToolOutcome, CanvasError> {
    let (x, y) = point.pixel();
    let changed = pixels::flood_fill(
        ctx.surfaces.committed_mut(),
        x,
        y,
        ctx.style.color,
        ctx.fill_tolerance,
    )?;
    Ok(if changed {
        ToolOutcome::Committed
    } else {
        ToolOutcome::None
    })
}

fn eyedropper_begin(
    ctx: &mut ToolContext<'_>,
    _session: &mut ToolSession,
    point: Point,
) -> Result<ToolOutcome, CanvasError> {
    let (x, y) = point.pixel();
    let Some(hex) = pixels::pick_color(ctx.surfaces.committed(), x, y) else {
        log::debug!("Eyedropper at ({x}, {y}) hit a transparent pixel");
        return Ok(ToolOutcome::None);
    };
    Ok(ToolOutcome::PickedColor(hex.parse()?))
}

// ============================================================================
// Selection
// ============================================================================

fn draw_selection_preview(
    ctx: &ToolContext<'_>,
    selection: &SelectionState,
) -> Result<(), CanvasError> {
    ctx.surfaces.clear_overlay()?;
    let cr = ctx.surfaces.overlay().context()?;
    match (&selection.capture, selection.rect) {
        (Some(capture), Some(rect)) => {
            render::render_captured_pixels(&cr, capture, selection.offset)?;
            let (x, y) = selection.offset.rounded();
            let moved = Rect { x, y, ..rect };
            render::render_selection_outline(&cr, moved)?;
        }
        _ => {
            if let Some(marquee) = selection.marquee() {
                render::render_selection_outline(&cr, marquee)?;
            }
        }
    }
    Ok(())
}

fn selection_begin(
    ctx: &mut ToolContext<'_>,
    session: &mut ToolSession,
    point: Point,
) -> Result<ToolOutcome, CanvasError> {
    match session {
        ToolSession::Selection(selection) if selection.dragging => {
            selection.drag_anchor = point;
        }
        _ => *session = ToolSession::Selection(SelectionState::new(point)),
    }
    if let ToolSession::Selection(selection) = session {
        draw_selection_preview(ctx, selection)?;
    }
    Ok(ToolOutcome::None)
}

fn selection_update(
    ctx: &mut ToolContext<'_>,
    session: &mut ToolSession,
    point: Point,
) -> Result<ToolOutcome, CanvasError> {
    let ToolSession::Selection(selection) = session else {
        return Ok(ToolOutcome::None);
    };
    if selection.dragging {
        if let Some(rect) = selection.rect {
            selection.offset = Point::new(
                rect.x as f64 + (point.x - selection.drag_anchor.x),
                rect.y as f64 + (point.y - selection.drag_anchor.y),
            );
        }
    } else {
        selection.cursor = point;
    }
    draw_selection_preview(ctx, selection)?;
    Ok(ToolOutcome::None)
}

fn selection_finish(
    ctx: &mut ToolContext<'_>,
    session: &mut ToolSession,
    point: Point,
) -> Result<ToolOutcome, CanvasError> {
    let ToolSession::Selection(selection) = session else {
        return Ok(ToolOutcome::None);
    };

    if !selection.dragging {
        selection.cursor = point;
        let width = ctx.surfaces.width();
        let height = ctx.surfaces.height();
        let Some(rect) = selection
            .marquee()
            .and_then(|r| r.clamp_to_bounds(width, height))
        else {
            *session = ToolSession::Idle;
            ctx.surfaces.clear_overlay()?;
            return Ok(ToolOutcome::None);
        };
        selection.capture = Some(ctx.surfaces.committed().copy_region(rect)?);
        selection.rect = Some(rect);
        selection.offset = Point::new(rect.x as f64, rect.y as f64);
        selection.dragging = true;
        log::debug!("Captured selection {rect:?}");
        draw_selection_preview(ctx, selection)?;
        return Ok(ToolOutcome::None);
    }

    selection_update(ctx, session, point)?;
    let ToolSession::Selection(selection) = std::mem::take(session) else {
        return Ok(ToolOutcome::None);
    };
    ctx.surfaces.clear_overlay()?;
    let (Some(capture), Some(rect)) = (selection.capture, selection.rect) else {
        return Ok(ToolOutcome::None);
    };
    let committed = ctx.surfaces.committed();
    committed.clear_rect(rect)?;
    let cr = committed.context()?;
    render::render_captured_pixels(&cr, &capture, selection.offset)?;
    log::debug!("Moved selection {rect:?} to {:?}", selection.offset);
    Ok(ToolOutcome::Committed)
}
