//! Cairo drawing primitives used by the tools.
//!
//! Every function draws onto a caller-provided context; whether that context
//! targets the committed surface or the overlay is the caller's choice, which
//! is what keeps preview and final output pixel-identical.

use super::style::BrushStyle;
use crate::CanvasError;
use crate::util::{self, Point, Rect};
use cairo::{Context, ImageSurface, LineCap, LineJoin, Operator};

/// Dash pattern of the selection marquee.
const SELECTION_DASH: [f64; 2] = [6.0, 4.0];

fn set_stroke(ctx: &Context, style: &BrushStyle) {
    style.color.apply(ctx);
    ctx.set_line_width(style.size.max(1.0));
    ctx.set_line_cap(LineCap::Round);
    ctx.set_line_join(LineJoin::Round);
}

/// Fills or strokes the current path depending on `filled`.
fn finish_path(ctx: &Context, filled: bool) -> Result<(), CanvasError> {
    if filled {
        ctx.fill()?;
    } else {
        ctx.stroke()?;
    }
    Ok(())
}

/// Strokes one freehand segment.
///
/// With `erase` the segment punches through existing pixels (destination-out)
/// instead of painting the brush color.
pub fn render_stroke_segment(
    ctx: &Context,
    from: Point,
    to: Point,
    style: &BrushStyle,
    erase: bool,
) -> Result<(), CanvasError> {
    set_stroke(ctx, style);
    if erase {
        ctx.set_operator(Operator::DestOut);
        ctx.set_source_rgba(0.0, 0.0, 0.0, 1.0);
    }
    ctx.move_to(from.x, from.y);
    ctx.line_to(to.x, to.y);
    ctx.stroke()?;
    Ok(())
}

/// Renders a straight line.
pub fn render_line(
    ctx: &Context,
    start: Point,
    end: Point,
    style: &BrushStyle,
) -> Result<(), CanvasError> {
    set_stroke(ctx, style);
    ctx.move_to(start.x, start.y);
    ctx.line_to(end.x, end.y);
    ctx.stroke()?;
    Ok(())
}

/// Renders the rectangle spanned by two corners.
pub fn render_rect(
    ctx: &Context,
    start: Point,
    end: Point,
    style: &BrushStyle,
    filled: bool,
) -> Result<(), CanvasError> {
    set_stroke(ctx, style);
    ctx.set_line_join(LineJoin::Miter);
    let x = start.x.min(end.x);
    let y = start.y.min(end.y);
    ctx.rectangle(x, y, (end.x - start.x).abs(), (end.y - start.y).abs());
    finish_path(ctx, filled)
}

/// Renders the ellipse inscribed in the box spanned by two corners.
pub fn render_ellipse(
    ctx: &Context,
    start: Point,
    end: Point,
    style: &BrushStyle,
    filled: bool,
) -> Result<(), CanvasError> {
    let (cx, cy, rx, ry) = util::ellipse_bounds(start, end);
    if rx <= 0.0 || ry <= 0.0 {
        return Ok(());
    }
    set_stroke(ctx, style);

    ctx.save()?;
    ctx.translate(cx, cy);
    ctx.scale(rx, ry);
    ctx.arc(0.0, 0.0, 1.0, 0.0, 2.0 * std::f64::consts::PI);
    ctx.restore()?;

    finish_path(ctx, filled)
}

/// Renders a polygon through `vertices`.
///
/// Open polygons are the in-progress preview (a polyline, never filled);
/// closed polygons are the committed shape.
pub fn render_polygon(
    ctx: &Context,
    vertices: &[Point],
    style: &BrushStyle,
    closed: bool,
    filled: bool,
) -> Result<(), CanvasError> {
    let Some((first, rest)) = vertices.split_first() else {
        return Ok(());
    };
    set_stroke(ctx, style);
    ctx.move_to(first.x, first.y);
    for p in rest {
        ctx.line_to(p.x, p.y);
    }
    if closed {
        ctx.close_path();
        finish_path(ctx, filled)
    } else {
        ctx.stroke()?;
        Ok(())
    }
}

/// Renders text with its top-left corner at `anchor`.
///
/// Newlines start new lines; the first line's top edge sits on the anchor.
pub fn render_text(
    ctx: &Context,
    anchor: Point,
    text: &str,
    style: &BrushStyle,
) -> Result<(), CanvasError> {
    if text.is_empty() {
        return Ok(());
    }
    ctx.save()?;
    ctx.set_antialias(cairo::Antialias::Gray);

    let layout = pangocairo::functions::create_layout(ctx);
    layout.set_font_description(Some(&style.font.to_pango(style.font_size)));
    layout.set_text(text);

    style.color.apply(ctx);
    ctx.move_to(anchor.x, anchor.y);
    pangocairo::functions::show_layout(ctx, &layout);

    ctx.restore()?;
    Ok(())
}

/// Renders the dashed marquee around a selection.
pub fn render_selection_outline(ctx: &Context, rect: Rect) -> Result<(), CanvasError> {
    let (x, y) = (rect.x as f64 + 0.5, rect.y as f64 + 0.5);
    let (w, h) = ((rect.width - 1).max(0) as f64, (rect.height - 1).max(0) as f64);

    ctx.save()?;
    ctx.set_line_width(1.0);
    ctx.set_line_cap(LineCap::Butt);
    // Dark dashes over a light base stay visible on any artwork.
    ctx.set_source_rgba(1.0, 1.0, 1.0, 0.9);
    ctx.rectangle(x, y, w, h);
    ctx.stroke()?;
    ctx.set_dash(&SELECTION_DASH, 0.0);
    ctx.set_source_rgba(0.0, 0.0, 0.0, 0.9);
    ctx.rectangle(x, y, w, h);
    ctx.stroke()?;
    ctx.restore()?;
    Ok(())
}

/// Paints captured selection pixels with their top-left corner at `at`.
pub fn render_captured_pixels(
    ctx: &Context,
    capture: &ImageSurface,
    at: Point,
) -> Result<(), CanvasError> {
    let (x, y) = at.rounded();
    ctx.set_source_surface(capture, x as f64, y as f64)?;
    ctx.paint()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color;
    use crate::draw::surface::Surface;

    fn opaque_style() -> BrushStyle {
        BrushStyle {
            color: color::BLACK,
            size: 2.0,
            ..BrushStyle::default()
        }
    }

    #[test]
    fn filled_rect_covers_interior() {
        let surface = Surface::new(20, 20).unwrap();
        {
            let ctx = surface.context().unwrap();
            render_rect(
                &ctx,
                Point::new(15.0, 15.0),
                Point::new(5.0, 5.0),
                &opaque_style(),
                true,
            )
            .unwrap();
        }
        assert_eq!(surface.pixel(10, 10), Some([0, 0, 0, 255]));
        assert_eq!(surface.pixel(2, 2), Some([0, 0, 0, 0]));
    }

    #[test]
    fn outlined_ellipse_leaves_center_empty() {
        let surface = Surface::new(40, 40).unwrap();
        {
            let ctx = surface.context().unwrap();
            render_ellipse(
                &ctx,
                Point::new(0.0, 0.0),
                Point::new(40.0, 40.0),
                &opaque_style(),
                false,
            )
            .unwrap();
        }
        assert_eq!(surface.pixel(20, 20), Some([0, 0, 0, 0]));
        assert_eq!(surface.pixel(20, 0).map(|px| px[3] > 0), Some(true));
    }

    #[test]
    fn eraser_segment_clears_pixels() {
        let mut surface = Surface::new(10, 10).unwrap();
        surface.write_rgba(&vec![[255, 0, 0, 255]; 100]).unwrap();
        {
            let ctx = surface.context().unwrap();
            let style = BrushStyle {
                size: 4.0,
                ..BrushStyle::default()
            };
            render_stroke_segment(
                &ctx,
                Point::new(0.0, 5.0),
                Point::new(10.0, 5.0),
                &style,
                true,
            )
            .unwrap();
        }
        assert_eq!(surface.pixel(5, 5), Some([0, 0, 0, 0]));
        assert_eq!(surface.pixel(5, 0), Some([255, 0, 0, 255]));
    }

    #[test]
    fn degenerate_polygon_draws_nothing() {
        let surface = Surface::new(4, 4).unwrap();
        {
            let ctx = surface.context().unwrap();
            render_polygon(&ctx, &[], &opaque_style(), true, true).unwrap();
        }
        assert!(surface.read_rgba().unwrap().iter().all(|px| px[3] == 0));
    }
}
