//! Pixel-level algorithms: flood fill and color sampling.
//!
//! Both operate on straight RGBA read straight out of the committed surface,
//! never on anything the overlay shows.

use super::color::Color;
use super::surface::{Rgba, Surface};
use crate::CanvasError;

/// Default per-channel tolerance for flood fill, out of 255.
pub const DEFAULT_FILL_TOLERANCE: u8 = 10;

/// Returns true when every channel of `px` is within `tolerance` of `seed`.
fn within_tolerance(px: Rgba, seed: Rgba, tolerance: u8) -> bool {
    px.iter()
        .zip(seed.iter())
        .all(|(a, b)| a.abs_diff(*b) <= tolerance)
}

/// Recolors the 4-connected region around `(x, y)` whose pixels are within
/// `tolerance` of the seed pixel.
///
/// Matched pixels receive `color` at full opacity. The surface is read once
/// and written back once. Returns whether any pixel changed; out-of-bounds
/// seeds and fills whose color already equals the seed are no-ops.
pub fn flood_fill(
    surface: &mut Surface,
    x: i32,
    y: i32,
    color: Color,
    tolerance: u8,
) -> Result<bool, CanvasError> {
    let width = surface.width();
    let height = surface.height();
    if x < 0 || y < 0 || x >= width || y >= height {
        log::debug!("Flood fill seed ({x}, {y}) outside {width}x{height} surface");
        return Ok(false);
    }

    let mut pixels = surface.read_rgba()?;
    let index = |x: i32, y: i32| y as usize * width as usize + x as usize;
    let seed = pixels[index(x, y)];
    let [r, g, b] = color.to_rgb8();
    let fill = [r, g, b, 255];
    if seed == fill {
        return Ok(false);
    }

    let mut visited = vec![false; pixels.len()];
    let mut stack = vec![(x, y)];
    let mut filled = 0usize;

    while let Some((cx, cy)) = stack.pop() {
        if cx < 0 || cy < 0 || cx >= width || cy >= height {
            continue;
        }
        let i = index(cx, cy);
        if visited[i] {
            continue;
        }
        visited[i] = true;
        if !within_tolerance(pixels[i], seed, tolerance) {
            continue;
        }
        pixels[i] = fill;
        filled += 1;
        stack.push((cx + 1, cy));
        stack.push((cx - 1, cy));
        stack.push((cx, cy + 1));
        stack.push((cx, cy - 1));
    }

    surface.write_rgba(&pixels)?;
    log::debug!("Flood fill at ({x}, {y}) recolored {filled} pixels");
    Ok(filled > 0)
}

/// Samples the pixel at `(x, y)` as a `#rrggbb` string.
///
/// Returns `None` for out-of-bounds coordinates and fully transparent pixels.
pub fn pick_color(surface: &Surface, x: i32, y: i32) -> Option<String> {
    let [r, g, b, a] = surface.pixel(x, y)?;
    if a == 0 {
        return None;
    }
    Some(format!("#{r:02x}{g:02x}{b:02x}"))
}
