//! Raster surface backed by a Cairo ARGB32 image surface.
//!
//! Cairo stores pixels premultiplied in native-endian `u32` words
//! (`0xAARRGGBB`). Everything this module hands out or accepts as `[u8; 4]` is
//! straight (un-premultiplied) RGBA, which is what the pixel algorithms and the
//! eyedropper reason about.

use crate::CanvasError;
use crate::util::Rect;
use cairo::{Context, Format, ImageSurface, Operator};

/// Straight RGBA pixel.
pub type Rgba = [u8; 4];

/// A fixed-size pixel buffer plus on-demand drawing contexts.
///
/// Contexts are never stored: Cairo refuses mutable buffer access while another
/// reference to the surface is alive, so every drawing operation creates a
/// short-lived [`Context`] and drops it before pixels are touched directly.
#[derive(Debug)]
pub struct Surface {
    image: ImageSurface,
}

impl Surface {
    /// Creates a transparent surface of the given size.
    pub fn new(width: i32, height: i32) -> Result<Self, CanvasError> {
        let image = ImageSurface::create(Format::ARgb32, width, height)?;
        Ok(Self { image })
    }

    /// Wraps an existing image surface.
    pub fn from_image(image: ImageSurface) -> Self {
        Self { image }
    }

    pub fn width(&self) -> i32 {
        self.image.width()
    }

    pub fn height(&self) -> i32 {
        self.image.height()
    }

    /// Underlying Cairo surface, e.g. to use as a paint source.
    pub fn image(&self) -> &ImageSurface {
        &self.image
    }

    /// Creates a fresh drawing context targeting this surface.
    pub fn context(&self) -> Result<Context, CanvasError> {
        Ok(Context::new(&self.image)?)
    }

    /// Clears every pixel to transparent.
    pub fn clear(&self) -> Result<(), CanvasError> {
        let ctx = self.context()?;
        ctx.set_operator(Operator::Clear);
        ctx.paint()?;
        Ok(())
    }

    /// Clears a rectangular region to transparent.
    pub fn clear_rect(&self, rect: Rect) -> Result<(), CanvasError> {
        let ctx = self.context()?;
        ctx.set_operator(Operator::Clear);
        ctx.rectangle(
            rect.x as f64,
            rect.y as f64,
            rect.width as f64,
            rect.height as f64,
        );
        ctx.fill()?;
        Ok(())
    }

    /// Draws `source` with its top-left corner at `(x, y)` using normal compositing.
    pub fn paint_image(&self, source: &ImageSurface, x: f64, y: f64) -> Result<(), CanvasError> {
        let ctx = self.context()?;
        ctx.set_source_surface(source, x, y)?;
        ctx.paint()?;
        Ok(())
    }

    /// Returns a copy of the pixels inside `rect` as a standalone image surface.
    pub fn copy_region(&self, rect: Rect) -> Result<ImageSurface, CanvasError> {
        let copy = ImageSurface::create(Format::ARgb32, rect.width, rect.height)?;
        {
            let ctx = Context::new(&copy)?;
            ctx.set_operator(Operator::Source);
            ctx.set_source_surface(&self.image, -rect.x as f64, -rect.y as f64)?;
            ctx.paint()?;
        }
        Ok(copy)
    }

    /// Reads a single straight-RGBA pixel, `None` when out of bounds.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgba> {
        if x < 0 || y < 0 || x >= self.width() || y >= self.height() {
            return None;
        }
        let stride = self.image.stride() as usize;
        let offset = y as usize * stride + x as usize * 4;
        let mut result = None;
        self.image.flush();
        let read = self.image.with_data(|data| {
            result = data.get(offset..offset + 4).map(unpack_pixel);
        });
        if let Err(err) = read {
            log::warn!("Failed to read pixel ({x}, {y}): {err}");
            return None;
        }
        result
    }

    /// Reads the whole buffer as row-major straight RGBA (`width * height` entries).
    pub fn read_rgba(&self) -> Result<Vec<Rgba>, CanvasError> {
        let width = self.width() as usize;
        let height = self.height() as usize;
        let stride = self.image.stride() as usize;
        let mut pixels = Vec::with_capacity(width * height);
        self.image.flush();
        self.image.with_data(|data| {
            for row in data.chunks(stride).take(height) {
                pixels.extend(row[..width * 4].chunks_exact(4).map(unpack_pixel));
            }
        })?;
        Ok(pixels)
    }

    /// Replaces the whole buffer with row-major straight RGBA pixels.
    ///
    /// `pixels` must hold exactly `width * height` entries.
    pub fn write_rgba(&mut self, pixels: &[Rgba]) -> Result<(), CanvasError> {
        let width = self.width() as usize;
        let height = self.height() as usize;
        if pixels.len() != width * height {
            return Err(CanvasError::BufferMismatch {
                expected: width * height,
                actual: pixels.len(),
            });
        }
        let stride = self.image.stride() as usize;
        self.image.flush();
        let mut data = self.image.data()?;
        for (row, source) in data.chunks_mut(stride).zip(pixels.chunks(width)) {
            for (dst, px) in row[..width * 4].chunks_exact_mut(4).zip(source) {
                dst.copy_from_slice(&pack_pixel(*px));
            }
        }
        // Dropping `data` marks the surface dirty for Cairo.
        Ok(())
    }

    /// Raw premultiplied bytes plus stride, used by history snapshots.
    pub fn raw_bytes(&self) -> Result<(i32, Vec<u8>), CanvasError> {
        let mut bytes = Vec::new();
        self.image.flush();
        self.image.with_data(|data| bytes.extend_from_slice(data))?;
        Ok((self.image.stride(), bytes))
    }
}

/// Converts one premultiplied native-endian ARGB32 word to straight RGBA.
fn unpack_pixel(bytes: &[u8]) -> Rgba {
    let word = u32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    let a = (word >> 24) & 0xff;
    if a == 0 {
        return [0, 0, 0, 0];
    }
    let unpremultiply = |c: u32| ((c * 255 + a / 2) / a).min(255) as u8;
    [
        unpremultiply((word >> 16) & 0xff),
        unpremultiply((word >> 8) & 0xff),
        unpremultiply(word & 0xff),
        a as u8,
    ]
}

/// Converts straight RGBA to one premultiplied native-endian ARGB32 word.
fn pack_pixel([r, g, b, a]: Rgba) -> [u8; 4] {
    let a32 = a as u32;
    let premultiply = |c: u8| (c as u32 * a32 + 127) / 255;
    let word = (a32 << 24) | (premultiply(r) << 16) | (premultiply(g) << 8) | premultiply(b);
    word.to_ne_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_surface_is_transparent() {
        let surface = Surface::new(4, 3).unwrap();
        let pixels = surface.read_rgba().unwrap();
        assert_eq!(pixels.len(), 12);
        assert!(pixels.iter().all(|px| *px == [0, 0, 0, 0]));
    }

    #[test]
    fn write_then_read_preserves_opaque_pixels() {
        let mut surface = Surface::new(2, 2).unwrap();
        let pixels = vec![[255, 0, 0, 255], [0, 255, 0, 255], [0, 0, 255, 255], [0, 0, 0, 0]];
        surface.write_rgba(&pixels).unwrap();
        assert_eq!(surface.read_rgba().unwrap(), pixels);
        assert_eq!(surface.pixel(1, 0), Some([0, 255, 0, 255]));
        assert_eq!(surface.pixel(2, 0), None);
        assert_eq!(surface.pixel(-1, 0), None);
    }

    #[test]
    fn write_rejects_wrong_pixel_count() {
        let mut surface = Surface::new(2, 2).unwrap();
        assert!(surface.write_rgba(&[[0, 0, 0, 0]]).is_err());
    }

    #[test]
    fn clear_rect_only_touches_region() {
        let mut surface = Surface::new(4, 1).unwrap();
        surface.write_rgba(&[[9, 9, 9, 255]; 4]).unwrap();
        surface.clear_rect(Rect::new(1, 0, 2, 1).unwrap()).unwrap();
        let pixels = surface.read_rgba().unwrap();
        assert_eq!(pixels[0], [9, 9, 9, 255]);
        assert_eq!(pixels[1], [0, 0, 0, 0]);
        assert_eq!(pixels[2], [0, 0, 0, 0]);
        assert_eq!(pixels[3], [9, 9, 9, 255]);
    }

    #[test]
    fn copy_region_extracts_offset_pixels() {
        let mut surface = Surface::new(3, 1).unwrap();
        surface
            .write_rgba(&[[1, 1, 1, 255], [200, 10, 10, 255], [3, 3, 3, 255]])
            .unwrap();
        let copy = Surface::from_image(
            surface
                .copy_region(Rect::new(1, 0, 1, 1).unwrap())
                .unwrap(),
        );
        assert_eq!(copy.pixel(0, 0), Some([200, 10, 10, 255]));
    }

    #[test]
    fn pack_and_unpack_agree_for_opaque_and_transparent() {
        for px in [[12, 34, 56, 255], [0, 0, 0, 0], [255, 255, 255, 255]] {
            assert_eq!(unpack_pixel(&pack_pixel(px)), px);
        }
    }
}
