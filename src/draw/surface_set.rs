//! The committed/overlay surface pair and its sizing, compositing and export.

use super::background::{Background, render_background};
use super::surface::Surface;
use crate::CanvasError;
use cairo::{Context, Filter, Format, ImageSurface, SurfacePattern};

/// Manages the two stacked raster surfaces of a live canvas.
///
/// - `committed` holds the authoritative artwork; it is what gets exported and
///   snapshotted for undo/redo
/// - `overlay` is scratch space for gesture previews and is cleared before
///   every preview draw
///
/// A `SurfaceSet` only exists for a non-zero area; callers keep an
/// `Option<SurfaceSet>` and treat `None` as "surface not ready yet".
#[derive(Debug)]
pub struct SurfaceSet {
    committed: Surface,
    overlay: Surface,
}

impl SurfaceSet {
    /// Creates both surfaces, transparent, or returns `None` for a zero area.
    pub fn create(width: u32, height: u32) -> Result<Option<Self>, CanvasError> {
        if width == 0 || height == 0 {
            log::debug!("Deferring surface creation for {width}x{height} container");
            return Ok(None);
        }
        let (w, h) = (width as i32, height as i32);
        log::info!("Creating canvas surfaces ({w}x{h})");
        Ok(Some(Self {
            committed: Surface::new(w, h)?,
            overlay: Surface::new(w, h)?,
        }))
    }

    /// Builds a resized copy that keeps the committed artwork.
    ///
    /// The old content is drawn at the origin of the new buffer: growing adds
    /// transparent margins on the right/bottom, shrinking crops them. The
    /// overlay is recreated empty. Returns `None` for a zero area so callers
    /// keep their last good surfaces.
    pub fn resized(&self, width: u32, height: u32) -> Result<Option<Self>, CanvasError> {
        let Some(next) = Self::create(width, height)? else {
            return Ok(None);
        };
        next.committed.paint_image(self.committed.image(), 0.0, 0.0)?;
        log::debug!(
            "Resized canvas {}x{} -> {}x{}",
            self.width(),
            self.height(),
            width,
            height
        );
        Ok(Some(next))
    }

    pub fn width(&self) -> i32 {
        self.committed.width()
    }

    pub fn height(&self) -> i32 {
        self.committed.height()
    }

    pub fn committed(&self) -> &Surface {
        &self.committed
    }

    pub fn committed_mut(&mut self) -> &mut Surface {
        &mut self.committed
    }

    pub fn overlay(&self) -> &Surface {
        &self.overlay
    }

    /// Clears the preview surface.
    pub fn clear_overlay(&self) -> Result<(), CanvasError> {
        self.overlay.clear()
    }

    /// Renders the committed surface `scale` times larger and encodes it as PNG.
    ///
    /// Sampling is nearest-neighbour so every source pixel maps onto an exact
    /// `scale x scale` block.
    pub fn export_png(&self, scale: f64) -> Result<Vec<u8>, CanvasError> {
        let scaled = self.render_scaled(scale)?;
        let mut png = Vec::new();
        scaled.write_to_png(&mut png)?;
        log::debug!(
            "Encoded {}x{} PNG ({} bytes)",
            scaled.width(),
            scaled.height(),
            png.len()
        );
        Ok(png)
    }

    /// Renders the committed surface into a new image surface scaled by `scale`.
    pub fn render_scaled(&self, scale: f64) -> Result<ImageSurface, CanvasError> {
        let scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            log::warn!("Invalid export scale {scale}, using 1.0");
            1.0
        };
        let width = ((self.width() as f64 * scale).round() as i32).max(1);
        let height = ((self.height() as f64 * scale).round() as i32).max(1);
        let target = ImageSurface::create(Format::ARgb32, width, height)?;
        {
            let ctx = Context::new(&target)?;
            ctx.scale(scale, scale);
            let pattern = SurfacePattern::create(self.committed.image());
            pattern.set_filter(Filter::Nearest);
            ctx.set_source(&pattern)?;
            ctx.paint()?;
        }
        Ok(target)
    }

    /// Composes background, committed artwork and live preview into one image.
    ///
    /// This is what a host shows on screen; the background never reaches the
    /// committed surface or exported files.
    pub fn compose(&self, background: &Background) -> Result<ImageSurface, CanvasError> {
        let view = ImageSurface::create(Format::ARgb32, self.width(), self.height())?;
        {
            let ctx = Context::new(&view)?;
            render_background(&ctx, background, self.width() as f64, self.height() as f64)?;
            ctx.set_source_surface(self.committed.image(), 0.0, 0.0)?;
            ctx.paint()?;
            ctx.set_source_surface(self.overlay.image(), 0.0, 0.0)?;
            ctx.paint()?;
        }
        Ok(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::background::BackgroundPreset;

    fn filled_set(width: u32, height: u32, px: [u8; 4]) -> SurfaceSet {
        let mut set = SurfaceSet::create(width, height).unwrap().unwrap();
        let count = (width * height) as usize;
        set.committed_mut().write_rgba(&vec![px; count]).unwrap();
        set
    }

    #[test]
    fn zero_area_defers_creation() {
        assert!(SurfaceSet::create(0, 600).unwrap().is_none());
        assert!(SurfaceSet::create(800, 0).unwrap().is_none());
    }

    #[test]
    fn resize_preserves_existing_content() {
        let set = filled_set(4, 4, [10, 20, 30, 255]);
        let grown = set.resized(6, 5).unwrap().unwrap();
        assert_eq!(grown.width(), 6);
        assert_eq!(grown.committed().pixel(3, 3), Some([10, 20, 30, 255]));
        assert_eq!(grown.committed().pixel(5, 4), Some([0, 0, 0, 0]));

        let shrunk = set.resized(2, 2).unwrap().unwrap();
        assert_eq!(shrunk.committed().pixel(1, 1), Some([10, 20, 30, 255]));
    }

    #[test]
    fn resize_to_zero_keeps_caller_surfaces() {
        let set = filled_set(4, 4, [1, 2, 3, 255]);
        assert!(set.resized(0, 0).unwrap().is_none());
    }

    #[test]
    fn export_scales_dimensions_and_content() {
        let mut set = SurfaceSet::create(800, 600).unwrap().unwrap();
        let mut pixels = vec![[0, 0, 0, 0]; 800 * 600];
        pixels[0] = [255, 0, 0, 255];
        set.committed_mut().write_rgba(&pixels).unwrap();

        let scaled = Surface::from_image(set.render_scaled(2.0).unwrap());
        assert_eq!((scaled.width(), scaled.height()), (1600, 1200));
        for (x, y) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            assert_eq!(scaled.pixel(x, y), Some([255, 0, 0, 255]));
        }
        assert_eq!(scaled.pixel(2, 0), Some([0, 0, 0, 0]));

        let png = set.export_png(2.0).unwrap();
        assert_eq!(&png[1..4], b"PNG");
        let decoded = ImageSurface::create_from_png(&mut png.as_slice()).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (1600, 1200));
    }

    #[test]
    fn compose_places_background_behind_artwork() {
        let set = SurfaceSet::create(2, 1).unwrap().unwrap();
        let view = Surface::from_image(
            set.compose(&Background::Preset(BackgroundPreset::White))
                .unwrap(),
        );
        assert_eq!(view.pixel(0, 0), Some([255, 255, 255, 255]));
        // The committed surface itself stays transparent.
        assert_eq!(set.committed().pixel(0, 0), Some([0, 0, 0, 0]));
    }
}
