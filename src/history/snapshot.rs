use crate::CanvasError;
use crate::draw::Surface;
use cairo::{Format, ImageSurface, Operator};
use flate2::{Compression, bufread::GzDecoder, write::GzEncoder};
use std::io::{Read, Write};

/// Immutable, gzip-compressed copy of the committed surface's raw pixels.
///
/// The bytes are Cairo's own premultiplied ARGB32 layout, so restoring is a
/// straight copy and an undo reproduces the earlier pixels exactly.
#[derive(Clone)]
pub struct Snapshot {
    width: i32,
    height: i32,
    stride: i32,
    compressed: Vec<u8>,
}

impl std::fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Snapshot")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("compressed_bytes", &self.compressed.len())
            .finish()
    }
}

impl Snapshot {
    /// Serializes the current contents of `surface`.
    pub fn capture(surface: &Surface) -> Result<Self, CanvasError> {
        let (stride, raw) = surface.raw_bytes()?;
        Ok(Self {
            width: surface.width(),
            height: surface.height(),
            stride,
            compressed: compress_bytes(&raw)?,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Decompresses the snapshot back into an image surface.
    pub fn decode(&self) -> Result<ImageSurface, CanvasError> {
        let mut raw = Vec::new();
        GzDecoder::new(&self.compressed[..])
            .read_to_end(&mut raw)
            .map_err(|err| CanvasError::SnapshotDecode(err.to_string()))?;

        let expected = self.stride as usize * self.height as usize;
        if raw.len() != expected {
            return Err(CanvasError::SnapshotDecode(format!(
                "expected {expected} bytes, found {}",
                raw.len()
            )));
        }
        Ok(ImageSurface::create_for_data(
            raw,
            Format::ARgb32,
            self.width,
            self.height,
            self.stride,
        )?)
    }

    /// Replaces the contents of `target` with this snapshot.
    ///
    /// Decoding happens first; `target` is only cleared once a decoded image is
    /// in hand, so a failed decode leaves it untouched. Snapshots taken before a
    /// resize are drawn at the origin.
    pub fn restore_into(&self, target: &Surface) -> Result<(), CanvasError> {
        let decoded = self.decode()?;
        target.clear()?;
        let ctx = target.context()?;
        ctx.set_operator(Operator::Source);
        ctx.set_source_surface(&decoded, 0.0, 0.0)?;
        ctx.rectangle(0.0, 0.0, self.width as f64, self.height as f64);
        ctx.fill()?;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn corrupt(&mut self) {
        self.compressed.truncate(4);
    }
}

fn compress_bytes(data: &[u8]) -> Result<Vec<u8>, CanvasError> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::fast());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}
