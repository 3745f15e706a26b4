//! Error type shared by the drawing engine.

use thiserror::Error;

/// Errors that can occur while drawing, restoring or exporting the canvas.
#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("Surface buffer is borrowed elsewhere: {0}")]
    Borrow(#[from] cairo::BorrowError),

    #[error("PNG encoding failed: {0}")]
    Png(#[from] cairo::IoError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid color '{0}'")]
    InvalidColor(String),

    #[error("Snapshot could not be decoded: {0}")]
    SnapshotDecode(String),

    #[error("Pixel buffer holds {actual} pixels, expected {expected}")]
    BufferMismatch { expected: usize, actual: usize },

    #[error("Surfaces are not initialized")]
    NotReady,
}
