//! Raster canvas drawing engine.
//!
//! The [`CanvasEngine`] owns a committed surface and a preview overlay, ten
//! drawing tools, a bounded undo/redo history and PNG export. Hosts feed it
//! events through an [`InputRouter`] and receive saved images through the
//! image-generated callback.

pub mod config;
pub mod draw;
pub mod error;
pub mod export;
pub mod history;
pub mod input;
pub mod script;
pub mod util;

pub use config::Config;
pub use error::CanvasError;
pub use input::{CanvasEngine, EngineSettings, InputEvent, InputRouter, MountOptions, ToolKind};
