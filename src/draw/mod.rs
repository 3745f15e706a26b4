//! Raster surfaces and the drawing primitives that paint on them.
//!
//! This module defines:
//! - [`Surface`] / [`SurfaceSet`]: the committed and overlay pixel buffers
//! - [`Color`], [`BrushStyle`], [`FontDescriptor`]: what strokes look like
//! - [`Background`]: the cosmetic layer behind the artwork
//! - Rendering functions and pixel algorithms (flood fill, color sampling)

pub mod background;
pub mod color;
pub mod font;
pub mod pixels;
pub mod render;
pub mod style;
pub mod surface;
pub mod surface_set;

pub use background::{Background, BackgroundPreset};
pub use color::Color;
pub use font::FontDescriptor;
pub use pixels::{DEFAULT_FILL_TOLERANCE, flood_fill, pick_color};
pub use style::BrushStyle;
pub use surface::{Rgba, Surface};
pub use surface_set::SurfaceSet;
