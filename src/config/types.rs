//! Configuration type definitions.

use super::enums::ColorSpec;
use crate::draw::DEFAULT_FILL_TOLERANCE;
use crate::export::DEFAULT_FILENAME_TEMPLATE;
use crate::history::DEFAULT_MAX_DEPTH;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Canvas size, background and export settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CanvasConfig {
    /// Initial canvas width in pixels
    #[serde(default = "default_width")]
    pub width: u32,

    /// Initial canvas height in pixels
    #[serde(default = "default_height")]
    pub height: u32,

    /// Background: a preset (white, black, transparent, paper, midnight,
    /// sunset), a hex color, or `"#top..#bottom"` for a vertical gradient
    #[serde(default = "default_background")]
    pub background: String,

    /// Resolution multiplier applied when saving (valid range: 1.0 - 8.0)
    #[serde(default = "default_export_scale")]
    pub export_scale: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            background: default_background(),
            export_scale: default_export_scale(),
        }
    }
}

/// Drawing-related settings.
///
/// Controls the default appearance of drawing tools when the canvas is
/// mounted. Users can change these values at runtime using keybindings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Default brush color - a named color, a `#rrggbb` hex string, or an RGB
    /// array like `[0, 245, 255]`
    #[serde(default = "default_color")]
    pub default_color: ColorSpec,

    /// Default brush size in pixels
    #[serde(default = "default_size")]
    pub default_size: f64,

    /// Smallest brush size reachable with the size shortcuts
    #[serde(default = "default_min_size")]
    pub min_size: f64,

    /// Largest brush size reachable with the size shortcuts
    #[serde(default = "default_max_size")]
    pub max_size: f64,

    /// Whether rectangles, circles and polygons start out filled
    #[serde(default)]
    pub fill_shapes: bool,

    /// Font family name for the text tool (e.g., "Sans", "Monospace")
    #[serde(default = "default_font_family")]
    pub font_family: String,

    /// Font weight (e.g., "normal", "bold", "light", 400, 700)
    #[serde(default = "default_font_weight")]
    pub font_weight: String,

    /// Font style (e.g., "normal", "italic", "oblique")
    #[serde(default = "default_font_style")]
    pub font_style: String,

    /// Font size for the text tool in pixels (valid range: 6.0 - 200.0)
    #[serde(default = "default_font_size")]
    pub font_size: f64,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_color: default_color(),
            default_size: default_size(),
            min_size: default_min_size(),
            max_size: default_max_size(),
            fill_shapes: false,
            font_family: default_font_family(),
            font_weight: default_font_weight(),
            font_style: default_font_style(),
            font_size: default_font_size(),
        }
    }
}

/// Undo history settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct HistoryConfig {
    /// Number of undo steps kept; older ones are dropped first (minimum 1)
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
        }
    }
}

/// Flood fill settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FillConfig {
    /// Per-channel difference (0-255) still treated as the seed color
    #[serde(default = "default_tolerance")]
    pub tolerance: u8,
}

impl Default for FillConfig {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
        }
    }
}

/// Where and how saved images are written by the command line tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExportConfig {
    /// File name template with chrono format specifiers, without extension
    #[serde(default = "default_filename_template")]
    pub filename_template: String,

    /// Directory saved images are written to (`~` is expanded)
    #[serde(default = "default_save_directory")]
    pub save_directory: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            filename_template: default_filename_template(),
            save_directory: default_save_directory(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_width() -> u32 {
    800
}

fn default_height() -> u32 {
    600
}

fn default_background() -> String {
    "white".to_string()
}

fn default_export_scale() -> f64 {
    2.0
}

fn default_color() -> ColorSpec {
    ColorSpec::Name("#00f5ff".to_string())
}

fn default_size() -> f64 {
    10.0
}

fn default_min_size() -> f64 {
    1.0
}

fn default_max_size() -> f64 {
    100.0
}

fn default_font_family() -> String {
    "Sans".to_string()
}

fn default_font_weight() -> String {
    "normal".to_string()
}

fn default_font_style() -> String {
    "normal".to_string()
}

fn default_font_size() -> f64 {
    24.0
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_tolerance() -> u8 {
    DEFAULT_FILL_TOLERANCE
}

fn default_filename_template() -> String {
    DEFAULT_FILENAME_TEMPLATE.to_string()
}

fn default_save_directory() -> String {
    "~/Pictures/mintcanvas".to_string()
}
