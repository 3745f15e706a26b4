//! Configuration file support for mintcanvas.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/mintcanvas/config.toml`. Settings include the initial canvas,
//! drawing defaults, history depth, flood fill tolerance, export naming and keybindings.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod keybindings;
pub mod types;

pub use enums::ColorSpec;
pub use keybindings::{Action, KeyBinding, KeybindingsConfig};
pub use types::{CanvasConfig, DrawingConfig, ExportConfig, FillConfig, HistoryConfig};

use crate::draw::{Background, FontDescriptor};
use crate::input::{EngineSettings, MountOptions, ToolKind};
use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const EXPORT_SCALE_RANGE: (f64, f64) = (1.0, 8.0);
const SIZE_LIMITS: (f64, f64) = (1.0, 500.0);
const FONT_SIZE_RANGE: (f64, f64) = (6.0, 200.0);
const MAX_DIMENSION: u32 = 16_384;

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [canvas]
/// width = 1024
/// height = 768
/// background = "paper"
/// export_scale = 2.0
///
/// [drawing]
/// default_color = "#00f5ff"
/// default_size = 10.0
/// fill_shapes = false
///
/// [history]
/// max_depth = 20
///
/// [fill]
/// tolerance = 10
///
/// [keybindings]
/// undo = ["Ctrl+Z"]
/// redo = ["Ctrl+Y", "Ctrl+Shift+Z"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Initial canvas size, background and export scale
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Drawing tool defaults (color, size, fill mode, font)
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Undo history settings
    #[serde(default)]
    pub history: HistoryConfig,

    /// Flood fill settings
    #[serde(default)]
    pub fill: FillConfig,

    /// Saved image naming and location
    #[serde(default)]
    pub export: ExportConfig,

    /// Keyboard shortcuts
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value (or replaced by
    /// the default) and a warning is logged.
    ///
    /// Validated ranges:
    /// - `canvas.width`, `canvas.height`: 0 - 16384
    /// - `canvas.export_scale`: 1.0 - 8.0
    /// - `drawing.min_size` / `max_size`: 1.0 - 500.0, min <= max
    /// - `drawing.default_size`: min_size - max_size
    /// - `drawing.font_size`: 6.0 - 200.0
    /// - `history.max_depth`: at least 1
    pub fn validate_and_clamp(&mut self) {
        for (name, value) in [
            ("width", &mut self.canvas.width),
            ("height", &mut self.canvas.height),
        ] {
            if *value > MAX_DIMENSION {
                log::warn!("Invalid canvas {name} {value}, clamping to {MAX_DIMENSION}");
                *value = MAX_DIMENSION;
            }
        }

        if self.canvas.background.parse::<Background>().is_err() {
            log::warn!(
                "Invalid background '{}', falling back to 'white'",
                self.canvas.background
            );
            self.canvas.background = "white".to_string();
        }

        let (lo, hi) = EXPORT_SCALE_RANGE;
        if !(lo..=hi).contains(&self.canvas.export_scale) {
            log::warn!(
                "Invalid export_scale {:.1}, clamping to {lo:.1}-{hi:.1} range",
                self.canvas.export_scale
            );
            self.canvas.export_scale = if self.canvas.export_scale.is_nan() {
                lo
            } else {
                self.canvas.export_scale.clamp(lo, hi)
            };
        }

        let drawing = &mut self.drawing;
        let defaults = DrawingConfig::default();
        for (name, value, default) in [
            ("min_size", &mut drawing.min_size, defaults.min_size),
            ("max_size", &mut drawing.max_size, defaults.max_size),
            ("default_size", &mut drawing.default_size, defaults.default_size),
            ("font_size", &mut drawing.font_size, defaults.font_size),
        ] {
            if value.is_nan() {
                log::warn!("Invalid {name} NaN, using default {default:.1}");
                *value = default;
            }
        }

        // Size limits first, the default size is clamped into them
        let (lo, hi) = SIZE_LIMITS;
        if !(lo..=hi).contains(&drawing.min_size) {
            log::warn!("Invalid min_size {:.1}, clamping to {lo:.1}-{hi:.1}", drawing.min_size);
            drawing.min_size = drawing.min_size.clamp(lo, hi);
        }
        if !(lo..=hi).contains(&drawing.max_size) {
            log::warn!("Invalid max_size {:.1}, clamping to {lo:.1}-{hi:.1}", drawing.max_size);
            drawing.max_size = drawing.max_size.clamp(lo, hi);
        }
        if drawing.min_size > drawing.max_size {
            log::warn!(
                "min_size {:.1} exceeds max_size {:.1}, swapping",
                drawing.min_size,
                drawing.max_size
            );
            std::mem::swap(&mut drawing.min_size, &mut drawing.max_size);
        }
        if !(drawing.min_size..=drawing.max_size).contains(&drawing.default_size) {
            log::warn!(
                "Invalid default_size {:.1}, clamping to {:.1}-{:.1} range",
                drawing.default_size,
                drawing.min_size,
                drawing.max_size
            );
            drawing.default_size = drawing.default_size.clamp(drawing.min_size, drawing.max_size);
        }

        let (lo, hi) = FONT_SIZE_RANGE;
        if !(lo..=hi).contains(&drawing.font_size) {
            log::warn!(
                "Invalid font_size {:.1}, clamping to {lo:.1}-{hi:.1} range",
                drawing.font_size
            );
            drawing.font_size = drawing.font_size.clamp(lo, hi);
        }

        // Validate font weight is reasonable
        let valid_weight = matches!(
            drawing.font_weight.to_lowercase().as_str(),
            "normal" | "bold" | "light" | "ultralight" | "heavy" | "ultrabold"
        ) || drawing
            .font_weight
            .parse::<u32>()
            .is_ok_and(|w| (100..=900).contains(&w));

        if !valid_weight {
            log::warn!(
                "Invalid font_weight '{}', falling back to 'normal'",
                drawing.font_weight
            );
            drawing.font_weight = "normal".to_string();
        }

        if !matches!(
            drawing.font_style.to_lowercase().as_str(),
            "normal" | "italic" | "oblique"
        ) {
            log::warn!(
                "Invalid font_style '{}', falling back to 'normal'",
                drawing.font_style
            );
            drawing.font_style = "normal".to_string();
        }

        if self.history.max_depth == 0 {
            log::warn!("history.max_depth must be at least 1, using 1");
            self.history.max_depth = 1;
        }

        if let Err(err) = self.keybindings.build_action_map() {
            log::warn!("Invalid keybindings ({err}), falling back to defaults");
            self.keybindings = KeybindingsConfig::default();
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/mintcanvas/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("mintcanvas");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if
    /// not found.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates the configuration at `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let mut config = Self::from_toml(&config_str)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        info!("Loaded config from {}", path.display());
        debug!("Config: {:?}", config);

        config.validate_and_clamp();
        Ok(config)
    }

    /// Parses a configuration from TOML text without validating it.
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// JSON schema of the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }

    /// Initial engine state described by this configuration.
    pub fn mount_options(&self) -> MountOptions {
        MountOptions {
            width: self.canvas.width,
            height: self.canvas.height,
            background: self.canvas.background.parse().unwrap_or_default(),
            tool: ToolKind::Brush,
            color: self.drawing.default_color.to_color(),
            brush_size: self.drawing.default_size,
        }
    }

    /// Engine tunables described by this configuration.
    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            history_depth: self.history.max_depth,
            fill_tolerance: self.fill.tolerance,
            export_scale: self.canvas.export_scale,
            min_brush_size: self.drawing.min_size,
            max_brush_size: self.drawing.max_size,
            fill_shapes: self.drawing.fill_shapes,
            font: FontDescriptor::new(
                self.drawing.font_family.as_str(),
                self.drawing.font_weight.as_str(),
                self.drawing.font_style.as_str(),
            ),
            font_size: self.drawing.font_size,
            filename_template: self.export.filename_template.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::BackgroundPreset;

    #[test]
    fn empty_file_yields_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.canvas.width, 800);
        assert_eq!(config.canvas.height, 600);
        assert_eq!(config.history.max_depth, 20);
        assert_eq!(config.fill.tolerance, 10);
        assert_eq!(config.drawing.default_color.to_color().to_hex(), "#00f5ff");
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let mut config = Config::from_toml(
            r#"
            [canvas]
            export_scale = 40.0
            background = "plaid"

            [drawing]
            default_size = 900.0
            min_size = 4.0
            max_size = 50.0
            font_style = "wavy"

            [history]
            max_depth = 0
            "#,
        )
        .unwrap();
        config.validate_and_clamp();
        assert_eq!(config.canvas.export_scale, 8.0);
        assert_eq!(config.canvas.background, "white");
        assert_eq!(config.drawing.default_size, 50.0);
        assert_eq!(config.drawing.font_style, "normal");
        assert_eq!(config.history.max_depth, 1);
    }

    #[test]
    fn nan_sizes_fall_back_to_defaults() {
        let mut config = Config::from_toml(
            r#"
            [drawing]
            min_size = nan
            max_size = nan
            default_size = nan
            font_size = nan
            "#,
        )
        .unwrap();
        config.validate_and_clamp();
        let defaults = DrawingConfig::default();
        assert_eq!(config.drawing.min_size, defaults.min_size);
        assert_eq!(config.drawing.max_size, defaults.max_size);
        assert_eq!(config.drawing.default_size, defaults.default_size);
        assert_eq!(config.drawing.font_size, defaults.font_size);
    }

    #[test]
    fn single_nan_size_limit_keeps_other_limit() {
        let mut config = Config::from_toml(
            r#"
            [drawing]
            min_size = nan
            max_size = 40.0
            "#,
        )
        .unwrap();
        config.validate_and_clamp();
        assert!(config.drawing.min_size.is_finite());
        assert_eq!(config.drawing.max_size, 40.0);
        assert!(config.drawing.min_size <= config.drawing.default_size);
        assert!(config.drawing.default_size <= config.drawing.max_size);
    }

    #[test]
    fn duplicate_keybindings_fall_back_to_defaults() {
        let mut config = Config::from_toml(
            r#"
            [keybindings]
            undo = ["Ctrl+Z"]
            redo = ["Ctrl+Z"]
            "#,
        )
        .unwrap();
        config.validate_and_clamp();
        assert_eq!(config.keybindings.redo, KeybindingsConfig::default().redo);
    }

    #[test]
    fn config_feeds_engine_options() {
        let config = Config::from_toml(
            r#"
            [canvas]
            width = 320
            height = 200
            background = "midnight"

            [drawing]
            default_color = [255, 0, 0]
            fill_shapes = true

            [fill]
            tolerance = 0
            "#,
        )
        .unwrap();
        let mount = config.mount_options();
        assert_eq!((mount.width, mount.height), (320, 200));
        assert_eq!(mount.background, Background::Preset(BackgroundPreset::Midnight));
        assert_eq!(mount.color.to_hex(), "#ff0000");

        let settings = config.engine_settings();
        assert!(settings.fill_shapes);
        assert_eq!(settings.fill_tolerance, 0);
    }

    #[test]
    fn load_from_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(&dir.path().join("absent.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }

    #[test]
    fn schema_lists_sections() {
        let schema = serde_json::to_value(Config::json_schema()).unwrap();
        let properties = schema.get("properties").unwrap();
        for section in ["canvas", "drawing", "history", "fill", "export", "keybindings"] {
            assert!(properties.get(section).is_some(), "missing {section}");
        }
    }
}
