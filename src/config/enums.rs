//! Configuration enum types.

use crate::draw::{Color, color};
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Color specification - a name, a hex string or RGB values.
///
/// # Examples
/// ```toml
/// # Named color
/// default_color = "cyan"
///
/// # Hex color
/// default_color = "#ff8000"
///
/// # Custom RGB color (0-255 per component)
/// default_color = [255, 128, 0]  # Orange
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Named color (red, green, blue, yellow, orange, pink, cyan, white, black)
    /// or a `#rrggbb` hex string
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Converts the color specification to a [`Color`] struct.
    ///
    /// Unknown names and malformed hex strings fall back to cyan with a warning.
    pub fn to_color(&self) -> Color {
        match self {
            ColorSpec::Name(name) => color::name_to_color(name)
                .or_else(|| Color::from_hex(name).ok())
                .unwrap_or_else(|| {
                    warn!("Unknown color '{}', using cyan", name);
                    color::CYAN
                }),
            ColorSpec::Rgb([r, g, b]) => Color::from_rgb8(*r, *g, *b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_spec_accepts_names_hex_and_rgb() {
        assert_eq!(ColorSpec::Name("#ff0000".into()).to_color().to_hex(), "#ff0000");
        assert_eq!(ColorSpec::Rgb([0, 255, 0]).to_color().to_hex(), "#00ff00");
        assert_eq!(ColorSpec::Name("nope".into()).to_color(), color::CYAN);
    }
}
