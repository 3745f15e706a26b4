//! RGBA color type, sRGB hex parsing, and predefined color constants.

use crate::CanvasError;
use std::fmt;
use std::str::FromStr;

/// Represents an RGBA color with floating-point components.
///
/// All components are in the range 0.0 (minimum) to 1.0 (maximum).
///
/// # Examples
///
/// ```
/// use mintcanvas::draw::Color;
/// let cyan: Color = "#00f5ff".parse().unwrap();
/// assert_eq!(cyan.to_hex(), "#00f5ff");
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red component (0.0 = no red, 1.0 = full red)
    pub r: f64,
    /// Green component (0.0 = no green, 1.0 = full green)
    pub g: f64,
    /// Blue component (0.0 = no blue, 1.0 = full blue)
    pub b: f64,
    /// Alpha/transparency (0.0 = fully transparent, 1.0 = fully opaque)
    pub a: f64,
}

impl Color {
    /// Creates a new color from RGBA components.
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: 1.0,
        }
    }

    /// Parses `#rrggbb`, `rrggbb` or the short `#rgb` form.
    pub fn from_hex(hex: &str) -> Result<Self, CanvasError> {
        let digits = hex.trim().trim_start_matches('#');
        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            _ => return Err(CanvasError::InvalidColor(hex.to_string())),
        };
        let channel = |i: usize| {
            u8::from_str_radix(&expanded[i..i + 2], 16)
                .map_err(|_| CanvasError::InvalidColor(hex.to_string()))
        };
        Ok(Self::from_rgb8(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Returns the 8-bit RGB channels, rounding each component.
    pub fn to_rgb8(&self) -> [u8; 3] {
        let to_u8 = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [to_u8(self.r), to_u8(self.g), to_u8(self.b)]
    }

    /// Formats the color as a lowercase `#rrggbb` string (alpha is dropped).
    pub fn to_hex(&self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Sets this color as the Cairo source.
    pub fn apply(&self, ctx: &cairo::Context) {
        ctx.set_source_rgba(self.r, self.g, self.b, self.a);
    }
}

impl FromStr for Color {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// ============================================================================
// Predefined Color Constants
// ============================================================================

/// Default brush color, electric cyan `#00f5ff`.
pub const CYAN: Color = Color {
    r: 0.0,
    g: 245.0 / 255.0,
    b: 1.0,
    a: 1.0,
};

/// Predefined white color (R=1.0, G=1.0, B=1.0)
pub const WHITE: Color = Color {
    r: 1.0,
    g: 1.0,
    b: 1.0,
    a: 1.0,
};

/// Predefined black color (R=0.0, G=0.0, B=0.0)
pub const BLACK: Color = Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

/// Fully transparent color
pub const TRANSPARENT: Color = Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 0.0,
};

/// Maps color name strings to Color values.
///
/// Used by the configuration system to accept a handful of names next to hex
/// strings.
pub fn name_to_color(name: &str) -> Option<Color> {
    match name.to_lowercase().as_str() {
        "cyan" => Some(CYAN),
        "white" => Some(WHITE),
        "black" => Some(BLACK),
        "red" => Some(Color::from_rgb8(255, 0, 0)),
        "green" => Some(Color::from_rgb8(0, 255, 0)),
        "blue" => Some(Color::from_rgb8(0, 0, 255)),
        "yellow" => Some(Color::from_rgb8(255, 255, 0)),
        "magenta" | "pink" => Some(Color::from_rgb8(255, 0, 255)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_hex() {
        assert_eq!(Color::from_hex("#00f5ff").unwrap(), CYAN);
        assert_eq!(Color::from_hex("FFF").unwrap(), WHITE);
        assert_eq!("#000000".parse::<Color>().unwrap(), BLACK);
    }

    #[test]
    fn rejects_malformed_hex() {
        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("#zzzzzz").is_err());
        assert!(Color::from_hex("").is_err());
    }

    #[test]
    fn hex_round_trips_through_formatting() {
        let color = Color::from_rgb8(0x12, 0xab, 0xef);
        assert_eq!(color.to_hex(), "#12abef");
        assert_eq!(color.to_string(), "#12abef");
    }

    #[test]
    fn names_resolve_case_insensitively() {
        assert_eq!(name_to_color("Cyan"), Some(CYAN));
        assert!(name_to_color("chartreuse").is_none());
    }
}
