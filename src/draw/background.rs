//! Cosmetic backgrounds drawn behind the committed surface.
//!
//! Backgrounds only affect the composed on-screen view; exports and history
//! snapshots never contain them.

use super::color::{self, Color};
use crate::CanvasError;
use std::fmt;
use std::str::FromStr;

/// Built-in background looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundPreset {
    White,
    Black,
    Transparent,
    Paper,
    Midnight,
    Sunset,
}

impl BackgroundPreset {
    pub const ALL: [BackgroundPreset; 6] = [
        BackgroundPreset::White,
        BackgroundPreset::Black,
        BackgroundPreset::Transparent,
        BackgroundPreset::Paper,
        BackgroundPreset::Midnight,
        BackgroundPreset::Sunset,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BackgroundPreset::White => "white",
            BackgroundPreset::Black => "black",
            BackgroundPreset::Transparent => "transparent",
            BackgroundPreset::Paper => "paper",
            BackgroundPreset::Midnight => "midnight",
            BackgroundPreset::Sunset => "sunset",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Resolves the preset into a concrete fill.
    fn resolve(self) -> Option<Background> {
        match self {
            BackgroundPreset::White => Some(Background::Solid(color::WHITE)),
            BackgroundPreset::Black => Some(Background::Solid(color::BLACK)),
            BackgroundPreset::Transparent => None,
            BackgroundPreset::Paper => Some(Background::Solid(Color::from_rgb8(0xf5, 0xf0, 0xe1))),
            BackgroundPreset::Midnight => Some(Background::Gradient {
                top: Color::from_rgb8(0x0f, 0x10, 0x35),
                bottom: Color::from_rgb8(0x00, 0x00, 0x00),
            }),
            BackgroundPreset::Sunset => Some(Background::Gradient {
                top: Color::from_rgb8(0xff, 0x7e, 0x5f),
                bottom: Color::from_rgb8(0xfe, 0xb4, 0x7b),
            }),
        }
    }
}

/// What is painted behind the artwork.
#[derive(Debug, Clone, PartialEq)]
pub enum Background {
    Preset(BackgroundPreset),
    Solid(Color),
    /// Vertical two-stop gradient from `top` to `bottom`.
    Gradient { top: Color, bottom: Color },
}

impl Default for Background {
    fn default() -> Self {
        Background::Preset(BackgroundPreset::White)
    }
}

impl FromStr for Background {
    type Err = CanvasError;

    /// Accepts a preset name, a hex color, or `"#top..#bottom"` for a gradient.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(preset) = BackgroundPreset::from_name(s) {
            return Ok(Background::Preset(preset));
        }
        if let Some((top, bottom)) = s.split_once("..") {
            return Ok(Background::Gradient {
                top: top.parse()?,
                bottom: bottom.parse()?,
            });
        }
        Ok(Background::Solid(s.parse()?))
    }
}

impl fmt::Display for Background {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Background::Preset(preset) => f.write_str(preset.name()),
            Background::Solid(color) => write!(f, "{color}"),
            Background::Gradient { top, bottom } => write!(f, "{top}..{bottom}"),
        }
    }
}

/// Fills `width x height` with the background.
///
/// Transparent presets leave the context untouched.
pub fn render_background(
    ctx: &cairo::Context,
    background: &Background,
    width: f64,
    height: f64,
) -> Result<(), CanvasError> {
    let resolved = match background {
        Background::Preset(preset) => match preset.resolve() {
            Some(resolved) => resolved,
            None => return Ok(()),
        },
        other => other.clone(),
    };

    match resolved {
        Background::Solid(color) => {
            color.apply(ctx);
            ctx.rectangle(0.0, 0.0, width, height);
            ctx.fill()?;
        }
        Background::Gradient { top, bottom } => {
            let gradient = cairo::LinearGradient::new(0.0, 0.0, 0.0, height);
            gradient.add_color_stop_rgba(0.0, top.r, top.g, top.b, top.a);
            gradient.add_color_stop_rgba(1.0, bottom.r, bottom.g, bottom.b, bottom.a);
            ctx.set_source(&gradient)?;
            ctx.rectangle(0.0, 0.0, width, height);
            ctx.fill()?;
        }
        Background::Preset(_) => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_presets_colors_and_gradients() {
        assert_eq!(
            "Paper".parse::<Background>().unwrap(),
            Background::Preset(BackgroundPreset::Paper)
        );
        assert_eq!(
            "#000000".parse::<Background>().unwrap(),
            Background::Solid(color::BLACK)
        );
        assert_eq!(
            "#ffffff..#000000".parse::<Background>().unwrap(),
            Background::Gradient {
                top: color::WHITE,
                bottom: color::BLACK
            }
        );
        assert!("plaid".parse::<Background>().is_err());
    }

    #[test]
    fn display_matches_parse_input() {
        for preset in BackgroundPreset::ALL {
            let bg = Background::Preset(preset);
            assert_eq!(bg.to_string().parse::<Background>().unwrap(), bg);
        }
    }

    #[test]
    fn transparent_preset_paints_nothing() {
        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, 2, 2).unwrap();
        {
            let ctx = cairo::Context::new(&surface).unwrap();
            render_background(
                &ctx,
                &Background::Preset(BackgroundPreset::Transparent),
                2.0,
                2.0,
            )
            .unwrap();
        }
        let wrapped = super::super::surface::Surface::from_image(surface);
        assert_eq!(wrapped.pixel(1, 1), Some([0, 0, 0, 0]));
    }
}
