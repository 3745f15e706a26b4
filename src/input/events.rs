//! Host-agnostic input event types.

use serde::Deserialize;

/// Generic key representation.
///
/// Hosts map their native key codes to these values. In scripts a key is
/// written by name (`"Escape"`, `"Shift"`, `"z"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Key {
    /// Regular character key (a-z, 0-9, symbols)
    Char(char),
    /// Escape key
    Escape,
    /// Return/Enter key
    Return,
    /// Backspace key
    Backspace,
    /// Delete key
    Delete,
    /// Space bar
    Space,
    /// Tab key
    Tab,
    /// Shift modifier
    Shift,
    /// Ctrl modifier
    Ctrl,
    /// Alt modifier
    Alt,
    /// Unmapped or unrecognized key
    Unknown,
}

impl Key {
    /// Parses a key name; anything unrecognized becomes [`Key::Unknown`].
    pub fn from_name(name: &str) -> Self {
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return if c == ' ' { Key::Space } else { Key::Char(c) };
        }
        match name.to_ascii_lowercase().as_str() {
            "escape" | "esc" => Key::Escape,
            "return" | "enter" => Key::Return,
            "backspace" => Key::Backspace,
            "delete" | "del" => Key::Delete,
            "space" => Key::Space,
            "tab" => Key::Tab,
            "shift" => Key::Shift,
            "ctrl" | "control" => Key::Ctrl,
            "alt" => Key::Alt,
            _ => Key::Unknown,
        }
    }

    /// Name used for keybinding lookup, `None` for modifiers and unknown keys.
    pub fn binding_name(self) -> Option<String> {
        match self {
            Key::Char(c) => Some(c.to_string()),
            Key::Escape => Some("Escape".to_string()),
            Key::Return => Some("Return".to_string()),
            Key::Backspace => Some("Backspace".to_string()),
            Key::Delete => Some("Delete".to_string()),
            Key::Space => Some("Space".to_string()),
            Key::Tab => Some("Tab".to_string()),
            Key::Shift | Key::Ctrl | Key::Alt | Key::Unknown => None,
        }
    }

    pub fn is_modifier(self) -> bool {
        matches!(self, Key::Shift | Key::Ctrl | Key::Alt)
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::from_name(&name)
    }
}

/// A contact point of a touch event, in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct TouchPoint {
    pub x: f64,
    pub y: f64,
}

/// One event delivered by the host.
///
/// Pointer and touch coordinates are client coordinates; the input router
/// subtracts the canvas origin set by [`InputEvent::Bounds`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp { x: f64, y: f64 },
    DoubleClick { x: f64, y: f64 },
    TouchStart { touches: Vec<TouchPoint> },
    TouchMove { touches: Vec<TouchPoint> },
    TouchEnd {
        #[serde(default)]
        touches: Vec<TouchPoint>,
    },
    KeyDown { key: Key },
    KeyUp { key: Key },
    /// Printable text typed while the canvas has focus
    TypeText { text: String },
    /// Canvas gained or lost keyboard focus
    Focus { focused: bool },
    /// Container resized
    Resize { width: u32, height: u32 },
    /// Canvas origin moved within the client area
    Bounds { left: f64, top: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_names_parse() {
        assert_eq!(Key::from_name("z"), Key::Char('z'));
        assert_eq!(Key::from_name("Esc"), Key::Escape);
        assert_eq!(Key::from_name("CTRL"), Key::Ctrl);
        assert_eq!(Key::from_name("F13"), Key::Unknown);
        assert_eq!(Key::Char('+').binding_name().as_deref(), Some("+"));
        assert!(Key::Shift.binding_name().is_none());
    }

    #[test]
    fn events_deserialize_from_tagged_tables() {
        let event: InputEvent = toml::from_str(
            r#"
            type = "key_down"
            key = "Shift"
            "#,
        )
        .unwrap();
        assert_eq!(event, InputEvent::KeyDown { key: Key::Shift });

        let event: InputEvent = toml::from_str(
            r#"
            type = "pointer_move"
            x = 12.5
            y = 3.0
            "#,
        )
        .unwrap();
        assert_eq!(event, InputEvent::PointerMove { x: 12.5, y: 3.0 });
    }
}
