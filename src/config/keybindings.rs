//! Keybinding configuration types and parsing.
//!
//! This module defines the configurable keybinding system that allows users
//! to customize the canvas keyboard shortcuts.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// All possible actions that can be bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    // Tool selection
    SelectBrush,
    SelectEraser,
    SelectLine,
    SelectRectangle,
    SelectCircle,
    SelectPolygon,
    SelectText,
    SelectFill,
    SelectEyedropper,
    SelectSelection,

    // History and output
    Undo,
    Redo,
    Save,
    Cancel,
    ClearCanvas,

    // Style
    IncreaseSize,
    DecreaseSize,
    ToggleFill,
    IncreaseFontSize,
    DecreaseFontSize,
}

/// A single keybinding: a key with optional modifiers.
///
/// Single-character keys are stored lowercase and named keys in a canonical
/// spelling, so `"Ctrl+Shift+z"` and `"shift+ctrl+Z"` are the same binding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub key: String,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

/// Canonical spelling of a key name, e.g. `"esc"` -> `"Escape"`.
pub fn canonical_key(key: &str) -> String {
    let mut chars = key.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return c.to_lowercase().collect();
    }
    match key.to_ascii_lowercase().as_str() {
        "escape" | "esc" => "Escape".to_string(),
        "return" | "enter" => "Return".to_string(),
        "backspace" => "Backspace".to_string(),
        "delete" | "del" => "Delete".to_string(),
        "space" => "Space".to_string(),
        "tab" => "Tab".to_string(),
        "plus" => "+".to_string(),
        "minus" => "-".to_string(),
        _ => key.to_string(),
    }
}

impl KeyBinding {
    /// Parse a keybinding string like "Ctrl+Shift+Z" or "Escape".
    /// Modifiers can appear in any order and spaces around '+' are ignored.
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Empty keybinding string".to_string());
        }

        let normalized = s.replace(" + ", "+").replace("+ ", "+").replace(" +", "+");

        let mut ctrl = false;
        let mut shift = false;
        let mut alt = false;
        let mut key_parts = Vec::new();

        for part in normalized.split('+') {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" => ctrl = true,
                "shift" => shift = true,
                "alt" => alt = true,
                _ => key_parts.push(part),
            }
        }

        if key_parts.is_empty() {
            return Err(format!("No key specified in: {s}"));
        }

        // "Ctrl++" splits into ["Ctrl", "", ""]: the key is '+' itself.
        let joined = key_parts.join("+");
        let key = if joined.chars().all(|c| c == '+') {
            "+".to_string()
        } else {
            canonical_key(&joined)
        };

        Ok(Self {
            key,
            ctrl,
            shift,
            alt,
        })
    }

    /// Builds the binding for a pressed key and modifier state.
    pub fn from_pressed(key: &str, ctrl: bool, shift: bool, alt: bool) -> Self {
        Self {
            key: canonical_key(key),
            ctrl,
            shift,
            alt,
        }
    }
}

/// Configuration for all keybindings.
///
/// Each action can have multiple keybindings. Users specify them in config.toml as:
/// ```toml
/// [keybindings]
/// undo = ["Ctrl+Z"]
/// redo = ["Ctrl+Y", "Ctrl+Shift+Z"]
/// select_fill = ["F"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct KeybindingsConfig {
    #[serde(default = "default_select_brush")]
    pub select_brush: Vec<String>,

    #[serde(default = "default_select_eraser")]
    pub select_eraser: Vec<String>,

    #[serde(default = "default_select_line")]
    pub select_line: Vec<String>,

    #[serde(default = "default_select_rectangle")]
    pub select_rectangle: Vec<String>,

    #[serde(default = "default_select_circle")]
    pub select_circle: Vec<String>,

    #[serde(default = "default_select_polygon")]
    pub select_polygon: Vec<String>,

    #[serde(default = "default_select_text")]
    pub select_text: Vec<String>,

    #[serde(default = "default_select_fill")]
    pub select_fill: Vec<String>,

    #[serde(default = "default_select_eyedropper")]
    pub select_eyedropper: Vec<String>,

    #[serde(default = "default_select_selection")]
    pub select_selection: Vec<String>,

    #[serde(default = "default_undo")]
    pub undo: Vec<String>,

    #[serde(default = "default_redo")]
    pub redo: Vec<String>,

    #[serde(default = "default_save")]
    pub save: Vec<String>,

    #[serde(default = "default_cancel")]
    pub cancel: Vec<String>,

    #[serde(default = "default_clear_canvas")]
    pub clear_canvas: Vec<String>,

    #[serde(default = "default_increase_size")]
    pub increase_size: Vec<String>,

    #[serde(default = "default_decrease_size")]
    pub decrease_size: Vec<String>,

    #[serde(default = "default_toggle_fill")]
    pub toggle_fill: Vec<String>,

    #[serde(default = "default_increase_font_size")]
    pub increase_font_size: Vec<String>,

    #[serde(default = "default_decrease_font_size")]
    pub decrease_font_size: Vec<String>,
}

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            select_brush: default_select_brush(),
            select_eraser: default_select_eraser(),
            select_line: default_select_line(),
            select_rectangle: default_select_rectangle(),
            select_circle: default_select_circle(),
            select_polygon: default_select_polygon(),
            select_text: default_select_text(),
            select_fill: default_select_fill(),
            select_eyedropper: default_select_eyedropper(),
            select_selection: default_select_selection(),
            undo: default_undo(),
            redo: default_redo(),
            save: default_save(),
            cancel: default_cancel(),
            clear_canvas: default_clear_canvas(),
            increase_size: default_increase_size(),
            decrease_size: default_decrease_size(),
            toggle_fill: default_toggle_fill(),
            increase_font_size: default_increase_font_size(),
            decrease_font_size: default_decrease_font_size(),
        }
    }
}

impl KeybindingsConfig {
    fn entries(&self) -> [(&[String], Action); 20] {
        [
            (self.select_brush.as_slice(), Action::SelectBrush),
            (self.select_eraser.as_slice(), Action::SelectEraser),
            (self.select_line.as_slice(), Action::SelectLine),
            (self.select_rectangle.as_slice(), Action::SelectRectangle),
            (self.select_circle.as_slice(), Action::SelectCircle),
            (self.select_polygon.as_slice(), Action::SelectPolygon),
            (self.select_text.as_slice(), Action::SelectText),
            (self.select_fill.as_slice(), Action::SelectFill),
            (self.select_eyedropper.as_slice(), Action::SelectEyedropper),
            (self.select_selection.as_slice(), Action::SelectSelection),
            (self.undo.as_slice(), Action::Undo),
            (self.redo.as_slice(), Action::Redo),
            (self.save.as_slice(), Action::Save),
            (self.cancel.as_slice(), Action::Cancel),
            (self.clear_canvas.as_slice(), Action::ClearCanvas),
            (self.increase_size.as_slice(), Action::IncreaseSize),
            (self.decrease_size.as_slice(), Action::DecreaseSize),
            (self.toggle_fill.as_slice(), Action::ToggleFill),
            (self.increase_font_size.as_slice(), Action::IncreaseFontSize),
            (self.decrease_font_size.as_slice(), Action::DecreaseFontSize),
        ]
    }

    /// Build a lookup map from keybindings to actions for efficient matching.
    /// Returns an error if any keybinding string is invalid or if duplicates are detected.
    pub fn build_action_map(&self) -> Result<HashMap<KeyBinding, Action>, String> {
        let mut map = HashMap::new();
        for (bindings, action) in self.entries() {
            for binding_str in bindings {
                let binding = KeyBinding::parse(binding_str)?;
                if let Some(existing_action) = map.insert(binding, action) {
                    return Err(format!(
                        "Duplicate keybinding '{binding_str}' assigned to both {existing_action:?} and {action:?}"
                    ));
                }
            }
        }
        Ok(map)
    }
}

// =============================================================================
// Default keybinding functions
// =============================================================================

fn keys(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn default_select_brush() -> Vec<String> {
    keys(&["B"])
}

fn default_select_eraser() -> Vec<String> {
    keys(&["E"])
}

fn default_select_line() -> Vec<String> {
    keys(&["L"])
}

fn default_select_rectangle() -> Vec<String> {
    keys(&["R"])
}

fn default_select_circle() -> Vec<String> {
    keys(&["C"])
}

fn default_select_polygon() -> Vec<String> {
    keys(&["P"])
}

fn default_select_text() -> Vec<String> {
    keys(&["T"])
}

fn default_select_fill() -> Vec<String> {
    keys(&["F"])
}

fn default_select_eyedropper() -> Vec<String> {
    keys(&["I"])
}

fn default_select_selection() -> Vec<String> {
    keys(&["S"])
}

fn default_undo() -> Vec<String> {
    keys(&["Ctrl+Z"])
}

fn default_redo() -> Vec<String> {
    keys(&["Ctrl+Y", "Ctrl+Shift+Z"])
}

fn default_save() -> Vec<String> {
    keys(&["Ctrl+S"])
}

fn default_cancel() -> Vec<String> {
    keys(&["Escape"])
}

fn default_clear_canvas() -> Vec<String> {
    keys(&["Ctrl+Delete"])
}

fn default_increase_size() -> Vec<String> {
    keys(&["+", "="])
}

fn default_decrease_size() -> Vec<String> {
    keys(&["-", "_"])
}

fn default_toggle_fill() -> Vec<String> {
    keys(&["G"])
}

fn default_increase_font_size() -> Vec<String> {
    keys(&["]"])
}

fn default_decrease_font_size() -> Vec<String> {
    keys(&["["])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_and_named_keys() {
        let binding = KeyBinding::parse("Escape").unwrap();
        assert_eq!(binding.key, "Escape");
        assert!(!binding.ctrl && !binding.shift && !binding.alt);

        assert_eq!(KeyBinding::parse("esc").unwrap().key, "Escape");
        assert_eq!(KeyBinding::parse("Ctrl+Del").unwrap().key, "Delete");
    }

    #[test]
    fn parse_is_case_and_order_insensitive() {
        let a = KeyBinding::parse("Ctrl+Shift+Z").unwrap();
        let b = KeyBinding::parse("shift + ctrl + z").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.key, "z");
        assert!(a.ctrl && a.shift && !a.alt);
    }

    #[test]
    fn parse_plus_key() {
        assert_eq!(KeyBinding::parse("+").unwrap().key, "+");
        let binding = KeyBinding::parse("Ctrl++").unwrap();
        assert_eq!(binding.key, "+");
        assert!(binding.ctrl);
    }

    #[test]
    fn parse_rejects_modifier_only() {
        assert!(KeyBinding::parse("Ctrl+Shift").is_err());
        assert!(KeyBinding::parse("   ").is_err());
    }

    #[test]
    fn default_map_contains_shortcuts() {
        let map = KeybindingsConfig::default().build_action_map().unwrap();
        let lookup = |s: &str| map.get(&KeyBinding::parse(s).unwrap()).copied();
        assert_eq!(lookup("b"), Some(Action::SelectBrush));
        assert_eq!(lookup("i"), Some(Action::SelectEyedropper));
        assert_eq!(lookup("Ctrl+Z"), Some(Action::Undo));
        assert_eq!(lookup("Ctrl+Y"), Some(Action::Redo));
        assert_eq!(lookup("Ctrl+Shift+Z"), Some(Action::Redo));
        assert_eq!(lookup("Ctrl+S"), Some(Action::Save));
        assert_eq!(lookup("Escape"), Some(Action::Cancel));
        assert_eq!(
            map.get(&KeyBinding::from_pressed("G", false, false, false)),
            Some(&Action::ToggleFill)
        );
    }

    #[test]
    fn duplicate_keybinding_detection() {
        let mut config = KeybindingsConfig::default();
        config.save = vec!["Ctrl+Z".to_string()];
        let err = config.build_action_map().unwrap_err();
        assert!(err.contains("Duplicate keybinding"));
        assert!(err.contains("Ctrl+Z"));
    }

    #[test]
    fn duplicate_with_different_modifier_order() {
        let mut config = KeybindingsConfig::default();
        config.toggle_fill = vec!["Shift+Ctrl+Z".to_string()];
        assert!(config.build_action_map().is_err());
    }
}
