//! Routes host events to the canvas engine.
//!
//! The router owns the keyboard state: it is the only writer of [`Modifiers`]
//! and hands a copy to the engine with every pointer event.

use super::events::{InputEvent, Key, TouchPoint};
use super::modifiers::Modifiers;
use super::state::CanvasEngine;
use crate::config::{Action, KeyBinding, KeybindingsConfig};
use crate::util::Point;
use std::collections::HashMap;

pub struct InputRouter {
    modifiers: Modifiers,
    origin: Point,
    focused: bool,
    action_map: HashMap<KeyBinding, Action>,
    last_touch: Option<Point>,
}

impl InputRouter {
    pub fn new(action_map: HashMap<KeyBinding, Action>) -> Self {
        Self {
            modifiers: Modifiers::new(),
            origin: Point::new(0.0, 0.0),
            focused: true,
            action_map,
            last_touch: None,
        }
    }

    /// Builds a router from keybinding configuration.
    pub fn from_config(config: &KeybindingsConfig) -> Result<Self, String> {
        Ok(Self::new(config.build_action_map()?))
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Offset of the canvas inside the client area.
    pub fn set_origin(&mut self, left: f64, top: f64) {
        self.origin = Point::new(left, top);
    }

    /// Converts client coordinates to surface-local ones.
    pub fn to_local(&self, x: f64, y: f64) -> Point {
        Point::new(x - self.origin.x, y - self.origin.y)
    }

    fn first_touch(&self, touches: &[TouchPoint]) -> Option<Point> {
        touches.first().map(|t| self.to_local(t.x, t.y))
    }

    /// Dispatches one host event.
    pub fn handle(&mut self, engine: &mut CanvasEngine, event: &InputEvent) {
        match event {
            InputEvent::PointerDown { x, y } => {
                self.focused = true;
                engine.pointer_down(self.to_local(*x, *y), self.modifiers);
            }
            InputEvent::PointerMove { x, y } => {
                engine.pointer_move(self.to_local(*x, *y), self.modifiers);
            }
            InputEvent::PointerUp { x, y } => {
                engine.pointer_up(self.to_local(*x, *y), self.modifiers);
            }
            InputEvent::DoubleClick { x, y } => {
                engine.double_click(self.to_local(*x, *y), self.modifiers);
            }
            InputEvent::TouchStart { touches } => {
                if let Some(point) = self.first_touch(touches) {
                    self.focused = true;
                    self.last_touch = Some(point);
                    engine.pointer_down(point, self.modifiers);
                }
            }
            InputEvent::TouchMove { touches } => {
                if let Some(point) = self.first_touch(touches) {
                    self.last_touch = Some(point);
                    engine.pointer_move(point, self.modifiers);
                }
            }
            InputEvent::TouchEnd { touches } => {
                // The lifted finger is no longer listed, so fall back to the
                // last known position.
                let point = self.first_touch(touches).or(self.last_touch.take());
                if let Some(point) = point {
                    engine.pointer_up(point, self.modifiers);
                }
            }
            InputEvent::KeyDown { key } => self.on_key_press(engine, *key),
            InputEvent::KeyUp { key } => self.on_key_release(engine, *key),
            InputEvent::TypeText { text } => {
                if engine.text_entry_open() {
                    engine.text_insert(text);
                }
            }
            InputEvent::Focus { focused } => {
                self.focused = *focused;
                if !focused && self.modifiers != Modifiers::default() {
                    self.modifiers.reset();
                    engine.modifiers_changed(self.modifiers);
                }
            }
            InputEvent::Resize { width, height } => engine.resize(*width, *height),
            InputEvent::Bounds { left, top } => self.set_origin(*left, *top),
        }
    }

    /// Processes a key press.
    ///
    /// Modifier keys update the keyboard state and refresh constrained
    /// previews. Escape cancels the in-progress gesture even without focus.
    /// While a text entry is open, plain keys edit the text; otherwise keys
    /// are looked up in the keybinding map when the canvas has focus.
    pub fn on_key_press(&mut self, engine: &mut CanvasEngine, key: Key) {
        if key.is_modifier() {
            self.set_modifier(key, true);
            engine.modifiers_changed(self.modifiers);
            return;
        }

        if engine.text_entry_open() {
            match key {
                Key::Escape => {
                    engine.cancel();
                }
                Key::Return if self.modifiers.shift => engine.text_insert("\n"),
                Key::Return => engine.submit_text(),
                Key::Backspace => engine.text_backspace(),
                Key::Space if !self.modifiers.ctrl && !self.modifiers.alt => {
                    engine.text_insert(" ")
                }
                Key::Char(c) if !self.modifiers.ctrl && !self.modifiers.alt => {
                    engine.text_insert(&c.to_string())
                }
                _ => {}
            }
            return;
        }

        if key == Key::Escape && engine.cancel() {
            return;
        }

        if !self.focused {
            log::debug!("Canvas not focused, ignoring {key:?}");
            return;
        }

        if let Some(action) = self.find_action(key) {
            engine.apply_action(action);
        }
    }

    pub fn on_key_release(&mut self, engine: &mut CanvasEngine, key: Key) {
        if key.is_modifier() {
            self.set_modifier(key, false);
            engine.modifiers_changed(self.modifiers);
        }
    }

    fn set_modifier(&mut self, key: Key, down: bool) {
        match key {
            Key::Shift => self.modifiers.shift = down,
            Key::Ctrl => self.modifiers.ctrl = down,
            Key::Alt => self.modifiers.alt = down,
            _ => {}
        }
    }

    /// Looks up the action bound to `key` with the current modifiers.
    ///
    /// Symbols such as `+` usually need Shift to type, so a shifted symbol
    /// also matches its binding without Shift.
    fn find_action(&self, key: Key) -> Option<Action> {
        let name = key.binding_name()?;
        let m = self.modifiers;
        let binding = KeyBinding::from_pressed(&name, m.ctrl, m.shift, m.alt);
        if let Some(action) = self.action_map.get(&binding) {
            return Some(*action);
        }
        match key {
            Key::Char(c) if m.shift && !c.is_alphanumeric() => self
                .action_map
                .get(&KeyBinding::from_pressed(&name, m.ctrl, false, m.alt))
                .copied(),
            _ => None,
        }
    }
}

impl Default for InputRouter {
    fn default() -> Self {
        let action_map = KeybindingsConfig::default()
            .build_action_map()
            .unwrap_or_else(|err| {
                log::error!("Default keybindings are invalid: {err}");
                HashMap::new()
            });
        Self::new(action_map)
    }
}
