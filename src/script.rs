//! Recorded input scripts replayed by the command line container.
//!
//! A script is a TOML file with one `[[events]]` table per host event, tagged
//! by `type`:
//!
//! ```toml
//! [[events]]
//! type = "pointer_down"
//! x = 10.0
//! y = 10.0
//!
//! [[events]]
//! type = "key_down"
//! key = "Shift"
//! ```

use crate::input::{CanvasEngine, InputEvent, InputRouter};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub events: Vec<InputEvent>,
}

impl Script {
    /// Reads and parses the script at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read script from {}", path.display()))?;
        Self::parse(&text)
            .with_context(|| format!("Failed to parse script from {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Feeds every event through `router` into `engine`, in order.
    pub fn replay(&self, router: &mut InputRouter, engine: &mut CanvasEngine) {
        for (index, event) in self.events.iter().enumerate() {
            log::trace!("Event {index}: {event:?}");
            router.handle(engine, event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{EngineSettings, MountOptions, ToolKind};

    const SQUARE: &str = r#"
        [[events]]
        type = "key_down"
        key = "r"

        [[events]]
        type = "bounds"
        left = 100.0
        top = 50.0

        [[events]]
        type = "pointer_down"
        x = 110.0
        y = 60.0

        [[events]]
        type = "pointer_move"
        x = 130.0
        y = 80.0

        [[events]]
        type = "pointer_up"
        x = 130.0
        y = 80.0
    "#;

    fn engine() -> CanvasEngine {
        let options = MountOptions {
            width: 40,
            height: 40,
            ..MountOptions::default()
        };
        CanvasEngine::mount(options, EngineSettings::default())
    }

    #[test]
    fn replay_routes_keys_and_pointer_in_local_coordinates() {
        let script = Script::parse(SQUARE).unwrap();
        assert_eq!(script.len(), 5);

        let mut engine = engine();
        let mut router = InputRouter::default();
        script.replay(&mut router, &mut engine);

        assert_eq!(engine.tool(), ToolKind::Rectangle);
        assert_eq!(engine.history().undo_len(), 2);
        let committed = engine.surfaces().unwrap().committed();
        assert!(committed.pixel(10, 20).unwrap()[3] > 0);
        assert_eq!(committed.pixel(20, 20).unwrap()[3], 0);
    }

    #[test]
    fn unknown_event_types_are_rejected() {
        let err = Script::parse("[[events]]\ntype = \"teleport\"\n").unwrap_err();
        assert!(err.to_string().contains("teleport"));
    }

    #[test]
    fn empty_script_is_valid() {
        assert!(Script::parse("").unwrap().is_empty());
    }
}
