//! Input handling and tool state machine.
//!
//! This module translates host keyboard, pointer and touch events into drawing
//! operations. The [`InputRouter`] owns the keyboard state and normalizes
//! coordinates; the [`CanvasEngine`] holds the active tool, the brush style and
//! the gesture in progress, and dispatches to the per-tool handlers.

pub mod events;
pub mod modifiers;
pub mod router;
pub mod state;
pub mod tool;

pub use events::{InputEvent, Key, TouchPoint};
pub use modifiers::Modifiers;
pub use router::InputRouter;
pub use state::{CanvasEngine, EngineSettings, MountOptions, ToolSession};
pub use tool::ToolKind;
