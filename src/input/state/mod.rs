mod actions;
mod core;
pub mod handlers;
pub mod session;

pub use core::{CanvasEngine, EngineSettings, MountOptions};
pub use handlers::{MIN_POLYGON_VERTICES, ToolOutcome};
pub use session::{SelectionState, ShapeKind, ToolSession};
