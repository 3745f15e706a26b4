use crate::config::Action;
use crate::input::ToolKind;

use super::CanvasEngine;

/// Brush size change per size shortcut.
const SIZE_STEP: f64 = 1.0;
/// Font size change per font shortcut.
const FONT_SIZE_STEP: f64 = 2.0;

impl CanvasEngine {
    /// Executes a keyboard action.
    ///
    /// Tool selection discards the in-progress gesture; `Cancel` abandons it
    /// (closing an open text entry without drawing); everything else maps to
    /// the matching engine operation.
    pub fn apply_action(&mut self, action: Action) {
        log::debug!("Action {action:?}");
        match action {
            Action::SelectBrush => self.set_tool(ToolKind::Brush),
            Action::SelectEraser => self.set_tool(ToolKind::Eraser),
            Action::SelectLine => self.set_tool(ToolKind::Line),
            Action::SelectRectangle => self.set_tool(ToolKind::Rectangle),
            Action::SelectCircle => self.set_tool(ToolKind::Circle),
            Action::SelectPolygon => self.set_tool(ToolKind::Polygon),
            Action::SelectText => self.set_tool(ToolKind::Text),
            Action::SelectFill => self.set_tool(ToolKind::Fill),
            Action::SelectEyedropper => self.set_tool(ToolKind::Eyedropper),
            Action::SelectSelection => self.set_tool(ToolKind::Selection),
            Action::Undo => {
                self.undo();
            }
            Action::Redo => {
                self.redo();
            }
            Action::Save => {
                self.save();
            }
            Action::Cancel => {
                self.cancel();
            }
            Action::ClearCanvas => self.clear(),
            Action::IncreaseSize => self.adjust_brush_size(SIZE_STEP),
            Action::DecreaseSize => self.adjust_brush_size(-SIZE_STEP),
            Action::ToggleFill => self.toggle_fill_mode(),
            Action::IncreaseFontSize => self.adjust_font_size(FONT_SIZE_STEP),
            Action::DecreaseFontSize => self.adjust_font_size(-FONT_SIZE_STEP),
        }
    }
}
