//! Keyboard modifier state tracking.

/// Keyboard modifier state.
///
/// Owned and written only by the [`InputRouter`](super::InputRouter); tool
/// handlers receive a copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Shift key pressed (axis snap / equal sides)
    pub shift: bool,
    /// Ctrl key pressed
    pub ctrl: bool,
    /// Alt key pressed
    pub alt: bool,
}

impl Modifiers {
    /// Creates a new Modifiers instance with all keys released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shortcut for a state with only Shift held.
    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::default()
        }
    }

    /// Releases every modifier, e.g. after focus loss when key-up events
    /// can go missing.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
