//! The canvas engine: surfaces, history, style and the active gesture.

use super::handlers::{self, ToolContext, ToolOutcome};
use super::session::ToolSession;
use crate::CanvasError;
use crate::draw::{
    Background, BrushStyle, Color, DEFAULT_FILL_TOLERANCE, FontDescriptor, SurfaceSet, color,
};
use crate::export::{
    DEFAULT_FILENAME_TEMPLATE, ImageFile, ImageGenerated, ObjectUrl, ObjectUrls, PNG_MIME,
    generate_filename,
};
use crate::history::{DEFAULT_MAX_DEPTH, History};
use crate::input::{Modifiers, ToolKind};
use crate::util::Point;
use cairo::ImageSurface;
use std::rc::Rc;

/// Initial state a host mounts the canvas with.
#[derive(Debug, Clone, PartialEq)]
pub struct MountOptions {
    pub width: u32,
    pub height: u32,
    pub background: Background,
    pub tool: ToolKind,
    pub color: Color,
    pub brush_size: f64,
}

impl Default for MountOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            background: Background::default(),
            tool: ToolKind::Brush,
            color: color::CYAN,
            brush_size: 10.0,
        }
    }
}

/// Tunables that normally come from the configuration file.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSettings {
    pub history_depth: usize,
    pub fill_tolerance: u8,
    pub export_scale: f64,
    pub min_brush_size: f64,
    pub max_brush_size: f64,
    pub fill_shapes: bool,
    pub font: FontDescriptor,
    pub font_size: f64,
    pub filename_template: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            history_depth: DEFAULT_MAX_DEPTH,
            fill_tolerance: DEFAULT_FILL_TOLERANCE,
            export_scale: 2.0,
            min_brush_size: 1.0,
            max_brush_size: 100.0,
            fill_shapes: false,
            font: FontDescriptor::default(),
            font_size: 24.0,
            filename_template: DEFAULT_FILENAME_TEMPLATE.to_string(),
        }
    }
}

/// Font size bounds for the text tool.
const MIN_FONT_SIZE: f64 = 6.0;
const MAX_FONT_SIZE: f64 = 200.0;

/// The interactive drawing engine.
///
/// All operations are synchronous. While no surfaces exist (zero-sized
/// container) drawing operations are silently skipped. Errors raised by tool
/// handlers are logged at this boundary and never propagate to the event
/// source.
pub struct CanvasEngine {
    pub(crate) surfaces: Option<SurfaceSet>,
    pub(crate) history: History,
    pub(crate) style: BrushStyle,
    pub(crate) tool: ToolKind,
    pub(crate) session: ToolSession,
    pub(crate) background: Background,
    pub(crate) settings: EngineSettings,
    pub(crate) urls: ObjectUrls,
    on_image_generated: Option<ImageGenerated>,
    pointer_down: bool,
}

impl CanvasEngine {
    /// Mounts the engine with the given options and settings.
    ///
    /// A zero width or height defers surface creation until
    /// [`initialize`](Self::initialize) or [`resize`](Self::resize) provides a
    /// real size.
    pub fn mount(options: MountOptions, settings: EngineSettings) -> Self {
        let style = BrushStyle {
            color: options.color,
            size: options
                .brush_size
                .clamp(settings.min_brush_size, settings.max_brush_size),
            filled: settings.fill_shapes,
            font: settings.font.clone(),
            font_size: settings.font_size,
        };
        let mut engine = Self {
            surfaces: None,
            history: History::new(settings.history_depth),
            style,
            tool: options.tool,
            session: ToolSession::Idle,
            background: options.background,
            settings,
            urls: ObjectUrls::new(),
            on_image_generated: None,
            pointer_down: false,
        };
        engine.initialize(options.width, options.height);
        engine
    }

    /// Registers the callback receiving every saved image.
    pub fn set_on_image_generated(&mut self, callback: impl FnMut(&ImageFile, &ObjectUrl) + 'static) {
        self.on_image_generated = Some(Box::new(callback));
    }

    // ------------------------------------------------------------------
    // Surface management
    // ------------------------------------------------------------------

    /// (Re)creates both surfaces, transparent, and restarts history from the
    /// blank state.
    pub fn initialize(&mut self, width: u32, height: u32) {
        match SurfaceSet::create(width, height) {
            Ok(Some(surfaces)) => {
                if let Err(err) = self.history.reset(surfaces.committed()) {
                    log::error!("Failed to record initial history state: {err}");
                }
                self.session = ToolSession::Idle;
                self.pointer_down = false;
                self.surfaces = Some(surfaces);
            }
            Ok(None) => {}
            Err(err) => log::error!("Failed to create {width}x{height} surfaces: {err}"),
        }
    }

    /// Resizes the surfaces, keeping the committed artwork at the origin.
    ///
    /// Before the first non-zero size this behaves like
    /// [`initialize`](Self::initialize). A zero size keeps the current
    /// surfaces. Any in-progress gesture is dropped with the old overlay.
    pub fn resize(&mut self, width: u32, height: u32) {
        let Some(current) = &self.surfaces else {
            self.initialize(width, height);
            return;
        };
        if current.width() == width as i32 && current.height() == height as i32 {
            return;
        }
        match current.resized(width, height) {
            Ok(Some(next)) => {
                self.session = ToolSession::Idle;
                self.pointer_down = false;
                self.surfaces = Some(next);
            }
            Ok(None) => log::debug!("Ignoring resize to {width}x{height}"),
            Err(err) => log::error!("Failed to resize canvas to {width}x{height}: {err}"),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.surfaces.is_some()
    }

    pub fn surfaces(&self) -> Option<&SurfaceSet> {
        self.surfaces.as_ref()
    }

    /// Size of the surfaces, `None` while deferred.
    pub fn size(&self) -> Option<(u32, u32)> {
        self.surfaces
            .as_ref()
            .map(|s| (s.width() as u32, s.height() as u32))
    }

    /// Composes background, committed artwork and preview for display.
    pub fn compose(&self) -> Result<ImageSurface, CanvasError> {
        let surfaces = self.surfaces.as_ref().ok_or(CanvasError::NotReady)?;
        surfaces.compose(&self.background)
    }

    pub fn background(&self) -> &Background {
        &self.background
    }

    pub fn set_background(&mut self, background: Background) {
        log::debug!("Background set to {background}");
        self.background = background;
    }

    // ------------------------------------------------------------------
    // Tool and style state
    // ------------------------------------------------------------------

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn session(&self) -> &ToolSession {
        &self.session
    }

    pub fn style(&self) -> &BrushStyle {
        &self.style
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Switches the active tool, discarding any in-progress gesture.
    pub fn set_tool(&mut self, tool: ToolKind) {
        if tool == self.tool {
            return;
        }
        self.reset_session();
        log::debug!("Tool {} -> {}", self.tool, tool);
        self.tool = tool;
    }

    pub fn set_color(&mut self, color: Color) {
        self.style.color = color;
    }

    /// Sets the brush color from a `#rrggbb` string.
    pub fn set_color_hex(&mut self, hex: &str) -> Result<(), CanvasError> {
        self.style.color = hex.parse()?;
        Ok(())
    }

    /// Current brush color as `#rrggbb`.
    pub fn color_hex(&self) -> String {
        self.style.color.to_hex()
    }

    /// Sets the stroke width, clamped to the configured range.
    pub fn set_brush_size(&mut self, size: f64) {
        self.style.size = size.clamp(self.settings.min_brush_size, self.settings.max_brush_size);
    }

    pub fn adjust_brush_size(&mut self, delta: f64) {
        self.set_brush_size(self.style.size + delta);
    }

    pub fn set_fill_mode(&mut self, filled: bool) {
        self.style.filled = filled;
    }

    pub fn toggle_fill_mode(&mut self) {
        self.style.filled = !self.style.filled;
        log::debug!("Fill mode {}", if self.style.filled { "on" } else { "off" });
    }

    pub fn adjust_font_size(&mut self, delta: f64) {
        self.style.font_size = (self.style.font_size + delta).clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
        self.redraw_text_preview();
    }

    // ------------------------------------------------------------------
    // Gesture dispatch
    // ------------------------------------------------------------------

    /// Runs `f` against the tool context, applying its outcome.
    ///
    /// Errors are logged and swallowed so a failing tool never stalls input.
    fn with_tool<F>(&mut self, modifiers: Modifiers, what: &str, f: F)
    where
        F: FnOnce(&mut ToolContext<'_>, &mut ToolSession) -> Result<ToolOutcome, CanvasError>,
    {
        let Some(surfaces) = self.surfaces.as_mut() else {
            log::debug!("Surface not ready, ignoring {what}");
            return;
        };
        let mut ctx = ToolContext {
            surfaces,
            style: &self.style,
            modifiers,
            fill_tolerance: self.settings.fill_tolerance,
        };
        let outcome = match f(&mut ctx, &mut self.session) {
            Ok(outcome) => outcome,
            Err(err) => {
                log::warn!("{} tool failed during {what}: {err}", self.tool);
                return;
            }
        };
        self.apply_outcome(outcome);
    }

    fn apply_outcome(&mut self, outcome: ToolOutcome) {
        match outcome {
            ToolOutcome::None => {}
            ToolOutcome::Committed => self.record_history(),
            ToolOutcome::PickedColor(color) => {
                log::debug!("Picked color {color}");
                self.style.color = color;
                self.set_tool(ToolKind::Brush);
            }
        }
    }

    fn record_history(&mut self) {
        let Some(surfaces) = &self.surfaces else {
            return;
        };
        if let Err(err) = self.history.snapshot(surfaces.committed()) {
            log::error!("Failed to snapshot canvas: {err}");
        }
    }

    /// Pointer pressed at surface-local `point`.
    pub fn pointer_down(&mut self, point: Point, modifiers: Modifiers) {
        if !self.is_ready() {
            log::debug!("Surface not ready, ignoring press");
            return;
        }
        self.pointer_down = true;
        let begin = handlers::handlers_for(self.tool).begin;
        self.with_tool(modifiers, "press", |ctx, session| begin(ctx, session, point));
    }

    /// Pointer moved to surface-local `point`.
    ///
    /// Ignored unless a gesture is active and either the button is held or
    /// the gesture follows the hovering cursor.
    pub fn pointer_move(&mut self, point: Point, modifiers: Modifiers) {
        if self.session.is_idle() || !(self.pointer_down || self.session.tracks_hover()) {
            return;
        }
        let update = handlers::handlers_for(self.tool).update;
        self.with_tool(modifiers, "move", |ctx, session| update(ctx, session, point));
    }

    /// Pointer released at surface-local `point`.
    pub fn pointer_up(&mut self, point: Point, modifiers: Modifiers) {
        if !std::mem::replace(&mut self.pointer_down, false) {
            return;
        }
        if self.session.is_idle() {
            return;
        }
        let finish = handlers::handlers_for(self.tool).finish;
        self.with_tool(modifiers, "release", |ctx, session| finish(ctx, session, point));
    }

    /// Double click at surface-local `point`.
    pub fn double_click(&mut self, point: Point, modifiers: Modifiers) {
        let double_click = handlers::handlers_for(self.tool).double_click;
        self.with_tool(modifiers, "double click", |ctx, session| {
            double_click(ctx, session, point)
        });
    }

    /// Re-runs the active preview with the last cursor after a modifier
    /// change, so Shift snaps without waiting for pointer motion.
    pub fn modifiers_changed(&mut self, modifiers: Modifiers) {
        if !matches!(
            self.session,
            ToolSession::Line { .. } | ToolSession::Shape { .. }
        ) {
            return;
        }
        let Some(cursor) = self.session.cursor() else {
            return;
        };
        let update = handlers::handlers_for(self.tool).update;
        self.with_tool(modifiers, "modifier change", |ctx, session| {
            update(ctx, session, cursor)
        });
    }

    /// Escape: abandons the in-progress gesture without touching the
    /// committed surface. Returns whether anything was cancelled.
    ///
    /// Brush/eraser strokes are drawn straight onto the committed surface, so
    /// cancelling one only ends it; the painted part stays and is recorded.
    pub fn cancel(&mut self) -> bool {
        match &self.session {
            ToolSession::Idle => false,
            ToolSession::Stroke { .. } => {
                self.session = ToolSession::Idle;
                self.pointer_down = false;
                self.record_history();
                true
            }
            _ => {
                log::debug!("Cancelled {} gesture", self.tool);
                self.reset_session();
                true
            }
        }
    }

    /// Drops the current gesture and clears the overlay.
    fn reset_session(&mut self) {
        if matches!(self.session, ToolSession::Stroke { .. }) {
            self.session = ToolSession::Idle;
            self.record_history();
        }
        self.session = ToolSession::Idle;
        self.pointer_down = false;
        if let Some(surfaces) = &self.surfaces
            && let Err(err) = surfaces.clear_overlay()
        {
            log::warn!("Failed to clear overlay: {err}");
        }
    }

    // ------------------------------------------------------------------
    // Text entry
    // ------------------------------------------------------------------

    pub fn text_entry_open(&self) -> bool {
        self.session.is_text_entry()
    }

    /// Current text entry buffer, if one is open.
    pub fn text_buffer(&self) -> Option<&str> {
        match &self.session {
            ToolSession::Text { buffer, .. } => Some(buffer),
            _ => None,
        }
    }

    /// Appends `text` to the open text entry.
    pub fn text_insert(&mut self, text: &str) {
        if let ToolSession::Text { buffer, .. } = &mut self.session {
            buffer.push_str(text);
            self.redraw_text_preview();
        }
    }

    /// Removes the last character of the open text entry.
    pub fn text_backspace(&mut self) {
        if let ToolSession::Text { buffer, .. } = &mut self.session {
            buffer.pop();
            self.redraw_text_preview();
        }
    }

    /// Draws the open text entry onto the committed surface.
    pub fn submit_text(&mut self) {
        if !self.text_entry_open() {
            return;
        }
        self.with_tool(Modifiers::default(), "text submit", handlers::submit_text);
    }

    fn redraw_text_preview(&mut self) {
        if !self.text_entry_open() {
            return;
        }
        self.with_tool(Modifiers::default(), "text preview", |ctx, session| {
            handlers::draw_text_preview(ctx, session).map(|_| ToolOutcome::None)
        });
    }

    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Restores the previous state. Returns whether anything changed.
    pub fn undo(&mut self) -> bool {
        self.reset_session();
        let Some(surfaces) = &self.surfaces else {
            return false;
        };
        match self.history.undo(surfaces.committed()) {
            Ok(changed) => changed,
            Err(err) => {
                log::error!("Undo failed, canvas left unchanged: {err}");
                false
            }
        }
    }

    /// Re-applies the last undone state. Returns whether anything changed.
    pub fn redo(&mut self) -> bool {
        self.reset_session();
        let Some(surfaces) = &self.surfaces else {
            return false;
        };
        match self.history.redo(surfaces.committed()) {
            Ok(changed) => changed,
            Err(err) => {
                log::error!("Redo failed, canvas left unchanged: {err}");
                false
            }
        }
    }

    /// Erases the committed artwork as one undoable action.
    pub fn clear(&mut self) {
        self.reset_session();
        let Some(surfaces) = &self.surfaces else {
            return;
        };
        if let Err(err) = surfaces.committed().clear() {
            log::warn!("Failed to clear canvas: {err}");
            return;
        }
        self.record_history();
    }

    // ------------------------------------------------------------------
    // Export
    // ------------------------------------------------------------------

    pub fn object_urls(&self) -> &ObjectUrls {
        &self.urls
    }

    pub fn object_urls_mut(&mut self) -> &mut ObjectUrls {
        &mut self.urls
    }

    /// Renders the committed artwork `scale` times larger as a named PNG and
    /// registers a revocable URL for it.
    pub fn export_image(&mut self, scale: f64) -> Result<(ImageFile, ObjectUrl), CanvasError> {
        let surfaces = self.surfaces.as_ref().ok_or(CanvasError::NotReady)?;
        let png = surfaces.export_png(scale)?;
        let bytes: Rc<[u8]> = Rc::from(png);
        let file = ImageFile {
            name: generate_filename(&self.settings.filename_template, "png"),
            mime: PNG_MIME,
            bytes: bytes.clone(),
        };
        let url = self.urls.create(bytes);
        Ok((file, url))
    }

    /// Exports at the configured scale and hands the image to the
    /// image-generated callback. Returns false (and skips the callback) when
    /// the export fails.
    pub fn save(&mut self) -> bool {
        let (file, url) = match self.export_image(self.settings.export_scale) {
            Ok(exported) => exported,
            Err(err) => {
                log::warn!("Save failed, no image generated: {err}");
                return false;
            }
        };
        log::info!("Generated {} ({} bytes) as {url}", file.name, file.bytes.len());
        match self.on_image_generated.as_mut() {
            Some(callback) => callback(&file, &url),
            None => log::debug!("No image-generated callback registered"),
        }
        true
    }
}
