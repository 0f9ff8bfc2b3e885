//! # PixelCanvas
//!
//! `pixel_canvas` is a headless pixel-art engine. It owns one authoritative
//! pixel buffer, rasterizes pointer strokes and fills onto it, keeps an
//! undo/redo history and saves artwork in a compact run-length blob. Rendering
//! is delegated to the host application.
//!
//! ## Core Architecture
//! - **Buffer (`src/buffer.rs`)**: The fixed-size grid of packed RGBA cells.
//! - **Interaction (`src/interaction.rs`)**: The pointer state machine (Idle / Drawing).
//! - **Persistence (`src/persistence.rs`)**: The versioned artwork blob.
//! - **Render (`src/render.rs`)**: Outputs a list of `DrawCommand`s for the host to render.

pub mod buffer;
pub mod color;
pub mod config;
pub mod error;
pub mod fill;
pub mod history;
pub mod input;
pub mod interaction;
pub mod math;
pub mod painter;
pub mod palette;
pub mod persistence;
pub mod render;
pub mod rle;
pub mod view;

use glam::Vec2;
use history::HistoryManager;
use painter::{Hover, Painter};
use render::RenderList;
use view::View;

// Re-exports for convenience
pub use buffer::{PixelBuffer, Snapshot};
pub use color::Rgba;
pub use config::{EditorConfig, EditorStyle};
pub use error::{Error, Result};
pub use input::{PaintMode, PointerEvent, PointerKind};
pub use interaction::{EditorEvent, InteractionMode, ToolState};
pub use math::GridPos;
pub use palette::ColorPalette;
pub use persistence::Artwork;

/// The main entry point for the library.
///
/// An `Editor` owns the pixel buffer for one editing session together with the
/// tool selection, palette, undo history and hover indicator. Hosts feed it
/// pointer events and UI commands, and redraw whenever an
/// [`EditorEvent::BufferChanged`] comes back.
///
/// Every method runs to completion before returning, so events are observed
/// in the order they were submitted.
pub struct Editor {
    /// Configuration settings.
    pub config: EditorConfig,
    /// Placement of the grid on screen.
    pub view: View,
    buffer: PixelBuffer,
    tool: ToolState,
    palette: ColorPalette,
    interaction_mode: InteractionMode,
    history: HistoryManager<Snapshot>,
    hover: Option<Hover>,
    show_grid: bool,
}

impl Editor {
    /// Creates an editor with a blank buffer of the configured size.
    pub fn new(config: EditorConfig) -> Result<Self> {
        config.validate()?;

        let buffer = PixelBuffer::new(config.width, config.height);
        let mut history = HistoryManager::new(config.max_history);
        history.reset(buffer.snapshot());

        let palette = ColorPalette::new();
        tracing::info!(
            width = config.width,
            height = config.height,
            "Editor created"
        );

        Ok(Self {
            view: View::new(config.dot_size, Vec2::ZERO),
            show_grid: config.show_grid,
            tool: ToolState {
                paint_mode: PaintMode::default(),
                color: palette.current(),
            },
            palette,
            interaction_mode: InteractionMode::Idle,
            hover: None,
            buffer,
            history,
            config,
        })
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    pub fn palette(&self) -> &ColorPalette {
        &self.palette
    }

    pub fn interaction_mode(&self) -> InteractionMode {
        self.interaction_mode
    }

    /// Processes one pointer event in grid coordinates.
    ///
    /// A down that arrives mid-stroke (the pointer-up was lost) first records
    /// the open stroke, so it keeps its own undo step.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Vec<EditorEvent> {
        let mut events = match event.kind {
            PointerKind::Down => self.end_stroke(),
            PointerKind::Move | PointerKind::Up => Vec::new(),
        };
        let from = events.len();
        interaction::handle_pointer(
            &mut self.interaction_mode,
            &mut self.buffer,
            &self.tool,
            event,
            &mut events,
        );
        self.settle(&mut events, from);
        events
    }

    /// Processes a pointer event given in screen pixels.
    pub fn handle_screen_pointer(
        &mut self,
        kind: PointerKind,
        screen_pos: Vec2,
    ) -> Vec<EditorEvent> {
        let pos = self.view.screen_to_grid(screen_pos);
        self.handle_pointer(PointerEvent { kind, pos })
    }

    /// The pointer left the drawing surface. Hides the hover indicator.
    pub fn pointer_leave(&mut self) -> Vec<EditorEvent> {
        if self.hover.take().is_some() {
            vec![EditorEvent::HoverLeft]
        } else {
            Vec::new()
        }
    }

    pub fn paint_mode(&self) -> PaintMode {
        self.tool.paint_mode
    }

    pub fn set_paint_mode(&mut self, mode: PaintMode) {
        self.tool.paint_mode = mode;
    }

    /// The selected color.
    pub fn color(&self) -> Rgba {
        self.tool.color
    }

    /// Selects `color` and adds it to the palette.
    pub fn set_color(&mut self, color: Rgba) {
        self.palette.push(color);
        self.tool.color = self.palette.current();
    }

    /// Like [`Editor::set_color`], for `#rgb`, `#rrggbb` or `#rrggbbaa`
    /// strings from a color picker. Returns the selected (opaque) color.
    pub fn set_color_hex(&mut self, input: &str) -> Result<Rgba> {
        let color = Rgba::parse_hex(input)?;
        self.set_color(color);
        Ok(self.tool.color)
    }

    /// Selects the palette entry at `index`, if there is one.
    pub fn select_palette(&mut self, index: usize) -> Option<Rgba> {
        let color = self.palette.select(index)?;
        self.tool.color = color;
        Some(color)
    }

    /// The value a click would write right now.
    pub fn active_color(&self) -> Rgba {
        self.tool.active_color()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo(&mut self) -> Vec<EditorEvent> {
        let mut events = self.end_stroke();
        let Some(snapshot) = self.history.undo().cloned() else {
            return events;
        };
        self.apply_snapshot(&snapshot, &mut events);
        tracing::debug!("Undo");
        events
    }

    pub fn redo(&mut self) -> Vec<EditorEvent> {
        let mut events = self.end_stroke();
        let Some(snapshot) = self.history.redo().cloned() else {
            return events;
        };
        self.apply_snapshot(&snapshot, &mut events);
        tracing::debug!("Redo");
        events
    }

    /// Resets every cell to transparent. Recorded in history like any edit.
    pub fn clear(&mut self) -> Vec<EditorEvent> {
        let mut events = self.end_stroke();
        if self.buffer.is_blank() {
            return events;
        }
        self.buffer.clear();
        tracing::info!("Canvas cleared");
        let from = events.len();
        events.push(EditorEvent::BufferChanged);
        events.push(EditorEvent::EditFinished);
        self.settle(&mut events, from);
        events
    }

    /// Serializes the current buffer to the artwork blob.
    pub fn export_blob(&self) -> Vec<u32> {
        let blob =
            persistence::compress(self.buffer.cells(), self.buffer.width(), self.buffer.height());
        tracing::info!(words = blob.len(), "Artwork exported");
        blob
    }

    /// Loads a saved artwork blob.
    ///
    /// Artwork of a different size is rejected with
    /// [`Error::DimensionMismatch`] and the buffer is left untouched, as it is
    /// for any decoding error.
    pub fn load_blob(&mut self, blob: &[u32]) -> Result<Vec<EditorEvent>> {
        let incoming = persistence::decompress(blob)?.into_buffer()?;
        let expected = (self.buffer.width(), self.buffer.height());
        let found = (incoming.width(), incoming.height());
        if found != expected {
            tracing::warn!(?found, ?expected, "Artwork size does not match the editor");
            return Err(Error::DimensionMismatch { expected, found });
        }
        let events = self.load_pixels(incoming.cells())?;
        tracing::info!(words = blob.len(), "Artwork loaded");
        Ok(events)
    }

    /// Replaces the buffer with raw row-major pixels of the same size.
    pub fn load_pixels(&mut self, pixels: &[u32]) -> Result<Vec<EditorEvent>> {
        let expected = self.buffer.cells().len();
        if pixels.len() != expected {
            return Err(Error::PixelCountMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        let mut events = self.end_stroke();
        let before = self.buffer.snapshot();
        self.buffer.replace_cells(pixels)?;
        if !self.buffer.matches(&before) {
            let from = events.len();
            events.push(EditorEvent::BufferChanged);
            events.push(EditorEvent::EditFinished);
            self.settle(&mut events, from);
        }
        Ok(events)
    }

    /// Flips grid line visibility and returns the new setting.
    pub fn toggle_grid(&mut self) -> bool {
        self.show_grid = !self.show_grid;
        self.show_grid
    }

    pub fn show_grid(&self) -> bool {
        self.show_grid
    }

    /// Generates the draw commands for the current frame.
    pub fn render(&self) -> RenderList {
        Painter::draw(
            &self.view,
            &self.config.style,
            &self.buffer,
            self.hover,
            self.show_grid,
        )
    }

    /// Finishes a stroke left open by a lost pointer-up so it is recorded
    /// before any other command touches history.
    fn end_stroke(&mut self) -> Vec<EditorEvent> {
        let mut events = Vec::new();
        if let InteractionMode::Drawing { .. } = self.interaction_mode {
            self.interaction_mode = InteractionMode::Idle;
            events.push(EditorEvent::EditFinished);
            self.settle(&mut events, 0);
        }
        events
    }

    fn apply_snapshot(&mut self, snapshot: &Snapshot, events: &mut Vec<EditorEvent>) {
        if let Err(err) = self.buffer.restore(snapshot) {
            tracing::error!(%err, "History snapshot does not fit the buffer");
            return;
        }
        events.push(EditorEvent::BufferChanged);
        events.push(self.history_changed());
    }

    /// Applies the side effects of the events from `from` onwards: tracks the
    /// hover indicator and records finished edits in history.
    fn settle(&mut self, events: &mut Vec<EditorEvent>, from: usize) {
        let mut committed = false;
        for event in &events[from..] {
            match event {
                EditorEvent::HoverMoved { pos, color } => {
                    self.hover = Some(Hover {
                        pos: *pos,
                        color: *color,
                    });
                }
                EditorEvent::HoverLeft => self.hover = None,
                EditorEvent::EditFinished => {
                    committed |= self.history.commit(self.buffer.snapshot());
                }
                _ => {}
            }
        }
        if committed {
            events.push(self.history_changed());
        }
    }

    fn history_changed(&self) -> EditorEvent {
        EditorEvent::HistoryChanged {
            can_undo: self.history.can_undo(),
            can_redo: self.history.can_redo(),
        }
    }
}
