//! # Interaction Logic
//!
//! The pointer state machine that turns Down/Move/Up into strokes and fills.

use serde::{Deserialize, Serialize};

use crate::buffer::PixelBuffer;
use crate::color::Rgba;
use crate::fill;
use crate::input::{PaintMode, PointerEvent, PointerKind};
use crate::math::{self, BresenhamLine, GridPos};

/// Events emitted by the Editor to the host application.
///
/// Every event that mutates the buffer is followed by exactly one
/// `BufferChanged`, pushed before the next input is accepted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum EditorEvent {
    /// The buffer changed and the host should redraw it.
    BufferChanged,
    /// The pointer is over `pos`; `color` is what a click would paint.
    HoverMoved { pos: GridPos, color: Rgba },
    /// The pointer left the drawing surface.
    HoverLeft,
    /// A gesture finished and its result may be recorded in history.
    EditFinished,
    /// Undo/redo availability after a history change.
    HistoryChanged { can_undo: bool, can_redo: bool },
}

/// The current state of user interaction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InteractionMode {
    /// No active interaction.
    #[default]
    Idle,
    /// A pen or eraser stroke is in progress.
    Drawing {
        /// Last cell painted by this stroke.
        last: GridPos,
    },
}

/// Paint mode and color as set by the host UI.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolState {
    pub paint_mode: PaintMode,
    /// Selected color. Its alpha is ignored; pen strokes are always opaque.
    pub color: Rgba,
}

impl ToolState {
    /// The value written into cells by the current tool.
    ///
    /// Erasing always writes transparent black so that erased cells are
    /// indistinguishable from never-painted ones in saved artwork.
    pub fn active_color(&self) -> Rgba {
        match self.paint_mode {
            PaintMode::Erase => Rgba::TRANSPARENT,
            PaintMode::Pen | PaintMode::Fill => self.color.opaque(),
        }
    }
}

/// Handles one pointer event and updates the buffer.
///
/// This function acts as the state machine for drawing. It processes the
/// event based on the current `InteractionMode`, transitions between states
/// and pushes `EditorEvent`s describing what happened.
///
/// - `Idle` + down with `Fill`: one flood fill, stays `Idle`.
/// - `Idle` + down with `Pen`/`Erase`: paints the cell, enters `Drawing`.
/// - `Drawing` + move: paints the line from the last cell, stays `Drawing`.
/// - `Drawing` + up: back to `Idle`.
/// - Moves while `Idle` only update the hover indicator.
pub fn handle_pointer(
    mode: &mut InteractionMode,
    buffer: &mut PixelBuffer,
    tool: &ToolState,
    event: PointerEvent,
    events: &mut Vec<EditorEvent>,
) {
    let color = tool.active_color();
    let pos = event.pos;

    let next_mode = match (*mode, event.kind) {
        (_, PointerKind::Down) => handle_down(buffer, tool, pos, events),
        (InteractionMode::Drawing { last }, PointerKind::Move) => {
            paint_line(buffer, last, pos, color.0);
            events.push(EditorEvent::HoverMoved { pos, color });
            events.push(EditorEvent::BufferChanged);
            Some(InteractionMode::Drawing { last: pos })
        }
        (InteractionMode::Idle, PointerKind::Move) => {
            events.push(EditorEvent::HoverMoved { pos, color });
            None
        }
        (InteractionMode::Drawing { last }, PointerKind::Up) => {
            tracing::debug!(x = last.x, y = last.y, "Stroke finished");
            events.push(EditorEvent::EditFinished);
            Some(InteractionMode::Idle)
        }
        (InteractionMode::Idle, PointerKind::Up) => None,
    };

    if let Some(new_mode) = next_mode {
        *mode = new_mode;
    }
}

/// Handles a pointer-down.
///
/// A down while already `Drawing` (the matching up was lost) starts a new
/// stroke at the new position instead of joining the two with a line.
/// [`crate::Editor::handle_pointer`] records the open stroke before that.
fn handle_down(
    buffer: &mut PixelBuffer,
    tool: &ToolState,
    pos: GridPos,
    events: &mut Vec<EditorEvent>,
) -> Option<InteractionMode> {
    let color = tool.active_color();
    events.push(EditorEvent::HoverMoved { pos, color });

    match tool.paint_mode {
        PaintMode::Fill => {
            let written = fill::flood_fill(buffer, pos.x, pos.y, color.0);
            tracing::debug!(x = pos.x, y = pos.y, cells = written, "Flood fill");
            events.push(EditorEvent::BufferChanged);
            if written > 0 {
                events.push(EditorEvent::EditFinished);
            }
            Some(InteractionMode::Idle)
        }
        PaintMode::Pen | PaintMode::Erase => {
            tracing::debug!(x = pos.x, y = pos.y, mode = ?tool.paint_mode, "Stroke started");
            buffer.set_at(pos, color.0);
            events.push(EditorEvent::BufferChanged);
            Some(InteractionMode::Drawing { last: pos })
        }
    }
}

/// Paints every cell from `from` to `to` inclusive.
///
/// The segment is clipped to the grid first, so the walk never visits more
/// cells than the grid holds however far off-grid the endpoints are.
fn paint_line(buffer: &mut PixelBuffer, from: GridPos, to: GridPos, color: u32) {
    let Some((from, to)) = math::clip_segment(from, to, buffer.width(), buffer.height()) else {
        return;
    };
    for cell in BresenhamLine::new(from, to) {
        buffer.set_at(cell, color);
    }
}
