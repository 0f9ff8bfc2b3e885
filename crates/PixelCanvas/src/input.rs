//! # Input Protocol
//!
//! This module defines the abstracted pointer events the host feeds to the editor.
//! Device and viewport coordinates are already translated into grid cells
//! (see [`crate::view::View::screen_to_grid`]).

use serde::{Deserialize, Serialize};

use crate::math::GridPos;

/// What a pointer-down does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaintMode {
    /// Write the current color at full opacity.
    #[default]
    Pen,
    /// Write transparent black.
    Erase,
    /// Flood fill the region under the pointer.
    Fill,
}

/// Phase of a pointer gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    Down,
    Move,
    Up,
}

/// A pointer event in grid coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub pos: GridPos,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, x: i32, y: i32) -> Self {
        Self {
            kind,
            pos: GridPos::new(x, y),
        }
    }

    pub fn down(x: i32, y: i32) -> Self {
        Self::new(PointerKind::Down, x, y)
    }

    pub fn moved(x: i32, y: i32) -> Self {
        Self::new(PointerKind::Move, x, y)
    }

    pub fn up(x: i32, y: i32) -> Self {
        Self::new(PointerKind::Up, x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_events_use_lowercase_wire_names() {
        let json = serde_json::to_string(&PointerEvent::down(2, 3)).unwrap();
        assert_eq!(json, r#"{"kind":"down","pos":{"x":2,"y":3}}"#);

        let mode: PaintMode = serde_json::from_str(r#""erase""#).unwrap();
        assert_eq!(mode, PaintMode::Erase);
    }
}
