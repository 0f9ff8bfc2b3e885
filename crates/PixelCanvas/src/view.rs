//! # Viewport System
//!
//! This module maps between Screen Space (pixels in the host's drawing area) and
//! Grid Space (cells of the pixel buffer). Each cell is drawn as a `dot_size`
//! square starting at `origin`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::math::GridPos;

/// Placement of the grid on screen.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct View {
    /// Size of one cell in screen pixels.
    pub dot_size: f32,
    /// Screen position of the grid's top-left corner.
    pub origin: Vec2,
}

impl Default for View {
    fn default() -> Self {
        Self {
            dot_size: 24.0,
            origin: Vec2::ZERO,
        }
    }
}

impl View {
    /// Creates a new View system.
    pub fn new(dot_size: f32, origin: Vec2) -> Self {
        Self { dot_size, origin }
    }

    /// Converts a point from **Screen Space** to the cell under it.
    ///
    /// Formula: `Cell = trunc((Screen - Origin) / DotSize)`. Truncation goes
    /// toward zero, so points just left of or above the grid land on row or
    /// column 0; points further out land outside and are ignored by the buffer.
    pub fn screen_to_grid(&self, screen_pos: Vec2) -> GridPos {
        let local = (screen_pos - self.origin) / self.dot_size;
        GridPos::new(local.x.trunc() as i32, local.y.trunc() as i32)
    }

    /// Top-left corner of a cell in **Screen Space**.
    ///
    /// Formula: `Screen = Cell * DotSize + Origin`
    pub fn grid_to_screen(&self, pos: GridPos) -> Vec2 {
        Vec2::new(pos.x as f32, pos.y as f32) * self.dot_size + self.origin
    }

    /// Screen size of a `width x height` grid.
    pub fn client_size(&self, width: u32, height: u32) -> Vec2 {
        Vec2::new(width as f32, height as f32) * self.dot_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_maps_to_cells() {
        let view = View::new(10.0, Vec2::new(5.0, 5.0));
        assert_eq!(view.screen_to_grid(Vec2::new(5.0, 5.0)), GridPos::new(0, 0));
        assert_eq!(view.screen_to_grid(Vec2::new(24.9, 36.0)), GridPos::new(1, 3));
        assert_eq!(view.screen_to_grid(Vec2::new(0.0, 5.0)), GridPos::new(0, 0));
        assert_eq!(view.screen_to_grid(Vec2::new(-10.0, 5.0)), GridPos::new(-1, 0));
    }

    #[test]
    fn cells_map_back_to_their_corner() {
        let view = View::new(8.0, Vec2::ZERO);
        assert_eq!(view.grid_to_screen(GridPos::new(2, 3)), Vec2::new(16.0, 24.0));
        assert_eq!(view.client_size(16, 8), Vec2::new(128.0, 64.0));
    }
}
