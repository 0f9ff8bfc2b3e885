//! # Color Palette

use serde::{Deserialize, Serialize};

use crate::color::Rgba;

/// The user's working set of colors plus the one currently selected.
///
/// Colors are stored opaque; the palette never holds transparency.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPalette {
    current: Rgba,
    colors: Vec<Rgba>,
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self {
            current: Rgba::BLACK,
            colors: vec![Rgba::BLACK],
        }
    }
}

impl ColorPalette {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Rgba {
        self.current
    }

    pub fn colors(&self) -> &[Rgba] {
        &self.colors
    }

    /// Selects `color`, adding it to the palette if it is not there yet.
    pub fn push(&mut self, color: Rgba) {
        let color = color.opaque();
        self.current = color;
        if !self.colors.contains(&color) {
            self.colors.push(color);
        }
    }

    /// Removes `color`. If it was selected, the first remaining entry becomes
    /// current; an emptied palette falls back to black.
    pub fn remove(&mut self, color: Rgba) {
        let color = color.opaque();
        self.colors.retain(|&c| c != color);
        if self.current == color {
            self.current = self.colors.first().copied().unwrap_or(Rgba::BLACK);
        }
    }

    /// Selects the entry at `index`. Returns the selection, if the index exists.
    pub fn select(&mut self, index: usize) -> Option<Rgba> {
        let color = *self.colors.get(index)?;
        self.current = color;
        Some(color)
    }
}
