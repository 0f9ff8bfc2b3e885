//! # Configuration
//!
//! This module defines the configuration struct for the Editor.

use glam::Vec4;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Configuration parameters for the Editor.
///
/// The grid dimensions are fixed for the editor's lifetime; a different size
/// needs a new editor.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Grid width in cells. Default: 16.
    pub width: u32,
    /// Grid height in cells. Default: 16.
    pub height: u32,
    /// Size of one cell in screen pixels. Default: 24.0.
    pub dot_size: f32,
    /// Number of undo snapshots kept, including the current state. Default: 100.
    pub max_history: usize,
    /// Whether grid lines are drawn. Default: true.
    pub show_grid: bool,
    /// Visual styling configuration.
    #[serde(default)]
    pub style: EditorStyle,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            width: 16,
            height: 16,
            dot_size: 24.0,
            max_history: 100,
            show_grid: true,
            style: EditorStyle::default(),
        }
    }
}

impl EditorConfig {
    /// Convenience constructor for a `width x height` grid with default styling.
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidConfig(format!(
                "grid must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }
        if !(self.dot_size.is_finite() && self.dot_size > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "dot_size must be positive, got {}",
                self.dot_size
            )));
        }
        Ok(())
    }
}

/// Visual styling for the derived presentation layers.
///
/// It uses `glam::Vec4` for RGBA colors in `0.0..=1.0`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EditorStyle {
    /// Light checkerboard square behind transparent cells.
    pub background_light: Vec4,
    /// Dark checkerboard square behind transparent cells.
    pub background_dark: Vec4,
    /// Color of the grid lines.
    pub grid_color: Vec4,
    /// Width of the grid lines in screen pixels.
    pub grid_width: f32,
    /// Opacity of the hover indicator cell.
    pub hover_alpha: f32,
}

impl Default for EditorStyle {
    fn default() -> Self {
        Self {
            background_light: Vec4::new(1.0, 1.0, 1.0, 0.1),
            background_dark: Vec4::new(0.0, 0.0, 0.0, 0.1),
            // #0ea5e9
            grid_color: Vec4::new(14.0 / 255.0, 165.0 / 255.0, 233.0 / 255.0, 1.0),
            grid_width: 0.5,
            hover_alpha: 0.6,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(EditorConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_sized_grid_is_rejected() {
        let err = EditorConfig::with_size(0, 8).validate().unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn style_is_optional_in_json() {
        let json = r#"{"width":8,"height":4,"dot_size":10.0,"max_history":5,"show_grid":false}"#;
        let config: EditorConfig = serde_json::from_str(json).unwrap();
        assert_eq!((config.width, config.height), (8, 4));
        assert_eq!(config.style.hover_alpha, 0.6);
    }
}
