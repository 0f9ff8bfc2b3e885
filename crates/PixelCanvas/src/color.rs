//! # Color Model
//!
//! Cells hold packed 32-bit colors whose bytes, in memory order, are R, G, B, A.
//! This is the layout of an RGBA8 image row, so a buffer can be blitted
//! without per-pixel conversion and serialized words stay host-independent.

use glam::Vec4;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// A packed RGBA color (`u32::from_le_bytes([r, g, b, a])`).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Rgba(pub u32);

impl Rgba {
    /// Fully transparent black. Erased and never-painted cells hold this value.
    pub const TRANSPARENT: Rgba = Rgba(0);
    pub const BLACK: Rgba = Rgba::from_rgb(0, 0, 0);
    pub const WHITE: Rgba = Rgba::from_rgb(255, 255, 255);

    pub const fn from_channels(r: u8, g: u8, b: u8, a: u8) -> Self {
        Rgba(u32::from_le_bytes([r, g, b, a]))
    }

    /// Opaque color from its three channels.
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self::from_channels(r, g, b, 255)
    }

    /// Converts the UI's packed `0xRRGGBB` integer. Alpha is implied opaque.
    pub const fn from_rgb_int(rgb: u32) -> Self {
        Self::from_rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    pub const fn channels(self) -> [u8; 4] {
        self.0.to_le_bytes()
    }

    pub const fn alpha(self) -> u8 {
        self.channels()[3]
    }

    /// Same color with alpha forced to 255.
    pub const fn opaque(self) -> Self {
        Rgba(self.0 | 0xFF00_0000)
    }

    pub const fn is_transparent(self) -> bool {
        self.alpha() == 0
    }

    /// `#rrggbb`, or `#rrggbbaa` when the color is not fully opaque.
    pub fn to_hex(self) -> String {
        let [r, g, b, a] = self.channels();
        if a == 255 {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }

    /// Parses `#rgb`, `#rrggbb` or `#rrggbbaa` (leading `#` optional).
    pub fn parse_hex(input: &str) -> Result<Self> {
        let digits = input.trim().trim_start_matches('#');
        let invalid = || Error::InvalidColor(input.to_string());

        // `#f0a` is shorthand for `#ff00aa`.
        let bytes = if digits.len() == 3 {
            let doubled: String = digits.chars().flat_map(|c| [c, c]).collect();
            hex::decode(doubled)
        } else {
            hex::decode(digits)
        }
        .map_err(|_| invalid())?;

        match bytes.as_slice() {
            &[r, g, b] => Ok(Self::from_rgb(r, g, b)),
            &[r, g, b, a] => Ok(Self::from_channels(r, g, b, a)),
            _ => Err(invalid()),
        }
    }

    /// Normalized color for draw commands.
    pub fn to_vec4(self) -> Vec4 {
        let [r, g, b, a] = self.channels();
        Vec4::new(r as f32, g as f32, b as f32, a as f32) / 255.0
    }
}

impl fmt::Debug for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rgba({})", self.to_hex())
    }
}

impl From<u32> for Rgba {
    fn from(value: u32) -> Self {
        Rgba(value)
    }
}

impl From<Rgba> for u32 {
    fn from(value: Rgba) -> Self {
        value.0
    }
}

/// Clamps a channel value into `0..=255`. Non-finite input yields 0.
pub fn clamp_rgb(value: f32) -> u8 {
    if value.is_finite() {
        value.round().clamp(0.0, 255.0) as u8
    } else {
        0
    }
}

/// Clamps an alpha value into `0.0..=1.0`. Non-finite input yields 0.
pub fn clamp_alpha(value: f32) -> f32 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
