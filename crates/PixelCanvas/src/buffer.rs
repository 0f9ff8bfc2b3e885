//! # Pixel Buffer
//!
//! The single authoritative store of artwork: a flat, row-major array of packed
//! colors for a fixed `width x height` grid. Everything the host displays is
//! derived from it; nothing else holds pixel state.

use crate::error::{Error, Result};
use crate::math::GridPos;

/// A fixed-size grid of packed RGBA cells.
///
/// Index `(x, y)` lives at `y * width + x`. Dimensions never change after
/// construction; build a new buffer for a new size.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    cells: Vec<u32>,
}

/// An immutable copy of a buffer's cells, as kept by the undo history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    cells: Box<[u32]>,
}

impl Snapshot {
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }
}

impl PixelBuffer {
    /// Creates a fully transparent buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![0; width as usize * height as usize],
        }
    }

    /// Wraps existing cells. The length must be exactly `width * height`.
    pub fn from_cells(width: u32, height: u32, cells: Vec<u32>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if cells.len() != expected {
            return Err(Error::PixelCountMismatch {
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major cell storage.
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    /// Bounds check. Anything left of or above the origin, or at/after the
    /// far edge, is outside.
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        self.contains(x, y)
            .then(|| y as usize * self.width as usize + x as usize)
    }

    /// Writes `color` at `(x, y)`. Out-of-bounds writes are silently dropped.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, color: u32) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = color;
        }
    }

    /// Reads the color at `(x, y)`, or `None` outside the grid. A transparent
    /// cell inside the grid reads as `Some(0)`.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|i| self.cells[i])
    }

    pub fn set_at(&mut self, pos: GridPos, color: u32) {
        self.set(pos.x, pos.y, color);
    }

    pub fn get_at(&self, pos: GridPos) -> Option<u32> {
        self.get(pos.x, pos.y)
    }

    /// Resets every cell to transparent black.
    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    /// True when no cell has been painted.
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|&c| c == 0)
    }

    /// Replaces all cells at once. The length must match the grid.
    pub fn replace_cells(&mut self, cells: &[u32]) -> Result<()> {
        if cells.len() != self.cells.len() {
            return Err(Error::PixelCountMismatch {
                expected: self.cells.len(),
                actual: cells.len(),
            });
        }
        self.cells.copy_from_slice(cells);
        Ok(())
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            cells: self.cells.clone().into_boxed_slice(),
        }
    }

    /// Restores cells from a snapshot taken from a buffer of the same size.
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<()> {
        self.replace_cells(snapshot.cells())
    }

    /// True when the buffer currently holds exactly the snapshot's cells.
    pub fn matches(&self, snapshot: &Snapshot) -> bool {
        *self.cells == *snapshot.cells
    }

    /// Raw RGBA8 bytes, row-major, ready to upload as a texture.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.cells.iter().flat_map(|c| c.to_le_bytes()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_is_transparent() {
        let buf = PixelBuffer::new(4, 3);
        assert_eq!(buf.cells().len(), 12);
        assert!(buf.is_blank());
    }

    #[test]
    fn set_and_get_use_row_major_index() {
        let mut buf = PixelBuffer::new(4, 3);
        buf.set(1, 2, 0xDEAD_BEEF);
        assert_eq!(buf.get(1, 2), Some(0xDEAD_BEEF));
        assert_eq!(buf.cells()[2 * 4 + 1], 0xDEAD_BEEF);
    }

    #[test]
    fn out_of_bounds_is_absent_and_writes_are_dropped() {
        let mut buf = PixelBuffer::new(4, 3);
        for &(x, y) in &[(-1, 0), (0, -1), (4, 0), (0, 3), (i32::MIN, i32::MAX)] {
            assert!(!buf.contains(x, y));
            assert_eq!(buf.get(x, y), None);
            buf.set(x, y, 7);
        }
        assert!(buf.is_blank());
    }

    #[test]
    fn clear_resets_every_cell() {
        let mut buf = PixelBuffer::new(2, 2);
        buf.set(0, 0, 1);
        buf.set(1, 1, 2);
        buf.clear();
        assert!(buf.is_blank());
    }

    #[test]
    fn snapshot_restore() {
        let mut buf = PixelBuffer::new(2, 2);
        buf.set(0, 1, 9);
        let snap = buf.snapshot();
        buf.clear();
        assert!(!buf.matches(&snap));
        buf.restore(&snap).unwrap();
        assert_eq!(buf.get(0, 1), Some(9));
        assert!(buf.matches(&snap));
    }

    #[test]
    fn from_cells_checks_length() {
        assert!(PixelBuffer::from_cells(2, 2, vec![0; 4]).is_ok());
        assert_eq!(
            PixelBuffer::from_cells(2, 2, vec![0; 3]),
            Err(Error::PixelCountMismatch {
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn rgba_bytes_follow_channel_order() {
        let mut buf = PixelBuffer::new(1, 1);
        buf.set(0, 0, u32::from_le_bytes([1, 2, 3, 4]));
        assert_eq!(buf.to_rgba_bytes(), vec![1, 2, 3, 4]);
    }
}
