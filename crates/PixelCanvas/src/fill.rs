//! # Flood Fill
//!
//! Scanline, stack-based 4-connected fill. Each popped seed expands into the
//! widest horizontal span of the target color on its row; the rows above and
//! below the span contribute new seeds. The explicit stack keeps memory bounded
//! by the number of pending spans rather than by call depth.

use crate::buffer::PixelBuffer;

/// Fills the 4-connected region containing `(x, y)` with `fill_color`.
///
/// Returns the number of cells written. Nothing is written when the seed lies
/// outside the grid or already holds `fill_color`.
pub fn flood_fill(buffer: &mut PixelBuffer, x: i32, y: i32, fill_color: u32) -> usize {
    let Some(target) = buffer.get(x, y) else {
        return 0;
    };
    if target == fill_color {
        return 0;
    }

    let width = buffer.width() as i32;
    let height = buffer.height() as i32;
    let mut written = 0;
    let mut stack = vec![(x, y)];

    while let Some((sx, sy)) = stack.pop() {
        let mut west = sx;
        let mut east = sx;
        while west >= 0 && buffer.get(west, sy) == Some(target) {
            west -= 1;
        }
        while east < width && buffer.get(east, sy) == Some(target) {
            east += 1;
        }

        for cx in (west + 1)..east {
            buffer.set(cx, sy, fill_color);
            written += 1;

            if sy > 0 && buffer.get(cx, sy - 1) == Some(target) {
                stack.push((cx, sy - 1));
            }
            if sy < height - 1 && buffer.get(cx, sy + 1) == Some(target) {
                stack.push((cx, sy + 1));
            }
        }
    }

    written
}
