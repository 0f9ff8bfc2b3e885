//! # Grid Geometry
//!
//! Integer cell coordinates and the line walk used to connect pointer samples.

use serde::{Deserialize, Serialize};

/// An integer cell coordinate on the pixel grid.
///
/// Coordinates are signed: interpolation near the edges routinely produces
/// positions outside the grid, and the buffer treats those as no-ops.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for GridPos {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Walks every cell on the segment between two grid positions, start and end
/// inclusive, using integer Bresenham stepping.
///
/// Pointer-move events arrive at a rate unrelated to the grid, so two
/// consecutive samples can be several cells apart. Painting every cell this
/// iterator yields closes those gaps.
///
/// The walk runs in `i64` so that any pair of `i32` endpoints is valid.
#[derive(Clone, Debug)]
pub struct BresenhamLine {
    x: i64,
    y: i64,
    end_x: i64,
    end_y: i64,
    dx: i64,
    dy: i64,
    sx: i64,
    sy: i64,
    err: i64,
    done: bool,
}

impl BresenhamLine {
    pub fn new(start: GridPos, end: GridPos) -> Self {
        let (x, y) = (i64::from(start.x), i64::from(start.y));
        let (end_x, end_y) = (i64::from(end.x), i64::from(end.y));
        let dx = (end_x - x).abs();
        let dy = (end_y - y).abs();
        Self {
            x,
            y,
            end_x,
            end_y,
            dx,
            dy,
            sx: if x < end_x { 1 } else { -1 },
            sy: if y < end_y { 1 } else { -1 },
            err: dx - dy,
            done: false,
        }
    }
}

impl Iterator for BresenhamLine {
    type Item = GridPos;

    fn next(&mut self) -> Option<GridPos> {
        if self.done {
            return None;
        }

        // Every visited cell lies between the two i32 endpoints.
        let cell = GridPos::new(self.x as i32, self.y as i32);
        if self.x == self.end_x && self.y == self.end_y {
            self.done = true;
            return Some(cell);
        }

        let e2 = 2 * self.err;
        if e2 > -self.dy {
            self.err -= self.dy;
            self.x += self.sx;
        }
        if e2 < self.dx {
            self.err += self.dx;
            self.y += self.sy;
        }
        Some(cell)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        // A Bresenham walk always takes max(dx, dy) + 1 steps from the start.
        let steps = (self.end_x - self.x)
            .unsigned_abs()
            .max((self.end_y - self.y).unsigned_abs());
        let remaining = usize::try_from(steps).map_or(usize::MAX, |n| n.saturating_add(1));
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BresenhamLine {}

/// Collects the cells between `start` and `end` inclusive, in walk order.
pub fn line(start: GridPos, end: GridPos) -> Vec<GridPos> {
    BresenhamLine::new(start, end).collect()
}

/// Clips the segment `from -> to` to the cells of a `width x height` grid
/// (Liang-Barsky). Returns `None` when the segment misses the grid entirely.
///
/// Segments that lie fully inside come back unchanged. Clipped endpoints are
/// rounded to the nearest cell on the grid.
pub fn clip_segment(
    from: GridPos,
    to: GridPos,
    width: u32,
    height: u32,
) -> Option<(GridPos, GridPos)> {
    if width == 0 || height == 0 {
        return None;
    }
    let (x0, y0) = (f64::from(from.x), f64::from(from.y));
    let (dx, dy) = (f64::from(to.x) - x0, f64::from(to.y) - y0);
    let (max_x, max_y) = (f64::from(width - 1), f64::from(height - 1));

    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;
    for (p, q) in [(-dx, x0), (dx, max_x - x0), (-dy, y0), (dy, max_y - y0)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    let at = |t: f64| {
        GridPos::new(
            (x0 + t * dx).round().clamp(0.0, max_x) as i32,
            (y0 + t * dy).round().clamp(0.0, max_y) as i32,
        )
    };
    Some((at(t0), at(t1)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(points: &[(i32, i32)]) -> Vec<GridPos> {
        points.iter().map(|&p| GridPos::from(p)).collect()
    }

    #[test]
    fn single_cell_line() {
        let p = GridPos::new(0, 0);
        assert_eq!(line(p, p), vec![p]);
    }

    #[test]
    fn horizontal_line_in_order() {
        let got = line(GridPos::new(0, 0), GridPos::new(4, 0));
        assert_eq!(got, cells(&[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)]));
    }

    #[test]
    fn reversed_vertical_line() {
        let got = line(GridPos::new(2, 3), GridPos::new(2, 0));
        assert_eq!(got, cells(&[(2, 3), (2, 2), (2, 1), (2, 0)]));
    }

    #[test]
    fn shallow_slope_matches_reference_walk() {
        let got = line(GridPos::new(0, 0), GridPos::new(3, 2));
        assert_eq!(got, cells(&[(0, 0), (1, 1), (2, 1), (3, 2)]));
    }

    #[test]
    fn consecutive_cells_are_adjacent() {
        let ends = [(7, -3), (-5, -9), (12, 4), (-1, 6), (0, 13)];
        for &(x, y) in &ends {
            let got = line(GridPos::new(0, 0), GridPos::new(x, y));
            assert_eq!(got.first(), Some(&GridPos::new(0, 0)));
            assert_eq!(got.last(), Some(&GridPos::new(x, y)));
            for pair in got.windows(2) {
                assert!((pair[0].x - pair[1].x).abs() <= 1);
                assert!((pair[0].y - pair[1].y).abs() <= 1);
                assert_ne!(pair[0], pair[1]);
            }
        }
    }

    #[test]
    fn extreme_endpoints_do_not_overflow() {
        let walk = BresenhamLine::new(GridPos::new(-1, 0), GridPos::new(i32::MAX, 0));
        assert_eq!(walk.len(), i32::MAX as usize + 2);

        let corner = GridPos::new(i32::MIN, i32::MIN);
        let first: Vec<_> = BresenhamLine::new(corner, GridPos::new(i32::MAX, i32::MAX))
            .take(3)
            .collect();
        assert_eq!(
            first,
            cells(&[
                (i32::MIN, i32::MIN),
                (i32::MIN + 1, i32::MIN + 1),
                (i32::MIN + 2, i32::MIN + 2)
            ])
        );
    }

    #[test]
    fn clip_keeps_inside_segments() {
        let (a, b) = (GridPos::new(1, 2), GridPos::new(6, 5));
        assert_eq!(clip_segment(a, b, 8, 8), Some((a, b)));
    }

    #[test]
    fn clip_trims_to_the_grid() {
        let clipped = clip_segment(GridPos::new(-1, 0), GridPos::new(i32::MAX, 0), 8, 8);
        assert_eq!(clipped, Some((GridPos::new(0, 0), GridPos::new(7, 0))));

        let diagonal = clip_segment(GridPos::new(-10, -10), GridPos::new(20, 20), 4, 4);
        assert_eq!(diagonal, Some((GridPos::new(0, 0), GridPos::new(3, 3))));
    }

    #[test]
    fn clip_rejects_misses() {
        assert_eq!(
            clip_segment(GridPos::new(-5, 0), GridPos::new(-1, 7), 8, 8),
            None
        );
        assert_eq!(
            clip_segment(GridPos::new(i32::MIN, 9), GridPos::new(i32::MAX, 9), 8, 8),
            None
        );
        assert_eq!(clip_segment(GridPos::new(0, 0), GridPos::new(0, 0), 0, 0), None);
    }

    #[test]
    fn size_hint_is_exact() {
        let walk = BresenhamLine::new(GridPos::new(-2, 1), GridPos::new(5, -3));
        let expected = walk.len();
        assert_eq!(walk.count(), expected);
        assert_eq!(expected, 8);
    }
}
