//! # Painter
//!
//! Derives the presentation layers of a frame from the buffer.

use glam::Vec2;

use crate::buffer::PixelBuffer;
use crate::color::Rgba;
use crate::config::EditorStyle;
use crate::math::GridPos;
use crate::render::{DrawCommand, RenderList};
use crate::view::View;

/// The hover indicator: which cell the pointer is over and the color it
/// would paint there.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hover {
    pub pos: GridPos,
    pub color: Rgba,
}

/// High-level renderer for the pixel grid.
///
/// The `Painter` turns the buffer into drawing commands (`RenderList`), layer
/// by layer, bottom to top:
/// - Checkerboard background (half-cell squares)
/// - Painted cells
/// - Grid lines
/// - Hover indicator
///
/// Every layer is derived from read-only state; none of them stores pixels.
pub struct Painter;

impl Painter {
    /// Generates the draw commands for one frame.
    pub fn draw(
        view: &View,
        style: &EditorStyle,
        buffer: &PixelBuffer,
        hover: Option<Hover>,
        show_grid: bool,
    ) -> RenderList {
        let mut draw_list = Vec::new();

        Self::draw_background(view, style, buffer, &mut draw_list);
        Self::draw_cells(view, buffer, &mut draw_list);
        if show_grid {
            Self::draw_grid(view, style, buffer, &mut draw_list);
        }
        if let Some(hover) = hover
            && buffer.contains(hover.pos.x, hover.pos.y)
        {
            let mut color = hover.color.to_vec4();
            color.w = style.hover_alpha;
            draw_list.push(DrawCommand::Rect {
                pos: view.grid_to_screen(hover.pos),
                size: Vec2::splat(view.dot_size),
                color,
            });
        }

        draw_list
    }

    fn draw_background(
        view: &View,
        style: &EditorStyle,
        buffer: &PixelBuffer,
        draw_list: &mut RenderList,
    ) {
        draw_list.push(DrawCommand::Rect {
            pos: view.origin,
            size: view.client_size(buffer.width(), buffer.height()),
            color: style.background_light,
        });

        let half = view.dot_size / 2.0;
        for j in 0..buffer.height() * 2 {
            for i in 0..buffer.width() * 2 {
                if (i + j) % 2 == 0 {
                    draw_list.push(DrawCommand::Rect {
                        pos: view.origin + Vec2::new(i as f32, j as f32) * half,
                        size: Vec2::splat(half),
                        color: style.background_dark,
                    });
                }
            }
        }
    }

    fn draw_cells(view: &View, buffer: &PixelBuffer, draw_list: &mut RenderList) {
        let width = buffer.width() as usize;
        for (i, &cell) in buffer.cells().iter().enumerate() {
            let color = Rgba(cell);
            if color.is_transparent() {
                continue;
            }
            let pos = GridPos::new((i % width) as i32, (i / width) as i32);
            draw_list.push(DrawCommand::Rect {
                pos: view.grid_to_screen(pos),
                size: Vec2::splat(view.dot_size),
                color: color.to_vec4(),
            });
        }
    }

    /// Interior lines only; the outer edge is left to the host's frame.
    fn draw_grid(
        view: &View,
        style: &EditorStyle,
        buffer: &PixelBuffer,
        draw_list: &mut RenderList,
    ) {
        let size = view.client_size(buffer.width(), buffer.height());

        for x in 1..buffer.width() {
            let dx = view.origin.x + x as f32 * view.dot_size;
            draw_list.push(DrawCommand::Line {
                start: Vec2::new(dx, view.origin.y),
                end: Vec2::new(dx, view.origin.y + size.y),
                color: style.grid_color,
                width: style.grid_width,
            });
        }

        for y in 1..buffer.height() {
            let dy = view.origin.y + y as f32 * view.dot_size;
            draw_list.push(DrawCommand::Line {
                start: Vec2::new(view.origin.x, dy),
                end: Vec2::new(view.origin.x + size.x, dy),
                color: style.grid_color,
                width: style.grid_width,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rects(list: &RenderList) -> Vec<(Vec2, Vec2)> {
        list.iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Rect { pos, size, .. } => Some((*pos, *size)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn painted_cells_become_rects() {
        let view = View::new(10.0, Vec2::ZERO);
        let mut buffer = PixelBuffer::new(2, 2);
        buffer.set(1, 0, Rgba::from_rgb(255, 0, 0).0);

        let list = Painter::draw(&view, &EditorStyle::default(), &buffer, None, false);
        // 1 light background + 8 dark half squares + 1 cell.
        assert_eq!(list.len(), 10);
        assert_eq!(
            rects(&list).last(),
            Some(&(Vec2::new(10.0, 0.0), Vec2::splat(10.0)))
        );
    }

    #[test]
    fn grid_has_interior_lines_only() {
        let view = View::new(4.0, Vec2::ZERO);
        let buffer = PixelBuffer::new(3, 2);
        let list = Painter::draw(&view, &EditorStyle::default(), &buffer, None, true);
        let lines = list
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::Line { .. }))
            .count();
        assert_eq!(lines, 2 + 1);
    }

    #[test]
    fn hover_uses_style_alpha_and_skips_outside_cells() {
        let view = View::new(4.0, Vec2::ZERO);
        let buffer = PixelBuffer::new(2, 2);
        let style = EditorStyle::default();
        let hover = Hover {
            pos: GridPos::new(1, 1),
            color: Rgba::WHITE,
        };

        let list = Painter::draw(&view, &style, &buffer, Some(hover), false);
        match list.last() {
            Some(DrawCommand::Rect { pos, color, .. }) => {
                assert_eq!(*pos, Vec2::new(4.0, 4.0));
                assert_eq!(color.w, style.hover_alpha);
            }
            other => panic!("expected hover rect, got {other:?}"),
        }

        let outside = Hover {
            pos: GridPos::new(5, 0),
            ..hover
        };
        let without = Painter::draw(&view, &style, &buffer, Some(outside), false);
        assert_eq!(without.len(), list.len() - 1);
    }
}
