//! Frame drawing for the maze scene

use crate::display::{PixelBuffer, Present};
use crate::maze::Grid;

use super::config::{LayoutConfig, Palette};
use super::cursor::Cursor;

pub fn draw_background(frame: &mut PixelBuffer, palette: &Palette) {
    frame.clear(palette.background);
}

/// Solid box behind the maze
pub fn draw_area(frame: &mut PixelBuffer, layout: &LayoutConfig, palette: &Palette) {
    let (cx, cy, w, h) = layout.area();
    frame.draw_box(cx, cy, 0.0, w, h, palette.area);
}

/// One filleted box per wall cell
pub fn draw_maze(frame: &mut PixelBuffer, grid: &Grid, layout: &LayoutConfig, palette: &Palette) {
    for (x, y) in grid.walls() {
        let (cx, cy) = layout.cell_center(x, y);
        frame.draw_filleted_box(
            cx,
            cy,
            0.0,
            layout.box_length,
            layout.box_length,
            layout.fillet,
            palette.maze,
        );
    }
}

/// Hint cells share the wall shape, in the hint color
pub fn draw_hint(
    frame: &mut PixelBuffer,
    grid: &Grid,
    hint: &[usize],
    layout: &LayoutConfig,
    palette: &Palette,
) {
    for &node in hint {
        let (x, y) = grid.coords(node);
        let (cx, cy) = layout.cell_center(x, y);
        frame.draw_filleted_box(
            cx,
            cy,
            0.0,
            layout.box_length,
            layout.box_length,
            layout.fillet,
            palette.hint,
        );
    }
}

/// Show the token without leaving it in `frame`.
///
/// The region under the token is saved to `scratch`, the token is drawn and
/// presented, then the region is copied back.
pub fn present_cursor(
    frame: &mut PixelBuffer,
    scratch: &mut PixelBuffer,
    cursor: &Cursor,
    layout: &LayoutConfig,
    out: &mut impl Present,
) -> Result<(), String> {
    let region = cursor.aabb(layout);
    scratch.copy_region(frame, region, layout.stride());
    cursor.draw(frame, layout);
    let presented = out.present(frame);
    frame.copy_region(scratch, region, layout.stride());
    presented
}
