use crate::display::{PixelBuffer, Rgb};
use crate::geometry::{self, Aabb};
use crate::maze::{Direction, Grid};

use super::config::{ColorSource, LayoutConfig, CURSOR_COLORS};

/// Ease-in/ease-out distance covered after `t` seconds of an `interval`-long
/// move of length `dist`
pub fn quadratic_smooth(t: f32, interval: f32, dist: f32) -> f32 {
    let u = (t / interval).clamp(0.0, 1.0);
    let eased = if u < 0.5 {
        2.0 * u * u
    } else {
        let v = 1.0 - u;
        1.0 - 2.0 * v * v
    };
    eased * dist
}

/// At most one move can be in flight
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionState {
    Idle,
    Moving { direction: Direction, started: f32 },
}

/// The player's token: a grid position plus its animated pixel position
#[derive(Debug, Clone)]
pub struct Cursor {
    x: usize,
    y: usize,
    p_x: f32,
    p_y: f32,
    motion: MotionState,
    color: Rgb,
}

impl Cursor {
    /// Spawn point: the odd/odd cell nearest the middle of the grid
    pub fn start_position(maze_width: usize, maze_height: usize) -> (usize, usize) {
        let x = if maze_width % 2 == 0 { maze_width - 1 } else { maze_width };
        let y = if maze_height % 2 == 0 { maze_height + 1 } else { maze_height };
        (x, y)
    }

    pub fn new(grid: &Grid, layout: &LayoutConfig, color: ColorSource) -> Self {
        let (x, y) = Self::start_position(grid.maze_width(), grid.maze_height());
        let (p_x, p_y) = layout.cell_center(x, y);
        Self {
            x,
            y,
            p_x,
            p_y,
            motion: MotionState::Idle,
            color: color.resolve(&CURSOR_COLORS),
        }
    }

    /// Grid position in doubled-grid coordinates
    #[inline]
    pub fn position(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    #[inline]
    pub fn pixel(&self) -> (f32, f32) {
        (self.p_x, self.p_y)
    }

    #[inline]
    pub fn motion(&self) -> MotionState {
        self.motion
    }

    #[inline]
    pub fn is_moving(&self) -> bool {
        matches!(self.motion, MotionState::Moving { .. })
    }

    #[inline]
    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn set_color(&mut self, source: ColorSource) {
        self.color = source.resolve(&CURSOR_COLORS);
    }

    pub fn begin_move(&mut self, direction: Direction, now: f32) {
        self.motion = MotionState::Moving {
            direction,
            started: now,
        };
    }

    /// Place the pixel position `elapsed` seconds into the current move
    pub fn animate(&mut self, layout: &LayoutConfig, elapsed: f32, interval: f32) {
        let MotionState::Moving { direction, .. } = self.motion else {
            return;
        };
        let (base_x, base_y) = layout.cell_center(self.x, self.y);
        let travelled = quadratic_smooth(elapsed, interval, layout.cell_size);
        let (dx, dy) = direction.offset();
        self.p_x = base_x + dx as f32 * travelled;
        self.p_y = base_y + dy as f32 * travelled;
    }

    /// Finish the move in flight: step one cell and snap to its center
    pub fn commit(&mut self, layout: &LayoutConfig) {
        if let MotionState::Moving { direction, .. } = self.motion {
            let (dx, dy) = direction.offset();
            self.x = (self.x as i32 + dx) as usize;
            self.y = (self.y as i32 + dy) as usize;
            self.motion = MotionState::Idle;
        }
        self.snap(layout);
    }

    pub fn snap(&mut self, layout: &LayoutConfig) {
        let (p_x, p_y) = layout.cell_center(self.x, self.y);
        self.p_x = p_x;
        self.p_y = p_y;
    }

    /// Pixels the token can touch: a full cell around its center
    pub fn aabb(&self, layout: &LayoutConfig) -> Aabb {
        geometry::circle_aabb(
            self.p_x,
            self.p_y,
            layout.cell_size,
            layout.window_width,
            layout.window_height,
        )
    }

    pub fn draw(&self, frame: &mut PixelBuffer, layout: &LayoutConfig) {
        frame.draw_circle(self.p_x, self.p_y, layout.cursor_radius, self.color);
    }

    #[cfg(test)]
    pub(crate) fn place(&mut self, x: usize, y: usize, layout: &LayoutConfig) {
        self.x = x;
        self.y = y;
        self.motion = MotionState::Idle;
        self.snap(layout);
    }
}
