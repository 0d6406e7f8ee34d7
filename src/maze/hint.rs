//! Hint search: exhaustive depth-first walk over the doubled grid
//!
//! The first path that reaches the target index is returned. In a perfect
//! maze that is also the only simple path, but nothing here relies on it.

use super::{Direction, Grid};

/// Doubled-grid index the hint walks toward.
///
/// With a row stride of `2W + 1`, index `4W` is row 1, column `2W − 1`:
/// the bottom-right logical cell, which is also [`Grid::exit`].
#[inline]
pub const fn target_index(maze_width: usize) -> usize {
    4 * maze_width
}

/// Search frame: the node and the next direction to try from it
struct Frame {
    node: usize,
    next: usize,
}

/// Find a walk from `start` to [`target_index`], start node included.
///
/// Directions are tried in `Direction::ALL` order; a neighbor is entered
/// when it is on the grid, open, and not already on the current path.
/// Returns an empty path when the target cannot be reached.
pub fn find(grid: &Grid, start: usize) -> Vec<usize> {
    let target = target_index(grid.maze_width());
    let mut path = vec![start];
    if start == target {
        return path;
    }

    let mut on_path = vec![false; grid.cells().len()];
    on_path[start] = true;
    let mut stack = vec![Frame { node: start, next: 0 }];

    while let Some(frame) = stack.last_mut() {
        if frame.next == Direction::ALL.len() {
            // Exhausted: backtrack
            on_path[frame.node] = false;
            stack.pop();
            path.pop();
            continue;
        }
        let direction = Direction::ALL[frame.next];
        frame.next += 1;

        let (x, y) = grid.coords(frame.node);
        let Some((nx, ny)) = grid.step(x, y, direction) else {
            continue;
        };
        let neighbor = grid.index(nx, ny);
        if grid.is_wall(nx as i32, ny as i32) || on_path[neighbor] {
            continue;
        }

        path.push(neighbor);
        if neighbor == target {
            return path;
        }
        on_path[neighbor] = true;
        stack.push(Frame {
            node: neighbor,
            next: 0,
        });
    }

    path
}
