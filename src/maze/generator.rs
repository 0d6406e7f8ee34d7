//! Perfect maze generation: a growing random walk that jumps back to a random
//! visited cell whenever it gets stuck.
//!
//! Passages are only ever carved from a visited cell into an unvisited one, so
//! the carved cells form a spanning tree over all logical cells.

use std::time::{SystemTime, UNIX_EPOCH};

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{Direction, Grid};

/// Direction samples tried before giving up on the current cell
const DIRECTION_SAMPLES: usize = 4;

pub struct MazeGenerator {
    rng: StdRng,
    seed: u64,
}

impl MazeGenerator {
    /// Deterministic generator; equal seeds produce equal mazes
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Generator seeded from the current wall-clock time
    pub fn from_time() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos() as u64);
        Self::from_seed(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Rewrite `grid` with a fresh maze. Returns the number of passages carved.
    pub fn refresh(&mut self, grid: &mut Grid) -> usize {
        Self::initialize(grid);
        let carved = self.randomize(grid);
        debug!(
            "generated {}x{} maze: {} passages carved",
            grid.maze_width(),
            grid.maze_height(),
            carved
        );
        carved
    }

    /// Walls everywhere except the isolated odd/odd cells
    fn initialize(grid: &mut Grid) {
        for y in 0..grid.rows() {
            for x in 0..grid.cols() {
                grid.set_wall(x, y, y % 2 == 0 || x % 2 == 0);
            }
        }
    }

    fn randomize(&mut self, grid: &mut Grid) -> usize {
        let width = grid.maze_width();
        let height = grid.maze_height();
        let maze_size = width * height;

        let mut cur = self.rng.gen_range(0..maze_size);
        let mut accessed = Vec::with_capacity(maze_size);
        let mut is_accessed = vec![false; maze_size];
        accessed.push(cur);
        is_accessed[cur] = true;

        let mut carved = 0;
        while accessed.len() < maze_size {
            let tx = (cur % width) as i32;
            let ty = (cur / width) as i32;

            // Independent samples: a direction may come up twice and another never
            let mut found = None;
            for _ in 0..DIRECTION_SAMPLES {
                let direction = Direction::ALL[self.rng.gen_range(0..Direction::ALL.len())];
                let (dx, dy) = direction.offset();
                let (nx, ny) = (tx + dx, ty + dy);
                if nx >= 0 && ny >= 0 && (nx as usize) < width && (ny as usize) < height {
                    let next = ny as usize * width + nx as usize;
                    if !is_accessed[next] {
                        found = Some((direction, next));
                        break;
                    }
                }
            }

            match found {
                Some((direction, next)) => {
                    let (dx, dy) = direction.offset();
                    let wall_x = (tx * 2 + 1 + dx) as usize;
                    let wall_y = (ty * 2 + 1 + dy) as usize;
                    grid.set_wall(wall_x, wall_y, false);
                    carved += 1;

                    cur = next;
                    is_accessed[cur] = true;
                    accessed.push(cur);
                },
                None => {
                    cur = accessed[self.rng.gen_range(0..accessed.len())];
                },
            }
        }
        carved
    }
}
