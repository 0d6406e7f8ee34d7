//! Maze storage on the doubled grid
//!
//! A `W × H` maze is stored as a `(2W+1) × (2H+1)` boolean grid. Logical
//! cells sit at odd/odd coordinates, every wall between two cells has its own
//! grid cell, and even/even coordinates plus the border are always walls.
//! Row 0 is the bottom row; `Direction::Up` increases `y`.

mod generator;
pub mod hint;

pub use generator::MazeGenerator;

/// One of the four grid moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Fixed order used by the generator's direction table and the hint search
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// `(dx, dy)` for one step
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// Doubled wall/passage grid, `true` = wall
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<bool>,
    maze_width: usize,
    maze_height: usize,
}

impl Grid {
    /// All-wall grid for a `maze_width × maze_height` maze
    ///
    /// # Panics
    /// Panics if either dimension is zero
    pub fn new(maze_width: usize, maze_height: usize) -> Self {
        assert!(
            maze_width >= 1 && maze_height >= 1,
            "maze needs at least one cell, got {}x{}",
            maze_width,
            maze_height
        );
        let count = (maze_width * 2 + 1) * (maze_height * 2 + 1);
        Self {
            cells: vec![true; count],
            maze_width,
            maze_height,
        }
    }

    /// Logical columns
    #[inline]
    pub fn maze_width(&self) -> usize {
        self.maze_width
    }

    /// Logical rows
    #[inline]
    pub fn maze_height(&self) -> usize {
        self.maze_height
    }

    /// Doubled-grid columns (`2W + 1`), also the row stride
    #[inline]
    pub fn cols(&self) -> usize {
        self.maze_width * 2 + 1
    }

    /// Doubled-grid rows (`2H + 1`)
    #[inline]
    pub fn rows(&self) -> usize {
        self.maze_height * 2 + 1
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.cols() + x
    }

    #[inline]
    pub fn coords(&self, index: usize) -> (usize, usize) {
        (index % self.cols(), index / self.cols())
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.cols() && (y as usize) < self.rows()
    }

    /// Anything off the grid counts as wall
    #[inline]
    pub fn is_wall(&self, x: i32, y: i32) -> bool {
        !self.in_bounds(x, y) || self.cells[self.index(x as usize, y as usize)]
    }

    #[inline]
    pub fn set_wall(&mut self, x: usize, y: usize, wall: bool) {
        let idx = self.index(x, y);
        self.cells[idx] = wall;
    }

    /// Neighbor one step away, if it is on the grid
    pub fn step(&self, x: usize, y: usize, direction: Direction) -> Option<(usize, usize)> {
        let (dx, dy) = direction.offset();
        let (nx, ny) = (x as i32 + dx, y as i32 + dy);
        self.in_bounds(nx, ny).then_some((nx as usize, ny as usize))
    }

    /// Can the token step from `(x, y)` in `direction`?
    pub fn is_open_towards(&self, x: usize, y: usize, direction: Direction) -> bool {
        let (dx, dy) = direction.offset();
        !self.is_wall(x as i32 + dx, y as i32 + dy)
    }

    /// The winning cell: last logical column, bottom logical row
    #[inline]
    pub fn exit(&self) -> (usize, usize) {
        (self.cols() - 2, 1)
    }

    /// Row-major cells, `true` = wall
    #[inline]
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Iterate `(x, y)` of every wall cell, row by row
    pub fn walls(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let cols = self.cols();
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &wall)| wall)
            .map(move |(idx, _)| (idx % cols, idx / cols))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_dimensions() {
        let grid = Grid::new(2, 2);
        assert_eq!(grid.cols(), 5);
        assert_eq!(grid.rows(), 5);
        assert_eq!(grid.cells().len(), 25);

        let grid = Grid::new(10, 5);
        assert_eq!(grid.cols(), 21);
        assert_eq!(grid.rows(), 11);
    }

    #[test]
    #[should_panic(expected = "at least one cell")]
    fn test_empty_maze_rejected() {
        let _ = Grid::new(0, 3);
    }

    #[test]
    fn test_index_round_trip() {
        let grid = Grid::new(3, 2);
        assert_eq!(grid.index(4, 2), 2 * 7 + 4);
        assert_eq!(grid.coords(grid.index(4, 2)), (4, 2));
    }

    #[test]
    fn test_out_of_bounds_is_wall() {
        let mut grid = Grid::new(1, 1);
        grid.set_wall(1, 1, false);
        assert!(!grid.is_wall(1, 1));
        assert!(grid.is_wall(-1, 1));
        assert!(grid.is_wall(1, 3));
        assert!(grid.is_wall(3, 0));
    }

    #[test]
    fn test_step_stays_on_grid() {
        let grid = Grid::new(1, 1);
        assert_eq!(grid.step(0, 0, Direction::Left), None);
        assert_eq!(grid.step(0, 0, Direction::Down), None);
        assert_eq!(grid.step(0, 0, Direction::Up), Some((0, 1)));
        assert_eq!(grid.step(2, 2, Direction::Right), None);
    }

    #[test]
    fn test_exit_cell() {
        let grid = Grid::new(10, 5);
        assert_eq!(grid.exit(), (19, 1));
        let (x, y) = grid.exit();
        assert_eq!(x + 2, grid.cols());
        assert_eq!(y - 1, 0);
    }

    #[test]
    fn test_direction_offsets_are_opposites() {
        let (ux, uy) = Direction::Up.offset();
        let (dx, dy) = Direction::Down.offset();
        assert_eq!((ux + dx, uy + dy), (0, 0));
        let (lx, ly) = Direction::Left.offset();
        let (rx, ry) = Direction::Right.offset();
        assert_eq!((lx + rx, ly + ry), (0, 0));
    }
}
