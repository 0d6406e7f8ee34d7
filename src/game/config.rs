//! Game options, the fixed difficulty/color tables, and the derived layout

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::display::{Rgb, Rgba};

// ============================================================================
// Tables
// ============================================================================

/// Maze size in cells and the window size that goes with it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Difficulty {
    pub maze_width: usize,
    pub maze_height: usize,
    pub window_width: u32,
    pub window_height: u32,
}

impl Difficulty {
    pub const fn new(maze_width: usize, maze_height: usize, window_width: u32, window_height: u32) -> Self {
        Self {
            maze_width,
            maze_height,
            window_width,
            window_height,
        }
    }

    /// # Panics
    /// Panics if `index` is not in [`DIFFICULTIES`]
    pub fn from_index(index: usize) -> Self {
        assert!(
            index < DIFFICULTIES.len(),
            "difficulty {} out of range 0..{}",
            index,
            DIFFICULTIES.len()
        );
        DIFFICULTIES[index]
    }
}

pub const DIFFICULTIES: [Difficulty; 5] = [
    Difficulty::new(10, 5, 500, 300),
    Difficulty::new(20, 10, 600, 400),
    Difficulty::new(40, 20, 800, 600),
    Difficulty::new(40, 20, 1000, 800),
    Difficulty::new(40, 40, 1000, 800),
];

// Parallel color tables, one entry per accent
pub const BACKGROUND_COLORS: [Rgba; 2] = [
    Rgba::new(0.02, 0.05, 0.06, 1.0),
    Rgba::new(0.10, 0.08, 0.06, 0.80),
];
pub const MAZE_COLORS: [Rgb; 2] = [Rgb::new(0.4, 0.4, 0.4), Rgb::new(0.6, 0.7, 0.45)];
pub const CURSOR_COLORS: [Rgb; 2] = [Rgb::new(0.9, 0.9, 0.9), Rgb::new(0.6, 0.2, 0.4)];
pub const BOX_COLORS: [Rgb; 2] = [Rgb::new(0.1, 0.12, 0.15), Rgb::new(0.16, 0.14, 0.11)];
pub const HINT_COLORS: [Rgb; 2] = [Rgb::new(0.85, 0.6, 0.25), Rgb::new(0.35, 0.55, 0.8)];

/// Where a color comes from: an accent slot in a table, or a literal value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorSource {
    Palette(usize),
    Literal(Rgb),
}

impl ColorSource {
    /// # Panics
    /// Panics if a palette index is outside `table`
    pub fn resolve(self, table: &[Rgb]) -> Rgb {
        match self {
            ColorSource::Palette(index) => {
                assert!(index < table.len(), "color accent {} out of range 0..{}", index, table.len());
                table[index]
            },
            ColorSource::Literal(color) => color,
        }
    }
}

/// All colors for one accent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub accent: usize,
    pub background: Rgba,
    pub maze: Rgb,
    pub cursor: Rgb,
    pub area: Rgb,
    pub hint: Rgb,
}

impl Palette {
    /// # Panics
    /// Panics if `accent` is not a valid accent index
    pub fn for_accent(accent: usize) -> Self {
        assert!(
            accent < BACKGROUND_COLORS.len(),
            "color accent {} out of range 0..{}",
            accent,
            BACKGROUND_COLORS.len()
        );
        Self {
            accent,
            background: BACKGROUND_COLORS[accent],
            maze: MAZE_COLORS[accent],
            cursor: CURSOR_COLORS[accent],
            area: BOX_COLORS[accent],
            hint: HINT_COLORS[accent],
        }
    }
}

// ============================================================================
// Options
// ============================================================================

pub const DEFAULT_CONFIG_PATH: &str = "maze.json";

/// User-facing options, loadable from JSON and overridable on the command line
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Index into [`DIFFICULTIES`]
    pub difficulty: usize,
    /// Index into the color tables
    pub accent: usize,
    /// Report the solve time on a win
    pub timing: bool,
    /// Fixed generator seed; time-seeded when absent
    pub seed: Option<u64>,
    pub vsync: bool,
    /// RGB token color replacing the accent's
    pub cursor_color: Option<[f32; 3]>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            difficulty: 0,
            accent: 1,
            timing: false,
            seed: None,
            vsync: true,
            cursor_color: None,
        }
    }
}

impl GameConfig {
    /// Load options from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&json).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Reject indices the tables cannot serve
    pub fn validate(&self) -> Result<()> {
        if self.difficulty >= DIFFICULTIES.len() {
            bail!(
                "difficulty {} out of range (0-{})",
                self.difficulty,
                DIFFICULTIES.len() - 1
            );
        }
        if let Some(color) = self.cursor_color {
            if color.iter().any(|c| !(0.0..=1.0).contains(c)) {
                bail!("cursor color {:?} has channels outside 0-1", color);
            }
        }
        if self.accent >= BACKGROUND_COLORS.len() {
            bail!(
                "color accent {} out of range (0-{})",
                self.accent,
                BACKGROUND_COLORS.len() - 1
            );
        }
        Ok(())
    }

    pub fn difficulty(&self) -> Difficulty {
        Difficulty::from_index(self.difficulty)
    }

    pub fn palette(&self) -> Palette {
        Palette::for_accent(self.accent)
    }

    pub fn cursor_color(&self) -> ColorSource {
        match self.cursor_color {
            Some([r, g, b]) => ColorSource::Literal(Rgb::new(r, g, b)),
            None => ColorSource::Palette(self.accent),
        }
    }
}

// ============================================================================
// Layout
// ============================================================================

/// Margin around the maze area as a fraction of the window height
const MAZE_MARGIN_RATE: f32 = 0.04;
/// Fraction of the window width reserved on the right (no side bar)
const BAR_BOUNDARY_RATE: f32 = 0.0;
/// Wall box side relative to the cell size
const BOX_LENGTH_RATE: f32 = 0.8;
/// Fillet radius relative to the wall box side
const FILLETED_RATE: f32 = 0.2;
/// Token radius is the cell size divided by this
const CURSOR_RADIUS_DIVISOR: f32 = 2.2;

/// Pixel geometry derived once from a [`Difficulty`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    pub window_width: u32,
    pub window_height: u32,
    pub margin_left: f32,
    pub margin_right: f32,
    pub margin_bottom: f32,
    pub margin_top: f32,
    /// Side of one doubled-grid cell in pixels
    pub cell_size: f32,
    /// Pixel center of grid cell (0, 0)
    pub origin_x: f32,
    pub origin_y: f32,
    pub box_length: f32,
    pub fillet: f32,
    pub cursor_radius: f32,
}

impl LayoutConfig {
    pub fn new(difficulty: &Difficulty) -> Self {
        let window_width = difficulty.window_width;
        let window_height = difficulty.window_height;
        assert!(
            window_width > 0 && window_height > 0,
            "window needs positive dimensions, got {}x{}",
            window_width,
            window_height
        );

        let margin_bottom = window_height as f32 * MAZE_MARGIN_RATE;
        let margin_top = window_height as f32 - margin_bottom;
        let margin_left = margin_bottom;
        let margin_right = window_width as f32 * (1.0 - BAR_BOUNDARY_RATE) - margin_bottom;
        let area_width = margin_right - margin_left;
        let area_height = margin_top - margin_bottom;

        let cols = (difficulty.maze_width * 2 + 1) as f32;
        let rows = (difficulty.maze_height * 2 + 1) as f32;

        // Fit the constrained axis, center along the other
        let (cell_size, start_x, start_y) = if cols / rows > area_width / area_height {
            let cell = area_width / cols;
            let sx = cell / 2.0;
            (cell, sx, (area_height - cell * rows) / 2.0 + sx)
        } else {
            let cell = area_height / rows;
            let sy = cell / 2.0;
            (cell, (area_width - cell * cols) / 2.0 + sy, sy)
        };

        let box_length = cell_size * BOX_LENGTH_RATE;
        Self {
            window_width,
            window_height,
            margin_left,
            margin_right,
            margin_bottom,
            margin_top,
            cell_size,
            origin_x: margin_left + start_x,
            origin_y: margin_bottom + start_y,
            box_length,
            fillet: box_length * FILLETED_RATE,
            cursor_radius: cell_size / CURSOR_RADIUS_DIVISOR,
        }
    }

    /// Pixel center of doubled-grid cell `(x, y)`
    #[inline]
    pub fn cell_center(&self, x: usize, y: usize) -> (f32, f32) {
        (
            self.origin_x + x as f32 * self.cell_size,
            self.origin_y + y as f32 * self.cell_size,
        )
    }

    /// Center and size of the maze area box
    pub fn area(&self) -> (f32, f32, f32, f32) {
        (
            (self.margin_right + self.margin_left) / 2.0,
            (self.margin_top + self.margin_bottom) / 2.0,
            self.margin_right - self.margin_left,
            self.margin_top - self.margin_bottom,
        )
    }

    /// Row stride shared by the frame and scratch buffers
    #[inline]
    pub fn stride(&self) -> u32 {
        self.window_width
    }
}
