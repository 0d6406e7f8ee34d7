//! One play-through: maze, token, hint and the per-frame state machine
//!
//! Each call to [`Session::tick`] handles, in order: token movement,
//! restart, quit, hint toggling and the win check. Drawing happens only on
//! events; the frame buffer holds the scene without the token, and the token
//! is composited in just for presentation.

use log::{debug, info, warn};

use crate::display::{PixelBuffer, Present};
use crate::maze::{hint, Direction, Grid, MazeGenerator};

use super::config::{ColorSource, Difficulty, GameConfig, LayoutConfig, Palette};
use super::cursor::{Cursor, MotionState};
use super::input::{InputRecord, Key};
use super::render;

/// Seconds one token move takes
pub const MOVE_INTERVAL: f32 = 0.15;
/// Cooldown for hint and restart keys
pub const KEY_INTERVAL: f32 = 0.25;
/// Time after an accepted move before keys are read again
pub const INPUT_QUIESCENCE: f32 = 0.1;

/// What a frame ended with
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    Continue,
    Restarted,
    Quit,
    Won { elapsed: f32 },
}

pub struct Session {
    grid: Grid,
    generator: MazeGenerator,
    cursor: Cursor,
    hint: Vec<usize>,
    hint_shown: bool,
    /// Cleared by an accepted move or hint toggle
    gate_armed: bool,
    last_move: f32,
    last_hint: f32,
    last_restart: f32,
    start_time: f32,
    frame: PixelBuffer,
    scratch: PixelBuffer,
    layout: LayoutConfig,
    palette: Palette,
    cursor_color: ColorSource,
    timing: bool,
}

impl Session {
    pub fn new(config: &GameConfig, generator: MazeGenerator) -> Self {
        let mut session =
            Self::with_difficulty(config.difficulty(), config.palette(), config.timing, generator);
        session.set_cursor_color(config.cursor_color());
        session
    }

    /// Session for an arbitrary difficulty. Nothing is drawn until
    /// [`Session::new_game`].
    pub fn with_difficulty(
        difficulty: Difficulty,
        palette: Palette,
        timing: bool,
        generator: MazeGenerator,
    ) -> Self {
        let layout = LayoutConfig::new(&difficulty);
        let grid = Grid::new(difficulty.maze_width, difficulty.maze_height);
        let cursor_color = ColorSource::Palette(palette.accent);
        let cursor = Cursor::new(&grid, &layout, cursor_color);

        let mut frame = PixelBuffer::with_size(layout.window_width, layout.window_height);
        let scratch = PixelBuffer::with_size(layout.window_width, layout.window_height);
        render::draw_background(&mut frame, &palette);

        Self {
            grid,
            generator,
            cursor,
            hint: Vec::new(),
            hint_shown: false,
            gate_armed: true,
            last_move: 0.0,
            last_hint: 0.0,
            last_restart: 0.0,
            start_time: 0.0,
            frame,
            scratch,
            layout,
            palette,
            cursor_color,
            timing,
        }
    }

    /// Token color for this and every later game
    pub fn set_cursor_color(&mut self, source: ColorSource) {
        self.cursor_color = source;
        self.cursor.set_color(source);
    }

    /// Generate a fresh maze, reset the token and timers, and show it
    pub fn new_game(&mut self, now: f32, out: &mut impl Present) -> Result<(), String> {
        render::draw_area(&mut self.frame, &self.layout, &self.palette);
        self.generator.refresh(&mut self.grid);
        render::draw_maze(&mut self.frame, &self.grid, &self.layout, &self.palette);

        self.hint.clear();
        self.hint_shown = false;
        self.gate_armed = true;
        self.cursor = Cursor::new(&self.grid, &self.layout, self.cursor_color);
        self.last_move = now;
        self.last_hint = now;
        self.last_restart = now;
        self.start_time = now;

        info!(
            "new game: {}x{} maze, seed {}",
            self.grid.maze_width(),
            self.grid.maze_height(),
            self.generator.seed()
        );
        self.redraw(out)
    }

    /// Present the current scene with the token on top
    pub fn redraw(&mut self, out: &mut impl Present) -> Result<(), String> {
        render::present_cursor(&mut self.frame, &mut self.scratch, &self.cursor, &self.layout, out)
    }

    /// Advance one frame at time `now` with the keys held in `input`
    pub fn tick(
        &mut self,
        now: f32,
        input: &InputRecord,
        out: &mut impl Present,
    ) -> Result<Outcome, String> {
        if now - self.last_move > INPUT_QUIESCENCE {
            self.gate_armed = true;
        }

        if !self.cursor.is_moving() && self.gate_armed {
            if let Some(direction) = self.requested_move(input) {
                self.cursor.begin_move(direction, now);
                self.last_move = now;
                self.gate_armed = false;
                debug!("moving {} from {:?}", direction.name(), self.cursor.position());
            }
        }

        if let MotionState::Moving { started, .. } = self.cursor.motion() {
            let elapsed = now - started;
            if elapsed >= MOVE_INTERVAL {
                self.cursor.commit(&self.layout);
            } else {
                self.cursor.animate(&self.layout, elapsed, MOVE_INTERVAL);
                self.redraw(out)?;
            }
        }

        if input.is_pressed(Key::Return)
            && self.gate_armed
            && now - self.last_restart >= KEY_INTERVAL
        {
            info!("restart requested");
            self.new_game(now, out)?;
            return Ok(Outcome::Restarted);
        }

        if input.is_pressed(Key::Escape) {
            info!("quit");
            return Ok(Outcome::Quit);
        }

        if input.is_pressed(Key::Space) && self.gate_armed && now - self.last_hint >= KEY_INTERVAL {
            self.last_hint = now;
            self.toggle_hint(out)?;
            self.gate_armed = false;
        }

        if self.is_won() {
            let elapsed = now - self.start_time;
            info!("win after {:.2}s", elapsed);
            if self.timing {
                println!("{:.2}", elapsed);
            }
            return Ok(Outcome::Won { elapsed });
        }

        Ok(Outcome::Continue)
    }

    /// First pressed direction, in Left, Down, Right, Up order, that is open
    fn requested_move(&self, input: &InputRecord) -> Option<Direction> {
        let (x, y) = self.cursor.position();
        [
            (input.left(), Direction::Left),
            (input.down(), Direction::Down),
            (input.right(), Direction::Right),
            (input.up(), Direction::Up),
        ]
        .into_iter()
        .find(|&(pressed, direction)| pressed && self.grid.is_open_towards(x, y, direction))
        .map(|(_, direction)| direction)
    }

    fn toggle_hint(&mut self, out: &mut impl Present) -> Result<(), String> {
        self.hint_shown = !self.hint_shown;
        if self.hint_shown {
            let (x, y) = self.cursor.position();
            self.hint = hint::find(&self.grid, self.grid.index(x, y));
            if self.hint.is_empty() {
                warn!("no path from {:?} to the exit", (x, y));
            }
            info!("hint on: {} cells", self.hint.len());
            render::draw_hint(&mut self.frame, &self.grid, &self.hint, &self.layout, &self.palette);
        } else {
            info!("hint off");
            self.hint.clear();
            render::draw_background(&mut self.frame, &self.palette);
            render::draw_area(&mut self.frame, &self.layout, &self.palette);
            render::draw_maze(&mut self.frame, &self.grid, &self.layout, &self.palette);
        }
        self.redraw(out)
    }

    /// Token sits on the exit cell
    pub fn is_won(&self) -> bool {
        let (x, y) = self.cursor.position();
        x + 2 == self.grid.cols() && y == 1
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn hint(&self) -> &[usize] {
        &self.hint
    }

    pub fn hint_shown(&self) -> bool {
        self.hint_shown
    }

    /// Scene without the token
    pub fn frame(&self) -> &PixelBuffer {
        &self.frame
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    #[cfg(test)]
    pub(crate) fn place_cursor(&mut self, x: usize, y: usize) {
        self.cursor.place(x, y, &self.layout);
    }
}

/// Keeps a copy of every presented frame
#[cfg(test)]
#[derive(Default)]
pub(crate) struct RecordingPresenter {
    pub frames: Vec<PixelBuffer>,
}

#[cfg(test)]
impl Present for RecordingPresenter {
    fn present(&mut self, buffer: &PixelBuffer) -> Result<(), String> {
        self.frames.push(buffer.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::config::DIFFICULTIES;

    fn small_session(seed: u64) -> (Session, RecordingPresenter) {
        let mut session = Session::with_difficulty(
            Difficulty::new(2, 2, 300, 300),
            Palette::for_accent(0),
            false,
            MazeGenerator::from_seed(seed),
        );
        let mut out = RecordingPresenter::default();
        session.new_game(0.0, &mut out).unwrap();
        (session, out)
    }

    fn key_for(direction: Direction) -> Key {
        match direction {
            Direction::Up => Key::W,
            Direction::Down => Key::S,
            Direction::Left => Key::A,
            Direction::Right => Key::D,
        }
    }

    #[test]
    fn test_new_game_layout() {
        let (session, out) = small_session(1);
        assert_eq!(session.grid().cols(), 5);
        assert_eq!(session.grid().rows(), 5);
        assert_eq!(session.cursor().position(), (1, 3));
        assert_eq!(out.frames.len(), 1);
        assert!(!session.hint_shown());
    }

    #[test]
    fn test_blocked_direction_keeps_position() {
        let (mut session, mut out) = small_session(1);
        // (0, 3) is the border
        let outcome = session.tick(0.25, &InputRecord::with_keys(&[Key::A]), &mut out).unwrap();
        assert_eq!(outcome, Outcome::Continue);
        assert!(!session.cursor().is_moving());
        assert_eq!(session.cursor().position(), (1, 3));
    }

    #[test]
    fn test_open_direction_moves_one_cell() {
        for seed in 0..8 {
            let (mut session, mut out) = small_session(seed);
            let (x, y) = session.cursor().position();
            let direction = Direction::ALL
                .into_iter()
                .find(|&d| session.grid().is_open_towards(x, y, d))
                .unwrap();

            session
                .tick(0.25, &InputRecord::with_keys(&[key_for(direction)]), &mut out)
                .unwrap();
            assert!(session.cursor().is_moving());

            session.tick(0.3125, &InputRecord::new(), &mut out).unwrap();
            assert!(session.cursor().is_moving());
            assert_eq!(session.cursor().position(), (x, y));

            session.tick(0.5, &InputRecord::new(), &mut out).unwrap();
            assert!(!session.cursor().is_moving());
            let (dx, dy) = direction.offset();
            let expected = ((x as i32 + dx) as usize, (y as i32 + dy) as usize);
            assert_eq!(session.cursor().position(), expected, "seed {}", seed);
        }
    }

    #[test]
    fn test_accepted_move_closes_gate() {
        let (mut session, mut out) = small_session(2);
        let (x, y) = session.cursor().position();
        let direction = Direction::ALL
            .into_iter()
            .find(|&d| session.grid().is_open_towards(x, y, d))
            .unwrap();
        let enter = InputRecord::with_keys(&[key_for(direction), Key::Return]);

        // Movement is handled first and closes the gate for this frame
        assert_eq!(session.tick(0.25, &enter, &mut out).unwrap(), Outcome::Continue);
        assert!(session.cursor().is_moving());
        let enter = InputRecord::with_keys(&[Key::Return]);
        assert_eq!(session.tick(0.3125, &enter, &mut out).unwrap(), Outcome::Continue);
        assert_eq!(session.tick(0.375, &enter, &mut out).unwrap(), Outcome::Restarted);
    }

    #[test]
    fn test_win_only_on_exit() {
        let mut session = Session::with_difficulty(
            DIFFICULTIES[0],
            Palette::for_accent(1),
            true,
            MazeGenerator::from_seed(5),
        );
        let mut out = RecordingPresenter::default();
        session.new_game(0.0, &mut out).unwrap();
        let exit = session.grid().exit();

        let grid = session.grid().clone();
        for y in 0..grid.rows() {
            for x in 0..grid.cols() {
                if grid.is_wall(x as i32, y as i32) {
                    continue;
                }
                session.place_cursor(x, y);
                let outcome = session.tick(2.0, &InputRecord::new(), &mut out).unwrap();
                if (x, y) == exit {
                    assert_eq!(outcome, Outcome::Won { elapsed: 2.0 });
                } else {
                    assert_eq!(outcome, Outcome::Continue, "({}, {})", x, y);
                }
            }
        }
    }

    #[test]
    fn test_restart_beats_quit() {
        let (mut session, mut out) = small_session(3);
        let both = InputRecord::with_keys(&[Key::Return, Key::Escape]);
        assert_eq!(session.tick(1.0, &both, &mut out).unwrap(), Outcome::Restarted);
        // Restart cooldown now applies, so Escape alone decides
        assert_eq!(session.tick(1.125, &both, &mut out).unwrap(), Outcome::Quit);
    }

    #[test]
    fn test_restart_cooldown() {
        let (mut session, mut out) = small_session(3);
        let enter = InputRecord::with_keys(&[Key::Return]);
        assert_eq!(session.tick(0.125, &enter, &mut out).unwrap(), Outcome::Continue);
        assert_eq!(session.tick(0.25, &enter, &mut out).unwrap(), Outcome::Restarted);
        assert_eq!(session.cursor().position(), (1, 3));
    }

    #[test]
    fn test_restart_clears_hint_and_regenerates() {
        let mut session = Session::with_difficulty(
            DIFFICULTIES[1],
            Palette::for_accent(1),
            false,
            MazeGenerator::from_seed(1),
        );
        let mut out = RecordingPresenter::default();
        session.new_game(0.0, &mut out).unwrap();
        let before = session.grid().clone();

        session.tick(0.5, &InputRecord::with_keys(&[Key::Space]), &mut out).unwrap();
        assert!(session.hint_shown());
        assert!(!session.hint().is_empty());

        let outcome = session.tick(1.0, &InputRecord::with_keys(&[Key::Return]), &mut out).unwrap();
        assert_eq!(outcome, Outcome::Restarted);
        assert!(!session.hint_shown());
        assert!(session.hint().is_empty());
        assert!(session.grid() != &before, "restart must generate a new maze");
        assert_eq!(session.cursor().position(), Cursor::start_position(20, 10));
    }

    #[test]
    fn test_cursor_color_survives_restart() {
        let config = GameConfig {
            cursor_color: Some([0.0, 1.0, 0.0]),
            ..GameConfig::default()
        };
        let mut session = Session::new(&config, MazeGenerator::from_seed(8));
        let mut out = RecordingPresenter::default();
        session.new_game(0.0, &mut out).unwrap();
        session.new_game(1.0, &mut out).unwrap();
        assert_eq!(session.cursor().color(), crate::display::Rgb::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_quit() {
        let (mut session, mut out) = small_session(4);
        let outcome = session.tick(0.01, &InputRecord::with_keys(&[Key::Escape]), &mut out).unwrap();
        assert_eq!(outcome, Outcome::Quit);
    }

    #[test]
    fn test_hint_toggle() {
        let (mut session, mut out) = small_session(6);
        let palette = Palette::for_accent(0);
        let layout = *session.layout();
        let (ex, ey) = session.grid().exit();
        let (px, py) = layout.cell_center(ex, ey);
        let space = InputRecord::with_keys(&[Key::Space]);

        session.tick(0.5, &space, &mut out).unwrap();
        assert!(session.hint_shown());
        let path = session.hint().to_vec();
        assert_eq!(path.first(), Some(&session.grid().index(1, 3)));
        assert_eq!(path.last(), Some(&hint::target_index(2)));
        let shown = session.frame().get_pixel(px as i32, py as i32).unwrap();
        assert!((shown.g - palette.hint.g).abs() < 1e-4);

        // Within the cooldown: ignored
        session.tick(0.625, &space, &mut out).unwrap();
        assert!(session.hint_shown());

        session.tick(0.875, &space, &mut out).unwrap();
        assert!(!session.hint_shown());
        assert!(session.hint().is_empty());
        let cleared = session.frame().get_pixel(px as i32, py as i32).unwrap();
        assert!((cleared.g - palette.area.g).abs() < 1e-4);
    }

    #[test]
    fn test_animation_leaves_frame_clean() {
        let (mut session, mut out) = small_session(7);
        let before = session.frame().clone();
        let (x, y) = session.cursor().position();
        let direction = Direction::ALL
            .into_iter()
            .find(|&d| session.grid().is_open_towards(x, y, d))
            .unwrap();

        let presented = out.frames.len();
        session
            .tick(0.25, &InputRecord::with_keys(&[key_for(direction)]), &mut out)
            .unwrap();
        session.tick(0.3125, &InputRecord::new(), &mut out).unwrap();
        assert_eq!(out.frames.len(), presented + 2);
        assert!(session.frame() == &before, "token must not stay in the frame");
        assert!(out.frames.last() != Some(&before), "token must be in the presented frame");
    }
}
