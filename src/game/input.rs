//! Per-frame input snapshot and click detection

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    A,
    D,
    S,
    W,
    Up,
    Left,
    Down,
    Right,
    Space,
    Return,
    Escape,
    Shift,
}

pub const KEYS_USED: usize = 12;

impl Key {
    pub const ALL: [Key; KEYS_USED] = [
        Key::A,
        Key::D,
        Key::S,
        Key::W,
        Key::Up,
        Key::Left,
        Key::Down,
        Key::Right,
        Key::Space,
        Key::Return,
        Key::Escape,
        Key::Shift,
    ];

    #[inline]
    const fn slot(self) -> usize {
        self as usize
    }
}

/// What was held or clicked during one frame. Rebuilt every frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputRecord {
    keys: [bool; KEYS_USED],
    pub single_click: bool,
    pub double_click: bool,
    /// Click position in window fractions, y up
    pub click_pos: (f32, f32),
}

impl InputRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder used by tests and replays
    pub fn with_keys(keys: &[Key]) -> Self {
        let mut record = Self::new();
        for &key in keys {
            record.press(key);
        }
        record
    }

    #[inline]
    pub fn press(&mut self, key: Key) {
        self.keys[key.slot()] = true;
    }

    #[inline]
    pub fn is_pressed(&self, key: Key) -> bool {
        self.keys[key.slot()]
    }

    pub fn left(&self) -> bool {
        self.is_pressed(Key::A) || self.is_pressed(Key::Left)
    }

    pub fn down(&self) -> bool {
        self.is_pressed(Key::S) || self.is_pressed(Key::Down)
    }

    pub fn right(&self) -> bool {
        self.is_pressed(Key::D) || self.is_pressed(Key::Right)
    }

    pub fn up(&self) -> bool {
        self.is_pressed(Key::W) || self.is_pressed(Key::Up)
    }
}

/// Seconds within which a second release makes a double click
pub const CLICK_DELAY: f32 = 0.25;
/// Pointer travel (pixels) still accepted as a single click
const CLICK_SLOP: f32 = 5.0;

/// Left-button press/release bookkeeping across frames
#[derive(Debug, Clone)]
pub struct ClickTracker {
    window_width: f32,
    window_height: f32,
    press_pos: (f32, f32),
    release_pos: (f32, f32),
    /// Pending release waiting to become a single click
    release_time: Option<f32>,
}

impl ClickTracker {
    pub fn new(window_width: u32, window_height: u32) -> Self {
        Self {
            window_width: window_width as f32,
            window_height: window_height as f32,
            press_pos: (0.0, 0.0),
            release_pos: (0.0, 0.0),
            release_time: None,
        }
    }

    /// Feed a left-button transition at window pixel `pos` (y down)
    pub fn button(&mut self, pressed: bool, pos: (f32, f32), now: f32, record: &mut InputRecord) {
        if pressed {
            self.press_pos = pos;
            return;
        }
        match self.release_time {
            Some(prev) if now - prev < CLICK_DELAY => {
                record.double_click = true;
                self.release_time = None;
            },
            _ => {
                self.release_time = Some(now);
                self.release_pos = pos;
            },
        }
    }

    /// Promote a stale release to a single click and fill `click_pos`
    pub fn update(&mut self, now: f32, record: &mut InputRecord) {
        if let Some(last) = self.release_time {
            if now - last > CLICK_DELAY {
                let dx = self.release_pos.0 - self.press_pos.0;
                let dy = self.release_pos.1 - self.press_pos.1;
                if dx.hypot(dy) < CLICK_SLOP {
                    record.single_click = true;
                }
                self.release_time = None;
            }
        }
        if record.single_click || record.double_click {
            record.click_pos = (
                self.release_pos.0 / self.window_width,
                1.0 - self.release_pos.1 / self.window_height,
            );
        }
    }
}
