//! The maze game: options, token, input, drawing and the session loop

pub mod config;
pub mod cursor;
pub mod input;
pub mod render;
pub mod session;

pub use config::{GameConfig, DEFAULT_CONFIG_PATH};
pub use input::{ClickTracker, InputRecord, Key};
pub use session::{Outcome, Session};
