//! Stellar Blitz - a single-screen arcade shooter
//!
//! Core modules:
//! - `sim`: Arena simulation step (movement, spawning, collisions, scoring)
//! - `tuning`: Data-driven game balance and variant presets
//! - `renderer`: Frame snapshots and the terminal painter
//! - `platform`: Data directory and monotonic clock
//! - `persistence`: JSON load/save helpers
//! - `settings` / `highscores`: Player preferences and leaderboards

pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use settings::Settings;
pub use tuning::{Tuning, TuningPreset};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Host tick interval in milliseconds (~60 Hz)
    pub const TICK_MS: u64 = 16;
    /// Longest frame delta handed to the simulation (prevents huge jumps after a stall)
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Direction used when an aim vector has zero length
    pub const FALLBACK_DIR: glam::Vec2 = glam::Vec2::new(0.0, 1.0);
}

/// Unit vector pointing from `from` toward `to`.
///
/// Falls back to straight down when the two points coincide.
#[inline]
pub fn unit_toward(from: Vec2, to: Vec2) -> Vec2 {
    let delta = to - from;
    let length = delta.length();
    if length > 0.0 {
        delta / length
    } else {
        consts::FALLBACK_DIR
    }
}
