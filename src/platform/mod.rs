//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Data directory (settings, high scores, log file)
//! - Monotonic time between ticks

use std::path::PathBuf;
use std::time::Instant;

use crate::consts::MAX_FRAME_DT;

/// Directory name under the platform data directory
const DATA_DIR_NAME: &str = "stellar-blitz";

/// Per-user data directory (e.g. `~/.local/share/stellar-blitz`, `./stellar-blitz` if unknown)
pub fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DATA_DIR_NAME)
}

pub fn settings_path() -> PathBuf {
    data_dir().join("settings.json")
}

pub fn highscores_path() -> PathBuf {
    data_dir().join("highscores.json")
}

pub fn log_path() -> PathBuf {
    data_dir().join("stellar-blitz.log")
}

/// Monotonic clock producing per-tick deltas
#[derive(Debug, Clone)]
pub struct Clock {
    last: Instant,
}

impl Clock {
    pub fn new() -> Self {
        Self { last: Instant::now() }
    }

    /// Seconds since the previous call, clamped to `MAX_FRAME_DT`
    pub fn delta(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        clamp_frame_dt(dt)
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

/// Clamp a raw frame delta into `[0, MAX_FRAME_DT]`
pub fn clamp_frame_dt(dt: f32) -> f32 {
    if dt.is_finite() {
        dt.clamp(0.0, MAX_FRAME_DT)
    } else {
        0.0
    }
}
