//! Player settings and preferences
//!
//! Persisted separately from high scores in the data directory.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::persistence;
use crate::platform;
use crate::sim::GameMode;
use crate::tuning::{Tuning, TuningPreset};

/// Player settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Mode selected in the menu last time
    pub mode: GameMode,
    /// Game variant to play
    pub preset: TuningPreset,
    /// Optional JSON file overriding individual tuning values
    pub tuning_file: Option<PathBuf>,
    /// Fixed run seed (random per run when unset)
    pub seed: Option<u64>,
    /// Draw with plain ASCII instead of block/box characters
    pub ascii_glyphs: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: GameMode::Dodge,
            preset: TuningPreset::Classic,
            tuning_file: None,
            seed: None,
            ascii_glyphs: false,
        }
    }
}

impl Settings {
    /// Resolve the tuning for the next run (preset plus optional file overrides)
    pub fn tuning(&self) -> Tuning {
        let base = self.preset.tuning();
        match &self.tuning_file {
            Some(path) => Tuning::load_or(path, base),
            None => base,
        }
    }

    /// Selected mode, falling back to the first mode the tuning offers
    pub fn effective_mode(&self, tuning: &Tuning) -> GameMode {
        let available = tuning.available_modes();
        if available.contains(&self.mode) {
            self.mode
        } else {
            available.first().copied().unwrap_or_default()
        }
    }

    /// Load settings from the data directory
    pub fn load() -> Self {
        match persistence::load_json::<Settings>(&platform::settings_path()) {
            Some(settings) => {
                log::info!("Loaded settings");
                settings
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings to the data directory
    pub fn save(&self) {
        match persistence::save_json(&platform::settings_path(), self) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Failed to save settings: {}", e),
        }
    }
}
