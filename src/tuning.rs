//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`]. Distances and speeds are
//! expressed per nominal tick (see `nominal_tick_secs`); the simulation
//! scales them by `dt / nominal_tick_secs`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::persistence;
use crate::sim::GameMode;

/// Named tuning presets, one per shipped game variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TuningPreset {
    /// Landscape 800x600 arena with the boss fight
    #[default]
    Classic,
    /// Tall 600x700 arena, quicker ship, no boss fight
    Portrait,
}

impl TuningPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            TuningPreset::Classic => "Classic",
            TuningPreset::Portrait => "Portrait",
        }
    }

    pub fn tuning(&self) -> Tuning {
        match self {
            TuningPreset::Classic => Tuning::default(),
            TuningPreset::Portrait => Tuning::portrait(),
        }
    }
}

/// Gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,
    /// Tick length the per-tick step constants were authored for
    pub nominal_tick_secs: f32,

    // === Player ===
    pub player_step: f32,
    pub player_radius: f32,
    pub max_hp: u32,
    pub invincible_secs: f32,

    // === Projectiles ===
    pub projectile_step: f32,
    pub projectile_radius: f32,
    pub fire_cooldown_secs: f32,

    // === Hostiles ===
    pub hostile_step: f32,
    pub hostile_radius: f32,
    pub hostile_score: u64,
    pub spawn_interval_secs: f32,

    // === Modes ===
    /// Dodge: points per whole second survived
    pub survival_score_per_sec: u64,
    /// Time Attack: countdown length
    pub time_limit_secs: f32,
    /// Conquest: kills needed before the boss appears
    pub conquest_kill_target: u32,

    // === Boss ===
    pub boss_enabled: bool,
    pub boss_radius_ratio: f32,
    pub boss_speed_ratio: f32,
    pub boss_hp: u32,
    pub boss_score: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arena_width: 800.0,
            arena_height: 600.0,
            nominal_tick_secs: 0.016,

            player_step: 5.0,
            player_radius: 20.0,
            max_hp: 3,
            invincible_secs: 1.0,

            projectile_step: 8.0,
            projectile_radius: 5.0,
            fire_cooldown_secs: 0.2,

            hostile_step: 2.0,
            hostile_radius: 15.0,
            hostile_score: 100,
            spawn_interval_secs: 1.0,

            survival_score_per_sec: 10,
            time_limit_secs: 60.0,
            conquest_kill_target: 10,

            boss_enabled: true,
            boss_radius_ratio: 5.0,
            boss_speed_ratio: 0.75,
            boss_hp: 5,
            boss_score: 500,
        }
    }
}

impl Tuning {
    /// Tall arena variant without the boss fight
    pub fn portrait() -> Self {
        Self {
            arena_width: 600.0,
            arena_height: 700.0,
            player_step: 6.0,
            projectile_step: 15.0,
            boss_enabled: false,
            ..Self::default()
        }
    }

    /// Parse a (possibly partial) tuning document; missing fields keep defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Tuning>(json).map(Tuning::sanitized)
    }

    /// Apply a (possibly partial) JSON object on top of `base`
    pub fn with_overrides(base: &Tuning, overrides: &serde_json::Value) -> Result<Self, serde_json::Error> {
        let mut merged = serde_json::to_value(base)?;
        if let (Some(target), Some(fields)) = (merged.as_object_mut(), overrides.as_object()) {
            for (key, value) in fields {
                target.insert(key.clone(), value.clone());
            }
        }
        serde_json::from_value::<Tuning>(merged).map(Tuning::sanitized)
    }

    /// Load overrides from a file on top of `base`, keeping `base` when unusable
    pub fn load_or(path: &Path, base: Tuning) -> Self {
        let Some(overrides) = persistence::load_json::<serde_json::Value>(path) else {
            log::warn!("Using preset tuning, {} not usable", path.display());
            return base;
        };
        match Tuning::with_overrides(&base, &overrides) {
            Ok(tuning) => {
                log::info!("Loaded tuning overrides from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("Invalid tuning overrides in {}: {}", path.display(), e);
                base
            }
        }
    }

    /// Clamp values that would stall or break the simulation
    pub fn sanitized(mut self) -> Self {
        let defaults = Tuning::default();
        self.arena_width = self.arena_width.max(1.0);
        self.arena_height = self.arena_height.max(1.0);
        self.nominal_tick_secs = positive_or(self.nominal_tick_secs, defaults.nominal_tick_secs);
        self.player_step = positive_or(self.player_step, defaults.player_step);
        self.projectile_step = positive_or(self.projectile_step, defaults.projectile_step);
        self.hostile_step = positive_or(self.hostile_step, defaults.hostile_step);
        self.time_limit_secs = positive_or(self.time_limit_secs, defaults.time_limit_secs);
        // At most one spawn per nominal tick
        self.spawn_interval_secs = self.spawn_interval_secs.max(self.nominal_tick_secs);
        self.max_hp = self.max_hp.max(1);
        self.boss_hp = self.boss_hp.max(1);
        self.player_radius = self.player_radius.max(0.0);
        self.projectile_radius = self.projectile_radius.max(0.0);
        self.hostile_radius = self.hostile_radius.max(0.0);
        self.invincible_secs = self.invincible_secs.max(0.0);
        self.fire_cooldown_secs = self.fire_cooldown_secs.max(0.0);
        self
    }

    /// Modes selectable with this tuning (Conquest needs the boss fight)
    pub fn available_modes(&self) -> Vec<GameMode> {
        GameMode::ALL
            .into_iter()
            .filter(|mode| self.boss_enabled || *mode != GameMode::Conquest)
            .collect()
    }

    pub fn boss_radius(&self) -> f32 {
        self.hostile_radius * self.boss_radius_ratio
    }

    pub fn boss_step(&self) -> f32 {
        self.hostile_step * self.boss_speed_ratio
    }
}

/// `value` when strictly positive (and not NaN), otherwise `fallback`
fn positive_or(value: f32, fallback: f32) -> f32 {
    if value > 0.0 { value } else { fallback }
}
