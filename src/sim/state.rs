//! Run state and core simulation types
//!
//! Everything the simulation step reads or writes lives in [`RunState`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Circle;
use crate::tuning::Tuning;

/// Game mode selected from the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum GameMode {
    /// Endless survival, points per second alive; firing disabled
    #[default]
    Dodge,
    /// Score as much as possible before the countdown expires
    TimeAttack,
    /// Reach the kill target, then defeat the boss
    Conquest,
}

impl GameMode {
    pub const ALL: [GameMode; 3] = [GameMode::Dodge, GameMode::TimeAttack, GameMode::Conquest];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Dodge => "Dodge",
            GameMode::TimeAttack => "Time Attack",
            GameMode::Conquest => "Conquest",
        }
    }

    /// Whether the player may shoot in this mode
    pub fn allows_fire(&self) -> bool {
        *self != GameMode::Dodge
    }

    /// Next mode in menu order, restricted to `available`
    pub fn cycle(&self, available: &[GameMode]) -> GameMode {
        if available.is_empty() {
            return *self;
        }
        match available.iter().position(|m| m == self) {
            Some(i) => available[(i + 1) % available.len()],
            None => available[0],
        }
    }
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    /// Hit points reached zero
    Defeated,
    /// Time Attack countdown expired
    TimeUp,
    /// Conquest boss destroyed
    BossDefeated,
}

impl RunOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunOutcome::Defeated => "Defeated",
            RunOutcome::TimeUp => "Time Up",
            RunOutcome::BossDefeated => "Boss Defeated",
        }
    }
}

/// Rectangular play area; the origin is the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Inclusive bounds test
    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x >= 0.0 && pos.x <= self.width && pos.y >= 0.0 && pos.y <= self.height
    }

    pub fn clamp(&self, pos: Vec2) -> Vec2 {
        pos.clamp(Vec2::ZERO, Vec2::new(self.width, self.height))
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    pub hp: u32,
    /// Seconds of contact immunity left (active while > 0)
    pub invincible_timer: f32,
    /// Seconds until the next shot is allowed
    pub fire_cooldown: f32,
}

impl Player {
    pub fn new(pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            pos,
            radius: tuning.player_radius,
            hp: tuning.max_hp,
            invincible_timer: 0.0,
            fire_cooldown: 0.0,
        }
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible_timer > 0.0
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn body(&self) -> Circle {
        Circle::new(self.pos, self.radius)
    }

    /// Count down immunity; clears exactly at zero
    pub fn tick_invincibility(&mut self, dt: f32) {
        if self.is_invincible() {
            self.invincible_timer -= dt;
            if self.invincible_timer <= 0.0 {
                self.invincible_timer = 0.0;
            }
        }
    }
}

/// A player shot travelling upward
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    /// Distance per nominal tick
    pub speed: f32,
    pub radius: f32,
}

impl Projectile {
    pub fn body(&self) -> Circle {
        Circle::new(self.pos, self.radius)
    }
}

/// Hostile variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HostileKind {
    /// Dies to a single projectile
    Normal,
    /// Homes in on the player and absorbs several hits
    Boss { hp: u32 },
}

/// An enemy entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hostile {
    pub id: u32,
    pub pos: Vec2,
    /// Unit heading
    pub dir: Vec2,
    /// Distance per nominal tick
    pub speed: f32,
    pub radius: f32,
    pub kind: HostileKind,
}

impl Hostile {
    pub fn is_boss(&self) -> bool {
        matches!(self.kind, HostileKind::Boss { .. })
    }

    pub fn body(&self) -> Circle {
        Circle::new(self.pos, self.radius)
    }
}

/// Complete state of one run (deterministic for a given seed and input stream)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub mode: GameMode,
    pub arena: Arena,
    pub tuning: Tuning,
    pub player: Player,
    /// Live projectiles in spawn order
    pub projectiles: Vec<Projectile>,
    /// Live hostiles in spawn order
    pub hostiles: Vec<Hostile>,
    /// Seconds accumulated toward the next normal spawn
    pub spawn_timer: f32,
    pub score: u64,
    /// Dodge: fraction of a second accumulated toward the next survival bonus
    pub survival_timer: f32,
    /// Time Attack: seconds remaining
    pub time_left: f32,
    /// Conquest: normal hostiles destroyed by projectiles
    pub kills: u32,
    pub boss_spawned: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Simulated seconds since the run started
    pub elapsed: f32,
    /// Set once, on the tick the run ends
    pub outcome: Option<RunOutcome>,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl RunState {
    /// Fresh run with the player centred in the arena
    pub fn new(mode: GameMode, tuning: Tuning, seed: u64) -> Self {
        let arena = Arena::new(tuning.arena_width, tuning.arena_height);
        let player = Player::new(arena.center(), &tuning);
        Self {
            seed,
            mode,
            arena,
            player,
            projectiles: Vec::new(),
            hostiles: Vec::new(),
            spawn_timer: 0.0,
            score: 0,
            survival_timer: 0.0,
            time_left: tuning.time_limit_secs,
            kills: 0,
            boss_spawned: false,
            time_ticks: 0,
            elapsed: 0.0,
            outcome: None,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            tuning,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Whether a boss is currently on the field
    pub fn boss_active(&self) -> bool {
        self.hostiles.iter().any(Hostile::is_boss)
    }

    /// Drop every projectile and hostile (used when a run ends)
    pub fn clear_field(&mut self) {
        self.projectiles.clear();
        self.hostiles.clear();
    }

    /// Place a projectile at `pos`
    pub fn spawn_projectile(&mut self, pos: Vec2) {
        let id = self.next_entity_id();
        self.projectiles.push(Projectile {
            id,
            pos,
            speed: self.tuning.projectile_step,
            radius: self.tuning.projectile_radius,
        });
    }

    /// Add a hostile built by one of the factories, assigning its id
    pub fn push_hostile(&mut self, mut hostile: Hostile) {
        hostile.id = self.next_entity_id();
        self.hostiles.push(hostile);
    }
}
