//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Time only enters through the `dt` argument
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Circle, circles_overlap};
pub use spawn::{Edge, spawn_boss, spawn_normal};
pub use state::{
    Arena, GameMode, Hostile, HostileKind, Player, Projectile, RunOutcome, RunState,
};
pub use tick::{TickInput, advance};
