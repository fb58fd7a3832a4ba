//! Hostile factories
//!
//! Pure functions of the arena, tuning and a random source. The id is left
//! at zero; `RunState::push_hostile` assigns it.

use glam::Vec2;
use rand::Rng;

use super::state::{Arena, Hostile, HostileKind};
use crate::tuning::Tuning;
use crate::unit_toward;

/// Arena side a hostile enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right];
}

/// Uniform random point on a uniformly chosen arena side
pub fn edge_point<R: Rng + ?Sized>(arena: Arena, rng: &mut R) -> (Edge, Vec2) {
    let edge = Edge::ALL[rng.random_range(0..Edge::ALL.len())];
    let pos = match edge {
        Edge::Top => Vec2::new(rng.random_range(0.0..=arena.width), 0.0),
        Edge::Bottom => Vec2::new(rng.random_range(0.0..=arena.width), arena.height),
        Edge::Left => Vec2::new(0.0, rng.random_range(0.0..=arena.height)),
        Edge::Right => Vec2::new(arena.width, rng.random_range(0.0..=arena.height)),
    };
    (edge, pos)
}

/// Uniform random point inside the arena
pub fn interior_point<R: Rng + ?Sized>(arena: Arena, rng: &mut R) -> Vec2 {
    Vec2::new(
        rng.random_range(0.0..=arena.width),
        rng.random_range(0.0..=arena.height),
    )
}

/// Normal hostile entering from an edge, aimed at a random interior point
pub fn spawn_normal<R: Rng + ?Sized>(arena: Arena, tuning: &Tuning, rng: &mut R) -> Hostile {
    let (_, pos) = edge_point(arena, rng);
    let target = interior_point(arena, rng);
    Hostile {
        id: 0,
        pos,
        dir: unit_toward(pos, target),
        speed: tuning.hostile_step,
        radius: tuning.hostile_radius,
        kind: HostileKind::Normal,
    }
}

/// Boss entering from an edge, aimed at the player
pub fn spawn_boss<R: Rng + ?Sized>(
    arena: Arena,
    player_pos: Vec2,
    tuning: &Tuning,
    rng: &mut R,
) -> Hostile {
    let (_, pos) = edge_point(arena, rng);
    Hostile {
        id: 0,
        pos,
        dir: unit_toward(pos, player_pos),
        speed: tuning.boss_step(),
        radius: tuning.boss_radius(),
        kind: HostileKind::Boss { hp: tuning.boss_hp.max(1) },
    }
}
