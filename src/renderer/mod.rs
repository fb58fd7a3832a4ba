//! Presentation layer
//!
//! `snapshot` turns a `RunState` into a renderer-agnostic [`Frame`];
//! `terminal` paints frames and the menu with crossterm.

pub mod terminal;

use glam::Vec2;

use crate::sim::{Arena, GameMode, HostileKind, RunState};

/// RGBA color, components in 0-1
pub type Color = [f32; 4];

pub const PROJECTILE_COLOR: Color = [1.0, 1.0, 1.0, 1.0];
pub const HOSTILE_COLOR: Color = [1.0, 0.0, 0.0, 1.0];
pub const BOSS_COLOR: Color = [1.0, 0.3, 0.3, 1.0];
pub const PLAYER_COLOR: Color = [0.0, 1.0, 0.0, 1.0];
/// Invincibility blink alternates between these two
pub const PLAYER_BLINK_COLORS: [Color; 2] = [[1.0, 1.0, 0.0, 1.0], [1.0, 0.5, 0.0, 1.0]];
/// Length of one blink phase in simulated seconds
pub const BLINK_PHASE_SECS: f32 = 0.2;
pub const HUD_COLOR: Color = [1.0, 1.0, 1.0, 1.0];

/// What a shape represents (lets painters pick glyphs/sprites)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Projectile,
    Hostile,
    Boss,
    Player,
}

/// A filled circle to draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shape {
    pub kind: ShapeKind,
    pub pos: Vec2,
    pub radius: f32,
    pub color: Color,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub arena: Arena,
    /// Back to front: projectiles, hostiles, player
    pub shapes: Vec<Shape>,
    pub hud: String,
}

/// Build the frame for the current state
pub fn snapshot(state: &RunState) -> Frame {
    let mut shapes =
        Vec::with_capacity(state.projectiles.len() + state.hostiles.len() + 1);

    for projectile in &state.projectiles {
        shapes.push(Shape {
            kind: ShapeKind::Projectile,
            pos: projectile.pos,
            radius: projectile.radius,
            color: PROJECTILE_COLOR,
        });
    }

    for hostile in &state.hostiles {
        let (kind, color) = if hostile.is_boss() {
            (ShapeKind::Boss, BOSS_COLOR)
        } else {
            (ShapeKind::Hostile, HOSTILE_COLOR)
        };
        shapes.push(Shape {
            kind,
            pos: hostile.pos,
            radius: hostile.radius,
            color,
        });
    }

    if state.player.is_alive() {
        let color = if state.player.is_invincible() {
            PLAYER_BLINK_COLORS[blink_phase(state.elapsed)]
        } else {
            PLAYER_COLOR
        };
        shapes.push(Shape {
            kind: ShapeKind::Player,
            pos: state.player.pos,
            radius: state.player.radius,
            color,
        });
    }

    Frame {
        arena: state.arena,
        shapes,
        hud: hud_line(state),
    }
}

/// Index into `PLAYER_BLINK_COLORS` for a run time
fn blink_phase(elapsed: f32) -> usize {
    ((elapsed.max(0.0) / BLINK_PHASE_SECS) as u64 % 2) as usize
}

/// Mode, hit points, score and the mode's own counter
pub fn hud_line(state: &RunState) -> String {
    let base = format!(
        "Mode: {} | HP:{} | Score:{}",
        state.mode.as_str(),
        state.player.hp,
        state.score
    );
    match state.mode {
        GameMode::Dodge => base,
        GameMode::TimeAttack => format!("{} | Time:{:.1}", base, state.time_left),
        GameMode::Conquest if state.boss_active() => {
            let boss_hp = state
                .hostiles
                .iter()
                .find_map(|h| match h.kind {
                    HostileKind::Boss { hp } => Some(hp),
                    HostileKind::Normal => None,
                })
                .unwrap_or(0);
            format!("{} | Kills:{} | Boss HP:{}", base, state.kills, boss_hp)
        }
        GameMode::Conquest => format!("{} | Kills:{}", base, state.kills),
    }
}
