//! Simulation step
//!
//! Advances a run by one host tick: player, projectiles, spawning, the
//! hostile pass with collisions, then mode-specific bookkeeping.

use glam::Vec2;

use super::spawn::{spawn_boss, spawn_normal};
use super::state::{GameMode, HostileKind, RunOutcome, RunState};

/// Input flags for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Fire held
    pub fire: bool,
}

impl TickInput {
    /// Unit movement direction (zero when idle or when opposite keys cancel)
    pub fn direction(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.up {
            dir.y -= 1.0;
        }
        if self.down {
            dir.y += 1.0;
        }
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        dir.normalize_or_zero()
    }
}

/// Advance the run by `dt` seconds.
///
/// Returns the outcome on the tick the run ends and `None` otherwise. Once a
/// run has ended every further call is a no-op.
pub fn advance(state: &mut RunState, input: &TickInput, dt: f32) -> Option<RunOutcome> {
    if state.is_over() {
        return None;
    }
    let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
    // No elapsed time: nothing moves, fires, collides or counts down
    if dt == 0.0 {
        return None;
    }
    // Step constants are per nominal tick
    let steps = dt / state.tuning.nominal_tick_secs;

    state.time_ticks += 1;
    state.elapsed += dt;

    move_player(state, input, steps);
    state.player.tick_invincibility(dt);
    update_firing(state, input, dt);
    advance_projectiles(state, steps);
    spawn_hostiles(state, dt);

    let outcome = resolve_hostiles(state, steps).or_else(|| update_mode(state, dt));
    if let Some(outcome) = outcome {
        log::info!(
            "{} run ended: {} (score {}, {:.1}s)",
            state.mode.as_str(),
            outcome.as_str(),
            state.score,
            state.elapsed
        );
        state.outcome = Some(outcome);
    }
    outcome
}

fn move_player(state: &mut RunState, input: &TickInput, steps: f32) {
    let dir = input.direction();
    if dir == Vec2::ZERO {
        return;
    }
    let moved = state.player.pos + dir * state.tuning.player_step * steps;
    state.player.pos = state.arena.clamp(moved);
}

fn update_firing(state: &mut RunState, input: &TickInput, dt: f32) {
    if state.mode.allows_fire() && input.fire && state.player.fire_cooldown <= 0.0 {
        let muzzle = state.player.pos;
        state.spawn_projectile(muzzle);
        state.player.fire_cooldown = state.tuning.fire_cooldown_secs;
    } else {
        state.player.fire_cooldown = (state.player.fire_cooldown - dt).max(0.0);
    }
}

fn advance_projectiles(state: &mut RunState, steps: f32) {
    for projectile in &mut state.projectiles {
        projectile.pos.y -= projectile.speed * steps;
    }
    state.projectiles.retain(|p| p.pos.y >= 0.0);
}

fn spawn_hostiles(state: &mut RunState, dt: f32) {
    state.spawn_timer += dt;
    if state.spawn_timer >= state.tuning.spawn_interval_secs {
        state.spawn_timer = 0.0;
        let hostile = spawn_normal(state.arena, &state.tuning, &mut state.rng);
        state.push_hostile(hostile);
    }
}

/// Single pass over the hostiles in spawn order.
///
/// Destroyed entities are flagged and dropped after the pass, so nothing is
/// visited twice. A loss or boss kill stops the pass; hostiles after that
/// point keep their state for this tick.
fn resolve_hostiles(state: &mut RunState, steps: f32) -> Option<RunOutcome> {
    let can_fire = state.mode.allows_fire();
    let mut hostile_alive = vec![true; state.hostiles.len()];
    let mut projectile_alive = vec![true; state.projectiles.len()];
    let mut outcome = None;

    for i in 0..state.hostiles.len() {
        let player_pos = state.player.pos;
        let hostile_id = state.hostiles[i].id;
        let hostile = &mut state.hostiles[i];
        if hostile.is_boss() {
            hostile.dir = crate::unit_toward(hostile.pos, player_pos);
        }
        hostile.pos += hostile.dir * hostile.speed * steps;

        if !state.arena.contains(hostile.pos) {
            hostile_alive[i] = false;
            continue;
        }
        let body = hostile.body();

        if !state.player.is_invincible() && state.player.body().overlaps(&body) {
            state.player.hp = state.player.hp.saturating_sub(1);
            log::debug!("Player hit by hostile {}, hp {}", hostile_id, state.player.hp);
            if state.player.hp == 0 {
                outcome = Some(RunOutcome::Defeated);
                break;
            }
            state.player.invincible_timer = state.tuning.invincible_secs;
        }

        if !can_fire {
            continue;
        }

        for j in 0..state.projectiles.len() {
            if !projectile_alive[j] || !state.projectiles[j].body().overlaps(&body) {
                continue;
            }
            projectile_alive[j] = false;

            match &mut state.hostiles[i].kind {
                HostileKind::Boss { hp } => {
                    *hp = hp.saturating_sub(1);
                    if *hp == 0 {
                        state.score += state.tuning.boss_score;
                        hostile_alive[i] = false;
                        outcome = Some(RunOutcome::BossDefeated);
                        break;
                    }
                }
                HostileKind::Normal => {
                    state.score += state.tuning.hostile_score;
                    hostile_alive[i] = false;
                    if state.mode == GameMode::Conquest {
                        state.kills += 1;
                    }
                    log::debug!("Hostile {} destroyed, score {}", hostile_id, state.score);
                    break;
                }
            }
        }

        if outcome.is_some() {
            break;
        }
    }

    retain_flagged(&mut state.hostiles, &hostile_alive);
    retain_flagged(&mut state.projectiles, &projectile_alive);
    outcome
}

/// Keep the entries whose flag is set (flags are index-aligned)
fn retain_flagged<T>(items: &mut Vec<T>, alive: &[bool]) {
    let mut index = 0;
    items.retain(|_| {
        let keep = alive.get(index).copied().unwrap_or(true);
        index += 1;
        keep
    });
}

fn update_mode(state: &mut RunState, dt: f32) -> Option<RunOutcome> {
    match state.mode {
        GameMode::Dodge => {
            state.survival_timer += dt;
            while state.survival_timer >= 1.0 {
                state.survival_timer -= 1.0;
                if !state.player.is_invincible() && state.player.is_alive() {
                    state.score += state.tuning.survival_score_per_sec;
                }
            }
            None
        }
        GameMode::TimeAttack => {
            state.time_left = (state.time_left - dt).max(0.0);
            if !state.player.is_alive() {
                Some(RunOutcome::Defeated)
            } else if state.time_left <= 0.0 {
                Some(RunOutcome::TimeUp)
            } else {
                None
            }
        }
        GameMode::Conquest => {
            if state.tuning.boss_enabled
                && !state.boss_spawned
                && !state.boss_active()
                && state.kills >= state.tuning.conquest_kill_target
            {
                let boss = spawn_boss(state.arena, state.player.pos, &state.tuning, &mut state.rng);
                state.push_hostile(boss);
                state.boss_spawned = true;
                log::info!("Boss spawned after {} kills", state.kills);
            }
            if !state.player.is_alive() {
                Some(RunOutcome::Defeated)
            } else {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Hostile, Projectile};
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    const DT: f32 = 0.016;

    /// Tuning with spawning pushed out of reach so tests control the field
    fn quiet_tuning() -> Tuning {
        Tuning {
            spawn_interval_secs: f32::INFINITY,
            ..Tuning::default()
        }
    }

    fn quiet_state(mode: GameMode) -> RunState {
        RunState::new(mode, quiet_tuning(), 12345)
    }

    fn normal_at(pos: Vec2) -> Hostile {
        Hostile {
            id: 0,
            pos,
            dir: Vec2::new(0.0, 1.0),
            speed: 0.0,
            radius: 15.0,
            kind: HostileKind::Normal,
        }
    }

    fn boss_at(pos: Vec2, hp: u32) -> Hostile {
        Hostile {
            speed: 0.0,
            radius: 75.0,
            kind: HostileKind::Boss { hp },
            ..normal_at(pos)
        }
    }

    fn projectile_at(state: &mut RunState, pos: Vec2) {
        let id = state.next_entity_id();
        state.projectiles.push(Projectile {
            id,
            pos,
            speed: 0.0,
            radius: 5.0,
        });
    }

    #[test]
    fn test_diagonal_movement_is_normalized() {
        let mut state = quiet_state(GameMode::Dodge);
        let start = state.player.pos;
        let input = TickInput {
            up: true,
            right: true,
            ..Default::default()
        };
        advance(&mut state, &input, DT);
        let moved = state.player.pos - start;
        assert!((moved.length() - 5.0).abs() < 1e-3);
        assert!(moved.x > 0.0 && moved.y < 0.0);
    }

    #[test]
    fn test_motion_scales_with_dt() {
        let mut state = quiet_state(GameMode::Dodge);
        let start = state.player.pos;
        let input = TickInput {
            left: true,
            ..Default::default()
        };
        advance(&mut state, &input, DT * 2.0);
        assert!((start.x - state.player.pos.x - 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_player_clamped_to_arena() {
        let mut state = quiet_state(GameMode::Dodge);
        state.player.pos = Vec2::new(2.0, 598.0);
        let input = TickInput {
            left: true,
            down: true,
            ..Default::default()
        };
        advance(&mut state, &input, DT);
        assert_eq!(state.player.pos, Vec2::new(0.0, 600.0));
    }

    #[test]
    fn test_zero_dt_is_a_no_op_for_player_and_timers() {
        let mut state = quiet_state(GameMode::TimeAttack);
        state.player.invincible_timer = 0.5;
        state.player.fire_cooldown = 0.1;
        state.spawn_timer = 0.3;
        let before = state.clone();
        let input = TickInput {
            up: true,
            left: true,
            ..Default::default()
        };
        assert_eq!(advance(&mut state, &input, 0.0), None);
        assert_eq!(state.player.pos, before.player.pos);
        assert_eq!(state.player.invincible_timer, 0.5);
        assert_eq!(state.player.fire_cooldown, 0.1);
        assert_eq!(state.spawn_timer, 0.3);
        assert_eq!(state.time_left, before.time_left);
    }

    #[test]
    fn test_zero_dt_does_not_fire_or_collide() {
        let mut state = quiet_state(GameMode::TimeAttack);
        state.push_hostile(normal_at(state.player.pos));
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        assert_eq!(advance(&mut state, &fire, 0.0), None);
        assert_eq!(state.player.fire_cooldown, 0.0);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.player.hp, 3);
        assert_eq!(state.player.invincible_timer, 0.0);
        assert_eq!(state.hostiles.len(), 1);
    }

    #[test]
    fn test_reversed_projectile_step_still_clears_shots() {
        let tuning = Tuning {
            projectile_step: -8.0,
            spawn_interval_secs: f32::INFINITY,
            ..Tuning::default()
        }
        .sanitized();
        let mut state = RunState::new(GameMode::TimeAttack, tuning, 7);
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        advance(&mut state, &fire, DT);
        assert_eq!(state.projectiles.len(), 1);
        for _ in 0..200 {
            advance(&mut state, &TickInput::default(), DT);
        }
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_zero_spawn_interval_spawns_at_most_once_per_tick() {
        let overrides = serde_json::json!({ "spawn_interval_secs": 0.0 });
        let tuning = Tuning::with_overrides(&Tuning::default(), &overrides).unwrap();
        let mut state = RunState::new(GameMode::Dodge, tuning, 7);
        for _ in 0..100 {
            advance(&mut state, &TickInput::default(), 0.0);
        }
        assert!(state.hostiles.is_empty());
        for _ in 0..10 {
            advance(&mut state, &TickInput::default(), DT);
        }
        assert!(state.hostiles.len() <= 10);
    }

    #[test]
    fn test_negative_and_nan_dt_treated_as_zero() {
        let mut state = quiet_state(GameMode::TimeAttack);
        advance(&mut state, &TickInput::default(), -1.0);
        advance(&mut state, &TickInput::default(), f32::NAN);
        assert_eq!(state.time_left, 60.0);
        assert_eq!(state.elapsed, 0.0);
    }

    #[test]
    fn test_fire_respects_cooldown() {
        let mut state = quiet_state(GameMode::TimeAttack);
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        advance(&mut state, &fire, DT);
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.player.fire_cooldown, 0.2);

        // Cooldown still running: no new shot, timer counts down
        advance(&mut state, &fire, 0.1);
        assert_eq!(state.projectiles.len(), 1);
        assert!((state.player.fire_cooldown - 0.1).abs() < 1e-6);

        advance(&mut state, &fire, 0.15);
        assert_eq!(state.player.fire_cooldown, 0.0);
        advance(&mut state, &fire, DT);
        assert_eq!(state.projectiles.len(), 2);
    }

    #[test]
    fn test_dodge_mode_cannot_fire() {
        let mut state = quiet_state(GameMode::Dodge);
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        for _ in 0..10 {
            advance(&mut state, &fire, DT);
        }
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_projectile_leaving_top_is_removed() {
        let mut state = quiet_state(GameMode::TimeAttack);
        state.spawn_projectile(Vec2::new(100.0, 4.0));
        // A hostile just above the arena top would overlap if the shot survived
        state.push_hostile(normal_at(Vec2::new(100.0, 0.0)));
        advance(&mut state, &TickInput::default(), DT);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.hostiles.len(), 1);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_spawn_timer_creates_normal_hostile() {
        let mut state = RunState::new(GameMode::Dodge, Tuning::default(), 42);
        state.spawn_timer = 0.9;
        advance(&mut state, &TickInput::default(), DT);
        assert!(state.hostiles.is_empty());
        state.spawn_timer = 0.99;
        advance(&mut state, &TickInput::default(), DT);
        assert_eq!(state.hostiles.len(), 1);
        assert_eq!(state.spawn_timer, 0.0);
        assert!(!state.hostiles[0].is_boss());
    }

    #[test]
    fn test_hostile_leaving_arena_is_removed_without_score() {
        let mut state = quiet_state(GameMode::TimeAttack);
        let mut h = normal_at(Vec2::new(10.0, 1.0));
        h.dir = Vec2::new(0.0, -1.0);
        h.speed = 2.0;
        state.push_hostile(h);
        advance(&mut state, &TickInput::default(), DT);
        assert!(state.hostiles.is_empty());
        assert_eq!(state.score, 0);
        assert_eq!(state.player.hp, 3);
    }

    #[test]
    fn test_contact_damages_and_grants_invincibility() {
        let mut state = quiet_state(GameMode::Dodge);
        let pos = state.player.pos;
        state.push_hostile(normal_at(pos));
        advance(&mut state, &TickInput::default(), DT);
        assert_eq!(state.player.hp, 2);
        assert_eq!(state.player.invincible_timer, 1.0);
        // Contact does not destroy the hostile
        assert_eq!(state.hostiles.len(), 1);
    }

    #[test]
    fn test_invincible_player_takes_no_contact_damage() {
        let mut state = quiet_state(GameMode::Dodge);
        state.player.invincible_timer = 5.0;
        let pos = state.player.pos;
        for _ in 0..3 {
            state.push_hostile(normal_at(pos));
        }
        for _ in 0..10 {
            advance(&mut state, &TickInput::default(), DT);
        }
        assert_eq!(state.player.hp, 3);
    }

    #[test]
    fn test_loss_stops_the_hostile_pass() {
        let mut state = quiet_state(GameMode::TimeAttack);
        state.player.hp = 1;
        let pos = state.player.pos;
        state.push_hostile(normal_at(pos));
        let mut trailing = normal_at(Vec2::new(50.0, 50.0));
        trailing.speed = 2.0;
        state.push_hostile(trailing);

        let outcome = advance(&mut state, &TickInput::default(), DT);
        assert_eq!(outcome, Some(RunOutcome::Defeated));
        assert_eq!(state.player.hp, 0);
        // The second hostile was never moved this tick
        assert_eq!(state.hostiles[1].pos, Vec2::new(50.0, 50.0));
        // Countdown untouched after a loss
        assert_eq!(state.time_left, 60.0);
    }

    #[test]
    fn test_exact_contact_projectile_kills_normal_hostile() {
        let mut state = quiet_state(GameMode::TimeAttack);
        state.push_hostile(normal_at(Vec2::new(100.0, 100.0)));
        // Distance 20 == 15 + 5
        projectile_at(&mut state, Vec2::new(100.0, 120.0));
        let outcome = advance(&mut state, &TickInput::default(), DT);
        assert_eq!(outcome, None);
        assert!(state.hostiles.is_empty());
        assert!(state.projectiles.is_empty());
        assert_eq!(state.score, 100);
    }

    #[test]
    fn test_one_projectile_kills_only_one_hostile() {
        let mut state = quiet_state(GameMode::Conquest);
        state.push_hostile(normal_at(Vec2::new(100.0, 100.0)));
        state.push_hostile(normal_at(Vec2::new(104.0, 100.0)));
        projectile_at(&mut state, Vec2::new(102.0, 100.0));
        advance(&mut state, &TickInput::default(), DT);
        assert_eq!(state.hostiles.len(), 1);
        assert_eq!(state.score, 100);
        assert_eq!(state.kills, 1);
    }

    #[test]
    fn test_kills_only_counted_in_conquest() {
        let mut state = quiet_state(GameMode::TimeAttack);
        state.push_hostile(normal_at(Vec2::new(100.0, 100.0)));
        projectile_at(&mut state, Vec2::new(100.0, 100.0));
        advance(&mut state, &TickInput::default(), DT);
        assert_eq!(state.score, 100);
        assert_eq!(state.kills, 0);
    }

    #[test]
    fn test_boss_spawns_once_at_kill_target() {
        let mut state = quiet_state(GameMode::Conquest);
        state.kills = 9;
        advance(&mut state, &TickInput::default(), DT);
        assert!(!state.boss_spawned);

        state.kills = 10;
        advance(&mut state, &TickInput::default(), DT);
        assert!(state.boss_spawned);
        assert_eq!(state.hostiles.iter().filter(|h| h.is_boss()).count(), 1);

        // Boss leaves the field: no second boss even with more kills
        state.hostiles.clear();
        state.kills = 25;
        for _ in 0..5 {
            advance(&mut state, &TickInput::default(), DT);
        }
        assert!(state.hostiles.iter().all(|h| !h.is_boss()));
    }

    #[test]
    fn test_boss_without_boss_fight_never_spawns() {
        let tuning = Tuning {
            boss_enabled: false,
            ..quiet_tuning()
        };
        let mut state = RunState::new(GameMode::Conquest, tuning, 1);
        state.kills = 50;
        advance(&mut state, &TickInput::default(), DT);
        assert!(!state.boss_spawned);
        assert!(state.hostiles.is_empty());
    }

    #[test]
    fn test_boss_reaims_at_player() {
        let mut state = quiet_state(GameMode::Conquest);
        state.player.invincible_timer = 10.0;
        let mut boss = boss_at(Vec2::new(100.0, 100.0), 5);
        boss.dir = Vec2::new(1.0, 0.0);
        boss.speed = 1.5;
        state.push_hostile(boss);
        advance(&mut state, &TickInput::default(), DT);
        let expected = (state.player.pos - Vec2::new(100.0, 100.0)).normalize();
        assert!((state.hostiles[0].dir - expected).length() < 1e-5);
    }

    #[test]
    fn test_boss_absorbs_hits_then_ends_run() {
        let mut state = quiet_state(GameMode::Conquest);
        state.boss_spawned = true;
        state.push_hostile(boss_at(Vec2::new(100.0, 100.0), 3));

        // Two overlapping shots in the same tick both land
        projectile_at(&mut state, Vec2::new(100.0, 100.0));
        projectile_at(&mut state, Vec2::new(110.0, 100.0));
        assert_eq!(advance(&mut state, &TickInput::default(), DT), None);
        assert_eq!(state.hostiles[0].kind, HostileKind::Boss { hp: 1 });
        assert!(state.projectiles.is_empty());
        assert_eq!(state.score, 0);

        projectile_at(&mut state, Vec2::new(100.0, 100.0));
        let outcome = advance(&mut state, &TickInput::default(), DT);
        assert_eq!(outcome, Some(RunOutcome::BossDefeated));
        assert_eq!(state.score, 500);
        assert!(state.hostiles.iter().all(|h| !h.is_boss()));
    }

    #[test]
    fn test_boss_kill_suppresses_later_scoring() {
        let mut state = quiet_state(GameMode::Conquest);
        state.boss_spawned = true;
        state.push_hostile(boss_at(Vec2::new(100.0, 100.0), 1));
        state.push_hostile(normal_at(Vec2::new(500.0, 100.0)));
        projectile_at(&mut state, Vec2::new(100.0, 100.0));
        projectile_at(&mut state, Vec2::new(500.0, 100.0));
        let outcome = advance(&mut state, &TickInput::default(), DT);
        assert_eq!(outcome, Some(RunOutcome::BossDefeated));
        assert_eq!(state.score, 500);
        assert_eq!(state.kills, 0);
    }

    #[test]
    fn test_normal_kill_never_ends_run() {
        let mut state = quiet_state(GameMode::Conquest);
        for k in 0..5 {
            state.push_hostile(normal_at(Vec2::new(100.0 + k as f32 * 100.0, 100.0)));
            projectile_at(&mut state, Vec2::new(100.0 + k as f32 * 100.0, 100.0));
        }
        assert_eq!(advance(&mut state, &TickInput::default(), DT), None);
        assert_eq!(state.kills, 5);
        assert_eq!(state.score, 500);
    }

    #[test]
    fn test_dodge_scores_per_whole_second() {
        let mut state = quiet_state(GameMode::Dodge);
        let mut last = 0;
        for step in 1..=6 {
            advance(&mut state, &TickInput::default(), 0.5);
            assert!(state.score >= last);
            if step % 2 == 0 {
                assert_eq!(state.score, last + 10);
            } else {
                assert_eq!(state.score, last);
            }
            last = state.score;
        }
        assert_eq!(state.score, 30);
    }

    #[test]
    fn test_dodge_no_score_while_invincible() {
        let mut state = quiet_state(GameMode::Dodge);
        state.player.invincible_timer = 10.0;
        advance(&mut state, &TickInput::default(), 1.0);
        assert_eq!(state.score, 0);
        assert_eq!(state.survival_timer, 0.0);
    }

    #[test]
    fn test_countdown_clamps_and_signals_once() {
        let mut state = quiet_state(GameMode::TimeAttack);
        state.time_left = 0.3;
        let outcome = advance(&mut state, &TickInput::default(), 0.5);
        assert_eq!(outcome, Some(RunOutcome::TimeUp));
        assert_eq!(state.time_left, 0.0);
        assert_eq!(state.outcome, Some(RunOutcome::TimeUp));

        assert_eq!(advance(&mut state, &TickInput::default(), 0.5), None);
        assert_eq!(state.time_left, 0.0);
    }

    #[test]
    fn test_determinism() {
        // Two runs with the same seed and inputs stay in lockstep
        let mut a = RunState::new(GameMode::Conquest, Tuning::default(), 99999);
        let mut b = RunState::new(GameMode::Conquest, Tuning::default(), 99999);
        let inputs = [
            TickInput { left: true, fire: true, ..Default::default() },
            TickInput { up: true, ..Default::default() },
            TickInput { fire: true, right: true, ..Default::default() },
            TickInput::default(),
        ];
        for i in 0..400 {
            let input = &inputs[i % inputs.len()];
            advance(&mut a, input, DT);
            advance(&mut b, input, DT);
        }
        assert_eq!(a.score, b.score);
        assert_eq!(a.hostiles.len(), b.hostiles.len());
        for (ha, hb) in a.hostiles.iter().zip(&b.hostiles) {
            assert_eq!(ha.pos, hb.pos);
        }
        assert_eq!(a.player.pos, b.player.pos);
    }

    proptest! {
        #[test]
        fn prop_zero_dt_leaves_player_and_timers(
            mode_index in 0usize..3,
            x in 0.0f32..800.0, y in 0.0f32..600.0,
            inv in 0.0f32..2.0, cooldown in 0.0f32..0.2,
            up: bool, down: bool, left: bool, right: bool, fire: bool,
            touching: bool,
        ) {
            let mut state = quiet_state(GameMode::ALL[mode_index]);
            state.player.pos = Vec2::new(x, y);
            state.player.invincible_timer = inv;
            state.player.fire_cooldown = cooldown;
            if touching {
                state.push_hostile(normal_at(Vec2::new(x, y)));
            }
            let time_left = state.time_left;
            let input = TickInput { up, down, left, right, fire };
            prop_assert_eq!(advance(&mut state, &input, 0.0), None);
            prop_assert_eq!(state.player.pos, Vec2::new(x, y));
            prop_assert_eq!(state.player.invincible_timer, inv);
            prop_assert_eq!(state.player.fire_cooldown, cooldown);
            prop_assert_eq!(state.player.hp, 3);
            prop_assert_eq!(state.time_left, time_left);
            prop_assert!(state.projectiles.is_empty());
            prop_assert_eq!(state.hostiles.len(), usize::from(touching));
            prop_assert_eq!(state.score, 0);
        }

        #[test]
        fn prop_player_stays_in_arena(
            moves in proptest::collection::vec((any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()), 1..200),
        ) {
            let mut state = quiet_state(GameMode::Dodge);
            for (up, down, left, right) in moves {
                let input = TickInput { up, down, left, right, fire: false };
                advance(&mut state, &input, DT);
                prop_assert!(state.arena.contains(state.player.pos));
            }
        }
    }
}
