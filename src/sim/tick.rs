//! Fixed timestep simulation tick
//!
//! Stage order within one tick is fixed: input, bullets, enemies (including
//! breaches and the formation bounce), collision resolution, engagements and
//! effect timers, power-ups. Simultaneous collisions are therefore
//! reconciled deterministically in a single pass.

use crate::consts::*;
use crate::events::GameEvent;
use crate::oracle::Oracle;

use super::collision;
use super::engagement;
use super::state::{EnemyStatus, FireMode, GamePhase, GameState, Player, PowerUpKind};
use super::wave;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Move the player left / right
    pub left: bool,
    pub right: bool,
    /// Fire request (rate-limited and capped; excess is a no-op)
    pub fire: bool,
    /// Pause toggle
    pub pause: bool,
}

/// Reset the ledger and start wave 1. Waiting or a finished run both
/// restart from here.
pub fn start_game(state: &mut GameState, oracle: &mut dyn Oracle) {
    clear_session(state);
    state.phase = GamePhase::Playing;
    let snap = state.snapshot();
    state.push_event(GameEvent::ScoreChanged(snap));
    log::info!("session started (seed {})", state.seed);
    wave::start_wave(state, oracle);
}

/// Tear down all entities and scheduled continuations, back to `Waiting`.
///
/// Because every timer lives on the state, nothing can fire against a reset
/// session afterwards.
pub fn reset(state: &mut GameState) {
    clear_session(state);
    state.phase = GamePhase::Waiting;
    state.drain_events();
}

fn clear_session(state: &mut GameState) {
    state.score = 0;
    state.wave = 1;
    state.lives = state.tuning.lives;
    state.enemies_killed = 0;
    state.total_enemies = 0;
    state.player = Player::default();
    state.bullets.clear();
    state.enemies.clear();
    state.power_ups.clear();
    state.engagements.clear();
    state.wave_timer = None;
    state.effects = Default::default();
    state.fire_cooldown = 0;
}

/// Flip playing/paused. No-op in any other phase.
pub fn toggle_pause(state: &mut GameState) {
    match state.phase {
        GamePhase::Playing => {
            state.phase = GamePhase::Paused;
            state.push_event(GameEvent::Info {
                message: "Paused".into(),
            });
        }
        GamePhase::Paused => {
            state.phase = GamePhase::Playing;
            state.push_event(GameEvent::Info {
                message: "Resumed".into(),
            });
        }
        _ => {}
    }
}

/// Advance the game by one fixed timestep.
///
/// While paused, motion and input are skipped but already-scheduled timers
/// (wave advance, engagement delays, double-shot expiry) keep counting.
pub fn tick(state: &mut GameState, oracle: &mut dyn Oracle, input: &TickInput) {
    if input.pause {
        toggle_pause(state);
    }

    match state.phase {
        GamePhase::Waiting | GamePhase::GameOver => return,
        _ => {}
    }

    state.time_ticks += 1;

    if state.phase == GamePhase::Playing {
        handle_input(state, input);
        update_bullets(state);
        update_enemies(state);
    }

    // A breach above may have ended the run; freeze everything if so
    if state.phase == GamePhase::GameOver {
        return;
    }

    if state.phase == GamePhase::Playing {
        resolve_collisions(state);
    }

    engagement::advance(state, oracle);
    update_effects(state);
    tick_wave_timer(state, oracle);

    if state.phase == GamePhase::Playing {
        update_power_ups(state);
    }
}

fn handle_input(state: &mut GameState, input: &TickInput) {
    let half_w = state.player.width / 2.0;
    if input.left {
        state.player.pos.x = (state.player.pos.x - PLAYER_SPEED).max(half_w);
    }
    if input.right {
        state.player.pos.x = (state.player.pos.x + PLAYER_SPEED).min(ARENA_WIDTH - half_w);
    }

    if state.fire_cooldown > 0 {
        state.fire_cooldown -= 1;
    }
    if input.fire && state.fire_cooldown == 0 {
        let (x, y) = (state.player.pos.x, state.player.pos.y);
        match state.fire_mode() {
            FireMode::Single => state.spawn_bullet(x, y),
            FireMode::Double => {
                state.spawn_bullet(x - DOUBLE_SHOT_OFFSET, y);
                state.spawn_bullet(x + DOUBLE_SHOT_OFFSET, y);
            }
        }
        state.fire_cooldown = FIRE_COOLDOWN_TICKS;
    }
}

fn update_bullets(state: &mut GameState) {
    for bullet in &mut state.bullets {
        bullet.pos.y += bullet.vel_y;
    }
    state.bullets.retain(|b| b.pos.y >= 0.0);
}

fn update_enemies(state: &mut GameState) {
    if state.enemies.is_empty() {
        return;
    }

    let mut min_x = f32::MAX;
    let mut max_x = f32::MIN;
    for enemy in &mut state.enemies {
        enemy.pos.x += enemy.speed * enemy.dir;
        enemy.pos.y += ENEMY_DESCENT
            + ((enemy.pos.x + enemy.bob_phase) * ENEMY_BOB_FREQUENCY).sin() * ENEMY_BOB_AMPLITUDE;
        min_x = min_x.min(enemy.pos.x);
        max_x = max_x.max(enemy.pos.x);
    }

    // Danger-line breaches: one life each, no score, no kill credit,
    // no engagement, no drop
    let breached: Vec<u32> = state
        .enemies
        .iter()
        .filter(|e| e.pos.y > DANGER_LINE_Y)
        .map(|e| e.id)
        .collect();
    for id in breached {
        state.lose_life();
        state.enemies.retain(|e| e.id != id);
    }

    // Group bounce: one enemy at a margin flips the whole formation
    if !state.enemies.is_empty()
        && (min_x < FORMATION_EDGE_MARGIN || max_x > ARENA_WIDTH - FORMATION_EDGE_MARGIN)
    {
        for enemy in &mut state.enemies {
            enemy.dir = -enemy.dir;
            enemy.pos.y += FORMATION_BOUNCE_DROP;
        }
    }

    // A fully breached wave still advances
    wave::check_wave_clear(state);
}

fn resolve_collisions(state: &mut GameState) {
    // Bullet vs enemy: first non-pending match wins, one enemy per bullet,
    // one bullet per enemy even within a single tick
    let mut hits: Vec<(u32, u32)> = Vec::new();
    for bullet in &state.bullets {
        for enemy in &state.enemies {
            if enemy.status != EnemyStatus::Idle {
                continue;
            }
            if hits.iter().any(|&(_, eid)| eid == enemy.id) {
                continue;
            }
            if collision::bullet_hits_enemy(bullet.pos, enemy.pos) {
                hits.push((bullet.id, enemy.id));
                break;
            }
        }
    }
    for (bullet_id, enemy_id) in hits {
        state.bullets.retain(|b| b.id != bullet_id);
        engagement::begin(state, enemy_id);
    }

    // Player vs power-up
    let player_pos = state.player.pos;
    let collected: Vec<(u32, PowerUpKind)> = state
        .power_ups
        .iter()
        .filter(|p| collision::player_collects(player_pos, p.pos))
        .map(|p| (p.id, p.kind))
        .collect();
    for (id, kind) in collected {
        state.power_ups.retain(|p| p.id != id);
        apply_power_up(state, kind);
    }
}

fn apply_power_up(state: &mut GameState, kind: PowerUpKind) {
    match kind {
        PowerUpKind::DoubleShot => {
            // Re-pickup while active resets the timer rather than stacking
            state.effects.double_shot_ticks = state.tuning.double_shot_ticks;
            state.push_event(GameEvent::Info {
                message: "Double Shot activated for 8s!".into(),
            });
        }
        PowerUpKind::Shield => {
            state.add_life();
            state.push_event(GameEvent::Info {
                message: "Extra life gained!".into(),
            });
        }
    }
}

fn update_effects(state: &mut GameState) {
    if state.effects.double_shot_ticks > 0 {
        state.effects.double_shot_ticks -= 1;
        if state.effects.double_shot_ticks == 0 {
            // Fire mode and bullet cap both derive from this counter,
            // so they revert together
            state.push_event(GameEvent::Info {
                message: "Double Shot expired".into(),
            });
        }
    }
}

fn tick_wave_timer(state: &mut GameState, oracle: &mut dyn Oracle) {
    if let Some(ticks) = state.wave_timer {
        if ticks <= 1 {
            state.wave_timer = None;
            wave::start_wave(state, oracle);
        } else {
            state.wave_timer = Some(ticks - 1);
        }
    }
}

fn update_power_ups(state: &mut GameState) {
    for p in &mut state.power_ups {
        p.pos.y += POWERUP_FALL_SPEED;
    }
    // Off the bottom edge they simply vanish; no penalty
    state.power_ups.retain(|p| p.pos.y <= ARENA_HEIGHT + 20.0);
}
