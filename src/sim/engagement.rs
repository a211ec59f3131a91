//! The bug-resolution protocol
//!
//! A bullet hit does not destroy an enemy outright; it opens an engagement:
//! the oracle generates a failing test, a fixed dramatic delay passes, the
//! oracle fixes the bug, and only then is the enemy destroyed and scored.
//! Oracle failures shortcut the sequence but always end in destruction -
//! no enemy is ever stranded in `Pending`.

use serde::{Deserialize, Serialize};

use crate::events::GameEvent;
use crate::oracle::Oracle;

use super::state::{EnemyStatus, GameState, PowerUp, PowerUpKind};
use super::wave;

use rand::Rng;

/// Where an in-flight engagement is in its sequence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EngagementPhase {
    /// Waiting for the oracle to produce the failing test
    Generating,
    /// Failing test shown; counting down to the fix request
    AwaitingFix {
        ticks_left: u32,
        test_code: String,
        points: u32,
    },
}

/// One enemy's in-flight resolution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Engagement {
    pub enemy_id: u32,
    pub bug: String,
    pub phase: EngagementPhase,
}

/// Open an engagement for a freshly hit enemy.
///
/// Marks it `Pending` so further bullets pass through, and emits the
/// `Generating` observation.
pub fn begin(state: &mut GameState, enemy_id: u32) {
    let Some(enemy) = state.enemies.iter_mut().find(|e| e.id == enemy_id) else {
        return;
    };
    enemy.status = EnemyStatus::Pending;
    let bug = enemy.bug.clone();
    state.push_event(GameEvent::Generating { bug: bug.clone() });
    state.engagements.push(Engagement {
        enemy_id,
        bug,
        phase: EngagementPhase::Generating,
    });
}

/// Advance every in-flight engagement by one tick.
///
/// Runs while paused as well: engagement delays are scheduled timers, and
/// the pause deliberately does not freeze those.
pub fn advance(state: &mut GameState, oracle: &mut dyn Oracle) {
    if state.engagements.is_empty() {
        return;
    }

    let engagements = std::mem::take(&mut state.engagements);
    let mut survivors: Vec<Engagement> = Vec::with_capacity(engagements.len());

    for eng in engagements {
        let Engagement {
            enemy_id,
            bug,
            phase,
        } = eng;

        // Enemy already gone (danger-line breach mid-engagement): the
        // engagement is moot, drop it without score.
        if !state.enemies.iter().any(|e| e.id == enemy_id) {
            continue;
        }

        match phase {
            EngagementPhase::Generating => match oracle.generate_test(&bug, state.wave) {
                Ok(report) => {
                    let points = report
                        .points_worth
                        .unwrap_or(state.tuning.points_per_enemy);
                    let test_code = report.test_code.clone();
                    state.push_event(GameEvent::TestFailed {
                        bug: bug.clone(),
                        test_code: report.test_code,
                        explanation: report.explanation,
                        severity: report.severity,
                        points,
                    });
                    survivors.push(Engagement {
                        enemy_id,
                        bug,
                        phase: EngagementPhase::AwaitingFix {
                            ticks_left: state.tuning.fix_delay_ticks,
                            test_code,
                            points,
                        },
                    });
                }
                Err(err) => {
                    log::warn!("test generation for '{bug}' failed: {err}");
                    state.push_event(GameEvent::OracleError {
                        bug,
                        message: format!("Test generation failed: {err}"),
                    });
                    destroy_enemy(state, enemy_id);
                }
            },

            EngagementPhase::AwaitingFix {
                ticks_left,
                test_code,
                points,
            } => {
                if ticks_left > 0 {
                    survivors.push(Engagement {
                        enemy_id,
                        bug,
                        phase: EngagementPhase::AwaitingFix {
                            ticks_left: ticks_left - 1,
                            test_code,
                            points,
                        },
                    });
                    continue;
                }
                match oracle.fix_bug(&bug, &test_code) {
                    Ok(fix) => {
                        state.push_event(GameEvent::BugFixed {
                            bug,
                            fix_code: fix.fix_code,
                            explanation: fix.explanation,
                            points,
                        });
                        state.add_score(points);
                    }
                    Err(err) => {
                        log::warn!("fix for '{bug}' failed: {err}");
                        state.push_event(GameEvent::OracleError {
                            bug,
                            message: "Failed to fix bug, but enemy destroyed!".into(),
                        });
                    }
                }
                // Destruction happens regardless of the fix outcome
                destroy_enemy(state, enemy_id);
            }
        }
    }

    // Keep any engagement opened while we were resolving (none today, but
    // the take above must not lose them)
    survivors.extend(state.engagements.drain(..));
    state.engagements = survivors;
}

/// Finalize a resolved enemy: remove it, count the kill, maybe drop a
/// power-up, and let the wave director see the empty store.
pub(super) fn destroy_enemy(state: &mut GameState, enemy_id: u32) {
    let Some(idx) = state.enemies.iter().position(|e| e.id == enemy_id) else {
        return;
    };
    let mut enemy = state.enemies.remove(idx);
    enemy.status = EnemyStatus::Resolved;
    state.enemies_killed += 1;

    if state.rng.random_bool(state.tuning.powerup_drop_chance) {
        let kind = if state.rng.random_bool(0.5) {
            PowerUpKind::DoubleShot
        } else {
            PowerUpKind::Shield
        };
        let id = state.next_entity_id();
        state.power_ups.push(PowerUp {
            id,
            kind,
            pos: enemy.pos,
        });
    }

    wave::check_wave_clear(state);
}
