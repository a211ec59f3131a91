//! Wave composition and advancement
//!
//! Waves are a `rows x cols` grid of enemies, each carrying a bug label
//! requested from the oracle (with a static fallback when it fails). Clearing
//! a wave awards a scaled bonus and arms the wave-advance timer; the spawn
//! itself happens in a later tick.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use crate::consts::*;
use crate::events::GameEvent;
use crate::oracle::{Oracle, fallback_bugs};

use super::state::{Enemy, EnemyStatus, GamePhase, GameState};

/// Difficulty descriptor for one wave
#[derive(Debug, Clone, Copy)]
pub struct WaveTheme {
    pub theme: &'static str,
    pub complexity: &'static str,
    pub examples: &'static [&'static str],
}

/// Themes cycle after this many waves
pub const MAX_THEME_WAVE: u32 = 8;

static WAVE_THEMES: [WaveTheme; MAX_THEME_WAVE as usize] = [
    WaveTheme {
        theme: "Basic Programming",
        complexity: "Beginner",
        examples: &["null reference", "undefined variable", "syntax error"],
    },
    WaveTheme {
        theme: "Data Handling",
        complexity: "Intermediate",
        examples: &["array bounds", "type conversion", "string manipulation"],
    },
    WaveTheme {
        theme: "Web Security",
        complexity: "Advanced",
        examples: &["SQL injection", "XSS vulnerability", "CSRF attack"],
    },
    WaveTheme {
        theme: "Concurrency",
        complexity: "Expert",
        examples: &["race condition", "deadlock", "thread synchronization"],
    },
    WaveTheme {
        theme: "Performance",
        complexity: "Master",
        examples: &["memory leak", "infinite recursion", "algorithm complexity"],
    },
    WaveTheme {
        theme: "Architecture",
        complexity: "Architect",
        examples: &["design pattern violation", "circular dependency", "tight coupling"],
    },
    WaveTheme {
        theme: "Advanced Security",
        complexity: "Security Expert",
        examples: &["buffer overflow", "privilege escalation", "cryptographic weakness"],
    },
    WaveTheme {
        theme: "Distributed Systems",
        complexity: "System Expert",
        examples: &["network partition", "consensus failure", "distributed deadlock"],
    },
];

/// Theme for a wave; cycles past the table with the same content
pub fn theme_for_wave(wave: u32) -> &'static WaveTheme {
    let idx = (wave.max(1) - 1) % MAX_THEME_WAVE;
    &WAVE_THEMES[idx as usize]
}

/// Spawn the current wave's enemy grid.
///
/// The oracle supplies the bug labels; on failure (or an empty answer) the
/// static fallback list stands in. Labels cycle modulo their count, so the
/// grid is always full even when the oracle under-delivers.
pub fn start_wave(state: &mut GameState, oracle: &mut dyn Oracle) {
    state.enemies.clear();

    let enemy_count = state.tuning.enemy_count();
    state.push_event(GameEvent::Info {
        message: format!(
            "Generating {enemy_count} unique bugs for wave {}...",
            state.wave
        ),
    });

    let labels = match oracle.wave_bugs(state.wave, enemy_count) {
        Ok(bugs) if !bugs.is_empty() => bugs,
        Ok(_) => {
            log::warn!("oracle returned no bugs for wave {}, using fallback", state.wave);
            fallback_bugs(enemy_count)
        }
        Err(err) => {
            log::warn!("wave bug generation failed ({err}), using fallback");
            fallback_bugs(enemy_count)
        }
    };

    let rows = state.tuning.enemy_rows;
    let cols = state.tuning.enemy_cols;
    let start_x = (ARENA_WIDTH - (cols - 1) as f32 * ENEMY_SPACING_X) / 2.0;
    let speed = ENEMY_BASE_SPEED + (state.wave - 1) as f32 * ENEMY_SPEED_PER_WAVE;

    let mut bug_index = 0usize;
    for row in 0..rows {
        for col in 0..cols {
            let x = start_x + col as f32 * ENEMY_SPACING_X;
            let y = ENEMY_START_Y + row as f32 * ENEMY_SPACING_Y;
            let bug = labels[bug_index % labels.len()].clone();
            bug_index += 1;

            let bob_phase = state.rng.random_range(0.0..TAU);
            let id = state.next_entity_id();
            state.enemies.push(Enemy {
                id,
                pos: Vec2::new(x, y),
                dir: 1.0,
                speed,
                bug,
                health: 1,
                status: EnemyStatus::Idle,
                bob_phase,
            });
        }
    }

    state.total_enemies = state.enemies.len() as u32;
    state.enemies_killed = 0;

    let theme = theme_for_wave(state.wave);
    log::info!(
        "wave {} started: {} enemies, theme '{}'",
        state.wave,
        state.total_enemies,
        theme.theme
    );
    state.push_event(GameEvent::Info {
        message: format!(
            "Wave {}: {} ({})",
            state.wave, theme.theme, theme.complexity
        ),
    });
}

/// Award the wave bonus, advance the counter, and arm the spawn timer
pub fn complete_wave(state: &mut GameState) {
    let bonus = state.tuning.wave_bonus * state.wave;
    state.add_score(bonus);
    state.push_event(GameEvent::WaveComplete {
        wave: state.wave,
        bonus,
    });
    log::info!("wave {} complete, bonus {}", state.wave, bonus);

    state.wave += 1;
    state.wave_timer = Some(state.tuning.wave_advance_ticks);
}

/// Complete the wave if its last enemy just left the store.
///
/// Skipped once the run is over, and while a spawn is already pending
/// (so a cleared wave triggers exactly one bonus and one scheduled spawn).
pub fn check_wave_clear(state: &mut GameState) {
    if state.phase == GamePhase::GameOver {
        return;
    }
    if state.wave_timer.is_some() || state.total_enemies == 0 {
        return;
    }
    if state.enemies.is_empty() {
        complete_wave(state);
    }
}
