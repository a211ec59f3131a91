//! Game state and core simulation types
//!
//! The engine exclusively owns every collection here. All mutation happens
//! inside `tick`, `start_game` or `reset`; the host only reads state and
//! drains events.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::events::{GameEvent, GameOverSummary, ScoreSnapshot};
use crate::tuning::Tuning;

use super::engagement::Engagement;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Initial state, before the first start
    Waiting,
    /// Active gameplay
    Playing,
    /// Motion frozen; scheduled timers keep counting
    Paused,
    /// Run ended. Terminal until reset.
    GameOver,
}

/// The player's ship, fixed to a horizontal line near the bottom edge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(ARENA_WIDTH / 2.0, PLAYER_Y),
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
        }
    }
}

/// A bullet entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec2,
    /// Signed vertical velocity per tick (negative = upward)
    pub vel_y: f32,
    pub spawned_tick: u64,
}

/// Engagement tag on each enemy, checked atomically within the tick.
///
/// `Pending` is the concurrency guard: a second bullet cannot re-trigger an
/// engagement on an enemy already mid-resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EnemyStatus {
    #[default]
    Idle,
    Pending,
    Resolved,
}

/// An enemy entity carrying one bug concept
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    /// Horizontal direction, +1 right / -1 left
    pub dir: f32,
    pub speed: f32,
    /// Opaque label naming the educational concept this enemy represents
    pub bug: String,
    /// One hit destroys
    pub health: u8,
    pub status: EnemyStatus,
    /// Random phase offset so the formation breathes instead of moving in lockstep
    pub bob_phase: f32,
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PowerUpKind {
    DoubleShot,
    Shield,
}

/// A falling pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
}

/// Fire behavior, branched on at fire time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FireMode {
    #[default]
    Single,
    Double,
}

/// Active timed power-up effects
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ActiveEffects {
    /// Remaining double-shot ticks; fire mode and bullet cap derive from this,
    /// so expiry reverts both atomically
    pub double_shot_ticks: u32,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded RNG; power-up drops and bob phases draw from here
    pub rng: Pcg32,
    /// Balance knobs for this session
    pub tuning: Tuning,
    /// Current phase
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,

    // --- Session ledger ---
    pub score: u64,
    pub wave: u32,
    pub lives: u32,
    /// Enemies resolved this wave (reset at each wave start)
    pub enemies_killed: u32,
    /// Enemies spawned this wave
    pub total_enemies: u32,

    // --- Entity store ---
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub power_ups: Vec<PowerUp>,

    // --- Scheduled continuations (owned by the state, dropped on reset) ---
    /// In-flight bug resolutions
    pub engagements: Vec<Engagement>,
    /// Ticks until the next wave spawns; `None` = no spawn pending
    pub wave_timer: Option<u32>,
    pub effects: ActiveEffects,
    /// Ticks until the fire input is accepted again
    pub fire_cooldown: u32,

    /// Next entity ID
    next_id: u32,
    /// Buffered observations, drained by the host each tick
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a fresh session in the `Waiting` phase
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let lives = tuning.lives;
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            phase: GamePhase::Waiting,
            time_ticks: 0,
            score: 0,
            wave: 1,
            lives,
            enemies_killed: 0,
            total_enemies: 0,
            player: Player::default(),
            bullets: Vec::new(),
            enemies: Vec::new(),
            power_ups: Vec::new(),
            engagements: Vec::new(),
            wave_timer: None,
            effects: ActiveEffects::default(),
            fire_cooldown: 0,
            next_id: 1,
            events: Vec::new(),
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Current fire mode, derived from the double-shot timer
    pub fn fire_mode(&self) -> FireMode {
        if self.effects.double_shot_ticks > 0 {
            FireMode::Double
        } else {
            FireMode::Single
        }
    }

    /// On-screen bullet cap for the current fire mode
    pub fn bullet_cap(&self) -> usize {
        match self.fire_mode() {
            FireMode::Single => self.tuning.bullet_cap,
            FireMode::Double => self.tuning.bullet_cap_double,
        }
    }

    /// Spawn a bullet at `(x, y)` unless the cap is reached.
    /// A capped fire request is a silent no-op, not an error.
    pub fn spawn_bullet(&mut self, x: f32, y: f32) {
        if self.bullets.len() >= self.bullet_cap() {
            return;
        }
        let id = self.next_entity_id();
        let spawned_tick = self.time_ticks;
        self.bullets.push(Bullet {
            id,
            pos: Vec2::new(x, y),
            vel_y: -BULLET_SPEED,
            spawned_tick,
        });
    }

    /// Ledger snapshot for observations
    pub fn snapshot(&self) -> ScoreSnapshot {
        ScoreSnapshot {
            score: self.score,
            wave: self.wave,
            lives: self.lives,
        }
    }

    /// Award points and notify
    pub fn add_score(&mut self, points: u32) {
        self.score += u64::from(points);
        let snap = self.snapshot();
        self.push_event(GameEvent::ScoreChanged(snap));
    }

    /// Remove one life; entering game over happens here, exactly once
    pub fn lose_life(&mut self) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.lives = self.lives.saturating_sub(1);
        let snap = self.snapshot();
        self.push_event(GameEvent::ScoreChanged(snap));
        if self.lives == 0 {
            self.phase = GamePhase::GameOver;
            log::info!(
                "game over: score={} wave={} killed={}",
                self.score,
                self.wave,
                self.enemies_killed
            );
            self.push_event(GameEvent::GameOver(GameOverSummary {
                score: self.score,
                wave: self.wave,
                enemies_killed: self.enemies_killed,
            }));
        }
    }

    /// Extra life from the shield power-up; permanent for the session
    pub fn add_life(&mut self) {
        self.lives += 1;
        let snap = self.snapshot();
        self.push_event(GameEvent::ScoreChanged(snap));
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all buffered observations, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bullet_cap_is_a_silent_noop() {
        let mut state = GameState::new(1, Tuning::default());
        for _ in 0..10 {
            state.spawn_bullet(400.0, 500.0);
        }
        assert_eq!(state.bullets.len(), state.tuning.bullet_cap);
    }

    #[test]
    fn cap_raises_under_double_shot() {
        let mut state = GameState::new(1, Tuning::default());
        state.effects.double_shot_ticks = 100;
        assert_eq!(state.fire_mode(), FireMode::Double);
        for _ in 0..10 {
            state.spawn_bullet(400.0, 500.0);
        }
        assert_eq!(state.bullets.len(), state.tuning.bullet_cap_double);
    }

    #[test]
    fn lives_never_go_negative() {
        let mut state = GameState::new(1, Tuning::default());
        state.phase = GamePhase::Playing;
        for _ in 0..5 {
            state.lose_life();
        }
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn game_over_emitted_exactly_once() {
        let mut state = GameState::new(1, Tuning::default());
        state.phase = GamePhase::Playing;
        for _ in 0..5 {
            state.lose_life();
        }
        let game_overs = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::GameOver(_)))
            .count();
        assert_eq!(game_overs, 1);
    }
}
