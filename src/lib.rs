//! Bug Invaders - a coding-bug themed invaders engine
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, waves, game state)
//! - `oracle`: External content provider boundary (bug labels, tests, fixes)
//! - `events`: Observations emitted to the presentation layer
//! - `tuning`: Data-driven game balance
//!
//! The crate is headless: rendering, audio, networking and UI are external
//! collaborators. The host drives `sim::tick` at a fixed rate, feeds it
//! input, and drains `GameEvent`s to update whatever surface it owns.

pub mod events;
pub mod oracle;
pub mod sim;
pub mod tuning;

pub use events::{GameEvent, GameOverSummary, ScoreSnapshot};
pub use oracle::{FixReport, Oracle, OracleError, Severity, StaticOracle, TestReport};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (matches the 60 Hz frame the speeds are tuned for)
    pub const TICK_HZ: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / TICK_HZ as f32;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Player defaults - fixed y line near the bottom edge
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 30.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_Y: f32 = ARENA_HEIGHT - 50.0;

    /// Enemy defaults
    pub const ENEMY_WIDTH: f32 = 35.0;
    pub const ENEMY_HEIGHT: f32 = 25.0;
    pub const ENEMY_BASE_SPEED: f32 = 1.0;
    /// Per-wave speed scaling added on top of the base
    pub const ENEMY_SPEED_PER_WAVE: f32 = 0.2;
    pub const ENEMY_SPACING_X: f32 = 80.0;
    pub const ENEMY_SPACING_Y: f32 = 60.0;
    pub const ENEMY_START_Y: f32 = 50.0;
    /// Constant downward creep per tick
    pub const ENEMY_DESCENT: f32 = 0.05;
    /// Sinusoidal bob amplitude and spatial frequency
    pub const ENEMY_BOB_AMPLITUDE: f32 = 0.05;
    pub const ENEMY_BOB_FREQUENCY: f32 = 0.02;
    /// Horizontal margin that triggers a formation bounce
    pub const FORMATION_EDGE_MARGIN: f32 = 40.0;
    /// Vertical drop applied to the whole formation on bounce
    pub const FORMATION_BOUNCE_DROP: f32 = 10.0;
    /// Enemies past this line breach the defense and cost a life
    pub const DANGER_LINE_Y: f32 = ARENA_HEIGHT - 100.0;

    /// Bullet defaults
    pub const BULLET_WIDTH: f32 = 4.0;
    pub const BULLET_HEIGHT: f32 = 10.0;
    pub const BULLET_SPEED: f32 = 8.0;
    /// Minimum ticks between volleys (200 ms)
    pub const FIRE_COOLDOWN_TICKS: u32 = 12;
    /// Horizontal offset of each bullet in a double-shot volley
    pub const DOUBLE_SHOT_OFFSET: f32 = 8.0;

    /// Power-up defaults
    pub const POWERUP_FALL_SPEED: f32 = 1.2;
    /// Half-extent of the pickup box around the player
    pub const POWERUP_PICKUP_RANGE: f32 = 20.0;

    /// Scheduled delays, in ticks
    /// Breather between wave clear and the next spawn (3 s)
    pub const WAVE_ADVANCE_TICKS: u32 = 3 * TICK_HZ;
    /// Dramatic pause between the failing test and the fix (2 s)
    pub const FIX_DELAY_TICKS: u32 = 2 * TICK_HZ;
    /// Double-shot duration (8 s)
    pub const DOUBLE_SHOT_TICKS: u32 = 8 * TICK_HZ;
}
