//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - Oracle calls only at tick boundaries, through the `Oracle` trait
//! - No rendering or platform dependencies

pub mod collision;
pub mod engagement;
pub mod state;
pub mod tick;
pub mod wave;

pub use engagement::{Engagement, EngagementPhase};
pub use state::{
    ActiveEffects, Bullet, Enemy, EnemyStatus, FireMode, GamePhase, GameState, Player, PowerUp,
    PowerUpKind,
};
pub use tick::{reset, start_game, tick, toggle_pause, TickInput};
pub use wave::{start_wave, theme_for_wave, WaveTheme};
