//! Data-driven game balance
//!
//! Every knob a deployment might want to adjust without recompiling. The
//! defaults reproduce the tuned values the rest of the crate was balanced
//! against; hosts can load overrides from JSON.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Gameplay balance knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Starting lives for a fresh session
    pub lives: u32,
    /// Enemy grid dimensions per wave
    pub enemy_rows: usize,
    pub enemy_cols: usize,
    /// On-screen bullet cap in single-fire mode
    pub bullet_cap: usize,
    /// Raised cap while double-shot is active
    pub bullet_cap_double: usize,
    /// Points for a resolved enemy when the oracle names no value
    pub points_per_enemy: u32,
    /// Wave-clear bonus, multiplied by the wave number
    pub wave_bonus: u32,
    /// Probability that a destroyed enemy drops a power-up
    pub powerup_drop_chance: f64,
    /// Ticks between wave clear and the next wave spawn
    pub wave_advance_ticks: u32,
    /// Ticks between the failing test and the fix request
    pub fix_delay_ticks: u32,
    /// Double-shot effect duration in ticks
    pub double_shot_ticks: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            lives: 3,
            enemy_rows: 2,
            enemy_cols: 4,
            bullet_cap: 5,
            bullet_cap_double: 8,
            points_per_enemy: 100,
            wave_bonus: 500,
            powerup_drop_chance: 0.2,
            wave_advance_ticks: WAVE_ADVANCE_TICKS,
            fix_delay_ticks: FIX_DELAY_TICKS,
            double_shot_ticks: DOUBLE_SHOT_TICKS,
        }
    }
}

impl Tuning {
    /// Enemies per wave
    pub fn enemy_count(&self) -> usize {
        self.enemy_rows * self.enemy_cols
    }

    /// Parse a tuning override from JSON; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_balance() {
        let t = Tuning::default();
        assert_eq!(t.enemy_count(), 8);
        assert_eq!(t.bullet_cap, 5);
        assert_eq!(t.bullet_cap_double, 8);
        assert_eq!(t.lives, 3);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let t = Tuning::from_json(r#"{"lives": 5, "enemy_cols": 6}"#).unwrap();
        assert_eq!(t.lives, 5);
        assert_eq!(t.enemy_cols, 6);
        assert_eq!(t.enemy_rows, 2);
        assert_eq!(t.wave_bonus, 500);
    }
}
