//! Observations emitted to the presentation layer
//!
//! The engine never calls out directly; it buffers `GameEvent`s on the game
//! state and the host drains them after each tick to drive HUD, console and
//! overlay updates. Order within a tick is meaningful.

use serde::{Deserialize, Serialize};

use crate::oracle::Severity;

/// Ledger snapshot attached to every score/lives mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSnapshot {
    pub score: u64,
    pub wave: u32,
    pub lives: u32,
}

/// Final summary emitted once on the transition to game over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOverSummary {
    pub score: u64,
    pub wave: u32,
    pub enemies_killed: u32,
}

/// Everything the engine tells the outside world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum GameEvent {
    /// The ledger changed (score, wave or lives)
    ScoreChanged(ScoreSnapshot),
    /// Free-form status line (wave banners, power-up notices, pause toggles)
    Info { message: String },
    /// An engagement started; a test is being generated for this bug
    Generating { bug: String },
    /// The generated failing test for a hit enemy
    TestFailed {
        bug: String,
        test_code: String,
        explanation: String,
        severity: Severity,
        points: u32,
    },
    /// The fix landed; the enemy is about to be destroyed
    BugFixed {
        bug: String,
        fix_code: String,
        explanation: String,
        points: u32,
    },
    /// The oracle failed mid-engagement; the enemy is destroyed regardless
    OracleError { bug: String, message: String },
    /// A wave was cleared and its bonus awarded
    WaveComplete { wave: u32, bonus: u32 },
    /// The session ended
    GameOver(GameOverSummary),
}
