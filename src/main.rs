//! Bug Invaders headless demo
//!
//! Runs the simulation with a simple autopilot and the built-in oracle,
//! printing every emitted event as one JSON object per line. Pass a seed
//! as the first argument to replay a specific session.

use std::cmp::Ordering;

use bug_invaders::consts::TICK_HZ;
use bug_invaders::sim::{self, GamePhase, GameState, TickInput};
use bug_invaders::{StaticOracle, Tuning};

const MAX_RUN_SECS: u32 = 600;

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(2026);

    let mut oracle = StaticOracle;
    let mut state = GameState::new(seed, Tuning::default());
    sim::start_game(&mut state, &mut oracle);

    for _ in 0..MAX_RUN_SECS * TICK_HZ {
        let input = autopilot(&state);
        sim::tick(&mut state, &mut oracle, &input);

        for event in state.drain_events() {
            match serde_json::to_string(&event) {
                Ok(line) => println!("{line}"),
                Err(err) => log::error!("failed to serialize event: {err}"),
            }
        }

        if state.phase == GamePhase::GameOver {
            break;
        }
    }

    log::info!(
        "run finished: score {} wave {} after {} ticks",
        state.score,
        state.wave,
        state.time_ticks
    );
}

/// Chase the lowest enemy and hold the trigger.
fn autopilot(state: &GameState) -> TickInput {
    let mut input = TickInput {
        fire: true,
        ..Default::default()
    };

    let target = state
        .enemies
        .iter()
        .max_by(|a, b| a.pos.y.partial_cmp(&b.pos.y).unwrap_or(Ordering::Equal))
        .map(|enemy| enemy.pos.x);

    if let Some(x) = target {
        if x < state.player.pos.x - 4.0 {
            input.left = true;
        } else if x > state.player.pos.x + 4.0 {
            input.right = true;
        }
    }

    input
}
