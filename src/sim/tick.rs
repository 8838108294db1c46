//! Fixed-step simulation tick
//!
//! One call advances an active move by exactly one increment. Input only
//! records intent; the host calls `tick` once per redraw.

use super::collision::{StepOutcome, goals_reached, hole_entry, resolve_step};
use super::motion::{BlockId, Direction};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::{GRID_WIDTH, STEPS_PER_CELL};

/// Upper bound on the ticks a single move can take (a full row plus the stop)
pub const MAX_MOVE_TICKS: u32 = (GRID_WIDTH * STEPS_PER_CELL + 1) as u32;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Directional key pressed
    pub direction: Option<Direction>,
    /// Restart the current level (space)
    pub reset: bool,
    /// Replay the previous level (A)
    pub previous_level: bool,
}

/// Advance the game state by one increment
pub fn tick(state: &mut GameState, input: &TickInput) {
    // Nothing moves once every level is solved
    if state.phase == GamePhase::Won {
        return;
    }

    state.time_ticks += 1;

    // Reset may interrupt a move at any point
    if input.reset {
        log::debug!("Reset {}", state.level.title());
        state.reset_blocks();
        state.events.push(GameEvent::Reset {
            level: state.level_id(),
        });
        return;
    }

    if input.previous_level {
        if state.is_moving() {
            log::debug!("Ignoring previous-level request mid-move");
        } else if let Some(prev) = state.level_id().previous() {
            state.load_level(prev);
            return;
        } else {
            log::warn!("No level before {}", state.level.title());
        }
    }

    if let Some(direction) = input.direction {
        if state.phase == GamePhase::Idle {
            log::debug!("Move {:?}", direction);
            for block in &mut state.blocks {
                block.moving = true;
            }
            state.phase = GamePhase::Moving(direction);
            state.events.push(GameEvent::MoveStarted { direction });
        }
    }

    if let GamePhase::Moving(direction) = state.phase {
        step_move(state, direction);
    }
}

/// One increment of the active move: X, then O, then holes, then goals
fn step_move(state: &mut GameState, direction: Direction) {
    for block in BlockId::ALL {
        if !state.blocks[block.index()].moving {
            continue;
        }

        match resolve_step(&state.level, &state.blocks, block, direction) {
            StepOutcome::Advance(offset) => {
                state.blocks[block.index()].offset = offset;
            }
            StepOutcome::Stop { offset, by } => {
                let motion = &mut state.blocks[block.index()];
                motion.offset = offset;
                motion.moving = false;
                log::debug!("{:?} stopped by {:?} at {:?}", block, by, state.cell(block));
                state.events.push(GameEvent::Blocked { block, by });
            }
        }
    }

    for block in BlockId::ALL {
        if let Some(hole) = hole_entry(&state.level, state.position(block)) {
            log::info!("{:?} fell into the hole at ({}, {})", block, hole.col, hole.row);
            state.events.push(GameEvent::Fell { block, hole });
            state.reset_blocks();
            return;
        }
    }

    if state.is_moving() {
        return;
    }

    state.phase = GamePhase::Idle;
    if goals_reached(
        &state.level,
        state.position(BlockId::X),
        state.position(BlockId::O),
    ) {
        complete_level(state);
    }
}

fn complete_level(state: &mut GameState) {
    let finished = state.level_id();
    log::info!("Solved {}", state.level.title());
    state.events.push(GameEvent::LevelComplete { level: finished });

    let next = finished.next();
    state.load_level(next);
    if state.is_won() {
        log::info!("All levels solved");
        state.events.push(GameEvent::Won);
    }
}

/// Drive one move to completion synchronously and return the ticks it took.
///
/// Used by tests and the headless replay; the interactive host ticks once
/// per frame instead.
pub fn run_move(state: &mut GameState, direction: Direction) -> u32 {
    let mut input = TickInput {
        direction: Some(direction),
        ..Default::default()
    };

    let mut ticks = 0;
    loop {
        tick(state, &input);
        input.direction = None;
        ticks += 1;

        if !matches!(state.phase, GamePhase::Moving(_)) {
            break;
        }
        if ticks >= MAX_MOVE_TICKS {
            log::error!("Move {:?} did not settle after {} ticks", direction, ticks);
            break;
        }
    }
    ticks
}
