//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed step only (one increment per tick, never wall-clock time)
//! - Integer positions, so settling and goal checks are exact
//! - Stable evaluation order (X before O)
//! - No rendering or platform dependencies

pub mod collision;
pub mod level;
pub mod motion;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{Obstacle, StepOutcome, resolve_step};
pub use level::{Divider, Level, LevelError, LevelId, MoveLimits, Theme, Wall, WallSide};
pub use motion::{BlockId, BlockMotion, Direction};
pub use rect::StepRect;
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{MAX_MOVE_TICKS, TickInput, run_move, tick};
