//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in one owned `GameState`; the
//! level geometry inside it is replaced wholesale on every level change.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::collision::Obstacle;
use super::level::{Level, LevelError, LevelId};
use super::motion::{BlockId, BlockMotion, Direction};
use crate::Cell;

/// Current phase of play within the current level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for input, both blocks settled
    Idle,
    /// A move in this direction is being stepped
    Moving(Direction),
    /// All levels solved; terminal
    Won,
}

/// Discrete things that happened during a tick, drained by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A move in `direction` started
    MoveStarted { direction: Direction },
    /// A block stopped sliding
    Blocked { block: BlockId, by: Obstacle },
    /// A block dropped into a hole; the level was reloaded
    Fell { block: BlockId, hole: Cell },
    /// Both blocks reached their goals
    LevelComplete { level: LevelId },
    /// A level was (re)loaded
    LevelLoaded { level: LevelId },
    /// Both blocks were put back on their starts; the level is unchanged
    Reset { level: LevelId },
    /// The last level was solved
    Won,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Geometry of the current level
    pub level: Level,
    /// Motion per block, indexed by `BlockId::index`
    pub blocks: [BlockMotion; 2],
    /// Current phase
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events produced since the host last drained them
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Start a fresh game on level 1
    pub fn new() -> Self {
        Self::at_level(LevelId::One)
    }

    /// Start a fresh game on the given level
    pub fn at_level(id: LevelId) -> Self {
        let mut state = Self {
            level: Level::load(id),
            blocks: [BlockMotion::default(); 2],
            phase: GamePhase::Idle,
            time_ticks: 0,
            events: Vec::new(),
        };
        state.load_level(id);
        state
    }

    #[inline]
    pub fn level_id(&self) -> LevelId {
        self.level.id
    }

    #[inline]
    pub fn motion(&self, block: BlockId) -> &BlockMotion {
        &self.blocks[block.index()]
    }

    /// Top-left corner of `block` in increments
    pub fn position(&self, block: BlockId) -> IVec2 {
        self.motion(block).position(self.level.start(block))
    }

    /// Cell `block` occupies, if it sits exactly on one
    pub fn cell(&self, block: BlockId) -> Option<Cell> {
        self.motion(block).cell(self.level.start(block))
    }

    pub fn is_moving(&self) -> bool {
        self.blocks.iter().any(|b| b.moving)
    }

    pub fn is_won(&self) -> bool {
        self.phase == GamePhase::Won
    }

    /// Replace the geometry with level `id` and zero both blocks
    pub fn load_level(&mut self, id: LevelId) {
        self.level = Level::load(id);
        for block in &mut self.blocks {
            block.reset();
        }
        self.phase = if id == LevelId::Win {
            GamePhase::Won
        } else {
            GamePhase::Idle
        };
        log::info!("Loaded {}", self.level.title());
        self.events.push(GameEvent::LevelLoaded { level: id });
    }

    /// Load a level by raw id; unknown ids leave the state untouched
    pub fn select_level(&mut self, id: u32) -> Result<(), LevelError> {
        match LevelId::try_from(id) {
            Ok(level) => {
                self.load_level(level);
                Ok(())
            }
            Err(e) => {
                log::warn!("Rejected level request: {}", e);
                Err(e)
            }
        }
    }

    /// Snap both blocks back to their start cells without reloading geometry
    pub fn reset_blocks(&mut self) {
        for block in &mut self.blocks {
            block.reset();
        }
        if self.phase != GamePhase::Won {
            self.phase = GamePhase::Idle;
        }
    }

    /// Take all events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_starts_idle_on_level_one() {
        let mut state = GameState::new();
        assert_eq!(state.level_id(), LevelId::One);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.cell(BlockId::X), Some(Cell::new(3, 4)));
        assert_eq!(state.cell(BlockId::O), Some(Cell::new(11, 5)));
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::LevelLoaded { level: LevelId::One }]
        );
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_select_level_zeroes_offsets() {
        let mut state = GameState::new();
        state.blocks[0].offset = IVec2::new(-8, 16);
        state.blocks[1].moving = true;

        state.select_level(3).expect("level 3 exists");
        assert_eq!(state.level_id(), LevelId::Three);
        assert!(state.blocks.iter().all(|b| *b == BlockMotion::default()));
    }

    #[test]
    fn test_select_unknown_level_is_an_error() {
        let mut state = GameState::at_level(LevelId::Two);
        state.blocks[0].offset = IVec2::new(8, 0);

        assert_eq!(state.select_level(5), Err(LevelError::Unknown(5)));
        // Nothing changed
        assert_eq!(state.level_id(), LevelId::Two);
        assert_eq!(state.blocks[0].offset, IVec2::new(8, 0));
    }

    #[test]
    fn test_win_level_is_terminal_phase() {
        let state = GameState::at_level(LevelId::Win);
        assert!(state.is_won());
        assert_eq!(state.cell(BlockId::X), Some(Cell::OFFSCREEN));
    }

    #[test]
    fn test_state_serializes_without_events() {
        let mut state = GameState::new();
        state.blocks[1].offset = IVec2::new(-8, 0);
        let json = serde_json::to_string(&state).expect("serialize");
        let restored: GameState = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(restored.level, state.level);
        assert_eq!(restored.blocks, state.blocks);
        assert!(restored.events.is_empty());
    }
}
