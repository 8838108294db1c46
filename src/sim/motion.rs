//! Block identities, move directions and per-block motion state

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::Cell;
use crate::consts::STEPS_PER_CELL;

/// The two linked blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockId {
    X,
    O,
}

impl BlockId {
    /// Evaluation order inside a tick: X first, then O
    pub const ALL: [BlockId; 2] = [BlockId::X, BlockId::O];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            BlockId::X => 0,
            BlockId::O => 1,
        }
    }

    #[inline]
    pub fn other(self) -> BlockId {
        match self {
            BlockId::X => BlockId::O,
            BlockId::O => BlockId::X,
        }
    }
}

/// Move intent, shared by both blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// One increment in grid space (y grows downward)
    pub fn delta(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// Whether the paired block counts as an obstacle for this direction.
    ///
    /// Only Down and Left look at the other block; Up and Right see walls only.
    pub fn checks_other_block(self) -> bool {
        matches!(self, Direction::Down | Direction::Left)
    }
}

/// Continuous state of one block: offset from its start cell, in increments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BlockMotion {
    pub offset: IVec2,
    pub moving: bool,
}

impl BlockMotion {
    /// Snap back to the start cell, motionless
    pub fn reset(&mut self) {
        self.offset = IVec2::ZERO;
        self.moving = false;
    }

    /// Top-left corner in increments
    #[inline]
    pub fn position(&self, start: Cell) -> IVec2 {
        start.to_steps() + self.offset
    }

    /// Offset in whole cells, if the block sits exactly on a cell
    pub fn offset_cells(&self) -> Option<IVec2> {
        let rem = self.offset % STEPS_PER_CELL;
        (rem == IVec2::ZERO).then(|| self.offset / STEPS_PER_CELL)
    }

    /// Cell the block occupies, if it sits exactly on one
    pub fn cell(&self, start: Cell) -> Option<Cell> {
        self.offset_cells()
            .map(|d| Cell::new(start.col + d.x, start.row + d.y))
    }

    pub fn is_settled(&self) -> bool {
        !self.moving && self.offset_cells().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_block() {
        assert_eq!(BlockId::X.other(), BlockId::O);
        assert_eq!(BlockId::O.other(), BlockId::X);
        assert_eq!(BlockId::ALL.map(BlockId::index), [0, 1]);
    }

    #[test]
    fn test_only_down_and_left_check_blocks() {
        let checked: Vec<_> = Direction::ALL
            .into_iter()
            .filter(|d| d.checks_other_block())
            .collect();
        assert_eq!(checked, vec![Direction::Down, Direction::Left]);
    }

    #[test]
    fn test_offset_cells() {
        let mut motion = BlockMotion {
            offset: IVec2::new(-2 * STEPS_PER_CELL, STEPS_PER_CELL),
            moving: false,
        };
        assert_eq!(motion.offset_cells(), Some(IVec2::new(-2, 1)));
        assert_eq!(motion.cell(Cell::new(3, 4)), Some(Cell::new(1, 5)));
        assert!(motion.is_settled());

        motion.offset.x -= 3;
        motion.moving = true;
        assert_eq!(motion.offset_cells(), None);
        assert!(!motion.is_settled());

        motion.reset();
        assert_eq!(motion, BlockMotion::default());
    }
}
