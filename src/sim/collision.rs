//! Collision resolution for grid-locked blocks
//!
//! The algorithmic heart of the puzzle: deciding, one increment at a time,
//! whether a block may keep sliding. All tests are predictive (checked before
//! the increment is committed) and exact, since positions are integer
//! increments rather than rounded floats.

use glam::IVec2;

use super::level::Level;
use super::motion::{BlockId, BlockMotion, Direction};
use super::rect::StepRect;
use crate::Cell;
use crate::consts::STEPS_PER_CELL;

/// What stopped a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Obstacle {
    /// A wall segment sits in the next cell
    Wall,
    /// The paired block sits in the next cell
    Block,
    /// The block reached the edge of its movement box
    Boundary,
}

/// Result of resolving one increment for one block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The block may take the increment to this offset
    Advance(IVec2),
    /// The block stops at this offset
    Stop { offset: IVec2, by: Obstacle },
}

/// True if the block at `pos` (top-left, increments) cannot advance in `dir`
/// because of a wall.
///
/// A block commits to a whole cell when it leaves a cell boundary, so the
/// probe is its footprint shifted one full cell. Mid-cell the destination was
/// already cleared, and the answer is always no.
pub fn wall_collision(level: &Level, pos: IVec2, dir: Direction) -> bool {
    let along = if dir.is_horizontal() { pos.x } else { pos.y };
    if along.rem_euclid(STEPS_PER_CELL) != 0 {
        return false;
    }

    let probe = StepRect::block_at(pos).translated(dir.delta() * STEPS_PER_CELL);
    level.walls.iter().any(|wall| probe.intersects(&wall.rect()))
}

/// True if the block at `pos` moving `dir` would run into the settled block at
/// `other_pos`.
///
/// The other block only counts while it is not moving, and only when the two
/// are exactly one cell apart along `dir` on the same row or column.
pub fn block_collision(pos: IVec2, dir: Direction, other_pos: IVec2, other_moving: bool) -> bool {
    if other_moving {
        return false;
    }
    pos + dir.delta() * STEPS_PER_CELL == other_pos
}

/// Hole the block at `pos` has dropped into, if any
pub fn hole_entry(level: &Level, pos: IVec2) -> Option<Cell> {
    level.holes.iter().copied().find(|hole| hole.to_steps() == pos)
}

/// True only when X and O both sit on their own goal cells
pub fn goals_reached(level: &Level, x_pos: IVec2, o_pos: IVec2) -> bool {
    x_pos == level.goal(BlockId::X).to_steps() && o_pos == level.goal(BlockId::O).to_steps()
}

/// Decide the next increment for `block`, given both blocks' motion state.
///
/// The caller is expected to skip blocks that are no longer moving.
pub fn resolve_step(
    level: &Level,
    motions: &[BlockMotion; 2],
    block: BlockId,
    dir: Direction,
) -> StepOutcome {
    let me = &motions[block.index()];
    let other_id = block.other();
    let other = &motions[other_id.index()];

    let pos = me.position(level.start(block));
    if wall_collision(level, pos, dir) {
        return StepOutcome::Stop {
            offset: me.offset,
            by: Obstacle::Wall,
        };
    }

    if dir.checks_other_block() {
        let other_pos = other.position(level.start(other_id));
        if block_collision(pos, dir, other_pos, other.moving) {
            return StepOutcome::Stop {
                offset: me.offset,
                by: Obstacle::Block,
            };
        }
    }

    let limits = level.limits(block);
    let next = me.offset + dir.delta();
    if limits.contains(next) {
        StepOutcome::Advance(next)
    } else {
        StepOutcome::Stop {
            offset: limits.clamp(next),
            by: Obstacle::Boundary,
        }
    }
}
