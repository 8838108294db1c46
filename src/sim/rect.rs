//! Axis-aligned rectangles in increment units
//!
//! Blocks, walls and probes are all expressed in the same integer grid
//! (8 increments per cell), so overlap tests are exact.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::consts::STEPS_PER_CELL;
use crate::{Cell, offset_to_world};

/// Half-open rectangle: covers `min..min + size` on both axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRect {
    pub min: IVec2,
    pub size: IVec2,
}

impl StepRect {
    pub fn new(min: IVec2, size: IVec2) -> Self {
        Self { min, size }
    }

    /// Footprint of a whole cell
    pub fn cell(cell: Cell) -> Self {
        Self::new(cell.to_steps(), IVec2::splat(STEPS_PER_CELL))
    }

    /// Footprint of a block whose top-left corner sits at `pos`
    pub fn block_at(pos: IVec2) -> Self {
        Self::new(pos, IVec2::splat(STEPS_PER_CELL))
    }

    /// Exclusive bottom-right corner
    #[inline]
    pub fn max(&self) -> IVec2 {
        self.min + self.size
    }

    pub fn translated(&self, delta: IVec2) -> Self {
        Self::new(self.min + delta, self.size)
    }

    /// True if the interiors overlap; touching edges do not count
    pub fn intersects(&self, other: &StepRect) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.min.x < b_max.x && other.min.x < a_max.x && self.min.y < b_max.y && other.min.y < a_max.y
    }

    /// World-space top-left corner and bottom-right corner (y up)
    pub fn to_world(&self, grid_width: i32, grid_height: i32) -> (Vec2, Vec2) {
        let origin = Vec2::new(-1.0, 1.0);
        (
            origin + offset_to_world(self.min, grid_width, grid_height),
            origin + offset_to_world(self.max(), grid_width, grid_height),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{GRID_HEIGHT, GRID_WIDTH};
    use crate::cell_to_world;

    #[test]
    fn test_adjacent_cells_do_not_intersect() {
        let a = StepRect::cell(Cell::new(2, 2));
        let b = StepRect::cell(Cell::new(3, 2));
        assert!(!a.intersects(&b));
        assert!(!b.intersects(&a));
    }

    #[test]
    fn test_one_step_overlap_intersects() {
        let a = StepRect::cell(Cell::new(2, 2));
        let b = a.translated(IVec2::new(STEPS_PER_CELL - 1, 0));
        assert!(a.intersects(&b));
    }

    #[test]
    fn test_thin_sliver_inside_cell() {
        let cell = StepRect::cell(Cell::new(5, 1));
        let sliver = StepRect::new(cell.min + IVec2::new(STEPS_PER_CELL - 1, 0), IVec2::new(1, STEPS_PER_CELL));
        assert!(cell.intersects(&sliver));
        assert!(!StepRect::cell(Cell::new(6, 1)).intersects(&sliver));
    }

    #[test]
    fn test_to_world_matches_cell_mapping() {
        let cell = Cell::new(4, 3);
        let (tl, br) = StepRect::cell(cell).to_world(GRID_WIDTH, GRID_HEIGHT);
        let expected_tl = cell_to_world(cell, GRID_WIDTH, GRID_HEIGHT);
        let expected_br = cell_to_world(Cell::new(5, 4), GRID_WIDTH, GRID_HEIGHT);
        assert!((tl - expected_tl).length() < 1e-6);
        assert!((br - expected_br).length() < 1e-6);
    }
}
