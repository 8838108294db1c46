//! Superposition - two linked blocks on one grid
//!
//! Core modules:
//! - `sim`: Deterministic puzzle simulation (levels, motion, collisions, game state)
//! - `present`: Boundary between the simulation and the render/audio layers
//! - `renderer`: WebGPU rendering pipeline
//! - `settings`: Persisted player preferences

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod present;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use present::{AudioSink, InputAction, RenderFrame, RenderSink, Session, SoundCue};
pub use settings::{Settings, SettingsChange};

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Grid dimensions in cells
    pub const GRID_WIDTH: i32 = 18;
    pub const GRID_HEIGHT: i32 = 8;

    /// Increments per cell; one increment is taken per redraw tick
    pub const STEPS_PER_CELL: i32 = 8;
    /// Wall thickness in increments (1/8 of a cell)
    pub const WALL_THICKNESS: i32 = 1;

    /// Cell size in world units (NDC spans 2.0 on both axes)
    pub const CELL_WIDTH: f32 = 2.0 / GRID_WIDTH as f32;
    pub const CELL_HEIGHT: f32 = 2.0 / GRID_HEIGHT as f32;
}

use consts::STEPS_PER_CELL;

/// A grid cell, origin top-left, rows growing downward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub col: i32,
    pub row: i32,
}

impl Cell {
    /// Parking spot for disabled entities, far outside the grid
    pub const OFFSCREEN: Cell = Cell::new(-100, -100);

    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Top-left corner in increment units
    pub fn to_steps(self) -> IVec2 {
        IVec2::new(self.col, self.row) * STEPS_PER_CELL
    }

    pub fn is_on_grid(self) -> bool {
        (0..consts::GRID_WIDTH).contains(&self.col) && (0..consts::GRID_HEIGHT).contains(&self.row)
    }
}

/// Convert a cell to the world position of its top-left corner
///
/// Total over all cells, including off-grid sentinels.
#[inline]
pub fn cell_to_world(cell: Cell, grid_width: i32, grid_height: i32) -> Vec2 {
    let cell_w = 2.0 / grid_width as f32;
    let cell_h = 2.0 / grid_height as f32;
    Vec2::new(-1.0 + cell.col as f32 * cell_w, 1.0 - cell.row as f32 * cell_h)
}

/// Convert an offset in increments (y down) to a world displacement (y up)
#[inline]
pub fn offset_to_world(offset: IVec2, grid_width: i32, grid_height: i32) -> Vec2 {
    let step_w = 2.0 / (grid_width * STEPS_PER_CELL) as f32;
    let step_h = 2.0 / (grid_height * STEPS_PER_CELL) as f32;
    Vec2::new(offset.x as f32 * step_w, -(offset.y as f32) * step_h)
}

#[cfg(test)]
mod tests {
    use super::consts::*;
    use super::*;

    #[test]
    fn test_cell_to_world_corners() {
        let origin = cell_to_world(Cell::new(0, 0), GRID_WIDTH, GRID_HEIGHT);
        assert_eq!(origin, Vec2::new(-1.0, 1.0));

        let far = cell_to_world(Cell::new(GRID_WIDTH, GRID_HEIGHT), GRID_WIDTH, GRID_HEIGHT);
        assert!((far.x - 1.0).abs() < 1e-6);
        assert!((far.y + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cell_to_world_is_affine() {
        let a = cell_to_world(Cell::new(3, 4), GRID_WIDTH, GRID_HEIGHT);
        let b = cell_to_world(Cell::new(4, 5), GRID_WIDTH, GRID_HEIGHT);
        assert!((b.x - a.x - CELL_WIDTH).abs() < 1e-6);
        assert!((a.y - b.y - CELL_HEIGHT).abs() < 1e-6);
        // Same cell, same point
        assert_eq!(a, cell_to_world(Cell::new(3, 4), GRID_WIDTH, GRID_HEIGHT));
    }

    #[test]
    fn test_sentinel_cell_maps_off_screen() {
        let p = cell_to_world(Cell::OFFSCREEN, GRID_WIDTH, GRID_HEIGHT);
        assert!(p.x < -1.0 && p.y > 1.0);
        assert!(!Cell::OFFSCREEN.is_on_grid());
    }

    #[test]
    fn test_offset_to_world_matches_cell_delta() {
        // One cell right and one cell down, expressed in increments
        let d = offset_to_world(IVec2::new(STEPS_PER_CELL, STEPS_PER_CELL), GRID_WIDTH, GRID_HEIGHT);
        assert!((d.x - CELL_WIDTH).abs() < 1e-6);
        assert!((d.y + CELL_HEIGHT).abs() < 1e-6);
    }
}
