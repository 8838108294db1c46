//! Level geometry
//!
//! Each level is a fixed, hand-authored dataset. Loading one replaces all
//! previous geometry wholesale; nothing in a `Level` changes until the next load.

use core::fmt;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::motion::BlockId;
use super::rect::StepRect;
use crate::Cell;
use crate::consts::{STEPS_PER_CELL, WALL_THICKNESS};

/// Errors raised when asking for a level that does not exist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelError {
    /// No level is registered under this id
    Unknown(u32),
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelError::Unknown(id) => write!(f, "Unknown level id: {}", id),
        }
    }
}

impl std::error::Error for LevelError {}

/// Known levels. `Win` is the terminal pseudo-level reached after level 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LevelId {
    One,
    Two,
    Three,
    Win,
}

impl LevelId {
    /// 1-based number (Win is 4, the slot after the last numbered level)
    pub fn number(self) -> u32 {
        match self {
            LevelId::One => 1,
            LevelId::Two => 2,
            LevelId::Three => 3,
            LevelId::Win => 4,
        }
    }

    /// Level reached by solving this one
    pub fn next(self) -> LevelId {
        match self {
            LevelId::One => LevelId::Two,
            LevelId::Two => LevelId::Three,
            LevelId::Three | LevelId::Win => LevelId::Win,
        }
    }

    /// Level one step back, if there is one to replay
    pub fn previous(self) -> Option<LevelId> {
        match self {
            LevelId::Two => Some(LevelId::One),
            LevelId::Three => Some(LevelId::Two),
            LevelId::One | LevelId::Win => None,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            LevelId::One => "Level 1: Superposition",
            LevelId::Two => "Level 2: Two Blocks One Stage",
            LevelId::Three => "Level 3: Three's Company",
            LevelId::Win => "You Win!",
        }
    }
}

impl TryFrom<u32> for LevelId {
    type Error = LevelError;

    fn try_from(id: u32) -> Result<Self, Self::Error> {
        match id {
            1 => Ok(LevelId::One),
            2 => Ok(LevelId::Two),
            3 => Ok(LevelId::Three),
            4 => Ok(LevelId::Win),
            other => Err(LevelError::Unknown(other)),
        }
    }
}

/// Which border of its cell a wall hugs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WallSide {
    Top,
    Bottom,
    Left,
    Right,
}

/// A thin wall lying inside `cell` along one of its borders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wall {
    pub cell: Cell,
    pub side: WallSide,
}

impl Wall {
    pub const fn new(col: i32, row: i32, side: WallSide) -> Self {
        Self {
            cell: Cell::new(col, row),
            side,
        }
    }

    /// Footprint in increments
    pub fn rect(&self) -> StepRect {
        let min = self.cell.to_steps();
        let far = STEPS_PER_CELL - WALL_THICKNESS;
        match self.side {
            WallSide::Top => StepRect::new(min, IVec2::new(STEPS_PER_CELL, WALL_THICKNESS)),
            WallSide::Bottom => StepRect::new(
                min + IVec2::new(0, far),
                IVec2::new(STEPS_PER_CELL, WALL_THICKNESS),
            ),
            WallSide::Left => StepRect::new(min, IVec2::new(WALL_THICKNESS, STEPS_PER_CELL)),
            WallSide::Right => StepRect::new(
                min + IVec2::new(far, 0),
                IVec2::new(WALL_THICKNESS, STEPS_PER_CELL),
            ),
        }
    }
}

/// How far a block may ever travel from its start cell, in whole cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MoveLimits {
    pub up: i32,
    pub down: i32,
    pub left: i32,
    pub right: i32,
}

impl MoveLimits {
    pub const fn new(up: i32, down: i32, left: i32, right: i32) -> Self {
        Self {
            up,
            down,
            left,
            right,
        }
    }

    /// Smallest allowed offset in increments (most left, most up)
    pub fn min_offset(&self) -> IVec2 {
        IVec2::new(-self.left, -self.up) * STEPS_PER_CELL
    }

    /// Largest allowed offset in increments (most right, most down)
    pub fn max_offset(&self) -> IVec2 {
        IVec2::new(self.right, self.down) * STEPS_PER_CELL
    }

    pub fn contains(&self, offset: IVec2) -> bool {
        let lo = self.min_offset();
        let hi = self.max_offset();
        offset.x >= lo.x && offset.x <= hi.x && offset.y >= lo.y && offset.y <= hi.y
    }

    pub fn clamp(&self, offset: IVec2) -> IVec2 {
        offset.clamp(self.min_offset(), self.max_offset())
    }
}

/// Vertical stripe separating the two play areas (cosmetic)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Divider {
    pub col: i32,
    pub width: i32,
}

/// Per-level colour palette (RGBA)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub background: [f32; 4],
    pub hole: [f32; 4],
    pub goal: [f32; 4],
    pub goal_mark: [f32; 4],
    pub wall: [f32; 4],
}

impl Theme {
    const DUSK: Theme = Theme {
        background: [0.28, 0.22, 0.40, 1.0],
        hole: [0.03, 0.00, 0.15, 1.0],
        goal: [0.08, 0.02, 0.20, 1.0],
        goal_mark: [0.18, 0.12, 0.30, 1.0],
        wall: [0.59, 0.59, 0.65, 1.0],
    };

    const MOSS: Theme = Theme {
        background: [0.19, 0.31, 0.25, 1.0],
        hole: [0.00, 0.06, 0.00, 1.0],
        goal: [0.00, 0.11, 0.05, 1.0],
        goal_mark: [0.09, 0.21, 0.15, 1.0],
        wall: [0.40, 0.83, 0.41, 1.0],
    };

    const EMBER: Theme = Theme {
        background: [0.34, 0.13, 0.14, 1.0],
        hole: [0.05, 0.00, 0.00, 1.0],
        goal: [0.10, 0.00, 0.00, 1.0],
        goal_mark: [0.24, 0.03, 0.04, 1.0],
        wall: [0.89, 0.79, 0.21, 1.0],
    };

    /// High contrast override: black floor, white walls
    pub const HIGH_CONTRAST: Theme = Theme {
        background: [0.0, 0.0, 0.0, 1.0],
        hole: [0.35, 0.35, 0.35, 1.0],
        goal: [0.15, 0.15, 0.15, 1.0],
        goal_mark: [0.6, 0.6, 0.6, 1.0],
        wall: [1.0, 1.0, 1.0, 1.0],
    };
}

/// Static geometry of one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub id: LevelId,
    pub walls: Vec<Wall>,
    pub holes: Vec<Cell>,
    /// Goal cell per block, indexed by `BlockId::index`
    pub goals: [Cell; 2],
    /// Start cell per block
    pub starts: [Cell; 2],
    /// Movement box per block
    pub limits: [MoveLimits; 2],
    pub divider: Option<Divider>,
    pub theme: Theme,
}

impl Level {
    /// Build the dataset for `id`
    pub fn load(id: LevelId) -> Self {
        match id {
            LevelId::One => level_one(),
            LevelId::Two => level_two(),
            LevelId::Three => level_three(),
            LevelId::Win => Self {
                id,
                walls: Vec::new(),
                holes: Vec::new(),
                goals: [Cell::OFFSCREEN; 2],
                starts: [Cell::OFFSCREEN; 2],
                limits: [MoveLimits::default(); 2],
                divider: None,
                theme: Theme::EMBER,
            },
        }
    }

    /// Load by raw numeric id
    pub fn load_by_number(id: u32) -> Result<Self, LevelError> {
        LevelId::try_from(id).map(Self::load)
    }

    #[inline]
    pub fn start(&self, block: BlockId) -> Cell {
        self.starts[block.index()]
    }

    #[inline]
    pub fn goal(&self, block: BlockId) -> Cell {
        self.goals[block.index()]
    }

    #[inline]
    pub fn limits(&self, block: BlockId) -> &MoveLimits {
        &self.limits[block.index()]
    }

    pub fn title(&self) -> &'static str {
        self.id.title()
    }
}

fn level_one() -> Level {
    use WallSide::*;
    Level {
        id: LevelId::One,
        walls: vec![
            Wall::new(2, 2, Top),
            Wall::new(3, 7, Top),
            Wall::new(7, 0, Bottom),
            Wall::new(14, 1, Bottom),
            Wall::new(17, 2, Bottom),
            Wall::new(10, 3, Bottom),
            Wall::new(10, 6, Bottom),
            Wall::new(4, 4, Left),
            Wall::new(15, 7, Left),
            Wall::new(6, 6, Right),
        ],
        holes: vec![Cell::new(1, 6), Cell::new(11, 1)],
        goals: [Cell::new(0, 1), Cell::new(10, 0)],
        starts: [Cell::new(3, 4), Cell::new(11, 5)],
        limits: [MoveLimits::new(4, 3, 3, 4), MoveLimits::new(5, 2, 1, 6)],
        divider: Some(Divider { col: 8, width: 2 }),
        theme: Theme::DUSK,
    }
}

fn level_two() -> Level {
    use WallSide::*;
    Level {
        id: LevelId::Two,
        walls: vec![
            Wall::new(8, 0, Left),
            Wall::new(8, 4, Left),
            Wall::new(8, 5, Left),
            Wall::new(17, 5, Left),
            Wall::new(0, 4, Right),
            Wall::new(6, 6, Right),
            Wall::new(13, 2, Right),
            Wall::new(13, 3, Right),
        ],
        holes: Vec::new(),
        goals: [Cell::new(17, 7), Cell::new(17, 6)],
        starts: [Cell::new(0, 0), Cell::new(0, 1)],
        limits: [MoveLimits::new(0, 7, 0, 17), MoveLimits::new(1, 6, 0, 17)],
        divider: None,
        theme: Theme::MOSS,
    }
}

fn level_three() -> Level {
    use WallSide::*;
    Level {
        id: LevelId::Three,
        walls: vec![
            Wall::new(8, 0, Left),
            Wall::new(8, 5, Left),
            Wall::new(17, 5, Left),
            Wall::new(0, 4, Right),
            Wall::new(6, 6, Right),
            Wall::new(13, 2, Right),
            Wall::new(13, 3, Right),
        ],
        holes: vec![Cell::new(2, 4)],
        goals: [Cell::new(17, 7), Cell::new(17, 6)],
        starts: [Cell::new(0, 0), Cell::new(0, 1)],
        limits: [MoveLimits::new(0, 7, 0, 17), MoveLimits::new(1, 6, 0, 17)],
        divider: None,
        theme: Theme::EMBER,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{GRID_HEIGHT, GRID_WIDTH};

    #[test]
    fn test_known_ids_load() {
        for id in 1..=4 {
            let level = Level::load_by_number(id).expect("known level");
            assert_eq!(level.id.number(), id);
        }
    }

    #[test]
    fn test_unknown_id_is_rejected() {
        assert_eq!(Level::load_by_number(5), Err(LevelError::Unknown(5)));
        assert_eq!(LevelId::try_from(0), Err(LevelError::Unknown(0)));
        assert_eq!(LevelError::Unknown(5).to_string(), "Unknown level id: 5");
    }

    #[test]
    fn test_level_progression() {
        assert_eq!(LevelId::One.next(), LevelId::Two);
        assert_eq!(LevelId::Three.next(), LevelId::Win);
        assert_eq!(LevelId::Win.next(), LevelId::Win);
        assert_eq!(LevelId::One.previous(), None);
        assert_eq!(LevelId::Three.previous(), Some(LevelId::Two));
        assert_eq!(LevelId::Win.previous(), None);
    }

    #[test]
    fn test_win_level_has_no_geometry() {
        let level = Level::load(LevelId::Win);
        assert!(level.walls.is_empty());
        assert!(level.holes.is_empty());
        assert!(level.starts.iter().all(|c| !c.is_on_grid()));
    }

    #[test]
    fn test_numbered_levels_stay_on_grid() {
        for id in [LevelId::One, LevelId::Two, LevelId::Three] {
            let level = Level::load(id);
            for block in BlockId::ALL {
                let start = level.start(block);
                let limits = level.limits(block);
                assert!(start.is_on_grid());
                assert!(level.goal(block).is_on_grid());
                // The limit box never reaches past the grid edge
                assert!(start.col - limits.left >= 0);
                assert!(start.col + limits.right < GRID_WIDTH);
                assert!(start.row - limits.up >= 0);
                assert!(start.row + limits.down < GRID_HEIGHT);
            }
            for wall in &level.walls {
                assert!(wall.cell.is_on_grid(), "{:?} off grid in {:?}", wall, id);
            }
        }
    }

    #[test]
    fn test_wall_rects_hug_their_side() {
        let cell = StepRect::cell(Cell::new(4, 4));
        for side in [WallSide::Top, WallSide::Bottom, WallSide::Left, WallSide::Right] {
            let rect = Wall::new(4, 4, side).rect();
            assert!(cell.intersects(&rect));
            assert_eq!(rect.size.min_element(), WALL_THICKNESS);
        }
        let right = Wall::new(4, 4, WallSide::Right).rect();
        assert_eq!(right.max().x, cell.max().x);
        let bottom = Wall::new(4, 4, WallSide::Bottom).rect();
        assert_eq!(bottom.max().y, cell.max().y);
    }

    #[test]
    fn test_limits_clamp() {
        let limits = MoveLimits::new(1, 2, 3, 4);
        assert!(limits.contains(IVec2::ZERO));
        assert!(limits.contains(IVec2::new(4 * STEPS_PER_CELL, 2 * STEPS_PER_CELL)));
        assert!(!limits.contains(IVec2::new(0, -STEPS_PER_CELL - 1)));
        assert_eq!(
            limits.clamp(IVec2::new(-100, 100)),
            IVec2::new(-3 * STEPS_PER_CELL, 2 * STEPS_PER_CELL)
        );
    }
}
