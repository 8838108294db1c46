//! Shape generation for 2D primitives
//!
//! Everything here is in board space: the 18x8 grid spans -1..1 on both axes
//! with y up. The pipeline letterboxes board space into the canvas, so one
//! cell is square on screen even though it is not square in board units.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Vertex, colors};
use crate::consts::{CELL_HEIGHT, CELL_WIDTH, GRID_HEIGHT, GRID_WIDTH};
use crate::present::{BlockView, RenderFrame};
use crate::sim::{BlockId, Level, Theme};
use crate::{Cell, cell_to_world};

/// Segments per O ring
const RING_SEGMENTS: u32 = 48;
/// Hole bottoms and X marks sit this far in from the cell edges
const MARK_INSET: f32 = 1.0 / 6.0;

/// Size of one cell in board space (y down)
fn cell_extent() -> Vec2 {
    Vec2::new(CELL_WIDTH, -CELL_HEIGHT)
}

/// Map a cell-local point (0..1 on both axes, y down) into board space
fn cell_point(top_left: Vec2, local: Vec2) -> Vec2 {
    top_left + local * cell_extent()
}

/// Generate vertices for an axis-aligned quad
pub fn quad(top_left: Vec2, bottom_right: Vec2, color: [f32; 4]) -> [Vertex; 6] {
    let (l, t) = (top_left.x, top_left.y);
    let (r, b) = (bottom_right.x, bottom_right.y);
    [
        Vertex::new(l, t, color),
        Vertex::new(l, b, color),
        Vertex::new(r, t, color),
        Vertex::new(r, t, color),
        Vertex::new(l, b, color),
        Vertex::new(r, b, color),
    ]
}

/// Quad covering `cell`, shrunk by `inset` (fraction of a cell) on every side
pub fn cell_quad(cell: Cell, inset: f32, color: [f32; 4]) -> [Vertex; 6] {
    let top_left = cell_to_world(cell, GRID_WIDTH, GRID_HEIGHT);
    quad(
        cell_point(top_left, Vec2::splat(inset)),
        cell_point(top_left, Vec2::splat(1.0 - inset)),
        color,
    )
}

/// Thick bar between two cell-local points
fn bar(top_left: Vec2, a: Vec2, b: Vec2, half_width: f32, color: [f32; 4]) -> [Vertex; 6] {
    let dir = (b - a).normalize_or_zero();
    let perp = Vec2::new(-dir.y, dir.x) * half_width;
    let [a1, a2, b1, b2] = [a + perp, a - perp, b + perp, b - perp].map(|p| cell_point(top_left, p));
    [
        Vertex::new(a1.x, a1.y, color),
        Vertex::new(a2.x, a2.y, color),
        Vertex::new(b1.x, b1.y, color),
        Vertex::new(b1.x, b1.y, color),
        Vertex::new(a2.x, a2.y, color),
        Vertex::new(b2.x, b2.y, color),
    ]
}

/// X mark: two diagonal bars for the cell at `top_left`
pub fn cross(top_left: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let half_width = std::f32::consts::SQRT_2 / 12.0;
    let (lo, hi) = (MARK_INSET, 1.0 - MARK_INSET);
    let mut vertices = Vec::with_capacity(12);
    vertices.extend(bar(top_left, Vec2::new(lo, lo), Vec2::new(hi, hi), half_width, color));
    vertices.extend(bar(top_left, Vec2::new(lo, hi), Vec2::new(hi, lo), half_width, color));
    vertices
}

/// Generate vertices for a ring; radii are per axis so it can follow the cell shape
pub fn ring(center: Vec2, inner: Vec2, outer: Vec2, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;
        let (dir1, dir2) = (Vec2::from_angle(theta1), Vec2::from_angle(theta2));

        let inner1 = center + inner * dir1;
        let outer1 = center + outer * dir1;
        let inner2 = center + inner * dir2;
        let outer2 = center + outer * dir2;

        // Two triangles per segment
        vertices.push(Vertex::new(inner1.x, inner1.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(inner2.x, inner2.y, color));

        vertices.push(Vertex::new(inner2.x, inner2.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(outer2.x, outer2.y, color));
    }

    vertices
}

/// O mark: ring centred in the cell at `top_left`
pub fn circle_mark(top_left: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let size = Vec2::new(CELL_WIDTH, CELL_HEIGHT);
    ring(
        cell_point(top_left, Vec2::splat(0.5)),
        size * (3.5 / 12.0),
        size * (5.0 / 12.0),
        color,
        RING_SEGMENTS,
    )
}

/// Identity mark of a block, drawn on the block itself and on its goal
pub fn mark(block: BlockId, top_left: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    match block {
        BlockId::X => cross(top_left, color),
        BlockId::O => circle_mark(top_left, color),
    }
}

/// Static geometry: floor, holes, goals, walls and the divider
pub fn level_mesh(level: &Level, theme: &Theme) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    vertices.extend(quad(Vec2::new(-1.0, 1.0), Vec2::new(1.0, -1.0), theme.background));

    for hole in level.holes.iter().filter(|c| c.is_on_grid()) {
        vertices.extend(cell_quad(*hole, 0.0, theme.hole));
        vertices.extend(cell_quad(*hole, MARK_INSET, colors::HOLE_BOTTOM));
    }

    for block in BlockId::ALL {
        let goal = level.goal(block);
        if !goal.is_on_grid() {
            continue;
        }
        vertices.extend(cell_quad(goal, 0.0, theme.goal));
        let top_left = cell_to_world(goal, GRID_WIDTH, GRID_HEIGHT);
        vertices.extend(mark(block, top_left, theme.goal_mark));
    }

    for wall in &level.walls {
        let (top_left, bottom_right) = wall.rect().to_world(GRID_WIDTH, GRID_HEIGHT);
        vertices.extend(quad(top_left, bottom_right, theme.wall));
    }

    if let Some(divider) = level.divider {
        let top_left = cell_to_world(Cell::new(divider.col, 0), GRID_WIDTH, GRID_HEIGHT);
        let bottom_right = cell_to_world(
            Cell::new(divider.col + divider.width, GRID_HEIGHT),
            GRID_WIDTH,
            GRID_HEIGHT,
        );
        vertices.extend(quad(top_left, bottom_right, colors::DIVIDER));
    }

    vertices
}

fn block_colors(block: BlockId) -> ([f32; 4], [f32; 4]) {
    match block {
        BlockId::X => (colors::X_BLOCK, colors::X_MARK),
        BlockId::O => (colors::O_BLOCK, colors::O_MARK),
    }
}

/// Top-left corner of a block in board space, or None when parked off-grid
fn block_origin(view: &BlockView) -> Option<Vec2> {
    view.start
        .is_on_grid()
        .then(|| cell_to_world(view.start, GRID_WIDTH, GRID_HEIGHT) + view.offset)
}

/// Both blocks. Bodies go first and marks last, so two blocks sharing a
/// cell still show both marks.
pub fn blocks_mesh(blocks: &[BlockView; 2]) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    for view in blocks {
        if let Some(top_left) = block_origin(view) {
            let (body, _) = block_colors(view.id);
            vertices.extend(quad(top_left, top_left + cell_extent(), body));
        }
    }
    for view in blocks {
        if let Some(top_left) = block_origin(view) {
            let (_, mark_color) = block_colors(view.id);
            vertices.extend(mark(view.id, top_left, mark_color));
        }
    }
    vertices
}

/// Full frame in draw order
pub fn frame_mesh(frame: &RenderFrame<'_>, theme: &Theme) -> Vec<Vertex> {
    let mut vertices = level_mesh(frame.level, theme);
    vertices.extend(blocks_mesh(&frame.blocks));
    vertices
}
