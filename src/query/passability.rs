//! Point passability with a rounded proximity buffer
//!
//! A point is blocked when the cell it occupies is blocked, or when it lies
//! closer than the tolerance to a blocked neighbour: measured to the shared
//! edge for orthogonal neighbours and to the shared corner for diagonal
//! ones. The buffer around a blocked cell is therefore a rounded square,
//! which stops round entities clipping wall corners.
//!
//! Cells outside the grid count as blocked in every mode, as do non-finite
//! positions.

use num_traits::Float;

use crate::spatial::grid::{Direction, TileGrid};
use crate::spatial::position::CellPosition;
use crate::spatial::tile::BlockingMode;

/// Distance from a resolved point to the boundary it shares with a neighbour
///
/// Orthogonal neighbours share an edge; diagonal neighbours share a single
/// corner, so the Euclidean distance to that corner is used.
pub fn clearance<F: Float>(position: &CellPosition<F>, direction: Direction) -> F {
    let [dx, dy] = direction.offset();
    match (
        position.boundary_distance(0, dx),
        position.boundary_distance(1, dy),
    ) {
        (Some(across), Some(along)) => across.hypot(along),
        (Some(distance), None) | (None, Some(distance)) => distance,
        (None, None) => F::zero(),
    }
}

/// Whether a continuous position is blocked for a mode, given a proximity tolerance
///
/// With a tolerance of zero only the occupied cell is consulted. Growing the
/// tolerance can only turn a `false` answer into `true`.
pub fn blocked<F: Float>(
    grid: &TileGrid,
    position: [F; 2],
    tolerance: F,
    mode: BlockingMode,
) -> bool {
    let Some(resolved) = CellPosition::resolve(position) else {
        return true;
    };

    let cell_blocks = |coordinates: Option<[i64; 2]>| {
        coordinates
            .and_then(|coordinates| grid.tile_at(coordinates))
            .is_none_or(|tile| mode.blocks(tile))
    };

    if cell_blocks(Some(resolved.cell)) {
        return true;
    }

    Direction::CLOCKWISE.into_iter().any(|direction| {
        clearance(&resolved, direction) < tolerance
            && cell_blocks(offset_cell(resolved.cell, direction))
    })
}

/// Whether a position is blocked for tanks and other entities
pub fn impassable<F: Float>(grid: &TileGrid, position: [F; 2], tolerance: F) -> bool {
    blocked(grid, position, tolerance, BlockingMode::Entity)
}

/// Whether a position is blocked for projectiles
pub fn bullet_impassable<F: Float>(grid: &TileGrid, position: [F; 2], tolerance: F) -> bool {
    blocked(grid, position, tolerance, BlockingMode::Bullet)
}

fn offset_cell(cell: [i64; 2], direction: Direction) -> Option<[i64; 2]> {
    let [dx, dy] = direction.offset();
    Some([cell[0].checked_add(dx)?, cell[1].checked_add(dy)?])
}
