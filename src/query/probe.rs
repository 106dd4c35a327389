//! Ray-marched sensing and movement helpers built on the passability query
//!
//! These march a point through the arena in fixed steps, asking the
//! passability query at each one. They perform no route planning.

use num_traits::Float;

use crate::io::configuration::{
    MAX_ARENA_DIMENSION, MAX_SENSOR_DISTANCE, SENSOR_STEP, SENSOR_TOLERANCE,
};
use crate::query::passability::impassable;
use crate::spatial::grid::TileGrid;
use crate::spatial::position::cell_of;

fn constant<F: Float>(value: f64) -> F {
    F::from(value).unwrap_or_else(F::zero)
}

// Any march longer than twice the largest arena side has left the grid
fn step_limit(distance: f64) -> usize {
    let longest = 2.0 * MAX_ARENA_DIMENSION as f64 / SENSOR_STEP;
    ((distance / SENSOR_STEP).ceil().clamp(0.0, longest) as usize).saturating_add(1)
}

/// Distance a tank could travel from `origin` along a unit `direction`
///
/// Marches in [`SENSOR_STEP`] increments while keeping [`SENSOR_TOLERANCE`]
/// clear of obstacles, stopping at [`MAX_SENSOR_DISTANCE`].
pub fn walkable_distance<F: Float>(grid: &TileGrid, origin: [F; 2], direction: [F; 2]) -> F {
    let step = constant::<F>(SENSOR_STEP);
    let tolerance = constant::<F>(SENSOR_TOLERANCE);
    let limit = constant::<F>(MAX_SENSOR_DISTANCE);

    let mut position = origin;
    let mut distance = F::zero();
    for _ in 0..step_limit(MAX_SENSOR_DISTANCE) {
        if distance >= limit || impassable(grid, position, tolerance) {
            break;
        }
        position = [
            position[0] + step * direction[0],
            position[1] + step * direction[1],
        ];
        distance = distance + step;
    }
    distance
}

/// Whether a straight shot from `from` reaches the cell containing `to`
///
/// The path is marched as a point, so only cells that block entities stop
/// it. Reaching the target's cell counts as a clear line.
pub fn line_of_fire<F: Float>(grid: &TileGrid, from: [F; 2], to: [F; 2]) -> bool {
    let Some(target) = cell_of(to) else {
        return false;
    };
    let delta = [to[0] - from[0], to[1] - from[1]];
    let length = delta[0].hypot(delta[1]);
    if !length.is_finite() {
        return false;
    }
    if length == F::zero() {
        return !impassable(grid, from, F::zero());
    }

    let step = constant::<F>(SENSOR_STEP);
    let direction = [delta[0] / length, delta[1] / length];
    let steps = step_limit(length.to_f64().unwrap_or(0.0)).saturating_add(1);

    let mut position = from;
    for _ in 0..steps {
        if impassable(grid, position, F::zero()) {
            return false;
        }
        position = [
            position[0] + step * direction[0],
            position[1] + step * direction[1],
        ];
        if cell_of(position) == Some(target) {
            return true;
        }
    }
    false
}

/// Move a round entity by `offset`, resolving each axis separately
///
/// The x component is applied first and kept only if the result is
/// passable at `tolerance`; the y component is then tried from wherever the
/// entity ended up. This lets entities slide along walls.
pub fn slide<F: Float>(grid: &TileGrid, position: [F; 2], offset: [F; 2], tolerance: F) -> [F; 2] {
    let mut resolved = position;

    let along_x = [resolved[0] + offset[0], resolved[1]];
    if !impassable(grid, along_x, tolerance) {
        resolved = along_x;
    }

    let along_y = [resolved[0], resolved[1] + offset[1]];
    if !impassable(grid, along_y, tolerance) {
        resolved = along_y;
    }

    resolved
}
