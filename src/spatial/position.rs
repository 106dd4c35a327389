//! Mapping between continuous arena coordinates and grid cells
//!
//! Cell centres sit on integer coordinates, so cell boundaries fall on
//! half-integers. A point is described by the signed index of the cell it
//! occupies plus its fractional offset from that cell's lower boundary on
//! each axis.

use num_traits::Float;

/// A continuous point resolved against the cell lattice
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellPosition<F> {
    /// Signed `[x, y]` index of the occupied cell (may lie off-grid)
    pub cell: [i64; 2],
    /// Distance travelled into the cell from its lower edge on each axis, in `[0, 1)`
    pub offset: [F; 2],
}

impl<F: Float> CellPosition<F> {
    /// Resolve a continuous position to its owning cell and offsets
    ///
    /// Returns `None` for non-finite coordinates or coordinates whose cell
    /// index does not fit in an `i64`.
    pub fn resolve(position: [F; 2]) -> Option<Self> {
        let (x, l) = resolve_axis(position[0])?;
        let (y, d) = resolve_axis(position[1])?;
        Some(Self {
            cell: [x, y],
            offset: [l, d],
        })
    }

    /// Distance from the point to the boundary shared with the cell one step
    /// along an axis (`-1` towards lower indices, `1` towards higher ones)
    pub fn boundary_distance(&self, axis: usize, delta: i64) -> Option<F> {
        let offset = self.offset.get(axis).copied()?;
        match delta {
            -1 => Some(offset),
            1 => Some(F::one() - offset),
            _ => None,
        }
    }
}

/// Integer cell index and fractional offset for one axis
fn resolve_axis<F: Float>(coordinate: F) -> Option<(i64, F)> {
    if !coordinate.is_finite() {
        return None;
    }
    let half = F::one() / (F::one() + F::one());
    let shifted = coordinate + half;
    let lower = shifted.floor();
    let offset = shifted - lower;
    lower.to_i64().map(|index| (index, offset))
}

/// Signed cell index occupied by a continuous position
pub fn cell_of<F: Float>(position: [F; 2]) -> Option<[i64; 2]> {
    CellPosition::resolve(position).map(|resolved| resolved.cell)
}
