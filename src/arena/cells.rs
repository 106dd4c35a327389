use bitvec::prelude::*;
use std::fmt;

use crate::spatial::grid::Cell;

/// Fixed-size set of grid cells backed by one bit per cell
///
/// Cells are stored in row-major order. Inserting a cell outside the
/// dimensions the set was created with is ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellSet {
    bits: BitVec,
    cols: usize,
}

impl CellSet {
    /// Create an empty set for a grid of the given dimensions
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            bits: bitvec![0; rows * cols],
            cols,
        }
    }

    /// Create a set containing every cell of the grid
    pub fn all(rows: usize, cols: usize) -> Self {
        Self {
            bits: bitvec![1; rows * cols],
            cols,
        }
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        let index = cell[0].checked_mul(self.cols)?.checked_add(cell[1])?;
        (cell[1] < self.cols && index < self.bits.len()).then_some(index)
    }

    /// Insert a cell
    pub fn insert(&mut self, cell: Cell) {
        if let Some(index) = self.index(cell) {
            self.bits.set(index, true);
        }
    }

    /// Test cell membership
    pub fn contains(&self, cell: Cell) -> bool {
        self.index(cell)
            .and_then(|index| self.bits.get(index).as_deref().copied())
            .unwrap_or(false)
    }

    /// Remove every cell
    pub fn clear(&mut self) {
        self.bits.fill(false);
    }

    /// Test if no cells are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count cells in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Extract all cells in row-major order
    pub fn to_vec(&self) -> Vec<Cell> {
        if self.cols == 0 {
            return Vec::new();
        }
        self.bits
            .iter_ones()
            .map(|index| [index / self.cols, index % self.cols])
            .collect()
    }

    /// Extract all cells and leave the set empty
    pub fn drain(&mut self) -> Vec<Cell> {
        let cells = self.to_vec();
        self.clear();
        cells
    }
}

impl fmt::Display for CellSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CellSet({} cells: {:?})", self.count(), self.to_vec())
    }
}
