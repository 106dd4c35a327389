//! Per-cell visual configuration derived from tile state
//!
//! A proxy caches the base piece selected for its cell and the surface
//! decoration currently shown on it. It holds its cell coordinate rather
//! than a reference, so the arena can own proxies and tiles side by side.

use tracing::warn;

use crate::autotile::selector::{PieceSelection, PieceTable, Placement, select_piece};
use crate::spatial::grid::{Cell, TileGrid};
use crate::spatial::tile::SurfaceObject;

/// Cached visual state of one arena cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellProxy {
    cell: Cell,
    placement: Option<Placement>,
    decoration: SurfaceObject,
}

impl CellProxy {
    /// Create an unconfigured proxy for a cell
    pub const fn new(cell: Cell) -> Self {
        Self {
            cell,
            placement: None,
            decoration: SurfaceObject::None,
        }
    }

    /// Coordinate of the cell this proxy renders
    pub const fn cell(&self) -> Cell {
        self.cell
    }

    /// Currently selected base piece, if any has been resolved
    pub const fn placement(&self) -> Option<Placement> {
        self.placement
    }

    /// Surface object currently shown on the cell
    pub const fn decoration(&self) -> SurfaceObject {
        self.decoration
    }

    /// Re-run piece selection for this cell
    ///
    /// A catalog miss is reported and the previous placement is kept.
    /// Returns whether a placement was resolved.
    pub fn refresh_base(&mut self, grid: &TileGrid, table: &PieceTable) -> bool {
        match select_piece(grid, self.cell, table) {
            PieceSelection::Floor => {
                self.placement = Some(Placement::FLOOR);
                true
            }
            PieceSelection::Wall(placement) => {
                self.placement = Some(placement);
                true
            }
            PieceSelection::Unmatched(signature) => {
                warn!(
                    x = self.cell[0],
                    y = self.cell[1],
                    %signature,
                    "wall piece not found in catalog"
                );
                false
            }
        }
    }

    /// Re-read the surface object shown on this cell
    pub fn refresh_surface(&mut self, grid: &TileGrid) {
        self.decoration = grid
            .tile(self.cell)
            .map_or(SurfaceObject::None, |tile| tile.surface_object);
    }
}
