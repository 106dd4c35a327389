//! The live arena: tile grid, cell proxies and the mutation path between them
//!
//! All edits to tile state go through [`Arena`] so the visual configuration
//! of the edited cell and its neighbours stays in step with the logical
//! grid. Passability queries read the grid directly and never depend on
//! proxy state.

use ndarray::Array2;
use num_traits::Float;
use tracing::debug;

use crate::arena::cells::CellSet;
use crate::arena::proxy::CellProxy;
use crate::autotile::selector::{PieceTable, Placement};
use crate::io::error::{ArenaError, Result};
use crate::io::level::LevelDefinition;
use crate::query::passability;
use crate::spatial::grid::{Cell, TileGrid};
use crate::spatial::tile::{BlockingMode, SurfaceObject, Tile};

/// Editor tool applied to a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Brush {
    /// Clear the cell back to bare floor
    Eraser,
    /// Turn the cell into a wall
    Wall,
    /// Place a surface object on open floor
    Surface(SurfaceObject),
}

/// An instantiated arena
#[derive(Debug, Clone)]
pub struct Arena {
    grid: TileGrid,
    proxies: Array2<CellProxy>,
    table: PieceTable,
    refreshed: CellSet,
}

impl Arena {
    /// Instantiate an arena from a level definition
    ///
    /// # Errors
    ///
    /// Returns an error if the level dimensions are invalid or a wall tile
    /// carries a surface object
    pub fn new(level: &LevelDefinition, table: PieceTable) -> Result<Self> {
        let grid = TileGrid::new(level.tiles.clone())?;
        let arena = Self::from_grid(grid, table);
        debug!(
            level = %level.name,
            rows = arena.grid.rows(),
            cols = arena.grid.cols(),
            "arena created"
        );
        Ok(arena)
    }

    /// Instantiate an arena with the built-in wall catalog
    ///
    /// # Errors
    ///
    /// Same conditions as [`Arena::new`]
    pub fn with_builtin_catalog(level: &LevelDefinition) -> Result<Self> {
        Self::new(level, PieceTable::default())
    }

    /// Wrap an existing grid, configuring every cell
    pub fn from_grid(grid: TileGrid, table: PieceTable) -> Self {
        let (rows, cols) = grid.dimensions();
        let mut proxies = Array2::from_shape_fn((rows, cols), |(x, y)| CellProxy::new([x, y]));
        for proxy in &mut proxies {
            proxy.refresh_base(&grid, &table);
            proxy.refresh_surface(&grid);
        }

        Self {
            grid,
            proxies,
            table,
            refreshed: CellSet::all(rows, cols),
        }
    }

    /// The logical tile grid
    pub const fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// Tile at a cell
    pub fn tile(&self, cell: Cell) -> Option<&Tile> {
        self.grid.tile(cell)
    }

    /// Grid dimensions as `(rows, cols)`
    pub fn dimensions(&self) -> (usize, usize) {
        self.grid.dimensions()
    }

    /// Proxy for a cell
    pub fn proxy(&self, cell: Cell) -> Option<&CellProxy> {
        self.proxies.get(cell)
    }

    /// Base piece and rotation currently selected for a cell
    pub fn placement(&self, cell: Cell) -> Option<Placement> {
        self.proxy(cell).and_then(CellProxy::placement)
    }

    /// Surface decoration currently shown on a cell
    pub fn decoration(&self, cell: Cell) -> Option<SurfaceObject> {
        self.proxy(cell).map(CellProxy::decoration)
    }

    /// Piece table used for wall selection
    pub const fn piece_table(&self) -> &PieceTable {
        &self.table
    }

    /// Whether a continuous position is blocked for the given mode
    pub fn blocked<F: Float>(&self, position: [F; 2], tolerance: F, mode: BlockingMode) -> bool {
        passability::blocked(&self.grid, position, tolerance, mode)
    }

    /// Open or close a cell
    ///
    /// The cell and each of its existing neighbours have their base piece
    /// recomputed. Setting the current value is a no-op.
    ///
    /// # Errors
    ///
    /// - [`ArenaError::OutOfBounds`] or [`ArenaError::EdgeLocked`] for cells
    ///   that cannot be edited
    /// - [`ArenaError::SurfaceOccupied`] when closing a cell that still holds
    ///   a surface object
    pub fn set_closed(&mut self, cell: Cell, closed: bool) -> Result<()> {
        let tile = self.editable_tile(cell)?;
        if tile.closed == closed {
            return Ok(());
        }
        if closed && tile.surface_object != SurfaceObject::None {
            return Err(ArenaError::SurfaceOccupied {
                position: cell,
                surface: tile.surface_object,
            });
        }

        if let Some(tile) = self.grid.tile_mut(cell) {
            tile.closed = closed;
        }
        self.on_tile_closed_changed(cell);
        Ok(())
    }

    /// Place or remove the surface object of a cell
    ///
    /// Only the cell's own decoration is refreshed.
    ///
    /// # Errors
    ///
    /// - [`ArenaError::OutOfBounds`] or [`ArenaError::EdgeLocked`] for cells
    ///   that cannot be edited
    /// - [`ArenaError::WallOccupied`] when placing an object on a wall
    pub fn set_surface_object(&mut self, cell: Cell, surface: SurfaceObject) -> Result<()> {
        let tile = self.editable_tile(cell)?;
        if tile.surface_object == surface {
            return Ok(());
        }
        if tile.closed && surface != SurfaceObject::None {
            return Err(ArenaError::WallOccupied {
                position: cell,
                surface,
            });
        }

        if let Some(tile) = self.grid.tile_mut(cell) {
            tile.surface_object = surface;
        }
        self.on_tile_surface_changed(cell);
        Ok(())
    }

    /// Set the wiring flag of a cell
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::OutOfBounds`] or [`ArenaError::EdgeLocked`] for
    /// cells that cannot be edited
    pub fn set_wired(&mut self, cell: Cell, wired: bool) -> Result<()> {
        self.editable_tile(cell)?;
        if let Some(tile) = self.grid.tile_mut(cell) {
            tile.wired = wired;
        }
        Ok(())
    }

    /// Apply an editor brush, clearing conflicting state first
    ///
    /// Every brush also removes wiring from the cell.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::OutOfBounds`] or [`ArenaError::EdgeLocked`] for
    /// cells that cannot be edited; the cell is left untouched in that case
    pub fn apply_brush(&mut self, cell: Cell, brush: Brush) -> Result<()> {
        self.editable_tile(cell)?;
        match brush {
            Brush::Eraser => {
                self.set_surface_object(cell, SurfaceObject::None)?;
                self.set_closed(cell, false)?;
            }
            Brush::Wall => {
                self.set_surface_object(cell, SurfaceObject::None)?;
                self.set_closed(cell, true)?;
            }
            Brush::Surface(surface) => {
                self.set_closed(cell, false)?;
                self.set_surface_object(cell, surface)?;
            }
        }
        self.set_wired(cell, false)
    }

    /// Remove every surface object of one kind, returning how many were removed
    pub fn clear_surface_objects(&mut self, kind: SurfaceObject) -> usize {
        if kind == SurfaceObject::None {
            return 0;
        }
        let mut removed = 0;
        for cell in self.grid.cells() {
            let Some(tile) = self.grid.tile_mut(cell) else {
                continue;
            };
            if tile.surface_object == kind {
                tile.surface_object = SurfaceObject::None;
                self.on_tile_surface_changed(cell);
                removed += 1;
            }
        }
        removed
    }

    /// Cells whose visuals were recomputed since the last call, in row-major order
    pub fn take_refreshed(&mut self) -> Vec<Cell> {
        self.refreshed.drain()
    }

    /// Snapshot the current tile state as a level definition
    pub fn to_level(&self, name: &str) -> LevelDefinition {
        LevelDefinition {
            name: name.to_string(),
            tiles: self.grid.tiles().clone(),
        }
    }

    fn editable_tile(&self, cell: Cell) -> Result<Tile> {
        let tile = self
            .grid
            .tile(cell)
            .copied()
            .ok_or_else(|| ArenaError::OutOfBounds {
                position: cell,
                dimensions: self.grid.dimensions(),
            })?;
        if self.grid.is_edge(cell) {
            return Err(ArenaError::EdgeLocked { position: cell });
        }
        Ok(tile)
    }

    fn on_tile_closed_changed(&mut self, cell: Cell) {
        self.refresh_base(cell);
        let neighbours: Vec<Cell> = self
            .grid
            .neighbours(cell)
            .map(|(_, neighbour)| neighbour)
            .collect();
        for neighbour in neighbours {
            self.refresh_base(neighbour);
        }
    }

    fn on_tile_surface_changed(&mut self, cell: Cell) {
        if let Some(proxy) = self.proxies.get_mut(cell) {
            proxy.refresh_surface(&self.grid);
            self.refreshed.insert(cell);
        }
    }

    fn refresh_base(&mut self, cell: Cell) {
        if let Some(proxy) = self.proxies.get_mut(cell) {
            proxy.refresh_base(&self.grid, &self.table);
            self.refreshed.insert(cell);
        }
    }
}
