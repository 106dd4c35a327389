//! Fixed-size tile lattice with bounds-checked neighbour lookup
//!
//! Cells are addressed as `[x, y]` where `x` runs over rows (height) and `y`
//! over columns (width). "North" is decreasing `x` and "east" increasing `y`.
//! Any coordinate outside the lattice is treated as a closed wall by the
//! lookups that take signed coordinates.

use ndarray::Array2;
use std::fmt;

use crate::io::configuration::MAX_ARENA_DIMENSION;
use crate::io::error::{ArenaError, Result, invalid_parameter};
use crate::spatial::tile::Tile;

/// Grid coordinate of a cell as `[x, y]`
pub type Cell = [usize; 2];

/// Neighbour directions in clockwise order starting at the upper-left diagonal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// `x - 1, y - 1`
    NorthWest,
    /// `x - 1`
    North,
    /// `x - 1, y + 1`
    NorthEast,
    /// `y + 1`
    East,
    /// `x + 1, y + 1`
    SouthEast,
    /// `x + 1`
    South,
    /// `x + 1, y - 1`
    SouthWest,
    /// `y - 1`
    West,
}

impl Direction {
    /// All eight directions, clockwise from north-west
    pub const CLOCKWISE: [Self; 8] = [
        Self::NorthWest,
        Self::North,
        Self::NorthEast,
        Self::East,
        Self::SouthEast,
        Self::South,
        Self::SouthWest,
        Self::West,
    ];

    /// Coordinate delta `[dx, dy]` for one step in this direction
    pub const fn offset(self) -> [i64; 2] {
        match self {
            Self::NorthWest => [-1, -1],
            Self::North => [-1, 0],
            Self::NorthEast => [-1, 1],
            Self::East => [0, 1],
            Self::SouthEast => [1, 1],
            Self::South => [1, 0],
            Self::SouthWest => [1, -1],
            Self::West => [0, -1],
        }
    }

    /// Position of this direction within [`Direction::CLOCKWISE`]
    pub const fn clockwise_index(self) -> usize {
        match self {
            Self::NorthWest => 0,
            Self::North => 1,
            Self::NorthEast => 2,
            Self::East => 3,
            Self::SouthEast => 4,
            Self::South => 5,
            Self::SouthWest => 6,
            Self::West => 7,
        }
    }

    /// Whether this direction points at a corner-sharing neighbour
    pub const fn is_diagonal(self) -> bool {
        matches!(
            self,
            Self::NorthWest | Self::NorthEast | Self::SouthEast | Self::SouthWest
        )
    }
}

/// Step a cell one unit in a direction using signed coordinates
pub const fn step(cell: Cell, direction: Direction) -> [i64; 2] {
    let [dx, dy] = direction.offset();
    [cell[0] as i64 + dx, cell[1] as i64 + dy]
}

/// Rectangular lattice of tiles with immutable dimensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    tiles: Array2<Tile>,
}

/// Check that arena dimensions are usable
///
/// # Errors
///
/// Returns an error if either dimension is zero or exceeds
/// [`MAX_ARENA_DIMENSION`]
pub fn validate_dimensions(rows: usize, cols: usize) -> Result<()> {
    for (name, value) in [("height", rows), ("width", cols)] {
        if value == 0 {
            return Err(invalid_parameter(name, &value, &"must be positive"));
        }
        if value > MAX_ARENA_DIMENSION {
            return Err(invalid_parameter(
                name,
                &value,
                &format!("must not exceed {MAX_ARENA_DIMENSION}"),
            ));
        }
    }
    Ok(())
}

impl TileGrid {
    /// Wrap an array of tiles as a grid
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero or exceeds
    /// [`MAX_ARENA_DIMENSION`], or if any wall tile carries a surface object.
    pub fn new(tiles: Array2<Tile>) -> Result<Self> {
        let (rows, cols) = tiles.dim();
        validate_dimensions(rows, cols)?;

        if let Some(((x, y), tile)) = tiles.indexed_iter().find(|(_, tile)| !tile.is_consistent()) {
            return Err(ArenaError::SurfaceOccupied {
                position: [x, y],
                surface: tile.surface_object,
            });
        }

        Ok(Self { tiles })
    }

    /// Create a grid where every cell holds the same tile
    ///
    /// # Errors
    ///
    /// Same conditions as [`TileGrid::new`]
    pub fn filled(rows: usize, cols: usize, tile: Tile) -> Result<Self> {
        Self::new(Array2::from_elem((rows, cols), tile))
    }

    /// Number of rows (the grid height)
    pub fn rows(&self) -> usize {
        self.tiles.nrows()
    }

    /// Number of columns (the grid width)
    pub fn cols(&self) -> usize {
        self.tiles.ncols()
    }

    /// Grid dimensions as `(rows, cols)`
    pub fn dimensions(&self) -> (usize, usize) {
        self.tiles.dim()
    }

    /// Underlying tile array
    pub const fn tiles(&self) -> &Array2<Tile> {
        &self.tiles
    }

    /// Convert a signed coordinate to a cell if it lies inside the grid
    pub fn resolve(&self, coordinates: [i64; 2]) -> Option<Cell> {
        let x = usize::try_from(coordinates[0]).ok()?;
        let y = usize::try_from(coordinates[1]).ok()?;
        (x < self.rows() && y < self.cols()).then_some([x, y])
    }

    /// Tile at a cell, or `None` when out of bounds
    pub fn tile(&self, cell: Cell) -> Option<&Tile> {
        self.tiles.get(cell)
    }

    pub(crate) fn tile_mut(&mut self, cell: Cell) -> Option<&mut Tile> {
        self.tiles.get_mut(cell)
    }

    /// Tile at a signed coordinate, or `None` when off-grid
    pub fn tile_at(&self, coordinates: [i64; 2]) -> Option<&Tile> {
        self.resolve(coordinates).and_then(|cell| self.tile(cell))
    }

    /// Whether the cell at a signed coordinate is a wall
    ///
    /// Off-grid coordinates count as walls.
    pub fn closed_or_offgrid(&self, coordinates: [i64; 2]) -> bool {
        self.tile_at(coordinates).is_none_or(|tile| tile.closed)
    }

    /// Whether a cell lies on the outer boundary
    pub fn is_edge(&self, cell: Cell) -> bool {
        cell[0] == 0 || cell[0] + 1 == self.rows() || cell[1] == 0 || cell[1] + 1 == self.cols()
    }

    /// The in-bounds neighbour of a cell in a direction
    pub fn neighbour(&self, cell: Cell, direction: Direction) -> Option<Cell> {
        self.resolve(step(cell, direction))
    }

    /// All in-bounds neighbours of a cell, clockwise from north-west
    pub fn neighbours(&self, cell: Cell) -> impl Iterator<Item = (Direction, Cell)> + '_ {
        Direction::CLOCKWISE
            .into_iter()
            .filter_map(move |direction| {
                self.neighbour(cell, direction)
                    .map(|neighbour| (direction, neighbour))
            })
    }

    /// Every cell coordinate in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Cell> + use<> {
        let cols = self.cols();
        (0..self.rows()).flat_map(move |x| (0..cols).map(move |y| [x, y]))
    }
}

impl fmt::Display for TileGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.tiles.rows() {
            for tile in row {
                write!(f, "{tile}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
