//! Tests for the tile grid: validation, bounds handling and neighbour lookup

#[cfg(test)]
mod tests {
    use arenagrid::ArenaError;
    use arenagrid::io::configuration::MAX_ARENA_DIMENSION;
    use arenagrid::spatial::grid::{Direction, TileGrid, step, validate_dimensions};
    use arenagrid::spatial::tile::{SurfaceObject, Tile};
    use ndarray::Array2;

    fn open_grid(rows: usize, cols: usize) -> TileGrid {
        TileGrid::filled(rows, cols, Tile::OPEN).expect("valid dimensions")
    }

    // Tests dimension validation rejects empty and oversized grids
    // Verified by removing the zero-dimension check
    #[test]
    fn test_dimension_validation() {
        assert!(validate_dimensions(1, 1).is_ok());
        assert!(matches!(
            validate_dimensions(0, 5),
            Err(ArenaError::InvalidParameter {
                parameter: "height",
                ..
            })
        ));
        assert!(matches!(
            validate_dimensions(5, MAX_ARENA_DIMENSION + 1),
            Err(ArenaError::InvalidParameter {
                parameter: "width",
                ..
            })
        ));
    }

    // Tests that a wall holding a surface object is refused at construction
    // Verified by skipping the consistency scan in TileGrid::new
    #[test]
    fn test_rejects_inconsistent_tiles() {
        let mut tiles = Array2::from_elem((3, 3), Tile::OPEN);
        if let Some(tile) = tiles.get_mut([1, 2]) {
            *tile = Tile {
                closed: true,
                wired: false,
                surface_object: SurfaceObject::Crate,
            };
        }
        match TileGrid::new(tiles) {
            Err(ArenaError::SurfaceOccupied { position, surface }) => {
                assert_eq!(position, [1, 2]);
                assert_eq!(surface, SurfaceObject::Crate);
            }
            other => panic!("expected SurfaceOccupied, got {other:?}"),
        }
    }

    // Tests direction offsets follow north = x - 1 and east = y + 1
    // Verified by swapping the north and east offsets
    #[test]
    fn test_direction_offsets() {
        assert_eq!(Direction::North.offset(), [-1, 0]);
        assert_eq!(Direction::East.offset(), [0, 1]);
        assert_eq!(Direction::SouthWest.offset(), [1, -1]);
        for (index, direction) in Direction::CLOCKWISE.into_iter().enumerate() {
            assert_eq!(direction.clockwise_index(), index);
            assert_eq!(direction.is_diagonal(), index % 2 == 0);
        }
        assert_eq!(step([0, 0], Direction::NorthWest), [-1, -1]);
    }

    // Tests that off-grid coordinates read as closed
    // Verified by treating unresolved coordinates as open
    #[test]
    fn test_offgrid_is_closed() {
        let grid = open_grid(3, 4);
        assert!(grid.closed_or_offgrid([-1, 0]));
        assert!(grid.closed_or_offgrid([0, 4]));
        assert!(grid.closed_or_offgrid([3, 0]));
        assert!(!grid.closed_or_offgrid([2, 3]));
        assert_eq!(grid.resolve([2, 3]), Some([2, 3]));
        assert_eq!(grid.resolve([-1, 3]), None);
        assert!(grid.tile_at([5, 5]).is_none());
    }

    // Tests edge detection on every side
    // Verified by omitting the last-column comparison
    #[test]
    fn test_is_edge() {
        let grid = open_grid(4, 5);
        assert!(grid.is_edge([0, 2]));
        assert!(grid.is_edge([3, 2]));
        assert!(grid.is_edge([2, 0]));
        assert!(grid.is_edge([2, 4]));
        assert!(!grid.is_edge([1, 1]));
        assert!(!grid.is_edge([2, 3]));
    }

    // Tests neighbour enumeration skips off-grid cells
    // Verified by removing the bounds filter from neighbours
    #[test]
    fn test_neighbours() {
        let grid = open_grid(3, 3);
        assert_eq!(grid.neighbours([1, 1]).count(), 8);
        let corner: Vec<_> = grid.neighbours([0, 0]).collect();
        assert_eq!(
            corner,
            vec![
                (Direction::East, [0, 1]),
                (Direction::SouthEast, [1, 1]),
                (Direction::South, [1, 0]),
            ]
        );
        assert_eq!(grid.neighbour([0, 2], Direction::NorthEast), None);
    }

    // Tests row-major cell iteration and debug rendering
    // Verified by transposing the cell iterator
    #[test]
    fn test_cells_and_display() {
        let mut tiles = Array2::from_elem((2, 3), Tile::OPEN);
        if let Some(tile) = tiles.get_mut([0, 1]) {
            *tile = Tile::WALL;
        }
        let grid = TileGrid::new(tiles).expect("valid grid");
        let cells: Vec<_> = grid.cells().collect();
        assert_eq!(cells, vec![[0, 0], [0, 1], [0, 2], [1, 0], [1, 1], [1, 2]]);
        assert_eq!(grid.to_string(), " X \n   \n");
        assert_eq!(grid.dimensions(), (2, 3));
    }
}
