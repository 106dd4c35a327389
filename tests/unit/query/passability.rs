//! Tests for point passability with proximity tolerance

#[cfg(test)]
mod tests {
    use arenagrid::io::level::LevelDefinition;
    use arenagrid::query::passability::{blocked, bullet_impassable, clearance, impassable};
    use arenagrid::spatial::grid::{Direction, TileGrid};
    use arenagrid::spatial::position::CellPosition;
    use arenagrid::spatial::tile::BlockingMode;

    fn grid(sketch: &str) -> TileGrid {
        let level = LevelDefinition::from_sketch("test", sketch).expect("valid sketch");
        TileGrid::new(level.tiles).expect("valid grid")
    }

    fn centre_wall() -> TileGrid {
        grid(".....\n.....\n..X..\n.....\n.....")
    }

    // Tests the owning cell decides at zero tolerance
    // Verified by consulting neighbours even at zero tolerance
    #[test]
    fn test_owning_cell() {
        let grid = centre_wall();
        assert!(impassable(&grid, [2.0_f64, 2.0], 0.0));
        assert!(impassable(&grid, [2.4_f64, 1.6], 0.0));
        assert!(!impassable(&grid, [2.0_f64, 1.49], 0.0));
    }

    // Tests orthogonal neighbours block within tolerance of the shared edge
    // Verified by measuring east distance with the west offset
    #[test]
    fn test_orthogonal_proximity() {
        let grid = centre_wall();
        assert!(impassable(&grid, [2.0_f64, 1.49], 0.1));
        assert!(!impassable(&grid, [2.0_f64, 1.0], 0.1));
        assert!(impassable(&grid, [1.45_f64, 2.0], 0.1));
        assert!(impassable(&grid, [2.0_f64, 2.55], 0.1));
        assert!(!impassable(&grid, [2.0_f64, 2.65], 0.1));
    }

    // Tests diagonal neighbours block within tolerance of the shared corner
    // Verified by using the larger axis distance for diagonals
    #[test]
    fn test_rounded_corner() {
        let grid = centre_wall();
        // Corner distance is hypot(0.05, 0.05) ~ 0.0707
        assert!(impassable(&grid, [1.45_f64, 1.45], 0.1));
        assert!(!impassable(&grid, [1.45_f64, 1.45], 0.07));
        // Same axis distances but outside the rounded buffer
        assert!(!impassable(&grid, [1.3_f64, 1.3], 0.25));
        assert!(impassable(&grid, [1.3_f64, 1.3], 0.3));
    }

    // Tests clearance uses one offset for edges and both for corners
    // Verified by returning the sum of offsets for diagonals
    #[test]
    fn test_clearance() {
        let resolved = CellPosition::resolve([1.2_f64, 1.4]).expect("finite position");
        assert!((clearance(&resolved, Direction::North) - 0.7).abs() < 1e-9);
        assert!((clearance(&resolved, Direction::South) - 0.3).abs() < 1e-9);
        assert!((clearance(&resolved, Direction::West) - 0.9).abs() < 1e-9);
        assert!((clearance(&resolved, Direction::East) - 0.1).abs() < 1e-9);
        assert!((clearance(&resolved, Direction::NorthWest) - 0.7_f64.hypot(0.9)).abs() < 1e-9);
        assert!((clearance(&resolved, Direction::SouthEast) - 0.3_f64.hypot(0.1)).abs() < 1e-9);
        assert!((clearance(&resolved, Direction::NorthEast) - 0.7_f64.hypot(0.1)).abs() < 1e-9);
    }

    // Tests bullets pass crates and barrels that stop tanks
    // Verified by using the entity predicate for bullets
    #[test]
    fn test_bullet_mode() {
        let grid = grid(".....\n.....\n..cb.\n.....\n.....");
        assert!(impassable(&grid, [2.0_f64, 2.0], 0.0));
        assert!(!bullet_impassable(&grid, [2.0_f64, 2.0], 0.0));
        assert!(impassable(&grid, [2.0_f64, 1.49], 0.1));
        assert!(!bullet_impassable(&grid, [2.0_f64, 1.49], 0.1));
        assert!(blocked(&grid, [2.0_f64, 3.0], 0.0, BlockingMode::Entity));
        assert!(!blocked(&grid, [2.0_f64, 3.0], 0.0, BlockingMode::Bullet));
    }

    // Tests the grid boundary behaves as a wall in both modes
    // Verified by treating off-grid neighbours as open
    #[test]
    fn test_offgrid_blocks() {
        let grid = grid("...\n...\n...");
        assert!(bullet_impassable(&grid, [0.0_f64, 1.0], 0.6));
        assert!(!bullet_impassable(&grid, [0.0_f64, 1.0], 0.4));
        assert!(impassable(&grid, [-1.0_f64, 1.0], 0.0));
        assert!(bullet_impassable(&grid, [1.0_f64, 3.0], 0.0));
        assert!(!impassable(&grid, [1.0_f64, 1.0], 0.5));
    }

    // Tests non-finite positions are blocked
    // Verified by resolving NaN to cell zero
    #[test]
    fn test_non_finite_blocked() {
        let grid = grid("...\n...\n...");
        assert!(impassable(&grid, [f64::NAN, 1.0], 0.0));
        assert!(bullet_impassable(&grid, [1.0, f64::INFINITY], 0.0));
    }

    // Tests larger tolerances never unblock a point
    // Verified by comparing with greater-or-equal instead of less-than
    #[test]
    fn test_tolerance_monotonic() {
        let grid = grid("......\n.X....\n...c..\n......\n....X.\n......");
        let tolerances = [0.0_f64, 0.1, 0.3, 0.5, 0.6, 0.8, 1.0, 1.5];
        for step_x in 0..=60 {
            for step_y in 0..=60 {
                let position = [step_x as f64 * 0.1 - 0.5, step_y as f64 * 0.1 - 0.5];
                for mode in [BlockingMode::Entity, BlockingMode::Bullet] {
                    let mut was_blocked = false;
                    for tolerance in tolerances {
                        let now = blocked(&grid, position, tolerance, mode);
                        assert!(now || !was_blocked, "{position:?} {tolerance} {mode:?}");
                        was_blocked = now;
                    }
                }
            }
        }
    }

    // Tests single precision positions behave like double precision ones
    // Verified by hard-coding f64 offsets in the resolver
    #[test]
    fn test_f32_positions() {
        let grid = centre_wall();
        assert!(impassable(&grid, [2.0_f32, 1.49], 0.1));
        assert!(!impassable(&grid, [2.0_f32, 1.0], 0.1));
    }
}
