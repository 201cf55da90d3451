//! Tests for grid storage, edge-policy access, ticking, seeding and resizing

#[cfg(test)]
mod tests {
    use lifegrid::LifeError;
    use lifegrid::engine::neighborhood::{MOORE, MOORE_OFFSETS, VON_NEUMANN};
    use lifegrid::engine::{ALIVE, Cell, DEAD, EdgeBehavior, Grid, ResizePolicy, Rule};
    use lifegrid::io::configuration::MAX_GRID_DIMENSION;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn reference_next(grid: &Grid) -> Vec<Cell> {
        let mut next = Vec::with_capacity(grid.width() * grid.height());
        for y in 0..grid.height() as i32 {
            for x in 0..grid.width() as i32 {
                let count = MOORE_OFFSETS
                    .iter()
                    .zip(grid.neighborhood.iter())
                    .filter(|&(&(dx, dy), &enabled)| enabled && grid.get(x + dx, y + dy) != DEAD)
                    .count();
                let table = if grid.get(x, y) == DEAD {
                    &grid.birth_rule
                } else {
                    &grid.survive_rule
                };
                next.push(Cell::from(table[count]));
            }
        }
        next
    }

    fn horizontal_blinker() -> Grid {
        let mut grid = Grid::new(5, 5).unwrap();
        grid.edge_behavior = EdgeBehavior::AlwaysOff;
        for x in 1..=3 {
            grid.set(x, 2, ALIVE);
        }
        grid
    }

    // Tests a fresh grid is all dead with Moore, Conway and wrapping edges
    // Verified by leaving the front buffer uninitialized
    #[test]
    fn test_new_grid_defaults() {
        let grid = Grid::new(7, 4).unwrap();

        assert_eq!(grid.width(), 7);
        assert_eq!(grid.height(), 4);
        assert_eq!(grid.cells().len(), 28);
        assert_eq!(grid.alive_count(), 0);
        assert_eq!(grid.neighborhood, MOORE);
        assert_eq!(grid.rule(), Rule::conway());
        assert_eq!(grid.edge_behavior, EdgeBehavior::Wrap);
    }

    // Tests zero and oversized dimensions are rejected
    // Verified by removing the upper bound check
    #[test]
    fn test_new_rejects_invalid_dimensions() {
        assert!(matches!(
            Grid::new(0, 5),
            Err(LifeError::InvalidDimensions { width: 0, .. })
        ));
        assert!(matches!(
            Grid::new(5, 0),
            Err(LifeError::InvalidDimensions { height: 0, .. })
        ));
        assert!(matches!(
            Grid::new(MAX_GRID_DIMENSION + 1, 1),
            Err(LifeError::InvalidDimensions { .. })
        ));
    }

    // Tests wrapping reads land on the opposite side in both directions
    // Verified by clamping instead of wrapping
    #[test]
    fn test_wrap_reads_are_toroidal() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.set(0, 0, ALIVE);
        grid.set(2, 2, ALIVE);

        assert_eq!(grid.get(3, 3), grid.get(0, 0));
        assert_eq!(grid.get(-1, -1), grid.get(2, 2));
        assert!(grid.is_alive(-3, 3));
        assert!(!grid.is_alive(-1, 0));
    }

    // Tests an out-of-grid write under wrap lands on the wrapped cell
    // Verified by dropping out-of-grid writes under every policy
    #[test]
    fn test_wrap_write_lands_on_wrapped_cell() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.set(-1, -1, ALIVE);

        assert!(grid.is_alive(2, 2));
        assert_eq!(grid.alive_count(), 1);
    }

    // Tests synthetic edge values and dropped writes for the fixed policies
    // Verified by returning stored cells for out-of-grid reads
    #[test]
    fn test_fixed_edges_read_synthetic_and_drop_writes() {
        let mut grid = Grid::new(3, 3).unwrap();

        grid.edge_behavior = EdgeBehavior::AlwaysOff;
        grid.fill();
        assert_eq!(grid.get(-1, 0), DEAD);
        assert_eq!(grid.get(3, 1), DEAD);

        grid.clear();
        grid.set(-1, -1, ALIVE);
        grid.set(3, 0, ALIVE);
        assert_eq!(grid.alive_count(), 0);

        grid.edge_behavior = EdgeBehavior::AlwaysOn;
        assert_eq!(grid.get(0, -1), ALIVE);
        assert_eq!(grid.get(100, 100), ALIVE);
        grid.set(5, 5, DEAD);
        assert_eq!(grid.alive_count(), 0);
    }

    // Tests the blinker flips between horizontal and vertical
    // Verified by updating cells in place during the tick
    #[test]
    fn test_blinker_oscillates() {
        let mut grid = horizontal_blinker();
        let start = grid.clone();

        grid.tick();
        for y in 1..=3 {
            assert!(grid.is_alive(2, y));
        }
        assert!(!grid.is_alive(1, 2));
        assert!(!grid.is_alive(3, 2));
        assert_eq!(grid.alive_count(), 3);

        grid.tick();
        assert_eq!(grid.cells(), start.cells());
    }

    // Tests the tick equals a naive count-and-lookup over the same generation
    // Verified by counting neighbors from the partially written next generation
    #[test]
    fn test_tick_matches_reference_for_random_configurations() {
        let mut rng = StdRng::seed_from_u64(7);
        for edge in EdgeBehavior::ALL {
            for _ in 0..4 {
                let mut grid = Grid::new(11, 7).unwrap();
                grid.edge_behavior = edge;
                grid.randomize_from(&mut rng, 0.4);
                for enabled in &mut grid.neighborhood {
                    *enabled = rng.random_bool(0.7);
                }
                for entry in grid.birth_rule.iter_mut().chain(grid.survive_rule.iter_mut()) {
                    *entry = rng.random_bool(0.5);
                }

                let expected = reference_next(&grid);
                grid.tick();
                assert_eq!(grid.cells(), expected.as_slice(), "edge {edge}");
            }
        }
    }

    // Tests only enabled offsets are counted
    // Verified by ignoring the neighborhood mask
    #[test]
    fn test_convolute_respects_neighborhood() {
        let mut grid = Grid::new(5, 5).unwrap();
        grid.fill();
        assert_eq!(grid.convolute(2, 2), 8);

        grid.neighborhood = VON_NEUMANN;
        assert_eq!(grid.convolute(2, 2), 4);

        grid.neighborhood = [false; 8];
        assert_eq!(grid.convolute(2, 2), 0);
    }

    // Tests always-on edges count as live neighbors at the border
    // Verified by treating synthetic cells as dead
    #[test]
    fn test_always_on_edges_feed_border_counts() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.edge_behavior = EdgeBehavior::AlwaysOn;
        assert_eq!(grid.convolute(0, 0), 5);
        assert_eq!(grid.convolute(1, 1), 0);

        grid.edge_behavior = EdgeBehavior::AlwaysOff;
        assert_eq!(grid.convolute(0, 0), 0);
    }

    // Tests a birth-on-zero rule flashes the whole empty field
    // Verified by skipping cells with zero neighbors
    #[test]
    fn test_strobing_rule_flashes_empty_field() {
        let mut grid = Grid::new(6, 4).unwrap();
        grid.set_rule(Rule::from_counts(&[0], &[]));
        assert!(grid.rule().is_strobing());

        grid.tick();
        assert_eq!(grid.alive_count(), 24);
        grid.tick();
        assert_eq!(grid.alive_count(), 0);
    }

    // Tests seeding from the same seed gives the same field
    // Verified by seeding from the thread-local generator
    #[test]
    fn test_randomize_from_is_deterministic() {
        let mut a = Grid::new(20, 20).unwrap();
        let mut b = Grid::new(20, 20).unwrap();
        a.randomize_from(&mut StdRng::seed_from_u64(99), 0.5);
        b.randomize_from(&mut StdRng::seed_from_u64(99), 0.5);

        assert_eq!(a.cells(), b.cells());
        assert!(a.alive_count() > 0 && a.alive_count() < 400);
    }

    // Tests the fill probability is clamped to [0, 1]
    // Verified by passing the raw probability to the comparison unclamped
    #[test]
    fn test_randomize_percent_extremes() {
        let mut grid = Grid::new(10, 10).unwrap();

        grid.randomize_percent(1.0);
        assert_eq!(grid.alive_count(), 100);
        grid.randomize_percent(-0.5);
        assert_eq!(grid.alive_count(), 0);
        grid.randomize_percent(3.0);
        assert_eq!(grid.alive_count(), 100);
        grid.randomize_percent(0.0);
        assert_eq!(grid.alive_count(), 0);

        grid.randomize();
        assert!(grid.cells().iter().all(|&c| c == DEAD || c == ALIVE));
    }

    // Tests fill and clear are idempotent
    // Verified by toggling cells instead of assigning
    #[test]
    fn test_fill_and_clear_idempotent() {
        let mut grid = Grid::new(4, 4).unwrap();
        grid.fill();
        grid.fill();
        assert_eq!(grid.alive_count(), 16);
        grid.clear();
        grid.clear();
        assert_eq!(grid.alive_count(), 0);
    }

    // Tests clear then fill reaches all-alive from any field without touching the back buffer
    // Verified by filling the back buffer along with the front
    #[test]
    fn test_clear_then_fill_from_random_state() {
        let mut grid = Grid::new(9, 6).unwrap();
        grid.randomize_from(&mut StdRng::seed_from_u64(13), 0.5);
        grid.tick();
        let back_before: Vec<Cell> = (0..6)
            .flat_map(|y| (0..9).map(move |x| (x, y)))
            .map(|(x, y)| grid.get_back(x, y))
            .collect();

        grid.clear();
        grid.fill();
        assert_eq!(grid.alive_count(), 9 * 6);

        let back_after: Vec<Cell> = (0..6)
            .flat_map(|y| (0..9).map(move |x| (x, y)))
            .map(|(x, y)| grid.get_back(x, y))
            .collect();
        assert_eq!(back_after, back_before);
    }

    // Tests ticking copies of one saved state gives identical generations
    // Verified by drawing from a generator inside the tick
    #[test]
    fn test_tick_is_deterministic_from_saved_state() {
        let mut rng = StdRng::seed_from_u64(17);
        for edge in EdgeBehavior::ALL {
            let mut grid = Grid::new(12, 9).unwrap();
            grid.edge_behavior = edge;
            grid.randomize_from(&mut rng, 0.45);
            let mut copy = grid.clone();

            for _ in 0..3 {
                grid.tick();
                copy.tick();
                assert_eq!(grid, copy, "edge {edge}");
            }
        }
    }

    // Tests neighbor counts at the extreme coordinates under every edge policy
    // Verified by adding neighbor offsets in i32
    #[test]
    fn test_convolute_at_coordinate_limits() {
        let mut grid = Grid::new(5, 3).unwrap();
        grid.randomize_from(&mut StdRng::seed_from_u64(3), 0.5);

        grid.edge_behavior = EdgeBehavior::AlwaysOff;
        assert_eq!(grid.convolute(i32::MAX, 0), 0);
        assert_eq!(grid.convolute(i32::MIN, 0), 0);

        grid.edge_behavior = EdgeBehavior::AlwaysOn;
        assert_eq!(grid.convolute(i32::MAX, 0), 8);
        assert_eq!(grid.convolute(i32::MIN, 0), 8);

        grid.edge_behavior = EdgeBehavior::Wrap;
        for x in [i32::MAX, i32::MIN] {
            let wrapped = i64::from(x).rem_euclid(5) as i32;
            assert_eq!(grid.convolute(x, 0), grid.convolute(wrapped, 0), "x {x}");
            assert_eq!(
                grid.convolute(0, x),
                grid.convolute(0, i64::from(x).rem_euclid(3) as i32),
                "y {x}"
            );
        }
    }

    // Tests discarding resize produces an all-dead grid of the new size
    // Verified by reusing the old buffers
    #[test]
    fn test_resize_discards_content() {
        let mut grid = Grid::new(4, 4).unwrap();
        grid.fill();

        grid.resize(6, 2).unwrap();
        assert_eq!((grid.width(), grid.height()), (6, 2));
        assert_eq!(grid.cells().len(), 12);
        assert_eq!(grid.alive_count(), 0);

        grid.tick();
        assert_eq!(grid.cells().len(), 12);
    }

    // Tests the overlapping top-left rectangle survives a preserving resize
    // Verified by copying rows with the new width as the source stride
    #[test]
    fn test_resize_preserve_overlap() {
        let mut grid = Grid::new(4, 3).unwrap();
        grid.set(0, 0, ALIVE);
        grid.set(1, 2, ALIVE);
        grid.set(3, 1, ALIVE);

        grid.resize_with(2, 5, ResizePolicy::PreserveOverlap).unwrap();
        assert_eq!((grid.width(), grid.height()), (2, 5));
        assert!(grid.is_alive(0, 0));
        assert!(grid.is_alive(1, 2));
        assert_eq!(grid.alive_count(), 2);
        for y in 3..5 {
            assert!(!grid.is_alive(0, y) && !grid.is_alive(1, y));
        }
    }

    // Tests a rejected resize leaves every field unchanged
    // Verified by assigning dimensions before validating
    #[test]
    fn test_invalid_resize_leaves_grid_unchanged() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.set(1, 1, ALIVE);
        let before = grid.clone();

        assert!(grid.resize(0, 3).is_err());
        assert!(grid.resize(3, MAX_GRID_DIMENSION + 1).is_err());
        assert_eq!(grid, before);
    }

    // Tests resizing to the current size keeps the content
    // Verified by always reallocating
    #[test]
    fn test_resize_to_same_size_is_noop() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.fill();
        grid.resize(3, 3).unwrap();
        assert_eq!(grid.alive_count(), 9);
    }

    // Tests the back buffer holds the previous generation after a tick
    // Verified by copying instead of swapping buffers
    #[test]
    fn test_back_buffer_holds_previous_generation() {
        let mut grid = horizontal_blinker();
        grid.tick();

        assert_eq!(grid.get_back(1, 2), ALIVE);
        assert_eq!(grid.get_back(2, 1), DEAD);

        grid.set_back(0, 0, ALIVE);
        assert_eq!(grid.get_back(0, 0), ALIVE);
        assert!(!grid.is_alive(0, 0));
    }

    // Tests the text rendering uses one line per row
    // Verified by emitting a trailing newline
    #[test]
    fn test_display_renders_rows() {
        let mut grid = Grid::new(3, 2).unwrap();
        grid.set(0, 0, ALIVE);
        grid.set(2, 1, ALIVE);

        assert_eq!(grid.to_string(), "#..\n..#");
    }
}
