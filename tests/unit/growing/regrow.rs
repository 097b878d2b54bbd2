//! Tests for border regrow over rejected cells

#[cfg(test)]
mod tests {
    use ndarray::array;
    use voronizer::GrowError;
    use voronizer::growing::regrow::BorderRegrow;
    use voronizer::spatial::cell::{CellState, Position};
    use voronizer::spatial::grid::CellGrid;
    use voronizer::spatial::groups::Groups;

    fn closed(rows: usize, cols: usize) -> CellGrid {
        let mut cells = CellGrid::new(rows, cols);
        cells.reset_with(|_| CellState::Closed);
        cells
    }

    // Tests a rejected cell between two regions joins the lower label
    // Verified by seeding from background cells as well
    #[test]
    fn test_rejected_cell_joins_lowest_neighbor() {
        let mut grid = array![[1, 0, 2]];
        let groups = Groups::from([
            (0, vec![Position::new(0, 1)]),
            (1, vec![Position::new(0, 0)]),
            (2, vec![Position::new(0, 2)]),
        ]);
        let mut regrow = BorderRegrow::new(closed(1, 3), groups);

        let steps = regrow.run(&mut grid, &[Position::new(0, 1)]);

        assert_eq!(steps, Ok(2));
        assert_eq!(grid, array![[1, 1, 2]]);
        let (cells, groups) = regrow.into_parts();
        assert_eq!(cells.count(CellState::Closed), 3);
        assert!(!groups.contains_key(&0));
        assert_eq!(
            groups.get(&1),
            Some(&vec![Position::new(0, 0), Position::new(0, 1)])
        );
    }

    // Tests background cells that were never rejected are not grown into
    // Verified by reopening every zero cell
    #[test]
    fn test_background_is_left_alone() {
        let mut grid = array![[3, 0, 0], [0, 0, 0]];
        let groups = Groups::from([
            (
                0,
                vec![
                    Position::new(0, 1),
                    Position::new(0, 2),
                    Position::new(1, 0),
                    Position::new(1, 1),
                    Position::new(1, 2),
                ],
            ),
            (3, vec![Position::new(0, 0)]),
        ]);
        let mut regrow = BorderRegrow::new(closed(2, 3), groups);

        regrow
            .run(&mut grid, &[Position::new(0, 1), Position::new(1, 1)])
            .expect("regrow succeeds");

        assert_eq!(grid, array![[3, 3, 0], [0, 3, 0]]);
        let (_, groups) = regrow.into_parts();
        assert_eq!(groups.get(&0).map(Vec::len), Some(3));
        assert_eq!(groups.get(&3).map(Vec::len), Some(3));
    }

    // Tests unreachable rejected cells stay background and end closed
    #[test]
    fn test_unreachable_rejected_cells_stay_background() {
        let mut grid = array![[0, 0, 0]];
        let groups = Groups::from([(
            0,
            vec![Position::new(0, 0), Position::new(0, 1), Position::new(0, 2)],
        )]);
        let mut regrow = BorderRegrow::new(closed(1, 3), groups);

        let steps = regrow.run(&mut grid, &[Position::new(0, 1)]);

        assert_eq!(steps, Ok(0));
        assert_eq!(grid, array![[0, 0, 0]]);
        let (cells, groups) = regrow.into_parts();
        assert_eq!(cells.count(CellState::Closed), 3);
        assert_eq!(groups.get(&0).map(Vec::len), Some(3));
    }

    // Tests regrow refuses to start without carried cell states
    // Verified by allowing the engine to allocate fresh states
    #[test]
    fn test_regrow_requires_carried_states() {
        let mut grid = array![[1, 0]];
        let mut regrow = BorderRegrow::new(CellGrid::default(), Groups::new());

        let result = regrow.run(&mut grid, &[Position::new(0, 1)]);

        assert_eq!(
            result,
            Err(GrowError::UnsupportedReset {
                component: "BorderRegrow"
            })
        );
    }

    // Tests carried states of another shape are rejected
    #[test]
    fn test_regrow_rejects_mismatched_states() {
        let mut grid = array![[1, 0, 2]];
        let mut regrow = BorderRegrow::new(closed(2, 2), Groups::new());

        let result = regrow.run(&mut grid, &[Position::new(0, 1)]);

        assert!(matches!(result, Err(GrowError::ShapeMismatch { .. })));
    }
}
