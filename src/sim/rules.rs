//! Conway's B3/S23 transition rule.

use super::grid::Grid;

/// Result of advancing a grid by one generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub grid: Grid,
    pub births: usize,
    pub deaths: usize,
}

/// Next state of a single cell given its live-neighbor count.
#[inline]
pub fn next_state(alive: bool, neighbors: u8) -> bool {
    matches!((alive, neighbors), (true, 2) | (true, 3) | (false, 3))
}

/// Advances `grid` by one synchronous generation.
///
/// Reads only from `grid`; the result is a freshly built grid with the same
/// dimensions and boundary policy.
pub fn step(grid: &Grid) -> StepOutcome {
    let counts = grid.neighbor_counts();
    let mut next = grid.clone();
    let mut births = 0;
    let mut deaths = 0;

    for row in 0..grid.height() {
        for col in 0..grid.width() {
            let alive = grid.get(row, col);
            let becomes = next_state(alive, counts[row * grid.width() + col]);
            match (alive, becomes) {
                (true, false) => deaths += 1,
                (false, true) => births += 1,
                _ => {}
            }
            next.set(row, col, becomes);
        }
    }

    StepOutcome {
        grid: next,
        births,
        deaths,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::grid::Boundary;
    use crate::sim::patterns::{self, library};

    fn stamped(width: usize, height: usize, boundary: Boundary, name: &str, row: isize, col: isize) -> Grid {
        let mut grid = Grid::new(width, height, boundary).unwrap();
        let pattern = library::lookup(name).unwrap();
        patterns::place(&mut grid, &pattern, row, col);
        grid
    }

    #[test]
    fn transition_table() {
        assert!(!next_state(true, 1));
        assert!(next_state(true, 2));
        assert!(next_state(true, 3));
        assert!(!next_state(true, 4));
        assert!(!next_state(false, 2));
        assert!(next_state(false, 3));
        assert!(!next_state(false, 8));
    }

    #[test]
    fn empty_grid_is_quiescent() {
        for boundary in [Boundary::Clamped, Boundary::Toroidal] {
            let grid = Grid::new(12, 7, boundary).unwrap();
            let outcome = step(&grid);
            assert_eq!(outcome.grid, grid);
            assert_eq!((outcome.births, outcome.deaths), (0, 0));
        }
    }

    #[test]
    fn blinker_has_period_two() {
        let grid = stamped(9, 9, Boundary::Clamped, "Blinker", 4, 3);
        let once = step(&grid);
        assert_ne!(once.grid, grid);
        assert_eq!((once.births, once.deaths), (2, 2));
        assert!(once.grid.get(3, 4) && once.grid.get(4, 4) && once.grid.get(5, 4));

        let twice = step(&once.grid);
        assert_eq!(twice.grid, grid);
    }

    #[test]
    fn block_is_still_life() {
        let mut grid = Grid::new(6, 6, Boundary::Clamped).unwrap();
        for (r, c) in [(2, 2), (2, 3), (3, 2), (3, 3)] {
            grid.set(r, c, true);
        }
        let outcome = step(&grid);
        assert_eq!(outcome.grid, grid);
        assert_eq!((outcome.births, outcome.deaths), (0, 0));
    }

    #[test]
    fn glider_translates_on_torus() {
        let mut grid = stamped(8, 8, Boundary::Toroidal, "Glider", 0, 0);
        let start: Vec<_> = grid.live_cells().collect();

        for _ in 0..4 {
            grid = step(&grid).grid;
            assert_eq!(grid.population(), 5);
        }
        let moved: Vec<_> = grid.live_cells().collect();
        let mut expected: Vec<_> = start.iter().map(|&(r, c)| ((r + 1) % 8, (c + 1) % 8)).collect();
        expected.sort();
        assert_eq!(moved, expected);

        // Long enough to cross every edge and come back.
        for _ in 0..28 {
            grid = step(&grid).grid;
            assert_eq!(grid.population(), 5);
        }
        let home: Vec<_> = grid.live_cells().collect();
        assert_eq!(home, start);
    }

    #[test]
    fn births_and_deaths_balance_population() {
        let grid = stamped(30, 30, Boundary::Clamped, "R-pentomino", 12, 12);
        let before = grid.population();
        let outcome = step(&grid);
        assert_eq!(
            outcome.grid.population(),
            before + outcome.births - outcome.deaths
        );
    }
}
