//! Generation advancement.
//!
//! [`next_generation`] is a pure function of the current board: every cell
//! is decided from the previous generation only, and the returned counts
//! describe the new board.

use super::Grid;

/// Boards with at least this many cells evolve on the rayon pool
pub const PARALLEL_THRESHOLD: usize = 128 * 128;

/// Alive/dead totals of one board
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Census {
    pub alive: usize,
    pub dead: usize,
}

impl Census {
    pub fn of(grid: &Grid) -> Self {
        let alive = grid.population();
        Self {
            alive,
            dead: grid.len() - alive,
        }
    }

    pub const fn is_extinct(&self) -> bool {
        self.alive == 0
    }
}

/// Statistics handed to listeners after each step
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationStats {
    pub alive: usize,
    pub dead: usize,
    pub cells: Grid,
    pub gen_no: u64,
}

impl GenerationStats {
    pub fn new(cells: Grid, census: Census, gen_no: u64) -> Self {
        Self {
            alive: census.alive,
            dead: census.dead,
            cells,
            gen_no,
        }
    }
}

/// Compute the next board and its census.
///
/// The grid must have positive dimensions.
pub fn next_generation(grid: &Grid) -> (Grid, Census) {
    debug_assert!(!grid.is_empty(), "grid dimensions must be positive");

    let next = if grid.len() >= PARALLEL_THRESHOLD {
        grid.evolve_parallel()
    } else {
        grid.evolve()
    };
    let census = Census::of(&next);
    (next, census)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Cell;
    use rand::{SeedableRng, rngs::StdRng};

    fn grid_with(width: usize, height: usize, alive: &[(usize, usize)]) -> Grid {
        let mut grid = Grid::new(width, height);
        for &(x, y) in alive {
            grid.set(x, y, Cell::Alive);
        }
        grid
    }

    #[test]
    fn test_deterministic() {
        let mut rng = StdRng::seed_from_u64(42);
        let grid = Grid::random(20, 15, 0.4, &mut rng);
        assert_eq!(next_generation(&grid), next_generation(&grid));
    }

    #[test]
    fn test_block_is_still_life() {
        let block = grid_with(4, 4, &[(1, 1), (2, 1), (1, 2), (2, 2)]);
        let (next, census) = next_generation(&block);
        assert_eq!(next, block);
        assert_eq!(census, Census { alive: 4, dead: 12 });
    }

    #[test]
    fn test_blinker_oscillates() {
        let horizontal = grid_with(5, 5, &[(1, 2), (2, 2), (3, 2)]);
        let vertical = grid_with(5, 5, &[(2, 1), (2, 2), (2, 3)]);

        let (first, _) = next_generation(&horizontal);
        assert_eq!(first, vertical);

        let (second, _) = next_generation(&first);
        assert_eq!(second, horizontal);
    }

    #[test]
    fn test_empty_board_stays_empty() {
        let (next, census) = next_generation(&Grid::new(6, 3));
        assert_eq!(next.population(), 0);
        assert!(census.is_extinct());
        assert_eq!(census.dead, 18);
    }

    #[test]
    fn test_census_counts_result_not_input() {
        // A lone cell dies: the census must report the empty result.
        let lone = grid_with(3, 3, &[(1, 1)]);
        let (_, census) = next_generation(&lone);
        assert_eq!(census.alive, 0);
        assert_eq!(census.dead, 9);
    }

    #[test]
    fn test_census_conserves_cells() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut grid = Grid::random(13, 9, 0.5, &mut rng);
        for _ in 0..10 {
            let (next, census) = next_generation(&grid);
            assert_eq!(census.alive + census.dead, 13 * 9);
            grid = next;
        }
    }

    #[test]
    fn test_births_across_the_seam() {
        // Three cells in the last column make the first column come alive.
        let grid = grid_with(4, 4, &[(3, 0), (3, 1), (3, 2)]);
        let (next, _) = next_generation(&grid);
        assert_eq!(next.get(0, 1), Some(Cell::Alive));
        assert_eq!(next.get(3, 1), Some(Cell::Alive));
        assert_eq!(next.get(2, 1), Some(Cell::Alive));
        assert_eq!(next.population(), 3);
    }

    #[test]
    fn test_large_board_uses_parallel_path_consistently() {
        let mut rng = StdRng::seed_from_u64(11);
        let grid = Grid::random(130, 130, 0.3, &mut rng);
        let (next, _) = next_generation(&grid);
        assert_eq!(next, grid.evolve());
    }
}
