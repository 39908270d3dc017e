use super::Cell;
use rand::Rng;
use rayon::prelude::*;

/// Neighbor offsets in reading order: row above, same row, row below.
#[rustfmt::skip]
pub const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1, 0),           (1, 0),
    (-1, 1),  (0, 1),  (1, 1),
];

/// Grid is the life board: `width * height` cells stored row-major.
/// Edges wrap around, so the board is a torus.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a new grid with all cells initially dead
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Dead; width * height],
        }
    }

    /// Build a grid from a row-major seed pattern.
    /// Missing rows or columns stay dead, anything beyond the grid is ignored.
    pub fn from_pattern(width: usize, height: usize, pattern: &[Vec<bool>]) -> Self {
        let mut grid = Self::new(width, height);
        for (y, row) in pattern.iter().take(height).enumerate() {
            for (x, &alive) in row.iter().take(width).enumerate() {
                grid.set(x, y, Cell::from(alive));
            }
        }
        grid
    }

    /// Random board where each cell is alive with probability `density`
    pub fn random<R: Rng + ?Sized>(width: usize, height: usize, density: f64, rng: &mut R) -> Self {
        let density = density.clamp(0.0, 1.0);
        let cells = (0..width * height)
            .map(|_| Cell::from(rng.random_bool(density)))
            .collect();
        Self { width, height, cells }
    }

    /// Get grid dimensions
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub const fn len(&self) -> usize {
        self.width * self.height
    }

    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    const fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Get cell at position (with bounds checking)
    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        (x < self.width && y < self.height).then(|| self.cells[self.index(x, y)])
    }

    /// Set cell at position. Out-of-bounds writes are dropped.
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            self.cells[idx] = cell;
        }
    }

    /// Cell at `(x + dx, y + dy)` with wraparound on both axes
    fn wrapped(&self, x: usize, y: usize, dx: isize, dy: isize) -> Cell {
        let nx = (x as isize + dx).rem_euclid(self.width as isize) as usize;
        let ny = (y as isize + dy).rem_euclid(self.height as isize) as usize;
        self.cells[self.index(nx, ny)]
    }

    /// Count live neighbors among the 8 toroidal neighbors of `(x, y)`
    pub fn live_neighbors(&self, x: usize, y: usize) -> u8 {
        NEIGHBOR_OFFSETS
            .iter()
            .filter(|&&(dx, dy)| self.wrapped(x, y, dx, dy).is_alive())
            .count() as u8
    }

    /// Next generation, computed cell by cell on one thread
    pub fn evolve(&self) -> Self {
        let cells = (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| (x, y)))
            .map(|(x, y)| self.cells[self.index(x, y)].evolve(self.live_neighbors(x, y)))
            .collect();

        Self {
            width: self.width,
            height: self.height,
            cells,
        }
    }

    /// Next generation with rows spread over the rayon pool.
    /// Produces exactly the same board as [`Grid::evolve`].
    pub fn evolve_parallel(&self) -> Self {
        let cells: Vec<Cell> = (0..self.height)
            .into_par_iter()
            .flat_map_iter(|y| {
                (0..self.width)
                    .map(move |x| self.cells[self.index(x, y)].evolve(self.live_neighbors(x, y)))
            })
            .collect();

        Self {
            width: self.width,
            height: self.height,
            cells,
        }
    }

    /// Number of live cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// Rows in order, each exactly `width` cells long
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.width.max(1)).take(self.height)
    }

    /// Boolean rows in the seed pattern format
    pub fn to_pattern(&self) -> Vec<Vec<bool>> {
        self.rows()
            .map(|row| row.iter().map(|cell| cell.is_alive()).collect())
            .collect()
    }

    /// Iterate over all cells with their positions, row-major
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        (0..self.height)
            .flat_map(move |y| (0..self.width).map(move |x| (x, y)))
            .map(|(x, y)| (x, y, self.cells[self.index(x, y)]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_from_pattern_pads_and_truncates() {
        let small = vec![vec![true]];
        let grid = Grid::from_pattern(3, 2, &small);
        assert_eq!(grid.population(), 1);
        assert_eq!(grid.get(0, 0), Some(Cell::Alive));
        assert_eq!(grid.get(2, 1), Some(Cell::Dead));

        let large = vec![vec![true; 5]; 5];
        let grid = Grid::from_pattern(2, 3, &large);
        assert_eq!(grid.dimensions(), (2, 3));
        assert_eq!(grid.population(), 6);
    }

    #[test]
    fn test_ragged_pattern_rows() {
        let pattern = vec![vec![true, true, true], vec![], vec![false, true]];
        let grid = Grid::from_pattern(3, 3, &pattern);
        assert_eq!(grid.population(), 4);
        assert!(grid.rows().all(|row| row.len() == 3));
    }

    #[test]
    fn test_corner_sees_opposite_corner() {
        let mut grid = Grid::new(4, 3);
        grid.set(3, 2, Cell::Alive);
        assert_eq!(grid.live_neighbors(0, 0), 1);
    }

    #[test]
    fn test_neighbors_wrap_on_each_edge() {
        let mut grid = Grid::new(5, 5);
        grid.set(4, 2, Cell::Alive);
        grid.set(2, 4, Cell::Alive);
        assert_eq!(grid.live_neighbors(0, 2), 1);
        assert_eq!(grid.live_neighbors(2, 0), 1);
        assert_eq!(grid.live_neighbors(2, 2), 0);
    }

    #[test]
    fn test_out_of_bounds_access() {
        let mut grid = Grid::new(2, 2);
        grid.set(5, 5, Cell::Alive);
        assert_eq!(grid.population(), 0);
        assert_eq!(grid.get(2, 0), None);
    }

    #[test]
    fn test_parallel_matches_serial() {
        let mut rng = StdRng::seed_from_u64(7);
        let grid = Grid::random(37, 23, 0.35, &mut rng);
        assert_eq!(grid.evolve(), grid.evolve_parallel());
    }

    #[test]
    fn test_pattern_round_trip_shape() {
        let grid = Grid::new(4, 2);
        let pattern = grid.to_pattern();
        assert_eq!(pattern.len(), 2);
        assert!(pattern.iter().all(|row| row.len() == 4));
    }
}
