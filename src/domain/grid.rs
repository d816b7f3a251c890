use rand::Rng;

use super::Cell;
use crate::error::{LifeError, LifeResult};

/// Grid holds one generation of the automaton on a torus.
/// Dimensions are fixed at construction; stepping produces a new grid
/// and leaves the old one untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a new grid with all cells initially dead
    pub fn new(width: usize, height: usize) -> LifeResult<Self> {
        check_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![Cell::Dead; width * height],
        })
    }

    /// Build a grid by asking `alive` about every position, row-major
    /// (y outer, x inner).
    pub fn from_fn<F>(width: usize, height: usize, mut alive: F) -> LifeResult<Self>
    where
        F: FnMut(usize, usize) -> bool,
    {
        check_dimensions(width, height)?;
        let cells = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| Cell::from(alive(x, y)))
            .collect();

        Ok(Self { width, height, cells })
    }

    /// All cells dead except the listed `(x, y)` positions.
    pub fn with_alive(width: usize, height: usize, alive: &[(usize, usize)]) -> LifeResult<Self> {
        let mut grid = Self::new(width, height)?;
        for &(x, y) in alive {
            grid.set(x, y, Cell::Alive)?;
        }
        Ok(grid)
    }

    /// Seed a grid where each cell is alive iff a fresh uniform draw in
    /// [0, 1) is below `density`. Consumes exactly `width * height` draws.
    pub fn random<R: Rng>(width: usize, height: usize, density: f64, rng: &mut R) -> LifeResult<Self> {
        check_density(density)?;
        Self::from_fn(width, height, |_, _| rng.random::<f64>() < density)
    }

    /// Get grid dimensions
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Convert 2D coordinates to 1D index
    const fn get_index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    fn checked_index(&self, x: usize, y: usize) -> LifeResult<usize> {
        if x < self.width && y < self.height {
            Ok(self.get_index(x, y))
        } else {
            Err(LifeError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Get cell at position (with bounds checking)
    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        (x < self.width && y < self.height)
            .then(|| self.cells[self.get_index(x, y)])
    }

    /// Set cell at position. Only meant for building grids; a grid that
    /// has been handed to someone else should be treated as a snapshot.
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) -> LifeResult<()> {
        let idx = self.checked_index(x, y)?;
        self.cells[idx] = cell;
        Ok(())
    }

    /// Number of live cells among the 8 toroidal neighbors of `(x, y)`.
    pub fn count_alive_neighbors(&self, x: usize, y: usize) -> LifeResult<u8> {
        self.checked_index(x, y)?;
        Ok(self.count_live_neighbors(x, y))
    }

    /// Count live neighbors using toroidal wrapping (grid wraps like a torus).
    /// Caller guarantees `(x, y)` is in bounds.
    fn count_live_neighbors(&self, x: usize, y: usize) -> u8 {
        (-1..=1)
            .flat_map(|dy| (-1..=1).map(move |dx| (dx, dy)))
            .filter(|&(dx, dy)| dx != 0 || dy != 0)
            .map(|(dx, dy)| {
                let nx = wrap(x, dx, self.width);
                let ny = wrap(y, dy, self.height);
                self.cells[self.get_index(nx, ny)]
            })
            .filter(|cell| cell.is_alive())
            .count() as u8
    }

    /// Pure functional evolution - returns the next generation.
    /// Every new cell reads only from `self`.
    pub fn step(&self) -> Self {
        let cells = self
            .iter_cells()
            .map(|(x, y, current)| current.evolve(self.count_live_neighbors(x, y)))
            .collect();

        Self {
            width: self.width,
            height: self.height,
            cells,
        }
    }

    /// Iterate over all cells with their positions, row-major
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        (0..self.height)
            .flat_map(move |y| (0..self.width).map(move |x| (x, y)))
            .map(move |(x, y)| (x, y, self.cells[self.get_index(x, y)]))
    }

    /// Read-only view of the grid, one slice of `width` cells per row
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.width)
    }

    /// Count alive cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    pub fn is_extinct(&self) -> bool {
        !self.cells.iter().any(|cell| cell.is_alive())
    }
}

/// `(coord + delta + extent) mod extent`; the extent is added first so the
/// remainder is taken on a non-negative value.
fn wrap(coord: usize, delta: isize, extent: usize) -> usize {
    let extent = extent as isize;
    ((coord as isize + delta + extent) % extent) as usize
}

/// Both sides positive and the cell count addressable by a `Vec`.
pub(crate) fn check_dimensions(width: usize, height: usize) -> LifeResult<()> {
    let addressable = width
        .checked_mul(height)
        .is_some_and(|cells| cells <= isize::MAX as usize);
    if width == 0 || height == 0 || !addressable {
        return Err(LifeError::InvalidDimensions { width, height });
    }
    Ok(())
}

pub(crate) fn check_density(density: f64) -> LifeResult<()> {
    // NaN fails the range check too.
    if !(0.0..=1.0).contains(&density) {
        return Err(LifeError::InvalidDensity { density });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::{Rng, SeedableRng};
    use rand::rngs::StdRng;

    fn alive_set(grid: &Grid) -> Vec<(usize, usize)> {
        grid.iter_cells()
            .filter(|(_, _, cell)| cell.is_alive())
            .map(|(x, y, _)| (x, y))
            .collect()
    }

    #[test]
    fn test_new_grid_is_dead() {
        let grid = Grid::new(50, 30).unwrap();
        assert_eq!(grid.dimensions(), (50, 30));
        assert_eq!(grid.population(), 0);
        assert!(grid.is_extinct());
        assert_eq!(grid.rows().count(), 30);
        assert!(grid.rows().all(|row| row.len() == 50));
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(matches!(
            Grid::new(0, 5),
            Err(LifeError::InvalidDimensions { width: 0, height: 5 })
        ));
        assert!(matches!(
            Grid::from_fn(5, 0, |_, _| true),
            Err(LifeError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_oversized_dimensions_rejected() {
        assert!(matches!(
            Grid::new(usize::MAX, 2),
            Err(LifeError::InvalidDimensions { height: 2, .. })
        ));
        assert!(matches!(
            Grid::from_fn(2, usize::MAX / 2 + 1, |_, _| false),
            Err(LifeError::InvalidDimensions { width: 2, .. })
        ));

        let mut rng = StdRng::seed_from_u64(5);
        assert!(matches!(
            Grid::random(usize::MAX, usize::MAX, 0.5, &mut rng),
            Err(LifeError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_get_and_set_bounds() {
        let mut grid = Grid::new(4, 3).unwrap();
        grid.set(3, 2, Cell::Alive).unwrap();
        assert_eq!(grid.get(3, 2), Some(Cell::Alive));
        assert_eq!(grid.get(4, 0), None);
        assert_eq!(grid.get(0, 3), None);
        assert!(matches!(
            grid.set(4, 0, Cell::Alive),
            Err(LifeError::OutOfBounds { x: 4, y: 0, width: 4, height: 3 })
        ));
    }

    #[test]
    fn test_neighbor_count_out_of_bounds() {
        let grid = Grid::new(5, 5).unwrap();
        assert!(matches!(
            grid.count_alive_neighbors(5, 0),
            Err(LifeError::OutOfBounds { .. })
        ));
        assert!(matches!(
            grid.count_alive_neighbors(0, 5),
            Err(LifeError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_single_cell_wraps_to_eight_neighbors() {
        let (w, h) = (5, 4);
        let grid = Grid::with_alive(w, h, &[(0, 0)]).unwrap();
        let expected = [
            (w - 1, h - 1),
            (w - 1, 0),
            (w - 1, 1),
            (0, h - 1),
            (0, 1),
            (1, h - 1),
            (1, 0),
            (1, 1),
        ];

        for y in 0..h {
            for x in 0..w {
                let count = grid.count_alive_neighbors(x, y).unwrap();
                let want = if expected.contains(&(x, y)) { 1 } else { 0 };
                assert_eq!(count, want, "neighbor count at ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_full_grid_has_eight_neighbors() {
        let grid = Grid::from_fn(6, 6, |_, _| true).unwrap();
        assert!(grid.iter_cells().all(|(x, y, _)| grid.count_alive_neighbors(x, y).unwrap() == 8));
    }

    #[test]
    fn test_block_still_life() {
        let block = [(1, 1), (1, 2), (2, 1), (2, 2)];
        let grid = Grid::with_alive(4, 4, &block).unwrap();

        let next = grid.step();

        assert_eq!(next, grid);
        assert_eq!(next.step(), grid);
    }

    #[test]
    fn test_blinker_oscillates() {
        let horizontal = Grid::with_alive(5, 5, &[(1, 2), (2, 2), (3, 2)]).unwrap();
        let vertical = Grid::with_alive(5, 5, &[(2, 1), (2, 2), (2, 3)]).unwrap();

        let once = horizontal.step();
        assert_eq!(alive_set(&once), alive_set(&vertical));

        let twice = once.step();
        assert_eq!(twice, horizontal);
    }

    #[test]
    fn test_all_dead_stays_dead() {
        let grid = Grid::new(50, 30).unwrap();
        assert!(grid.step().is_extinct());
    }

    #[test]
    fn test_lonely_cell_dies() {
        let grid = Grid::with_alive(5, 5, &[(2, 2)]).unwrap();
        assert!(grid.step().is_extinct());
    }

    #[test]
    fn test_glider_crosses_the_edge() {
        // A glider moves one cell diagonally every 4 generations; on an 8x8
        // torus it comes back to where it started after 32.
        let glider = [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)];
        let start = Grid::with_alive(8, 8, &glider).unwrap();

        let mut grid = start.clone();
        for _ in 0..32 {
            grid = grid.step();
        }

        assert_eq!(grid, start);
    }

    #[test]
    fn test_random_density_extremes() {
        let mut rng = StdRng::seed_from_u64(42);
        let dead = Grid::random(50, 30, 0.0, &mut rng).unwrap();
        assert!(dead.is_extinct());

        let alive = Grid::random(50, 30, 1.0, &mut rng).unwrap();
        assert_eq!(alive.population(), 50 * 30);
    }

    #[test]
    fn test_random_rejects_bad_density() {
        let mut rng = StdRng::seed_from_u64(1);
        for density in [-0.1, 1.5, f64::NAN] {
            assert!(matches!(
                Grid::random(4, 4, density, &mut rng),
                Err(LifeError::InvalidDensity { .. })
            ));
        }
    }

    #[test]
    fn test_random_is_reproducible_and_draws_once_per_cell() {
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);

        let first = Grid::random(5, 3, 0.2, &mut a).unwrap();
        let second = Grid::random(5, 3, 0.2, &mut b).unwrap();
        assert_eq!(first, second);

        // Replay the draws by hand, row-major, and compare cell by cell.
        let mut replay = StdRng::seed_from_u64(7);
        for (x, y, cell) in first.iter_cells() {
            let draw: f64 = replay.random();
            assert_eq!(cell.is_alive(), draw < 0.2, "cell ({}, {})", x, y);
        }

        // Both sources are now at the same position.
        assert_eq!(a.random::<u64>(), replay.random::<u64>());
    }

    fn arb_grid() -> impl Strategy<Value = Grid> {
        (1usize..=12, 1usize..=12).prop_flat_map(|(w, h)| {
            proptest::collection::vec(any::<bool>(), w * h)
                .prop_map(move |bits| Grid::from_fn(w, h, |x, y| bits[y * w + x]).unwrap())
        })
    }

    proptest! {
        #[test]
        fn step_is_deterministic(grid in arb_grid()) {
            prop_assert_eq!(grid.step(), grid.step());
        }

        #[test]
        fn step_leaves_input_untouched(grid in arb_grid()) {
            let snapshot = grid.clone();
            let _next = grid.step();
            prop_assert_eq!(grid, snapshot);
        }

        #[test]
        fn step_preserves_dimensions(grid in arb_grid()) {
            prop_assert_eq!(grid.step().dimensions(), grid.dimensions());
        }

        #[test]
        fn neighbor_count_stays_in_range(grid in arb_grid()) {
            for (x, y, _) in grid.iter_cells() {
                let count = grid.count_alive_neighbors(x, y).unwrap();
                prop_assert!(count <= 8);
            }
        }
    }
}
