use crate::{traits::next_state, Error, Grid, LifeEngine, Result};
use tracing::trace;

/// Reference engine: two boolean matrices and a direct neighbor count per cell.
///
/// # Example
///
/// ```rust
/// use gol_grid::{Grid, GridEngine, LifeEngine};
///
/// let blinker: Grid = "
///     .....
///     ..#..
///     ..#..
///     ..#..
///     .....
/// ".parse().unwrap();
///
/// let mut engine = GridEngine::new(5, 5);
/// engine.load_grid(&blinker).unwrap();
/// engine.update(1);
/// assert_eq!(engine.current().alive_cells(), vec![(1, 2), (2, 2), (3, 2)]);
/// ```
pub struct GridEngine {
    /// Authoritative generation, read by neighbor counting and renderers.
    current: Grid,
    /// Scratch buffer filled by `compute_next_generation`.
    next: Grid,
}

impl GridEngine {
    /// Borrows the current generation without copying it.
    pub fn current(&self) -> &Grid {
        &self.current
    }

    /// Inclusive range of indices around `i` that stay within `0..len`.
    fn window(i: usize, len: usize) -> std::ops::RangeInclusive<usize> {
        i.saturating_sub(1)..=(i + 1).min(len - 1)
    }
}

impl LifeEngine for GridEngine {
    fn new(rows: usize, cols: usize) -> Self {
        Self {
            current: Grid::new(rows, cols),
            next: Grid::new(rows, cols),
        }
    }

    fn rows(&self) -> usize {
        self.current.rows()
    }

    fn cols(&self) -> usize {
        self.current.cols()
    }

    fn load_grid(&mut self, grid: &Grid) -> Result<()> {
        if grid.rows() != self.rows() || grid.cols() != self.cols() {
            return Err(Error::DimensionMismatch {
                cols: self.cols(),
                rows: self.rows(),
                actual_cols: grid.cols(),
                actual_rows: grid.rows(),
            });
        }
        self.current.clone_from(grid);
        Ok(())
    }

    fn current_state(&self) -> Grid {
        self.current.clone()
    }

    fn count_living_neighbors(&self, x: usize, y: usize) -> u8 {
        let (rows, cols) = (self.rows(), self.cols());
        assert!(x < cols && y < rows, "cell ({x}, {y}) is outside the field");

        let mut count = 0;
        for ny in Self::window(y, rows) {
            let row = self.current.row(ny);
            for nx in Self::window(x, cols) {
                if row[nx] && (nx, ny) != (x, y) {
                    count += 1;
                }
            }
        }
        count
    }

    fn compute_next_generation(&mut self) {
        for y in 0..self.rows() {
            for x in 0..self.cols() {
                let n = self.count_living_neighbors(x, y);
                let alive = next_state(self.current.get(x, y), n);
                self.next.set(x, y, alive);
            }
        }
    }

    fn commit_generation(&mut self) {
        std::mem::swap(&mut self.current, &mut self.next);
        trace!(population = self.current.population(), "committed generation");
    }

    fn bytes_total(&self) -> usize {
        2 * self.rows() * self.cols() * std::mem::size_of::<bool>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_from(text: &str) -> GridEngine {
        let grid: Grid = text.parse().unwrap();
        let mut engine = GridEngine::new(grid.rows(), grid.cols());
        engine.load_grid(&grid).unwrap();
        engine
    }

    fn step(engine: &mut GridEngine) {
        engine.compute_next_generation();
        engine.commit_generation();
    }

    #[test]
    fn test_corner_counts_only_in_range_neighbors() {
        let engine = engine_from(
            "
            .#...
            ##...
            .....
            .....
            ",
        );
        assert_eq!(engine.count_living_neighbors(0, 0), 3);

        let full = engine_from("###\n###\n###\n");
        assert_eq!(full.count_living_neighbors(0, 0), 3);
        assert_eq!(full.count_living_neighbors(2, 0), 3);
        assert_eq!(full.count_living_neighbors(0, 2), 3);
        assert_eq!(full.count_living_neighbors(2, 2), 3);
        assert_eq!(full.count_living_neighbors(1, 0), 5);
        assert_eq!(full.count_living_neighbors(0, 1), 5);
        assert_eq!(full.count_living_neighbors(1, 1), 8);
    }

    #[test]
    fn test_counts_every_cell_of_a_full_field() {
        // exercises the clamped window on every edge of a non-square field
        let grid: Grid = "#####\n#####\n#####\n".parse().unwrap();
        let mut engine = GridEngine::new(3, 5);
        engine.load_grid(&grid).unwrap();
        for y in 0..3 {
            for x in 0..5 {
                let on_x_edge = x == 0 || x == 4;
                let on_y_edge = y == 0 || y == 2;
                let expected = match (on_x_edge, on_y_edge) {
                    (true, true) => 3,
                    (true, false) | (false, true) => 5,
                    (false, false) => 8,
                };
                assert_eq!(engine.count_living_neighbors(x, y), expected, "({x}, {y})");
            }
        }
    }

    #[test]
    fn test_single_row_and_single_cell_fields() {
        let engine = engine_from("###\n");
        assert_eq!(engine.count_living_neighbors(0, 0), 1);
        assert_eq!(engine.count_living_neighbors(1, 0), 2);

        let mut single = engine_from("#\n");
        assert_eq!(single.count_living_neighbors(0, 0), 0);
        step(&mut single);
        assert_eq!(single.current().population(), 0);
    }

    #[test]
    fn test_rule_by_neighbor_count() {
        // neighbors of the center cell (2, 2) are filled in this order
        let ring = [(1, 1), (2, 1), (3, 1), (1, 2), (3, 2), (1, 3), (2, 3), (3, 3)];
        for n in 0..=8 {
            for center_alive in [false, true] {
                let mut grid = Grid::new(5, 5);
                for &(x, y) in &ring[..n] {
                    grid.set(x, y, true);
                }
                grid.set(2, 2, center_alive);

                let mut engine = GridEngine::new(5, 5);
                engine.load_grid(&grid).unwrap();
                assert_eq!(engine.count_living_neighbors(2, 2) as usize, n);
                step(&mut engine);

                let expected = if center_alive { n == 2 || n == 3 } else { n == 3 };
                assert_eq!(
                    engine.current().get(2, 2),
                    expected,
                    "alive = {center_alive}, n = {n}"
                );
            }
        }
    }

    #[test]
    fn test_block_is_still_life() {
        let block = "
            ....
            .##.
            .##.
            ....
        ";
        let mut engine = engine_from(block);
        let before = engine.current_state();
        step(&mut engine);
        assert_eq!(engine.current(), &before);
    }

    #[test]
    fn test_blinker_oscillates() {
        let mut engine = engine_from(".....\n..#..\n..#..\n..#..\n.....\n");
        let vertical = engine.current_state();
        step(&mut engine);
        assert_eq!(
            engine.current().to_string(),
            ".....\n.....\n.###.\n.....\n.....\n"
        );
        step(&mut engine);
        assert_eq!(engine.current(), &vertical);
    }

    #[test]
    fn test_compute_does_not_touch_current() {
        let mut engine = engine_from(".....\n..#..\n..#..\n..#..\n.....\n");
        let before = engine.current_state();
        engine.compute_next_generation();
        assert_eq!(engine.current(), &before);
        // computing twice without a commit yields the same next generation
        engine.compute_next_generation();
        engine.commit_generation();
        assert_eq!(engine.current().population(), 3);
        assert_ne!(engine.current(), &before);
    }

    #[test]
    fn test_commit_does_not_alias_buffers() {
        let mut engine = engine_from("....\n.##.\n.##.\n....\n");
        step(&mut engine);
        let committed = engine.current_state();
        // the next compute must only write the other buffer
        engine.compute_next_generation();
        assert_eq!(engine.current(), &committed);
    }

    #[test]
    fn test_load_rejects_other_dimensions() {
        let mut engine = GridEngine::new(10, 10);
        let err = engine.load_grid(&Grid::new(10, 9)).unwrap_err();
        assert!(matches!(
            err,
            Error::DimensionMismatch {
                actual_cols: 9,
                actual_rows: 10,
                ..
            }
        ));
        assert_eq!(engine.current(), &Grid::new(10, 10));
    }

    #[test]
    #[should_panic]
    fn test_count_outside_field_panics() {
        GridEngine::new(4, 4).count_living_neighbors(0, 4);
    }
}
