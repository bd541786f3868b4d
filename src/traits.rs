use crate::{Grid, Result};

/// Game engine for a bounded Game of Life field.
///
/// Every implementation keeps two buffers of identical dimensions: the
/// *current* generation, which is authoritative and the only one visible
/// through [`LifeEngine::current_state`], and the *next* generation, which
/// [`LifeEngine::compute_next_generation`] writes into. A generation is
/// advanced by a compute followed by a commit.
///
/// Cells outside the field are treated as dead: there is no wrap-around.
pub trait LifeEngine {
    /// Creates an engine with a blank `rows x cols` field.
    fn new(rows: usize, cols: usize) -> Self
    where
        Self: Sized;

    /// Number of rows of the field.
    fn rows(&self) -> usize;

    /// Number of columns of the field.
    fn cols(&self) -> usize;

    /// Replaces the current generation with `grid`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`](crate::Error::DimensionMismatch)
    /// if `grid` does not have the engine's dimensions. The engine is left
    /// untouched in that case.
    fn load_grid(&mut self, grid: &Grid) -> Result<()>;

    /// Returns a snapshot of the current generation.
    fn current_state(&self) -> Grid;

    /// Counts alive cells among the up to 8 neighbors of the cell at column `x`,
    /// row `y` in the current generation. The 3x3 window is clamped to the field,
    /// so edge cells have 5 neighbors and corner cells have 3.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the field.
    fn count_living_neighbors(&self, x: usize, y: usize) -> u8;

    /// Derives the next generation from the current one into the second buffer.
    /// The current generation is not modified.
    ///
    /// A live cell survives with 2 or 3 live neighbors and dies otherwise;
    /// a dead cell becomes alive with exactly 3.
    fn compute_next_generation(&mut self);

    /// Makes the buffer written by the last
    /// [`compute_next_generation`](LifeEngine::compute_next_generation) the current one.
    fn commit_generation(&mut self);

    /// Advances the field by `generations` full compute/commit cycles.
    fn update(&mut self, generations: u64) {
        for _ in 0..generations {
            self.compute_next_generation();
            self.commit_generation();
        }
    }

    /// Returns the approximate heap memory usage of the engine in bytes.
    fn bytes_total(&self) -> usize;
}

/// Next state of a single cell. Written as a table over every possible
/// neighbor count so that the `n <= 1 || n >= 4` death rule is visibly
/// the same as "survive on 2 or 3".
pub(crate) fn next_state(alive: bool, neighbors: u8) -> bool {
    match (alive, neighbors) {
        (true, 0..=1) => false,
        (true, 2..=3) => true,
        (true, _) => false,
        (false, 3) => true,
        (false, _) => false,
    }
}
