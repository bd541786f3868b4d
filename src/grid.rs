use crate::{Error, Result};
use ahash::RandomState;
use std::{fmt, str::FromStr};

/// Fixed seeds so that [`Grid::hash`] is stable between runs and processes.
const HASH_SEEDS: [u64; 4] = [
    0x243f_6a88_85a3_08d3,
    0x1319_8a2e_0370_7344,
    0xa409_3822_299f_31d0,
    0x082e_fa98_ec4e_6c89,
];

/// A `rows x cols` field of two-state cells stored row-major in one allocation.
///
/// Cells are addressed as `(x, y)` where `x` is the column and `y` is the row,
/// both 0-indexed. The dimensions are fixed at construction.
///
/// The text form (used by [`fmt::Display`] and [`FromStr`]) has one line per row,
/// `#` for alive cells and `.` for dead ones:
///
/// ```rust
/// use gol_grid::Grid;
///
/// let grid: Grid = "
///     .#.
///     .#.
///     .#.
/// ".parse().unwrap();
/// assert_eq!(grid.population(), 3);
/// assert!(grid.get(1, 2));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Creates a grid with every cell dead.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![false; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns `true` if `(x, y)` addresses a cell of this grid.
    /// Accepts signed values so callers can test raw offsets.
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as u64) < self.cols as u64 && (y as u64) < self.rows as u64
    }

    /// Returns the state of the cell at column `x`, row `y`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the grid.
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.cells[self.index(x, y)]
    }

    /// Sets the state of the cell at column `x`, row `y`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the grid.
    pub fn set(&mut self, x: usize, y: usize, alive: bool) {
        let idx = self.index(x, y);
        self.cells[idx] = alive;
    }

    /// Kills every cell.
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Cells of row `y`, from column 0 to `cols - 1`.
    pub fn row(&self, y: usize) -> &[bool] {
        &self.cells[y * self.cols..(y + 1) * self.cols]
    }

    pub(crate) fn row_mut(&mut self, y: usize) -> &mut [bool] {
        &mut self.cells[y * self.cols..(y + 1) * self.cols]
    }

    /// Number of alive cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Coordinates `(x, y)` of all alive cells in row-major order.
    pub fn alive_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, alive)| **alive)
            .map(|(i, _)| (i % self.cols, i / self.cols))
            .collect()
    }

    /// Smallest rectangle `[min_x, min_y, max_x, max_y]` (inclusive) that holds
    /// every alive cell, or `None` for a blank grid.
    pub fn bounding_box(&self) -> Option<[usize; 4]> {
        let mut cells = self.alive_cells().into_iter();
        let (x, y) = cells.next()?;
        let init = [x, y, x, y];
        Some(cells.fold(init, |[x0, y0, x1, y1], (x, y)| {
            [x0.min(x), y0.min(y), x1.max(x), y1.max(y)]
        }))
    }

    /// Computes a 64-bit hash of the dimensions and cell states. Intended for
    /// fast probabilistic comparison of grids, e.g. between engines.
    pub fn hash(&self) -> u64 {
        let [k0, k1, k2, k3] = HASH_SEEDS;
        RandomState::with_seeds(k0, k1, k2, k3).hash_one((self.rows, self.cols, &self.cells))
    }

    fn index(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.cols && y < self.rows,
            "cell ({x}, {y}) is outside the {}x{} grid",
            self.cols,
            self.rows
        );
        x + y * self.cols
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.rows {
            for &alive in self.row(y) {
                f.write_str(if alive { "#" } else { "." })?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}

impl FromStr for Grid {
    type Err = Error;

    /// Parses the text form. Blank lines and surrounding whitespace are ignored;
    /// `#`, `O` and `*` are read as alive, `.` as dead.
    fn from_str(s: &str) -> Result<Self> {
        let lines = s
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty())
            .collect::<Vec<_>>();

        let cols = lines.first().map_or(0, |(_, line)| line.chars().count());
        let mut grid = Grid::new(lines.len(), cols);
        for (y, &(line_no, line)) in lines.iter().enumerate() {
            if line.chars().count() != cols {
                return Err(Error::format(
                    line_no,
                    format!("expected {} cells per row", cols),
                ));
            }
            for (x, c) in line.chars().enumerate() {
                let alive = match c {
                    '#' | 'O' | '*' => true,
                    '.' => false,
                    _ => return Err(Error::format(line_no, format!("unexpected cell '{c}'"))),
                };
                grid.set(x, y, alive);
            }
        }
        Ok(grid)
    }
}
