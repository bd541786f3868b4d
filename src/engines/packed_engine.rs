use crate::{Error, Grid, LifeEngine, Result};
use tracing::trace;

/// A bit-packed engine that evaluates 64 cells at a time with a bit-sliced
/// adder. Its performance is pattern-oblivious.
///
/// Each row occupies `ceil(cols / 64)` words; column `x` is bit `x % 64` of
/// word `x / 64`. Bits past the last column are kept zero, which together with
/// blank rows above and below the field gives the same bounded semantics as
/// [`GridEngine`](crate::GridEngine).
///
/// # Example
///
/// ```rust
/// use gol_grid::{Grid, LifeEngine, PackedEngine};
///
/// let mut grid = Grid::new(128, 100);
/// grid.set(10, 10, true);
/// grid.set(11, 10, true);
/// grid.set(12, 10, true);
///
/// let mut engine = PackedEngine::new(128, 100);
/// engine.load_grid(&grid).unwrap();
/// engine.update(2);
/// assert_eq!(engine.current_state(), grid);
/// ```
pub struct PackedEngine {
    rows: usize,
    cols: usize,
    /// Number of `u64` words per row
    width: usize,
    /// Mask of the valid bits in the last word of each row
    tail_mask: u64,
    current: Vec<u64>,
    next: Vec<u64>,
    /// A row of dead cells standing in for the rows above and below the field
    blank_row: Vec<u64>,
}

impl PackedEngine {
    const CELLS_IN_CHUNK: usize = 64;

    /// Returns the row's word `x` shifted so that the left neighbor, the cell
    /// itself and the right neighbor of every bit line up, in that order.
    fn aligned(row: &[u64], x: usize) -> [u64; 3] {
        let shift = Self::CELLS_IN_CHUNK - 1;
        let mid = row[x];
        let before = if x > 0 { row[x - 1] } else { 0 };
        let after = row.get(x + 1).copied().unwrap_or(0);
        [
            (mid << 1) | (before >> shift),
            mid,
            (mid >> 1) | (after << shift),
        ]
    }

    fn update_row(row_prev: &[u64], row_curr: &[u64], row_next: &[u64], dst: &mut [u64]) {
        for x in 0..dst.len() {
            let [a, b, c] = Self::aligned(row_prev, x);
            let [h, i, d] = Self::aligned(row_curr, x);
            let [g, f, e] = Self::aligned(row_next, x);

            // sum the eight neighbor planes pairwise, keeping only what is
            // needed to tell "exactly 2" and "exactly 3" apart from the rest
            let (ab0, ab1, cd0, cd1) = (a ^ b, a & b, c ^ d, c & d);
            let (ef0, ef1, gh0, gh1) = (e ^ f, e & f, g ^ h, g & h);
            let (ad0, ad1, ad2) = (ab0 ^ cd0, ab1 ^ cd1 ^ (ab0 & cd0), ab1 & cd1);
            let (eh0, eh1, eh2) = (ef0 ^ gh0, ef1 ^ gh1 ^ (ef0 & gh0), ef1 & gh1);
            let (ah0, xx, yy) = (ad0 ^ eh0, ad0 & eh0, ad1 ^ eh1);
            let (ah1, ah23) = (xx ^ yy, ad2 | eh2 | (ad1 & eh1) | (xx & yy));
            let z = !ah23 & ah1;
            let (i2, i3) = (!ah0 & z, ah0 & z);
            dst[x] = (i & i2) | i3;
        }
    }

    fn is_alive(&self, x: usize, y: usize) -> bool {
        let word = self.current[y * self.width + x / Self::CELLS_IN_CHUNK];
        (word >> (x % Self::CELLS_IN_CHUNK)) & 1 == 1
    }
}

impl LifeEngine for PackedEngine {
    fn new(rows: usize, cols: usize) -> Self {
        let width = cols.div_ceil(Self::CELLS_IN_CHUNK);
        let tail_mask = match cols % Self::CELLS_IN_CHUNK {
            0 => u64::MAX,
            r => (1u64 << r) - 1,
        };
        Self {
            rows,
            cols,
            width,
            tail_mask,
            current: vec![0; rows * width],
            next: vec![0; rows * width],
            blank_row: vec![0; width],
        }
    }

    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
    }

    fn load_grid(&mut self, grid: &Grid) -> Result<()> {
        if grid.rows() != self.rows || grid.cols() != self.cols {
            return Err(Error::DimensionMismatch {
                cols: self.cols,
                rows: self.rows,
                actual_cols: grid.cols(),
                actual_rows: grid.rows(),
            });
        }

        self.current.fill(0);
        for y in 0..self.rows {
            let words = &mut self.current[y * self.width..(y + 1) * self.width];
            for (x, _) in grid.row(y).iter().enumerate().filter(|(_, alive)| **alive) {
                words[x / Self::CELLS_IN_CHUNK] |= 1u64 << (x % Self::CELLS_IN_CHUNK);
            }
        }
        Ok(())
    }

    fn current_state(&self) -> Grid {
        let mut grid = Grid::new(self.rows, self.cols);
        for y in 0..self.rows {
            for (x, cell) in grid.row_mut(y).iter_mut().enumerate() {
                *cell = self.is_alive(x, y);
            }
        }
        grid
    }

    fn count_living_neighbors(&self, x: usize, y: usize) -> u8 {
        assert!(
            x < self.cols && y < self.rows,
            "cell ({x}, {y}) is outside the field"
        );

        let mut count = 0;
        for ny in y.saturating_sub(1)..=(y + 1).min(self.rows - 1) {
            for nx in x.saturating_sub(1)..=(x + 1).min(self.cols - 1) {
                if (nx, ny) != (x, y) && self.is_alive(nx, ny) {
                    count += 1;
                }
            }
        }
        count
    }

    fn compute_next_generation(&mut self) {
        let w = self.width;
        if w == 0 {
            return;
        }
        for y in 0..self.rows {
            let row_prev = match y {
                0 => &self.blank_row[..],
                _ => &self.current[(y - 1) * w..y * w],
            };
            let row_curr = &self.current[y * w..(y + 1) * w];
            let row_next = if y + 1 < self.rows {
                &self.current[(y + 1) * w..(y + 2) * w]
            } else {
                &self.blank_row[..]
            };
            let dst = &mut self.next[y * w..(y + 1) * w];
            Self::update_row(row_prev, row_curr, row_next, dst);
            dst[w - 1] &= self.tail_mask;
        }
    }

    fn commit_generation(&mut self) {
        std::mem::swap(&mut self.current, &mut self.next);
        trace!("committed generation");
    }

    fn bytes_total(&self) -> usize {
        (self.current.capacity() + self.next.capacity() + self.blank_row.capacity())
            * std::mem::size_of::<u64>()
    }
}
