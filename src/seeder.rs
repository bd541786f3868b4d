use crate::{Error, Grid, Orientation, Result, SeedFormat, Shape};
use rand::{Rng, SeedableRng};
use std::path::Path;
use tracing::debug;

/// Populates a grid with the first generation.
///
/// Creating a seeder clears the grid, so every pattern is applied on top of a
/// blank field. Patterns are additive: they bring cells to life and never kill
/// a cell planted earlier, so the final state is the union of everything planted.
///
/// Out-of-range coordinates are rejected with [`Error::OutOfBounds`] for
/// explicit cells, gliders and seed sources; a call that fails plants nothing.
/// Rectangles are the exception and are clipped to the grid.
///
/// # Example
///
/// ```rust
/// use gol_grid::{Grid, Orientation, Seeder};
///
/// let mut grid = Grid::new(50, 50);
/// let mut seeder = Seeder::new(&mut grid);
/// seeder.load_from_source("0 0\n1 0\n").unwrap();
/// seeder.plant_rectangle(20, 20, 5, 20);
/// seeder.plant_glider(10, 2, Orientation::SE).unwrap();
/// assert_eq!(grid.population(), 2 + 5 * 20 + 5);
/// ```
pub struct Seeder<'a> {
    grid: &'a mut Grid,
}

impl<'a> Seeder<'a> {
    pub fn new(grid: &'a mut Grid) -> Self {
        let mut seeder = Self { grid };
        seeder.clear_all();
        seeder
    }

    /// The grid being seeded.
    pub fn grid(&self) -> &Grid {
        self.grid
    }

    /// Kills every cell.
    pub fn clear_all(&mut self) {
        self.grid.clear();
    }

    /// Brings every listed `(x, y)` cell to life.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] for the first cell outside the grid;
    /// nothing is planted in that case.
    pub fn plant_cells(&mut self, cells: &[(i64, i64)]) -> Result<()> {
        if let Some(&(x, y)) = cells.iter().find(|&&(x, y)| !self.grid.contains(x, y)) {
            return Err(self.out_of_bounds(x, y));
        }
        for &(x, y) in cells {
            self.grid.set(x as usize, y as usize, true);
        }
        Ok(())
    }

    /// Brings to life every cell of `[x, x + width) x [y, y + height)` that
    /// lies inside the grid.
    pub fn plant_rectangle(&mut self, x: usize, y: usize, width: usize, height: usize) {
        let end_x = x.saturating_add(width).min(self.grid.cols());
        let end_y = y.saturating_add(height).min(self.grid.rows());
        for row in y..end_y {
            for col in x..end_x {
                self.grid.set(col, row, true);
            }
        }
    }

    /// Plants a glider whose three-cell spine runs from `(x, y)` down to `(x, y + 2)`.
    /// The remaining two cells depend on `orientation`, see [`Orientation::glider_cells`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if any of the five cells would fall
    /// outside the grid; nothing is planted in that case.
    pub fn plant_glider(&mut self, x: usize, y: usize, orientation: Orientation) -> Result<()> {
        let cells = orientation
            .glider_cells()
            .map(|(dx, dy)| (x as i64 + dx, y as i64 + dy));
        self.plant_cells(&cells)
    }

    /// Brings each cell to life independently with probability `density`.
    /// A `seed` makes the result reproducible; without one the generator is
    /// seeded from the OS.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `density` is not within `[0, 1]`.
    pub fn plant_random(&mut self, density: f64, seed: Option<u64>) -> Result<()> {
        if !(0.0..=1.0).contains(&density) {
            return Err(Error::InvalidArgument(format!(
                "density must be within [0, 1], got {density}"
            )));
        }
        let mut rng = if let Some(x) = seed {
            rand_chacha::ChaCha8Rng::seed_from_u64(x)
        } else {
            rand_chacha::ChaCha8Rng::from_os_rng()
        };
        for y in 0..self.grid.rows() {
            for x in 0..self.grid.cols() {
                if rng.random_bool(density) {
                    self.grid.set(x, y, true);
                }
            }
        }
        Ok(())
    }

    /// Plants any [`Shape`].
    pub fn plant(&mut self, shape: &Shape) -> Result<()> {
        match *shape {
            Shape::Cells(ref cells) => self.plant_cells(cells),
            Shape::Rectangle {
                x,
                y,
                width,
                height,
            } => {
                self.plant_rectangle(x, y, width, height);
                Ok(())
            }
            Shape::Glider { x, y, orientation } => self.plant_glider(x, y, orientation),
            Shape::Random { density, seed } => self.plant_random(density, seed),
        }
    }

    /// Reads whitespace-separated `x y` pairs from `source` and brings each
    /// referenced cell to life.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] on a token that is not an integer or on a
    /// trailing `x` without its `y`, and [`Error::OutOfBounds`] if a pair is
    /// outside the grid. Nothing is planted when an error is returned.
    pub fn load_from_source(&mut self, source: &str) -> Result<()> {
        self.load_format(SeedFormat::Coordinates, source)
    }

    /// Same as [`Seeder::load_from_source`] for a pattern in RLE format,
    /// placed with its top-left corner at the origin.
    pub fn load_rle(&mut self, data: &str) -> Result<()> {
        self.load_format(SeedFormat::Rle, data)
    }

    pub fn load_format(&mut self, format: SeedFormat, data: &str) -> Result<()> {
        let cells = format.parse(data)?;
        self.plant_cells(&cells)?;
        debug!(?format, cells = cells.len(), "loaded seed");
        Ok(())
    }

    /// Reads a seed file, choosing the format with [`SeedFormat::from_path`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read, otherwise the errors of
    /// [`Seeder::load_format`].
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), bytes = data.len(), "read seed file");
        self.load_format(SeedFormat::from_path(path), &data)
    }

    fn out_of_bounds(&self, x: i64, y: i64) -> Error {
        Error::OutOfBounds {
            x,
            y,
            cols: self.grid.cols(),
            rows: self.grid.rows(),
        }
    }
}
