use anyhow::{anyhow, ensure, Context, Result};
use clap::Args;
use gol_grid::{Config, Grid, Orientation, Seeder, Shape};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(super) struct SeedArgs {
    /// File with the first generation: "x y" pairs, or RLE if the name ends in .rle
    #[arg(short, long)]
    seed: Option<PathBuf>,

    /// Plant a solid rectangle, given as X,Y,WIDTH,HEIGHT; clipped to the grid
    #[arg(long, value_parser = parse_rectangle)]
    rect: Vec<Shape>,

    /// Plant a glider, given as X,Y,DIRECTION with DIRECTION one of ne, nw, sw, se
    #[arg(long, value_parser = parse_glider)]
    glider: Vec<Shape>,

    /// Bring each cell to life with this probability
    #[arg(long)]
    random: Option<f64>,

    /// Seed for --random, the fill is different on every run without it
    #[arg(long)]
    rng_seed: Option<u64>,

    /// Number of rows of the grid
    #[arg(long, default_value_t = Config::ROWS)]
    rows: usize,

    /// Number of columns of the grid
    #[arg(long, default_value_t = Config::COLS)]
    cols: usize,
}

impl SeedArgs {
    /// Builds the first generation. Without any seeding option the classic
    /// start from [`Config::default_shapes`] is planted.
    pub(super) fn build_grid(&self) -> Result<Grid> {
        ensure!(
            self.rows > 0 && self.cols > 0,
            "Grid must have at least one row and one column"
        );

        let mut grid = Grid::new(self.rows, self.cols);
        let mut seeder = Seeder::new(&mut grid);

        if let Some(path) = &self.seed {
            seeder
                .load_from_file(path)
                .with_context(|| format!("Failed to load seed from {}", path.display()))?;
        }
        for shape in self.rect.iter().chain(&self.glider) {
            seeder
                .plant(shape)
                .with_context(|| format!("Failed to plant {shape:?}"))?;
        }
        if let Some(density) = self.random {
            seeder.plant(&Shape::Random {
                density,
                seed: self.rng_seed,
            })?;
        }

        let seeded = self.seed.is_some()
            || !self.rect.is_empty()
            || !self.glider.is_empty()
            || self.random.is_some();
        if !seeded {
            for shape in Config::default_shapes() {
                seeder.plant(&shape).with_context(|| {
                    format!(
                        "The default start does not fit a {}x{} grid, pass a seed",
                        self.cols, self.rows
                    )
                })?;
            }
        }
        Ok(grid)
    }
}

fn parse_numbers<const N: usize>(s: &str) -> Result<[usize; N]> {
    let parts = s.split(',').map(str::trim).collect::<Vec<_>>();
    ensure!(parts.len() == N, "expected {N} comma-separated values");
    let mut numbers = [0; N];
    for (number, part) in numbers.iter_mut().zip(parts) {
        *number = part
            .parse()
            .with_context(|| format!("\"{part}\" is not a non-negative integer"))?;
    }
    Ok(numbers)
}

fn parse_rectangle(s: &str) -> Result<Shape> {
    let [x, y, width, height] = parse_numbers(s)?;
    Ok(Shape::Rectangle {
        x,
        y,
        width,
        height,
    })
}

fn parse_glider(s: &str) -> Result<Shape> {
    let (position, direction) = s
        .rsplit_once(',')
        .ok_or_else(|| anyhow!("expected X,Y,DIRECTION"))?;
    let [x, y] = parse_numbers(position)?;
    let orientation = direction.trim().parse::<Orientation>()?;
    Ok(Shape::Glider { x, y, orientation })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rectangle() {
        assert_eq!(
            parse_rectangle("20, 20,5,20").unwrap(),
            Shape::Rectangle {
                x: 20,
                y: 20,
                width: 5,
                height: 20
            }
        );
        assert!(parse_rectangle("1,2,3").is_err());
        assert!(parse_rectangle("1,2,3,-4").is_err());
    }

    #[test]
    fn test_parse_glider() {
        assert_eq!(
            parse_glider("10,2,se").unwrap(),
            Shape::Glider {
                x: 10,
                y: 2,
                orientation: Orientation::SE
            }
        );
        assert!(parse_glider("10,2").is_err());
        assert!(parse_glider("10,2,up").is_err());
    }
}
