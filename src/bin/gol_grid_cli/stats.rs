use crate::{
    seed::SeedArgs,
    util::{format_count, print_population, status, Engine},
};
use anyhow::Result;
use clap::Args;
use gol_grid::{Grid, GridEngine, LifeEngine, PackedEngine};

#[derive(Args, Debug)]
pub(super) struct StatsArgs {
    #[command(flatten)]
    seed: SeedArgs,

    /// Advance the grid by this many generations before computing the stats
    #[arg(short, long, default_value_t = 0)]
    generations: u64,

    /// The engine used to advance the grid
    #[arg(short, long, value_enum, default_value_t = Engine::Grid)]
    engine: Engine,
}

pub(super) fn run_stats(args: StatsArgs) -> Result<()> {
    let grid = args.seed.build_grid()?;

    let timer = std::time::Instant::now();
    let (grid, bytes) = match args.engine {
        Engine::Grid => advance::<GridEngine>(&grid, args.generations)?,
        Engine::Packed => advance::<PackedEngine>(&grid, args.generations)?,
    };
    status(&format!(
        "Updated grid by {} generations in {:.3} secs",
        args.generations,
        timer.elapsed().as_secs_f64()
    ));

    println!("Size: {}x{}", grid.cols(), grid.rows());
    print_population(&grid)?;
    match grid.bounding_box() {
        Some([x0, y0, x1, y1]) => println!("Bounding box: ({x0}, {y0}) to ({x1}, {y1})"),
        None => println!("Bounding box: none, the grid is blank"),
    }
    println!("Hash: 0x{:016x}", grid.hash());
    println!("Memory: {} bytes", format_count(bytes)?);
    Ok(())
}

/// Returns the advanced grid and the engine's memory usage.
fn advance<E: LifeEngine>(grid: &Grid, generations: u64) -> Result<(Grid, usize)> {
    let mut engine = E::new(grid.rows(), grid.cols());
    engine.load_grid(grid)?;
    engine.update(generations);
    Ok((engine.current_state(), engine.bytes_total()))
}
