use crate::{
    seed::SeedArgs,
    util::{print_population, status, Engine},
};
use anyhow::Result;
use clap::Args;
use gol_grid::{
    Config, Grid, GridEngine, LifeEngine, PackedEngine, PlaybackSpeed, Simulation,
    TerminalRenderer,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

#[derive(Args, Debug)]
pub(super) struct RunArgs {
    #[command(flatten)]
    seed: SeedArgs,

    /// Number of generations to play after the first one
    #[arg(short, long, default_value_t = Config::GENERATIONS)]
    generations: u64,

    /// Initial frames per second
    #[arg(
        short,
        long,
        default_value_t = Config::FPS_INIT,
        value_parser = clap::value_parser!(u32).range(Config::FPS_MIN as i64..=Config::FPS_MAX as i64)
    )]
    fps: u32,

    /// The engine to use for the simulation
    #[arg(short, long, value_enum, default_value_t = Engine::Grid)]
    engine: Engine,

    /// Print frames one after another instead of redrawing the screen
    #[arg(long)]
    no_clear: bool,
}

pub(super) fn run_simulation(args: RunArgs) -> Result<()> {
    let timer = std::time::Instant::now();
    let grid = args.seed.build_grid()?;
    status(&format!(
        "Seeded {}x{} grid in {:.3} secs",
        grid.cols(),
        grid.rows(),
        timer.elapsed().as_secs_f64()
    ));

    let speed = PlaybackSpeed::new(args.fps);
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;

    let timer = std::time::Instant::now();
    let result = runtime.block_on(async {
        tokio::spawn(read_speed_commands(speed.clone()));
        match args.engine {
            Engine::Grid => play::<GridEngine>(&grid, &args, &speed).await,
            Engine::Packed => play::<PackedEngine>(&grid, &args, &speed).await,
        }
    });
    // the stdin reader never finishes on its own
    runtime.shutdown_background();

    let last = result?;
    status(&format!(
        "Played {} generations in {:.1} secs",
        args.generations,
        timer.elapsed().as_secs_f64()
    ));
    print_population(&last)
}

/// Plays the animation and returns the last generation.
async fn play<E: LifeEngine>(grid: &Grid, args: &RunArgs, speed: &PlaybackSpeed) -> Result<Grid> {
    let mut engine = E::new(grid.rows(), grid.cols());
    engine.load_grid(grid)?;

    let renderer = TerminalRenderer::new(std::io::stdout(), !args.no_clear);
    let mut simulation = Simulation::new(engine, renderer);
    simulation.run(args.generations, speed).await?;
    Ok(simulation.engine().current_state())
}

/// Adjusts `speed` from stdin, one command per line.
async fn read_speed_commands(speed: PlaybackSpeed) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        match speed.apply(&line) {
            Ok(fps) => info!(fps, "playback speed changed"),
            Err(err) => warn!("{err}"),
        }
    }
}
