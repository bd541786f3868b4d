mod run;
mod seed;
mod stats;
mod util;

use clap::{Parser, Subcommand};
use run::{run_simulation, RunArgs};
use stats::{run_stats, StatsArgs};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about)]
struct CLIParser {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand, Debug)]
enum Action {
    /// Play the simulation in the terminal; type '+', '-' or a number and Enter to change the speed
    Run(RunArgs),
    /// Seed a grid, optionally advance it headlessly, and print its population, bounds and hash
    Stats(StatsArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = CLIParser::parse();

    match args.action {
        Action::Run(args) => run_simulation(args),
        Action::Stats(args) => run_stats(args),
    }
}
