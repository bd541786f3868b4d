use anyhow::Result;
use chrono::Local;
use clap::ValueEnum;
use gol_grid::Grid;
use num_format::{CustomFormat, Grouping, ToFormattedString};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(super) enum Engine {
    /// One boolean per cell, neighbors counted directly
    Grid,
    /// 64 cells per word, updated with bitwise operations
    Packed,
}

/// Formats `n` with `_` between groups of three digits.
pub(super) fn format_count(n: usize) -> Result<String> {
    let fmt = CustomFormat::builder()
        .grouping(Grouping::Standard)
        .separator("_")
        .build()?;
    Ok(n.to_formatted_string(&fmt))
}

pub(super) fn print_population(grid: &Grid) -> Result<()> {
    println!("Population: {}", format_count(grid.population())?);
    Ok(())
}


/// Prints a progress line stamped with the local time.
pub(super) fn status(message: &str) {
    eprintln!("[{}] {message}", local_time());
}

fn local_time() -> String {
    Local::now().format("%Y-%m-%dT%H:%M:%S%.3f").to_string()
}
