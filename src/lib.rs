#![warn(clippy::all)]

mod config;
mod driver;
mod engines;
mod error;
mod grid;
mod pattern;
mod render;
mod seeder;
mod speed;
mod traits;

pub use config::Config;
pub use driver::Simulation;
pub use engines::{GridEngine, PackedEngine};
pub use error::{Error, Result};
pub use grid::Grid;
pub use pattern::{Orientation, SeedFormat, Shape, GLIDER_PERIOD};
pub use render::{Renderer, TerminalRenderer};
pub use seeder::Seeder;
pub use speed::PlaybackSpeed;
pub use traits::LifeEngine;

pub type DefaultEngine = GridEngine;

pub const VERSION: &str = "0.1.0";
