use crate::{Orientation, Shape};

/// Startup constants. The CLI can override the grid size, the generation
/// count and the initial speed; none of them change once a run has started.
pub struct Config;

impl Config {
    pub const ROWS: usize = 50;
    pub const COLS: usize = 50;

    /// Generations played by a run after the first frame.
    pub const GENERATIONS: u64 = 500;

    pub const FPS_MIN: u32 = 1;
    pub const FPS_MAX: u32 = 10;
    pub const FPS_INIT: u32 = 5;

    /// The first generation planted when no seed is given: a 5x20 block
    /// and a glider heading south-east.
    pub fn default_shapes() -> Vec<Shape> {
        vec![
            Shape::Rectangle {
                x: 20,
                y: 20,
                width: 5,
                height: 20,
            },
            Shape::Glider {
                x: 10,
                y: 2,
                orientation: Orientation::SE,
            },
        ]
    }
}
