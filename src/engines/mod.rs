mod grid_engine;
mod packed_engine;

pub use grid_engine::GridEngine;
pub use packed_engine::PackedEngine;
