mod cell;
mod grid;
mod patterns;
pub mod engine;

pub use cell::Cell;
pub use grid::{Grid, NEIGHBOR_OFFSETS};
pub use patterns::{Preset, PresetCatalog, presets};
pub use engine::{Census, GenerationStats, next_generation};
