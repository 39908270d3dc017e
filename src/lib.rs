// Domain layer - board, rules and presets
pub mod domain;

// Configuration and errors
pub mod config;
pub mod error;

// Application layer - simulation control
pub mod application;

// Infrastructure layer - surfaces, panel, input
pub mod input;
pub mod rendering;
pub mod ui;

pub use application::{GameOfLife, SimulationEvent, SimulationState};
pub use config::{PresetOptions, StageConfig};
pub use domain::{Cell, GenerationStats, Grid, PresetCatalog, next_generation, presets};
pub use error::{ConfigError, SurfaceError};
pub use rendering::{Container, DrawingSurface, Stage};
