mod events;
mod game_of_life;
mod timer;

pub use events::{Listener, SimulationEvent};
pub use game_of_life::{GameOfLife, SimulationState};
pub use timer::{AnimationTimer, TimerHandle};
