use crate::domain::GenerationStats;

use super::GameOfLife;

/// Lifecycle notifications published by [`GameOfLife`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SimulationEvent {
    Started,
    Stopped,
    Stepped(GenerationStats),
    AllDead(GenerationStats),
}

impl SimulationEvent {
    pub fn name(&self) -> &'static str {
        match self {
            SimulationEvent::Started => "started",
            SimulationEvent::Stopped => "stopped",
            SimulationEvent::Stepped(_) => "stepped",
            SimulationEvent::AllDead(_) => "all-dead",
        }
    }

    pub fn stats(&self) -> Option<&GenerationStats> {
        match self {
            SimulationEvent::Stepped(stats) | SimulationEvent::AllDead(stats) => Some(stats),
            SimulationEvent::Started | SimulationEvent::Stopped => None,
        }
    }
}

/// Callback receiving each event together with the controller that sent it
pub type Listener = Box<dyn FnMut(&SimulationEvent, &GameOfLife)>;
