use std::time::Duration;

use rand::Rng;
use serde_json::Value;
use tracing::{debug, info, trace};

use super::events::{Listener, SimulationEvent};
use super::timer::{AnimationTimer, TimerHandle};
use crate::config::{PresetOptions, StageConfig};
use crate::domain::{Cell, GenerationStats, Grid, next_generation};
use crate::error::SurfaceError;
use crate::rendering::{Container, Stage};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimulationState {
    Stopped,
    Running,
}

/// GameOfLife orchestrates the simulation.
///
/// It owns the board, the stage that shows it and the animation timer, and
/// publishes lifecycle events to registered listeners. Everything runs on
/// the caller's thread: the host loop feeds frame time through
/// [`tick`](GameOfLife::tick) and pointer input through the `pointer_*`
/// methods.
pub struct GameOfLife {
    grid: Grid,
    stage: Stage,
    config: StageConfig,
    timer: Option<AnimationTimer>,
    timers_started: u64,
    generation: u64,
    /// State applied to every cell touched by the current drag
    paint: Option<Cell>,
    listeners: Vec<Listener>,
}

impl GameOfLife {
    /// Create a stopped simulation with an empty board
    pub fn new(container: Container, config: StageConfig) -> Result<Self, SurfaceError> {
        let stage = Stage::new(container, config.sanitized())?;
        Ok(Self::with_stage(stage))
    }

    /// Create a stopped simulation on an existing stage, sized by its configuration
    pub fn with_stage(stage: Stage) -> Self {
        let config = stage.config().sanitized();
        let mut game = Self {
            grid: Grid::new(config.n_x_cells, config.n_y_cells),
            stage,
            config,
            timer: None,
            timers_started: 0,
            generation: 0,
            paint: None,
            listeners: Vec::new(),
        };
        game.stage.repaint(&game.grid, &game.config);
        game
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// Host-side layout changes
    pub fn set_container(&mut self, container: Container) {
        self.stage.set_container(container);
    }

    /// Generations since the last start or stop
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn state(&self) -> SimulationState {
        if self.timer.is_some() {
            SimulationState::Running
        } else {
            SimulationState::Stopped
        }
    }

    pub fn is_running(&self) -> bool {
        self.state() == SimulationState::Running
    }

    pub fn active_timer(&self) -> Option<TimerHandle> {
        self.timer.as_ref().map(AnimationTimer::handle)
    }

    /// Register a listener; listeners run in registration order
    pub fn subscribe(&mut self, listener: impl FnMut(&SimulationEvent, &GameOfLife) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn emit(&mut self, event: SimulationEvent) {
        trace!(event = event.name(), "emitting");
        let mut listeners = std::mem::take(&mut self.listeners);
        for listener in listeners.iter_mut() {
            listener(&event, self);
        }
        self.listeners = listeners;
    }

    /// Advance one generation
    pub fn step(&mut self) {
        self.generation += 1;
        let (next, census) = next_generation(&self.grid);
        self.grid = next;
        self.stage.repaint(&self.grid, &self.config);

        let stats = GenerationStats::new(self.grid.clone(), census, self.generation);
        debug!(gen_no = stats.gen_no, alive = stats.alive, dead = stats.dead, "generation");

        if census.is_extinct() {
            self.emit(SimulationEvent::Stepped(stats.clone()));
            info!(gen_no = stats.gen_no, "all cells dead");
            self.emit(SimulationEvent::AllDead(stats));
            self.stop();
        } else {
            self.emit(SimulationEvent::Stepped(stats));
        }
    }

    /// Start stepping every `speed * 100` ms, replacing any running timer
    pub fn start(&mut self) {
        self.generation = 0;
        if let Some(previous) = self.timer.take() {
            debug!(timer = previous.handle().0, "replacing running timer");
        }
        self.emit(SimulationEvent::Started);

        self.timers_started += 1;
        let timer = AnimationTimer::new(TimerHandle(self.timers_started), self.config.period());
        info!(
            timer = self.timers_started,
            period_ms = timer.period().as_millis() as u64,
            "simulation started"
        );
        self.timer = Some(timer);
    }

    /// Cancel the timer. Safe to call when already stopped.
    pub fn stop(&mut self) {
        if let Some(timer) = self.timer.take() {
            info!(timer = timer.handle().0, "simulation stopped");
        }
        self.generation = 0;
        self.emit(SimulationEvent::Stopped);
    }

    /// Feed frame time to the timer; returns `true` if a generation ran
    pub fn tick(&mut self, delta: Duration) -> bool {
        let fired = self.timer.as_mut().is_some_and(|timer| timer.advance(delta));
        if fired {
            self.step();
        }
        fired
    }

    /// Apply configuration fields and an optional seed.
    /// Without a pattern the board starts empty.
    pub fn apply_preset(&mut self, mut options: PresetOptions) {
        let pattern = options.pattern.take();
        self.config = options.merge_into(self.config);

        let StageConfig { n_x_cells, n_y_cells, .. } = self.config;
        self.grid = match &pattern {
            Some(rows) => Grid::from_pattern(n_x_cells, n_y_cells, rows),
            None => Grid::new(n_x_cells, n_y_cells),
        };
        self.paint = None;
        self.stage.repaint(&self.grid, &self.config);
        info!(
            width = n_x_cells,
            height = n_y_cells,
            alive = self.grid.population(),
            "preset applied"
        );
    }

    /// Apply a preset given as JSON. Anything but an object is ignored.
    pub fn apply_preset_value(&mut self, value: &Value) -> bool {
        match PresetOptions::from_value(value) {
            Some(options) => {
                self.apply_preset(options);
                true
            }
            None => {
                debug!("ignoring preset that is not an object");
                false
            }
        }
    }

    /// Replace the configuration while keeping the board.
    /// Cells outside new dimensions are dropped; a running timer picks up the new speed.
    pub fn set_config(&mut self, config: StageConfig) {
        let config = config.sanitized();
        if (config.n_x_cells, config.n_y_cells) != self.grid.dimensions() {
            let pattern = self.grid.to_pattern();
            self.grid = Grid::from_pattern(config.n_x_cells, config.n_y_cells, &pattern);
        }
        self.config = config;
        if let Some(timer) = self.timer.as_mut() {
            *timer = AnimationTimer::new(timer.handle(), config.period());
        }
        self.stage.repaint(&self.grid, &self.config);
    }

    /// Fill the board at random
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R, density: f64) {
        let (width, height) = self.grid.dimensions();
        self.grid = Grid::random(width, height, density, rng);
        self.generation = 0;
        self.stage.repaint(&self.grid, &self.config);
    }

    /// Kill every cell
    pub fn clear(&mut self) {
        let (width, height) = self.grid.dimensions();
        self.grid = Grid::new(width, height);
        self.generation = 0;
        self.stage.repaint(&self.grid, &self.config);
    }

    /// Press at a surface-local position: flip the cell and start a drag
    pub fn pointer_down(&mut self, pos: (f32, f32)) {
        let Some((x, y)) = self.stage.cell_at(pos) else {
            trace!(?pos, "pointer down outside the board");
            return;
        };
        let paint = self.grid.get(x, y).unwrap_or_default().toggle();
        self.paint = Some(paint);
        self.paint_cell(x, y, paint);
    }

    /// Drag: give the cell under the pointer the gesture's paint state
    pub fn pointer_move(&mut self, pos: (f32, f32)) {
        let Some(paint) = self.paint else {
            return;
        };
        match self.stage.cell_at(pos) {
            Some((x, y)) => self.paint_cell(x, y, paint),
            None => trace!(?pos, "drag outside the board"),
        }
    }

    /// Release anywhere ends the gesture
    pub fn pointer_up(&mut self) {
        self.paint = None;
    }

    pub fn is_painting(&self) -> bool {
        self.paint.is_some()
    }

    fn paint_cell(&mut self, x: usize, y: usize, cell: Cell) {
        self.grid.set(x, y, cell);
        self.stage.draw_cell_at(x, y, cell.is_alive());
    }

    /// Draw the stage with its left edge at `left`
    pub fn present(&self, left: f32) {
        self.stage.present(left);
    }
}
