//! Side panel: run state, generation statistics and the controls.

use std::time::Duration;

use macroquad::prelude::*;

use super::BackendKind;
use crate::application::{GameOfLife, SimulationEvent};
use crate::config::StageConfig;
use crate::input::Action;
use crate::ui::{Button, PANEL_WIDTH, PresetPicker, buttons_bottom, panel_x};

/// What the panel shows, fed from simulation events
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PanelState {
    pub gen_no: u64,
    pub alive: usize,
    pub dead: usize,
    /// Simulated time: generations times the configured delay
    pub elapsed: Duration,
    pub running: bool,
    pub all_dead: bool,
}

impl PanelState {
    pub fn record(&mut self, event: &SimulationEvent, game: &GameOfLife) {
        match event {
            SimulationEvent::Started => {
                self.running = true;
                self.all_dead = false;
            }
            SimulationEvent::Stopped => self.running = false,
            SimulationEvent::Stepped(stats) => {
                self.gen_no = stats.gen_no;
                self.alive = stats.alive;
                self.dead = stats.dead;
                self.elapsed = game.config().period() * stats.gen_no as u32;
            }
            SimulationEvent::AllDead(_) => self.all_dead = true,
        }
    }

    /// Zero the counters, as after loading a new board
    pub fn reset(&mut self) {
        *self = Self { running: self.running, ..Self::default() };
    }
}

/// Elapsed time as its two most significant non-zero units, e.g. `"1m 30s"`.
/// Anything under a second is `"0"`.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    let parts = [
        (secs / 86_400, "d"),
        (secs / 3_600 % 24, "h"),
        (secs / 60 % 60, "m"),
        (secs % 60, "s"),
    ];
    let shown: Vec<String> = parts
        .iter()
        .filter(|(value, _)| *value > 0)
        .map(|(value, unit)| format!("{value}{unit}"))
        .collect();
    match shown.len() {
        0 => "0".to_string(),
        n => shown[n.saturating_sub(2)..].join(" "),
    }
}

/// Format large numbers with K/M suffixes
pub fn format_number(n: usize) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        format!("{n}")
    }
}

fn draw_label(text: &str, x: f32, y: f32, size: f32, color: Color) {
    draw_text(text, x, y, size, color);
}

/// Draw the panel at the right edge of the screen
pub fn draw_panel(
    state: &PanelState,
    config: &StageConfig,
    backend: BackendKind,
    buttons: &[(Action, Button)],
    picker: &PresetPicker,
    mouse_pos: (f32, f32),
) {
    let px = panel_x();
    draw_rectangle(px, 0.0, PANEL_WIDTH, screen_height(), Color::from_rgba(30, 30, 30, 255));

    for (action, button) in buttons {
        button.draw(mouse_pos, action.is_enabled(state.running));
    }

    let value_color = Color::from_rgba(180, 180, 180, 255);
    let status = if state.running {
        ("Running", Color::from_rgba(0, 255, 0, 255))
    } else if state.all_dead {
        ("All dead", Color::from_rgba(255, 0, 0, 255))
    } else {
        ("Stopped", Color::from_rgba(255, 165, 0, 255))
    };

    let top = buttons_bottom() + 20.0;
    let generation = state.gen_no.to_string();
    let alive = format_number(state.alive);
    let dead = format_number(state.dead);
    let elapsed = format_elapsed(state.elapsed);
    let board = format!(
        "{}x{} @ {}x{}px",
        config.n_x_cells, config.n_y_cells, config.cell_w, config.cell_h
    );
    let speed = format!("{} ({} ms)", config.speed, config.period().as_millis());
    let labels: [(&str, &str, Color); 8] = [
        ("Status:", status.0, status.1),
        ("Generation:", generation.as_str(), Color::from_rgba(0, 255, 150, 255)),
        ("Alive:", alive.as_str(), value_color),
        ("Dead:", dead.as_str(), value_color),
        ("Elapsed:", elapsed.as_str(), value_color),
        ("Board:", board.as_str(), value_color),
        ("Speed:", speed.as_str(), value_color),
        ("Surface:", backend.name(), value_color),
    ];
    for (i, (name, value, color)) in labels.iter().enumerate() {
        let y = top + i as f32 * 36.0;
        draw_label(name, px + 5.0, y, 16.0, WHITE);
        draw_label(value, px + 5.0, y + 16.0, 15.0, *color);
    }

    let help_top = top + labels.len() as f32 * 36.0 + 10.0;
    let help = [
        "Drag: paint cells",
        "Space: start/stop",
        "N: step  G: guides",
        "R: random  C: clear",
        "Up/Down: speed",
    ];
    for (i, line) in help.iter().enumerate() {
        draw_label(line, px + 5.0, help_top + i as f32 * 14.0, 12.0, GRAY);
    }

    // Drawn last so the open menu covers the buttons
    picker.draw(mouse_pos);
}
