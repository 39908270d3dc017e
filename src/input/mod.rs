use macroquad::prelude::{
    KeyCode, MouseButton, is_key_pressed, is_mouse_button_down, is_mouse_button_pressed,
    is_mouse_button_released,
};
use rand::Rng;
use tracing::debug;

use crate::application::GameOfLife;
use crate::config::{SPEED_RANGE, StageConfig};
use crate::ui::Button;

/// Share of cells alive after a randomize
pub const RANDOM_DENSITY: f64 = 0.3;

/// Commands reachable from the keyboard and the panel
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    ToggleRunning,
    Start,
    Stop,
    Step,
    ToggleGuides,
    Randomize,
    Clear,
    /// Shorter delay between generations
    Faster,
    Slower,
}

impl Action {
    pub fn apply<R: Rng + ?Sized>(self, game: &mut GameOfLife, rng: &mut R) {
        debug!(action = ?self, "input action");
        match self {
            Action::ToggleRunning if game.is_running() => game.stop(),
            Action::ToggleRunning | Action::Start => game.start(),
            Action::Stop => game.stop(),
            Action::Step => game.step(),
            Action::ToggleGuides => {
                let config = *game.config();
                game.set_config(StageConfig { enable_guides: !config.enable_guides, ..config });
            }
            Action::Randomize => game.randomize(rng, RANDOM_DENSITY),
            Action::Clear => game.clear(),
            Action::Faster => adjust_speed(game, -1),
            Action::Slower => adjust_speed(game, 1),
        }
    }

    /// Start is only useful while stopped, Stop while running
    pub fn is_enabled(self, running: bool) -> bool {
        match self {
            Action::Start => !running,
            Action::Stop => running,
            _ => true,
        }
    }
}

fn adjust_speed(game: &mut GameOfLife, delta: i64) {
    let config = *game.config();
    let speed = (i64::from(config.speed) + delta).clamp(*SPEED_RANGE.start(), *SPEED_RANGE.end());
    if speed != i64::from(config.speed) {
        game.set_config(StageConfig { speed: speed as u32, ..config });
    }
}

const KEY_BINDINGS: [(KeyCode, Action); 7] = [
    (KeyCode::Space, Action::ToggleRunning),
    (KeyCode::N, Action::Step),
    (KeyCode::G, Action::ToggleGuides),
    (KeyCode::R, Action::Randomize),
    (KeyCode::C, Action::Clear),
    (KeyCode::Up, Action::Faster),
    (KeyCode::Down, Action::Slower),
];

/// Actions for keys pressed this frame
pub fn pressed_actions() -> Vec<Action> {
    KEY_BINDINGS
        .iter()
        .filter(|(key, _)| is_key_pressed(*key))
        .map(|&(_, action)| action)
        .collect()
}

/// Action of the panel button clicked this frame
pub fn clicked_action(buttons: &[(Action, Button)], mouse_pos: (f32, f32)) -> Option<Action> {
    buttons
        .iter()
        .find(|(_, button)| button.is_clicked(mouse_pos))
        .map(|&(action, _)| action)
}

/// Left mouse button transitions for one frame
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PointerState {
    pub pressed: bool,
    pub down: bool,
    pub released: bool,
}

impl PointerState {
    pub fn left() -> Self {
        Self {
            pressed: is_mouse_button_pressed(MouseButton::Left),
            down: is_mouse_button_down(MouseButton::Left),
            released: is_mouse_button_released(MouseButton::Left),
        }
    }
}

/// Feed one frame of pointer input to the stage. `local` is relative to the
/// surface's top-left corner. A press only starts a gesture when `can_press`
/// holds; a started gesture follows the pointer anywhere until release.
pub fn forward_pointer(
    game: &mut GameOfLife,
    state: PointerState,
    local: (f32, f32),
    can_press: bool,
) {
    if state.pressed {
        if can_press {
            game.pointer_down(local);
        }
    } else if state.down {
        game.pointer_move(local);
    }
    if state.released {
        game.pointer_up();
    }
}

/// Forward this frame's left-button drags to the stage. `origin` is the
/// surface's top-left corner on screen.
pub fn handle_pointer(
    game: &mut GameOfLife,
    origin: (f32, f32),
    mouse_pos: (f32, f32),
    can_press: bool,
) {
    let local = (mouse_pos.0 - origin.0, mouse_pos.1 - origin.1);
    forward_pointer(game, PointerState::left(), local, can_press);
}
