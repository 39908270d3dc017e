mod button;
mod preset_picker;

pub use button::Button;
pub use preset_picker::PresetPicker;

use macroquad::prelude::{screen_height, screen_width};

use crate::input::Action;

pub const PANEL_WIDTH: f32 = 180.0;
pub const BUTTON_HEIGHT: f32 = 36.0;
const BUTTON_GAP: f32 = 8.0;
/// Top of the first button, below the preset picker
const BUTTONS_TOP: f32 = 80.0;

/// Buttons shown in the side panel, top to bottom
pub const PANEL_BUTTONS: [(Action, &str); 6] = [
    (Action::Start, "Start"),
    (Action::Stop, "Stop"),
    (Action::Step, "Step"),
    (Action::ToggleGuides, "Guides"),
    (Action::Randomize, "Random"),
    (Action::Clear, "Clear"),
];

/// X position where the panel starts (right side)
pub fn panel_x() -> f32 {
    screen_width() - PANEL_WIDTH
}

/// Width of the area left of the panel
pub fn stage_area_width() -> f32 {
    screen_width() - PANEL_WIDTH
}

pub fn stage_area_height() -> f32 {
    screen_height()
}

/// Panel buttons laid out from `panel_x`
pub fn create_buttons(panel_x: f32) -> Vec<(Action, Button)> {
    PANEL_BUTTONS
        .iter()
        .enumerate()
        .map(|(i, &(action, label))| {
            let y = BUTTONS_TOP + i as f32 * (BUTTON_HEIGHT + BUTTON_GAP);
            (action, Button::new(panel_x, y, PANEL_WIDTH, BUTTON_HEIGHT, label))
        })
        .collect()
}

/// Vertical position below the last button
pub fn buttons_bottom() -> f32 {
    BUTTONS_TOP + PANEL_BUTTONS.len() as f32 * (BUTTON_HEIGHT + BUTTON_GAP)
}
