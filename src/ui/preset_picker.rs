use macroquad::prelude::*;

use crate::domain::PresetCatalog;

const PLACEHOLDER: &str = "Choose a preset";

/// Dropdown listing every catalog preset as "Category / Name"
#[derive(Clone, Debug)]
pub struct PresetPicker {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    entries: Vec<(String, String)>,
    selected: Option<usize>,
    is_open: bool,
}

impl PresetPicker {
    pub fn new(x: f32, y: f32, width: f32, catalog: &PresetCatalog) -> Self {
        let entries = catalog
            .names()
            .into_iter()
            .flat_map(|(category, names)| {
                names
                    .into_iter()
                    .map(move |name| (category.to_string(), name.to_string()))
            })
            .collect();
        Self {
            x,
            y,
            width,
            height: 30.0,
            entries,
            selected: None,
            is_open: false,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn item(&self, index: usize) -> Option<String> {
        self.entries
            .get(index)
            .map(|(category, name)| format!("{category} / {name}"))
    }

    /// Category and name of the current choice
    pub fn selected(&self) -> Option<(&str, &str)> {
        self.selected
            .and_then(|index| self.entries.get(index))
            .map(|(category, name)| (category.as_str(), name.as_str()))
    }

    /// Select by category and name; unknown entries leave the choice unchanged
    pub fn select(&mut self, category: &str, name: &str) -> bool {
        match self.entries.iter().position(|(c, n)| c == category && n == name) {
            Some(index) => {
                self.selected = Some(index);
                true
            }
            None => false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn close(&mut self) {
        self.is_open = false;
    }

    /// Update position for responsive layout
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    /// Whether a click at `mouse_pos` lands on the picker or its open menu
    pub fn covers(&self, mouse_pos: (f32, f32)) -> bool {
        self.is_hovered_main(mouse_pos)
            || (self.is_open && (0..self.entries.len()).any(|i| self.is_hovered_item(mouse_pos, i)))
    }

    pub fn draw(&self, mouse_pos: (f32, f32)) {
        draw_text("Preset", self.x, self.y - 5.0, 14.0, GRAY);

        let button_color = if self.is_hovered_main(mouse_pos) {
            Color::from_rgba(100, 149, 237, 255)
        } else {
            Color::from_rgba(70, 130, 180, 255)
        };
        draw_rectangle(self.x, self.y, self.width, self.height, button_color);
        draw_rectangle_lines(self.x, self.y, self.width, self.height, 2.0, WHITE);

        let font_size = 16.0;
        let current = self
            .selected
            .and_then(|index| self.item(index))
            .unwrap_or_else(|| PLACEHOLDER.to_string());
        let text = truncate(&current, self.width - 30.0, font_size);
        draw_text(&text, self.x + 5.0, self.y + 21.0, font_size, WHITE);
        draw_text("v", self.x + self.width - 18.0, self.y + 21.0, 14.0, WHITE);

        if !self.is_open {
            return;
        }
        let menu_height = self.entries.len() as f32 * self.height;
        draw_rectangle(
            self.x,
            self.y + self.height,
            self.width,
            menu_height,
            Color::from_rgba(30, 30, 30, 255),
        );
        for i in 0..self.entries.len() {
            let item_y = self.item_y(i);
            let item_color = if self.is_hovered_item(mouse_pos, i) {
                Color::from_rgba(100, 149, 237, 255)
            } else if Some(i) == self.selected {
                Color::from_rgba(50, 100, 150, 255)
            } else {
                Color::from_rgba(45, 45, 45, 255)
            };
            draw_rectangle(self.x, item_y, self.width, self.height, item_color);
            draw_rectangle_lines(
                self.x,
                item_y,
                self.width,
                self.height,
                1.0,
                Color::from_rgba(80, 80, 80, 255),
            );
            if let Some(item) = self.item(i) {
                let text = truncate(&item, self.width - 10.0, font_size);
                draw_text(&text, self.x + 5.0, item_y + 21.0, font_size, WHITE);
            }
        }
        draw_rectangle_lines(self.x, self.y + self.height, self.width, menu_height, 2.0, WHITE);
    }

    /// Handle clicks; returns `true` when a preset was picked.
    /// Picking the current entry again counts, so a preset can be reapplied.
    pub fn update(&mut self, mouse_pos: (f32, f32)) -> bool {
        if !is_mouse_button_pressed(MouseButton::Left) {
            return false;
        }
        if self.is_hovered_main(mouse_pos) {
            self.is_open = !self.is_open;
            return false;
        }
        if !self.is_open {
            return false;
        }
        self.is_open = false;
        match (0..self.entries.len()).find(|&i| self.is_hovered_item(mouse_pos, i)) {
            Some(index) => {
                self.selected = Some(index);
                true
            }
            None => false,
        }
    }

    fn item_y(&self, index: usize) -> f32 {
        self.y + self.height + index as f32 * self.height
    }

    fn is_hovered_main(&self, mouse_pos: (f32, f32)) -> bool {
        mouse_pos.0 >= self.x
            && mouse_pos.0 <= self.x + self.width
            && mouse_pos.1 >= self.y
            && mouse_pos.1 <= self.y + self.height
    }

    fn is_hovered_item(&self, mouse_pos: (f32, f32), index: usize) -> bool {
        let item_y = self.item_y(index);
        mouse_pos.0 >= self.x
            && mouse_pos.0 <= self.x + self.width
            && mouse_pos.1 >= item_y
            && mouse_pos.1 <= item_y + self.height
    }
}

/// Shorten `text` with an ellipsis until it fits `max_width`
fn truncate(text: &str, max_width: f32, font_size: f32) -> String {
    if measure_text(text, None, font_size as u16, 1.0).width <= max_width {
        return text.to_string();
    }
    let mut truncated = text.to_string();
    while !truncated.is_empty()
        && measure_text(&format!("{truncated}..."), None, font_size as u16, 1.0).width > max_width
    {
        truncated.pop();
    }
    format!("{truncated}...")
}
