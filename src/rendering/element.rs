//! Retained element backend.
//!
//! Every guide line and cell is an absolutely positioned rectangle owned by
//! the surface. Cells are created once per rectangle and then only flip
//! their `alive` marker, so redrawing a cell never adds a second element.
//! Guides are kept apart from cells and drawn above them.

use std::collections::HashMap;

use macroquad::prelude::{BLACK, Color, WHITE, draw_rectangle, draw_rectangle_lines};

use super::surface::{BackendKind, Container, DrawingSurface, GridLines, PixelRect};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementKind {
    Guide,
    Cell,
}

/// One positioned rectangle
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Element {
    pub kind: ElementKind,
    pub rect: PixelRect,
    pub color: Color,
    pub alive: bool,
    pub outlined: bool,
}

pub struct ElementSurface {
    container: Option<Container>,
    width: u32,
    height: u32,
    border: bool,
    fill: Color,
    background: Color,
    cells: Vec<Element>,
    cell_index: HashMap<PixelRect, usize>,
    guides: Vec<Element>,
}

impl Default for ElementSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementSurface {
    pub fn new() -> Self {
        Self {
            container: None,
            width: 0,
            height: 0,
            border: false,
            fill: BLACK,
            background: WHITE,
            cells: Vec::new(),
            cell_index: HashMap::new(),
            guides: Vec::new(),
        }
    }

    pub fn container(&self) -> Option<Container> {
        self.container
    }

    /// Every element in paint order: cells, then guides
    pub fn children(&self) -> impl Iterator<Item = &Element> {
        self.cells.iter().chain(&self.guides)
    }

    pub fn guides(&self) -> &[Element] {
        &self.guides
    }

    pub fn cell(&self, rect: PixelRect) -> Option<&Element> {
        self.cell_index.get(&rect).map(|&idx| &self.cells[idx])
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn guide_count(&self) -> usize {
        self.guides.len()
    }

    fn push_guide(&mut self, rect: PixelRect, color: Color) {
        self.guides.push(Element {
            kind: ElementKind::Guide,
            rect,
            color,
            alive: false,
            outlined: false,
        });
    }
}

impl DrawingSurface for ElementSurface {
    fn kind(&self) -> BackendKind {
        BackendKind::Elements
    }

    fn attach(&mut self, container: Container) {
        self.container = Some(container);
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn draw_grid_lines(&mut self, lines: GridLines) {
        self.guides.clear();
        if lines.color == self.background {
            return;
        }
        for i in 0..=lines.x_count as u32 {
            let rect = PixelRect::new(i * lines.x_gap, 0, 1, self.height);
            self.push_guide(rect, lines.color);
        }
        for j in 0..=lines.y_count as u32 {
            let rect = PixelRect::new(0, j * lines.y_gap, self.width, 1);
            self.push_guide(rect, lines.color);
        }
    }

    fn draw_cell(
        &mut self,
        rect: PixelRect,
        filled: bool,
        color: Option<Color>,
        stroke_outline: bool,
    ) {
        let idx = match self.cell_index.get(&rect) {
            Some(&idx) => idx,
            None => {
                self.cells.push(Element {
                    kind: ElementKind::Cell,
                    rect,
                    color: self.fill,
                    alive: false,
                    outlined: false,
                });
                let idx = self.cells.len() - 1;
                self.cell_index.insert(rect, idx);
                idx
            }
        };
        let element = &mut self.cells[idx];
        element.alive = filled;
        element.outlined = stroke_outline;
        if let Some(color) = color {
            element.color = color;
        }
    }

    fn clear(&mut self) {
        self.cells.clear();
        self.cell_index.clear();
        self.guides.clear();
    }

    fn set_border(&mut self, enabled: bool) {
        self.border = enabled;
    }

    fn has_border(&self) -> bool {
        self.border
    }

    fn present(&self, origin: (f32, f32)) {
        if self.container.is_none() {
            return;
        }
        let (ox, oy) = origin;
        let (width, height) = (self.width as f32, self.height as f32);
        draw_rectangle(ox, oy, width, height, self.background);
        for element in self.children() {
            let r = element.rect;
            let (x, y, w, h) = (ox + r.x as f32, oy + r.y as f32, r.width as f32, r.height as f32);
            match element.kind {
                ElementKind::Guide => draw_rectangle(x, y, w, h, element.color),
                ElementKind::Cell => {
                    if element.alive {
                        draw_rectangle(x, y, w, h, element.color);
                    }
                    if element.outlined {
                        draw_rectangle_lines(x, y, w, h, 1.0, BLACK);
                    }
                }
            }
        }
        if self.border {
            draw_rectangle_lines(ox - 1.0, oy - 1.0, width + 2.0, height + 2.0, 1.0, BLACK);
        }
    }
}
