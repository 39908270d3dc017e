//! Raster canvas backend.
//!
//! Cells and guide lines live on two `Image` layers so that clearing a
//! dead cell never erases a guide; the guide layer is composited on top.
//! Guides drawn in the background color empty the guide layer instead of
//! painting over cells.

use std::cell::{Cell, RefCell};

use macroquad::prelude::{
    BLACK, BLANK, Color, FilterMode, Image, Texture2D, WHITE, draw_rectangle_lines, draw_texture,
};
use tracing::trace;

use super::surface::{BackendKind, Container, DrawingSurface, GridLines, PixelRect};

pub struct NativeSurface {
    container: Option<Container>,
    cells: Image,
    guides: Image,
    fill: Color,
    background: Color,
    outline: Color,
    border: bool,
    /// Bumped on every change to either layer
    revision: u64,
    /// GPU copy of the composited frame and the revision it shows
    texture: RefCell<Option<Texture2D>>,
    uploaded: Cell<Option<u64>>,
}

impl Default for NativeSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl NativeSurface {
    pub fn new() -> Self {
        Self {
            container: None,
            cells: Image::empty(),
            guides: Image::empty(),
            fill: BLACK,
            background: WHITE,
            outline: BLACK,
            border: false,
            revision: 0,
            texture: RefCell::new(None),
            uploaded: Cell::new(None),
        }
    }

    pub fn container(&self) -> Option<Container> {
        self.container
    }

    /// Visible color at a pixel
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let (width, height) = self.size();
        if x >= width || y >= height {
            return None;
        }
        let guide = self.guides.get_pixel(x, y);
        Some(if guide.a > 0.0 { guide } else { self.cells.get_pixel(x, y) })
    }

    /// Composited frame
    pub fn frame(&self) -> Image {
        let mut frame = self.cells.clone();
        let guides = self.guides.get_image_data();
        for (out, guide) in frame.get_image_data_mut().iter_mut().zip(guides) {
            if guide[3] > 0 {
                *out = *guide;
            }
        }
        frame
    }

    /// Whether the last presented texture is out of date
    pub fn needs_upload(&self) -> bool {
        self.uploaded.get() != Some(self.revision)
    }

    /// Clip `rect` to the surface, as half-open pixel ranges
    fn clip(&self, rect: PixelRect) -> Option<(u32, u32, u32, u32)> {
        let (width, height) = self.size();
        let x1 = rect.x.saturating_add(rect.width).min(width);
        let y1 = rect.y.saturating_add(rect.height).min(height);
        (rect.x < x1 && rect.y < y1).then_some((rect.x, rect.y, x1, y1))
    }

    fn paint(layer: &mut Image, (x0, y0, x1, y1): (u32, u32, u32, u32), color: Color) {
        for y in y0..y1 {
            for x in x0..x1 {
                layer.set_pixel(x, y, color);
            }
        }
    }

    fn fill_layer(layer: &mut Image, color: Color) {
        let rgba: [u8; 4] = color.into();
        layer.get_image_data_mut().fill(rgba);
    }

    fn touch(&mut self) {
        self.revision += 1;
    }
}

impl DrawingSurface for NativeSurface {
    fn kind(&self) -> BackendKind {
        BackendKind::Native
    }

    fn attach(&mut self, container: Container) {
        self.container = Some(container);
    }

    fn set_size(&mut self, width: u32, height: u32) {
        let width = width.min(u32::from(u16::MAX));
        let height = height.min(u32::from(u16::MAX));
        if (width, height) == self.size() {
            self.clear();
            return;
        }
        self.cells = Image::gen_image_color(width as u16, height as u16, self.background);
        self.guides = Image::gen_image_color(width as u16, height as u16, BLANK);
        self.touch();
    }

    fn size(&self) -> (u32, u32) {
        (self.cells.width() as u32, self.cells.height() as u32)
    }

    fn draw_grid_lines(&mut self, lines: GridLines) {
        let (width, height) = self.size();
        if width == 0 || height == 0 {
            return;
        }
        self.touch();
        if lines.color == self.background {
            Self::fill_layer(&mut self.guides, BLANK);
            return;
        }
        for i in 0..=lines.x_count as u32 {
            let x = i.saturating_mul(lines.x_gap).min(width - 1);
            Self::paint(&mut self.guides, (x, 0, x + 1, height), lines.color);
        }
        for j in 0..=lines.y_count as u32 {
            let y = j.saturating_mul(lines.y_gap).min(height - 1);
            Self::paint(&mut self.guides, (0, y, width, y + 1), lines.color);
        }
    }

    fn draw_cell(
        &mut self,
        rect: PixelRect,
        filled: bool,
        color: Option<Color>,
        stroke_outline: bool,
    ) {
        let Some((x0, y0, x1, y1)) = self.clip(rect) else {
            trace!(?rect, "cell outside canvas");
            return;
        };
        self.touch();
        let color = if filled { color.unwrap_or(self.fill) } else { self.background };
        Self::paint(&mut self.cells, (x0, y0, x1, y1), color);

        if stroke_outline {
            let outline = self.outline;
            Self::paint(&mut self.cells, (x0, y0, x1, y0 + 1), outline);
            Self::paint(&mut self.cells, (x0, y1 - 1, x1, y1), outline);
            Self::paint(&mut self.cells, (x0, y0, x0 + 1, y1), outline);
            Self::paint(&mut self.cells, (x1 - 1, y0, x1, y1), outline);
        }
    }

    fn clear(&mut self) {
        Self::fill_layer(&mut self.cells, self.background);
        Self::fill_layer(&mut self.guides, BLANK);
        self.touch();
    }

    fn set_border(&mut self, enabled: bool) {
        self.border = enabled;
    }

    fn has_border(&self) -> bool {
        self.border
    }

    fn present(&self, origin: (f32, f32)) {
        let (width, height) = self.size();
        if self.container.is_none() || width == 0 || height == 0 {
            return;
        }
        let mut cached = self.texture.borrow_mut();
        if self.needs_upload() {
            let frame = self.frame();
            let same_size = |texture: &Texture2D| {
                (texture.width(), texture.height()) == (width as f32, height as f32)
            };
            match cached.as_ref() {
                Some(texture) if same_size(texture) => texture.update(&frame),
                _ => {
                    let texture = Texture2D::from_image(&frame);
                    texture.set_filter(FilterMode::Nearest);
                    *cached = Some(texture);
                }
            }
            self.uploaded.set(Some(self.revision));
        }
        if let Some(texture) = cached.as_ref() {
            draw_texture(texture, origin.0, origin.1, WHITE);
        }
        if self.border {
            let (w, h) = (width as f32 + 2.0, height as f32 + 2.0);
            draw_rectangle_lines(origin.0 - 1.0, origin.1 - 1.0, w, h, 1.0, BLACK);
        }
    }
}
