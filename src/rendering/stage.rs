use macroquad::prelude::{BLACK, Color, WHITE};
use tracing::info;

use super::surface::{
    BackendKind, Capabilities, Container, DrawingSurface, GridLines, PixelRect, create_surface,
};
use crate::config::StageConfig;
use crate::domain::Grid;
use crate::error::SurfaceError;

/// Height kept free for the controls around the stage when centering it
pub const DEFAULT_CONTROLS_MARGIN: f32 = 80.0;

const GUIDE_COLOR: Color = BLACK;
/// Guides "drawn" in the background color are erased
const ERASED_GUIDE_COLOR: Color = WHITE;

/// Stage maps grid coordinates onto a drawing surface and keeps the
/// surface sized and positioned for the active configuration.
pub struct Stage {
    surface: Box<dyn DrawingSurface>,
    config: StageConfig,
    container: Container,
    top: f32,
    controls_margin: f32,
}

impl Stage {
    /// Build a stage on the best backend the process supports
    pub fn new(container: Container, config: StageConfig) -> Result<Self, SurfaceError> {
        Self::with_capabilities(container, config, Capabilities::detect())
    }

    /// Build a stage on the best backend `caps` allows
    pub fn with_capabilities(
        container: Container,
        config: StageConfig,
        caps: Capabilities,
    ) -> Result<Self, SurfaceError> {
        let kind = caps.preferred()?;
        info!(backend = %kind, "creating stage");
        Ok(Self::with_surface(container, config, create_surface(kind)))
    }

    /// Build a stage on an explicit surface
    pub fn with_surface(
        container: Container,
        config: StageConfig,
        mut surface: Box<dyn DrawingSurface>,
    ) -> Self {
        surface.attach(container);
        let mut stage = Self {
            surface,
            config,
            container,
            top: 0.0,
            controls_margin: DEFAULT_CONTROLS_MARGIN,
        };
        stage.resize();
        stage
    }

    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    pub fn surface(&self) -> &dyn DrawingSurface {
        self.surface.as_ref()
    }

    pub fn backend(&self) -> BackendKind {
        self.surface.kind()
    }

    pub fn container(&self) -> Container {
        self.container
    }

    /// Vertical offset of the surface inside its container
    pub fn top(&self) -> f32 {
        self.top
    }

    /// Paint one cell
    pub fn draw_cell_at(&mut self, x: usize, y: usize, alive: bool) {
        let StageConfig { cell_w, cell_h, .. } = self.config;
        let rect = PixelRect::new(x as u32 * cell_w, y as u32 * cell_h, cell_w, cell_h);
        // Without guides each cell carries its own outline.
        self.surface.draw_cell(rect, alive, None, !self.config.enable_guides);
    }

    /// Paint every cell, row by row
    pub fn draw_all_cells(&mut self, grid: &Grid) {
        for (y, row) in grid.rows().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                self.draw_cell_at(x, y, cell.is_alive());
            }
        }
    }

    /// Draw or erase the guide lines; a border stands in for them when off
    pub fn toggle_guides(&mut self, enabled: bool) {
        let color = if enabled { GUIDE_COLOR } else { ERASED_GUIDE_COLOR };
        self.surface.draw_grid_lines(GridLines {
            x_count: self.config.n_x_cells,
            y_count: self.config.n_y_cells,
            x_gap: self.config.cell_w,
            y_gap: self.config.cell_h,
            color,
        });
        self.surface.set_border(!enabled);
    }

    /// Size the surface for the configured board, then re-center it
    pub fn resize(&mut self) {
        let (width, height) = self.config.pixel_size();
        self.surface.set_size(width, height);
        self.reposition();
    }

    /// Center the surface vertically when it is shorter than its container
    pub fn reposition(&mut self) {
        let height = self.surface.size().1 as f32;
        if height < self.container.height {
            self.top = ((self.container.height - height - self.controls_margin) / 2.0).round();
        }
    }

    /// Full refresh for a new board or configuration
    pub fn repaint(&mut self, grid: &Grid, config: &StageConfig) {
        self.config = *config;
        self.surface.clear();
        self.resize();
        self.toggle_guides(self.config.enable_guides);
        self.draw_all_cells(grid);
    }

    /// Cell under a surface-local pixel position
    pub fn cell_at(&self, (px, py): (f32, f32)) -> Option<(usize, usize)> {
        if !(px >= 0.0 && py >= 0.0) {
            return None;
        }
        let x = (px / self.config.cell_w as f32).floor() as usize;
        let y = (py / self.config.cell_h as f32).floor() as usize;
        (x < self.config.n_x_cells && y < self.config.n_y_cells).then_some((x, y))
    }

    pub fn set_container(&mut self, container: Container) {
        self.container = container;
        self.surface.attach(container);
        self.reposition();
    }

    pub fn set_controls_margin(&mut self, margin: f32) {
        self.controls_margin = margin;
        self.reposition();
    }

    /// Draw the surface with its left edge at `left`
    pub fn present(&self, left: f32) {
        self.surface.present((left, self.top));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Cell;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Debug, PartialEq)]
    enum Call {
        Attach,
        SetSize(u32, u32),
        Lines(GridLines),
        Cell(PixelRect, bool, bool),
        Clear,
        Border(bool),
    }

    struct RecordingSurface {
        calls: Rc<RefCell<Vec<Call>>>,
        size: (u32, u32),
        border: bool,
    }

    impl DrawingSurface for RecordingSurface {
        fn kind(&self) -> BackendKind {
            BackendKind::Elements
        }
        fn attach(&mut self, _container: Container) {
            self.calls.borrow_mut().push(Call::Attach);
        }
        fn set_size(&mut self, width: u32, height: u32) {
            self.size = (width, height);
            self.calls.borrow_mut().push(Call::SetSize(width, height));
        }
        fn size(&self) -> (u32, u32) {
            self.size
        }
        fn draw_grid_lines(&mut self, lines: GridLines) {
            self.calls.borrow_mut().push(Call::Lines(lines));
        }
        fn draw_cell(&mut self, rect: PixelRect, filled: bool, _: Option<Color>, stroke: bool) {
            self.calls.borrow_mut().push(Call::Cell(rect, filled, stroke));
        }
        fn clear(&mut self) {
            self.calls.borrow_mut().push(Call::Clear);
        }
        fn set_border(&mut self, enabled: bool) {
            self.border = enabled;
            self.calls.borrow_mut().push(Call::Border(enabled));
        }
        fn has_border(&self) -> bool {
            self.border
        }
        fn present(&self, _origin: (f32, f32)) {}
    }

    fn recorded(config: StageConfig, container: Container) -> (Stage, Rc<RefCell<Vec<Call>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let surface = RecordingSurface { calls: Rc::clone(&calls), size: (0, 0), border: false };
        let stage = Stage::with_surface(container, config, Box::new(surface));
        calls.borrow_mut().clear();
        (stage, calls)
    }

    fn config(n_x_cells: usize, n_y_cells: usize, enable_guides: bool) -> StageConfig {
        StageConfig {
            n_x_cells,
            n_y_cells,
            cell_w: 10,
            cell_h: 20,
            enable_guides,
            ..StageConfig::default()
        }
    }

    #[test]
    fn test_cell_rect_and_outline() {
        let (mut stage, calls) = recorded(config(4, 4, true), Container::new(100.0, 100.0));
        stage.draw_cell_at(2, 3, true);
        assert_eq!(calls.borrow()[0], Call::Cell(PixelRect::new(20, 60, 10, 20), true, false));

        let (mut stage, calls) = recorded(config(4, 4, false), Container::new(100.0, 100.0));
        stage.draw_cell_at(0, 1, false);
        assert_eq!(calls.borrow()[0], Call::Cell(PixelRect::new(0, 20, 10, 20), false, true));
    }

    #[test]
    fn test_draw_all_cells_row_major() {
        let (mut stage, calls) = recorded(config(2, 2, true), Container::new(100.0, 100.0));
        let mut grid = Grid::new(2, 2);
        grid.set(1, 0, Cell::Alive);
        stage.draw_all_cells(&grid);

        let rects: Vec<_> = calls
            .borrow()
            .iter()
            .map(|call| match call {
                Call::Cell(rect, alive, _) => (rect.x, rect.y, *alive),
                other => panic!("unexpected call {other:?}"),
            })
            .collect();
        assert_eq!(rects, vec![(0, 0, false), (10, 0, true), (0, 20, false), (10, 20, false)]);
    }

    #[test]
    fn test_toggle_guides() {
        let (mut stage, calls) = recorded(config(3, 2, true), Container::new(100.0, 100.0));
        stage.toggle_guides(true);
        stage.toggle_guides(false);
        let calls = calls.borrow();
        let lines = GridLines { x_count: 3, y_count: 2, x_gap: 10, y_gap: 20, color: BLACK };
        assert_eq!(calls[0], Call::Lines(lines));
        assert_eq!(calls[1], Call::Border(false));
        assert_eq!(calls[2], Call::Lines(GridLines { color: WHITE, ..lines }));
        assert_eq!(calls[3], Call::Border(true));
    }

    #[test]
    fn test_resize_and_reposition() {
        let (stage, _) = recorded(config(5, 4, true), Container::new(300.0, 400.0));
        assert_eq!(stage.surface().size(), (50, 80));
        // (400 - 80 - 80) / 2
        assert_eq!(stage.top(), 120.0);
    }

    #[test]
    fn test_tall_surface_is_not_moved() {
        let (stage, _) = recorded(config(5, 30, true), Container::new(300.0, 400.0));
        assert_eq!(stage.surface().size(), (50, 600));
        assert_eq!(stage.top(), 0.0);
    }

    #[test]
    fn test_controls_margin_is_adjustable() {
        let (mut stage, _) = recorded(config(5, 4, true), Container::new(300.0, 400.0));
        stage.set_controls_margin(0.0);
        assert_eq!(stage.top(), 160.0);
        stage.set_container(Container::new(300.0, 200.0));
        assert_eq!(stage.top(), 60.0);
    }

    #[test]
    fn test_repaint_sequence() {
        let (mut stage, calls) = recorded(config(2, 2, true), Container::new(100.0, 100.0));
        let next = config(1, 1, false);
        stage.repaint(&Grid::new(1, 1), &next);

        let calls = calls.borrow();
        assert_eq!(calls[0], Call::Clear);
        assert_eq!(calls[1], Call::SetSize(10, 20));
        assert!(matches!(calls[2], Call::Lines(GridLines { color, .. }) if color == WHITE));
        assert_eq!(calls[3], Call::Border(true));
        assert_eq!(calls[4], Call::Cell(PixelRect::new(0, 0, 10, 20), false, true));
        assert_eq!(calls.len(), 5);
        assert_eq!(*stage.config(), next);
    }

    #[test]
    fn test_no_backend_is_an_error() {
        let container = Container::new(100.0, 100.0);
        let caps = Capabilities::without("native,elements");
        let result = Stage::with_capabilities(container, StageConfig::default(), caps);
        assert!(matches!(result, Err(SurfaceError::BackendUnavailable)));
    }

    #[test]
    fn test_backend_follows_capabilities() {
        let container = Container::new(100.0, 100.0);
        let config = config(2, 2, true);
        let stage = Stage::with_capabilities(container, config, Capabilities::without("native"));
        assert_eq!(stage.map(|stage| stage.backend()).ok(), Some(BackendKind::Elements));
        let stage = Stage::with_capabilities(container, config, Capabilities::default());
        assert_eq!(stage.map(|stage| stage.backend()).ok(), Some(BackendKind::Native));
    }

    #[test]
    fn test_cell_at() {
        let (stage, _) = recorded(config(4, 3, true), Container::new(100.0, 100.0));
        assert_eq!(stage.cell_at((0.0, 0.0)), Some((0, 0)));
        assert_eq!(stage.cell_at((39.9, 59.9)), Some((3, 2)));
        assert_eq!(stage.cell_at((40.0, 10.0)), None);
        assert_eq!(stage.cell_at((5.0, 60.0)), None);
        assert_eq!(stage.cell_at((-1.0, 5.0)), None);
        assert_eq!(stage.cell_at((f32::NAN, 5.0)), None);
    }
}
