//! Drawing surface capability and backend selection.
//!
//! A [`DrawingSurface`] is the only thing the stage draws on. Two backends
//! exist: [`NativeSurface`](super::NativeSurface), a raster canvas, and
//! [`ElementSurface`](super::ElementSurface), a retained tree of positioned
//! rectangles used when the canvas is unavailable. The choice is made once
//! per process from the probed [`Capabilities`].

use std::fmt;
use std::sync::OnceLock;

use macroquad::prelude::Color;
use tracing::{info, warn};

use super::{ElementSurface, NativeSurface};
use crate::error::SurfaceError;

/// Environment variable listing backends to treat as unsupported
pub const DISABLE_SURFACES_ENV: &str = "GOL_DISABLE_SURFACES";

static CAPABILITIES: OnceLock<Capabilities> = OnceLock::new();

/// Area the surface is placed in, in screen pixels
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Container {
    pub width: f32,
    pub height: f32,
}

impl Container {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Pixel rectangle on a surface
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }
}

/// Guide line layout: `x_count + 1` vertical and `y_count + 1` horizontal lines
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLines {
    pub x_count: usize,
    pub y_count: usize,
    pub x_gap: u32,
    pub y_gap: u32,
    pub color: Color,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BackendKind {
    Native,
    Elements,
}

impl BackendKind {
    pub fn name(&self) -> &'static str {
        match self {
            BackendKind::Native => "native",
            BackendKind::Elements => "elements",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Operations every drawing backend supports.
///
/// Coordinates outside the surface are a caller error; implementations
/// clip rather than panic.
pub trait DrawingSurface {
    fn kind(&self) -> BackendKind;

    /// Place the surface inside its container
    fn attach(&mut self, container: Container);

    /// Resize the drawable area. Existing content is discarded.
    fn set_size(&mut self, width: u32, height: u32);

    fn size(&self) -> (u32, u32);

    /// Stroke every guide line in one pass
    fn draw_grid_lines(&mut self, lines: GridLines);

    /// Fill (or clear) one cell rectangle, optionally outlining it.
    /// `color` falls back to the surface's fill color.
    fn draw_cell(
        &mut self,
        rect: PixelRect,
        filled: bool,
        color: Option<Color>,
        stroke_outline: bool,
    );

    /// Wipe all cells and guides
    fn clear(&mut self);

    /// Frame drawn around the whole surface
    fn set_border(&mut self, enabled: bool);

    fn has_border(&self) -> bool;

    /// Draw onto the current macroquad frame with the top-left corner at `origin`.
    /// Needs an open window.
    fn present(&self, origin: (f32, f32));
}

/// What the runtime can draw with
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capabilities {
    pub native_canvas: bool,
    pub element_tree: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            native_canvas: true,
            element_tree: true,
        }
    }
}

impl Capabilities {
    /// Inspect the environment
    pub fn probe() -> Self {
        let disabled = std::env::var(DISABLE_SURFACES_ENV).unwrap_or_default();
        Self::without(&disabled)
    }

    /// All capabilities except those named in a comma separated list
    pub fn without(disabled: &str) -> Self {
        let mut caps = Self::default();
        for name in disabled.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            match name.to_ascii_lowercase().as_str() {
                "native" | "canvas" => caps.native_canvas = false,
                "elements" | "polyfill" => caps.element_tree = false,
                other => warn!(surface = other, "unknown surface name in {DISABLE_SURFACES_ENV}"),
            }
        }
        caps
    }

    /// Process-wide capabilities, probed on first use
    pub fn detect() -> Self {
        *CAPABILITIES.get_or_init(|| {
            let caps = Self::probe();
            info!(?caps, "probed drawing capabilities");
            caps
        })
    }

    /// Fix the process-wide capabilities before any stage is built.
    /// Returns the capabilities in force, which differ from `self` if a probe already ran.
    pub fn install(self) -> Self {
        if CAPABILITIES.set(self).is_err() {
            warn!("drawing capabilities were already fixed");
        }
        Self::detect()
    }

    /// Backend to use: the native canvas when possible, the element tree otherwise
    pub fn preferred(&self) -> Result<BackendKind, SurfaceError> {
        if self.native_canvas {
            Ok(BackendKind::Native)
        } else if self.element_tree {
            Ok(BackendKind::Elements)
        } else {
            Err(SurfaceError::BackendUnavailable)
        }
    }
}

/// Fresh, unattached surface of the given kind
pub fn create_surface(kind: BackendKind) -> Box<dyn DrawingSurface> {
    match kind {
        BackendKind::Native => Box::new(NativeSurface::new()),
        BackendKind::Elements => Box::new(ElementSurface::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefers_native() {
        assert_eq!(Capabilities::default().preferred(), Ok(BackendKind::Native));
    }

    #[test]
    fn test_falls_back_to_elements() {
        let caps = Capabilities::without("native");
        assert!(!caps.native_canvas);
        assert_eq!(caps.preferred(), Ok(BackendKind::Elements));
    }

    #[test]
    fn test_nothing_available() {
        let caps = Capabilities::without(" canvas , polyfill ");
        assert_eq!(caps.preferred(), Err(SurfaceError::BackendUnavailable));
    }

    #[test]
    fn test_unknown_names_are_ignored() {
        assert_eq!(Capabilities::without("webgl,"), Capabilities::default());
    }

    #[test]
    fn test_detect_is_stable() {
        assert_eq!(Capabilities::detect(), Capabilities::detect());
    }

    #[test]
    fn test_create_surface_kinds() {
        assert_eq!(create_surface(BackendKind::Native).kind(), BackendKind::Native);
        assert_eq!(create_surface(BackendKind::Elements).kind(), BackendKind::Elements);
    }
}
