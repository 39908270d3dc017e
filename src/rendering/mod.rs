mod element;
mod native;
pub mod panel;
mod stage;
mod surface;

pub use element::{Element, ElementKind, ElementSurface};
pub use native::NativeSurface;
pub use stage::{DEFAULT_CONTROLS_MARGIN, Stage};
pub use surface::{
    BackendKind, Capabilities, Container, DISABLE_SURFACES_ENV, DrawingSurface, GridLines,
    PixelRect, create_surface,
};
